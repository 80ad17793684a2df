//! One comic panel: spinner while pending, then image and caption.

#[cfg(test)]
#[path = "panel_card_test.rs"]
mod panel_card_test;

use leptos::prelude::*;

use crate::state::comic::ComicState;

/// Alt text for the panel at zero-based `index`.
pub fn panel_alt(index: usize) -> String {
    format!("Panel {}", index + 1)
}

/// Panel card reading its image and caption from the shared comic state.
#[component]
pub fn PanelCard(index: usize) -> impl IntoView {
    let comic = expect_context::<RwSignal<ComicState>>();

    let panel = move || comic.with(|s| s.panels.get(index).cloned());
    let image_url = move || panel().and_then(|p| p.image_url);
    let caption = move || panel().map(|p| p.caption).unwrap_or_default();

    view! {
        <div class="comic-panel">
            <div class="comic-panel__frame">
                {move || match image_url() {
                    Some(url) => view! {
                        <img class="comic-panel__image" src=url alt=panel_alt(index)/>
                    }
                    .into_any(),
                    None => view! {
                        <div class="comic-panel__pending">
                            <div class="comic-panel__spinner"></div>
                        </div>
                    }
                    .into_any(),
                }}
            </div>
            <Show when=move || image_url().is_some()>
                <div class="comic-panel__caption">{caption}</div>
            </Show>
        </div>
    }
}
