//! Comic creator page: prompt input, generate button, and panel grid.
//!
//! ARCHITECTURE
//! ============
//! Clicking generate calls `ComicState::begin` on the shared signal, then
//! hands the prompt to `run_generation` on a local task. Every progress
//! event flows back through `ComicState::apply`, and the view re-renders
//! from the signal.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::footer::Footer;
use crate::components::panel_card::PanelCard;
use crate::state::comic::{ComicEvent, ComicState};

pub const PROMPT_MAX_LEN: usize = 50;
pub const PROMPT_PLACEHOLDER: &str = "Enter a short prompt (e.g. 'adventure on a boat')";

pub fn button_label(loading: bool) -> &'static str {
    if loading { "Creating Your Comic..." } else { "\u{2728} Generate Comic \u{2728}" }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let comic = expect_context::<RwSignal<ComicState>>();

    let loading = move || comic.with(ComicState::is_loading);
    let error_message = move || comic.with(|s| s.error_message.clone());
    let panel_count = move || comic.with(|s| s.panels.len());

    let on_generate = move |_: leptos::ev::MouseEvent| {
        let mut started = None;
        comic.update(|s| started = s.begin());
        let Some(prompt) = started else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = crate::net::api::HttpComicApi;
            let outcome =
                crate::net::generation::run_generation(&api, &prompt, move |event| comic.update(|s| s.apply(event)))
                    .await;
            log::info!("generation finished: {outcome:?}");
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = prompt;
    };

    view! {
        <div class="comic-page">
            <header class="comic-header">
                <h1 class="comic-header__title">"AI COMIC CREATOR"</h1>
                <p class="comic-header__subtitle">
                    "Transform your ideas into comic stories about mini-golden doodle Lily \u{1f436}!"
                </p>
            </header>

            <main class="comic-main">
                <div class="prompt-card">
                    <textarea
                        class="prompt-card__input"
                        placeholder=PROMPT_PLACEHOLDER
                        maxlength=PROMPT_MAX_LEN.to_string()
                        prop:value=move || comic.with(|s| s.prompt_text.clone())
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            comic.update(|s| s.apply(ComicEvent::PromptChanged(text)));
                        }
                    ></textarea>
                    <button class="prompt-card__button" disabled=loading on:click=on_generate>
                        {move || button_label(loading())}
                    </button>
                    <Show when=move || error_message().is_some()>
                        <div class="prompt-card__error">{move || error_message().unwrap_or_default()}</div>
                    </Show>
                </div>

                <Show when=move || panel_count() != 0>
                    <div class="comic-grid">
                        <For
                            each=move || 0..panel_count()
                            key=|index| *index
                            children=move |index| view! { <PanelCard index=index/> }
                        />
                    </div>
                </Show>
            </main>

            <Footer/>
        </div>
    }
}
