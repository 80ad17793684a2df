//! Static page footer with course credits.

use leptos::prelude::*;

use crate::util::year::{copyright_prefix, current_year};

pub const SUNDAI_URL: &str = "https://sundai.club";
pub const COURSE_URL: &str = "https://iap.sundai.club";

#[component]
pub fn Footer() -> impl IntoView {
    let prefix = copyright_prefix(current_year());

    view! {
        <footer class="footer">
            <p class="footer__text">
                {prefix}
                <a class="footer__link" href=SUNDAI_URL target="_blank" rel="noopener noreferrer">
                    "sundai.club"
                </a>
                " for MIT course 6.S093 "
                <a class="footer__link" href=COURSE_URL target="_blank" rel="noopener noreferrer">
                    "How to Ship Almost Anything with AI"
                </a>
            </p>
        </footer>
    }
}
