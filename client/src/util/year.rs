//! Current calendar year for the footer.
//!
//! The browser reads its own clock through `js_sys::Date`; the server render
//! uses `time` in UTC.

#[cfg(test)]
#[path = "year_test.rs"]
mod year_test;

pub fn current_year() -> i32 {
    #[cfg(feature = "hydrate")]
    {
        i32::try_from(js_sys::Date::new_0().get_full_year()).unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        time::OffsetDateTime::now_utc().year()
    }
}

/// Footer copyright prefix, e.g. `© 2025 made in `.
pub fn copyright_prefix(year: i32) -> String {
    format!("\u{a9} {year} made in ")
}
