use super::*;

#[test]
fn copyright_prefix_formats_year() {
    assert_eq!(copyright_prefix(2025), "© 2025 made in ");
}

#[test]
fn current_year_is_plausible() {
    let year = current_year();
    assert!((2024..3000).contains(&year));
}
