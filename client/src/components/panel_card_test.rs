use super::*;

#[test]
fn panel_alt_is_one_based() {
    assert_eq!(panel_alt(0), "Panel 1");
    assert_eq!(panel_alt(5), "Panel 6");
}
