use super::*;

#[test]
fn print_constants_match_template_pixels() {
    assert_eq!(mm_to_whole_px(BADGE_MM), 779);
    assert_eq!(mm_to_whole_px(DIE_CUT_MM), 720);
    assert_eq!(mm_to_whole_px(DESIGN_MM), 590);
    assert_eq!(BadgeFrame::print().size_px, 779);
    assert_eq!(SLOT_COUNT, 12);
}

#[test]
fn print_area_uses_whole_pixel_badge() {
    let frame = BadgeFrame::print();
    let area = frame.area_px(8.0);
    assert!((frame.margin_px(8.0) - 94.488).abs() < 1e-9);
    assert!((area - (779.0 - 2.0 * 8.0 * 11.811)).abs() < 1e-9);
}

#[test]
fn scaled_frames_keep_margin_proportional() {
    let thumb = BadgeFrame::thumbnail();
    let ratio = thumb.margin_px(8.0) / f64::from(thumb.size_px);
    assert!((ratio - 8.0 / 66.0).abs() < 1e-12);
    assert!(BadgeFrame::with_size_px(0).validate().is_err());
}
