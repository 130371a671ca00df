use super::*;

#[test]
fn a4_grid_is_centered_row_major() {
    let cells = a4_grid_cells();
    assert_eq!(cells.len(), 12);
    assert_eq!(cells[0], Point::new(6.0, 16.5));
    assert_eq!(cells[1], Point::new(72.0, 16.5));
    assert_eq!(cells[3], Point::new(6.0, 82.5));
    assert_eq!(cells[11], Point::new(138.0, 214.5));
}

#[test]
fn overflowing_grid_is_not_rejected() {
    let cells = grid_cells(100.0, 100.0, 66.0, 3, 4);
    assert_eq!(cells.len(), 12);
    assert!(cells[0].x < 0.0 && cells[0].y < 0.0);
}

#[test]
fn guides_are_concentric_at_mm_scale() {
    let g = single_badge_guides(66.0);
    assert_eq!(g.design, Rect::new(8.0, 8.0, 58.0, 58.0));
    assert_eq!(g.die_cut, Rect::new(2.5, 2.5, 63.5, 63.5));
    assert_eq!(g.rotary, Rect::new(0.0, 0.0, 66.0, 66.0));
    for kind in GuideKind::ALL {
        assert_eq!(g.get(kind).center(), Point::new(33.0, 33.0));
        assert_eq!(g.get(kind).width(), kind.size_mm());
    }
}

#[test]
fn guides_scale_to_pixels() {
    let g = single_badge_guides(660.0);
    assert!((g.design.width() - 500.0).abs() < 1e-9);
    assert!((g.die_cut.width() - 610.0).abs() < 1e-9);
    assert_eq!(g.rotary.width(), 660.0);
}

#[test]
fn translated_guides_follow_cell_origin() {
    let g = single_badge_guides(66.0).translated(Point::new(6.0, 16.5));
    assert_eq!(g.rotary, Rect::new(6.0, 16.5, 72.0, 82.5));
}

#[test]
fn overlay_colors() {
    assert_eq!(GuideKind::Design.overlay_rgb(), Rgb8::from_hex("#e53e3e").unwrap());
    assert_eq!(GuideKind::DieCut.overlay_rgb(), Rgb8::from_hex("#38a169").unwrap());
    assert_eq!(GuideKind::Rotary.overlay_rgb(), Rgb8::from_hex("#3182ce").unwrap());
}
