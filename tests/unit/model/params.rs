use super::*;

#[test]
fn crop_rect_matches_edge_percentages() {
    let crop = CropFraction {
        top: 50.0,
        ..CropFraction::NONE
    };
    assert_eq!(crop.crop_rect(200.0, 200.0), Rect::new(0.0, 100.0, 200.0, 200.0));

    let crop = CropFraction {
        top: 10.0,
        bottom: 20.0,
        left: 25.0,
        right: 25.0,
    };
    let r = crop.crop_rect(400.0, 100.0);
    assert_eq!((r.x0, r.y0), (100.0, 10.0));
    assert!((r.width() - 200.0).abs() < 1e-9);
    assert!((r.height() - 70.0).abs() < 1e-9);
}

#[test]
fn crop_validity_rejects_degenerate_sums() {
    assert!(CropFraction::NONE.is_valid());
    let bad = CropFraction {
        left: 60.0,
        right: 40.0,
        ..CropFraction::NONE
    };
    assert!(!bad.is_valid());
    let negative = CropFraction {
        top: -1.0,
        ..CropFraction::NONE
    };
    assert!(!negative.is_valid());
}

#[test]
fn fit_mode_base_scales() {
    assert_eq!(FitMode::Cover.base_scale(200.0, 100.0, 100.0), 1.0);
    assert_eq!(FitMode::Contain.base_scale(200.0, 100.0, 100.0), 0.5);
    assert_eq!(FitMode::Fill.base_scale(200.0, 100.0, 100.0), 0.5);
    assert_eq!(FitMode::Fill.base_scale(100.0, 400.0, 100.0), 1.0);
}

#[test]
fn zoom_factor_combines_scale_and_fine_zoom() {
    let t = Transform {
        scale: 150.0,
        fine_zoom: 50.0,
        ..Transform::default()
    };
    assert!((t.zoom_factor() - 0.75).abs() < 1e-12);
    assert_eq!(Transform::default().zoom_factor(), 1.0);
}

#[test]
fn clamped_transform_pulls_values_into_range() {
    let t = Transform {
        scale: 900.0,
        fine_zoom: 1.0,
        offset_x: -80.0,
        rotation: f64::NAN,
        crop: CropFraction {
            top: 70.0,
            bottom: 40.0,
            ..CropFraction::NONE
        },
        ..Transform::default()
    }
    .clamped();
    assert_eq!(t.scale, 500.0);
    assert_eq!(t.fine_zoom, 10.0);
    assert_eq!(t.offset_x, -50.0);
    assert_eq!(t.rotation, 0.0);
    assert!(t.crop.is_none());
    t.validate().unwrap();
}

#[test]
fn adjustments_validate_and_clamp() {
    let adj = Adjustments {
        contrast: 259,
        ..Adjustments::default()
    };
    assert!(adj.validate().is_err());
    assert_eq!(adj.clamped().contrast, 100);
    assert!(Adjustments::default().is_color_neutral());
    assert_eq!(Adjustments::default().corner_radius, 8.0);
}

#[test]
fn partial_json_fills_defaults() {
    let params: RenderParameters =
        serde_json::from_str(r#"{"transform":{"fit_mode":"contain","rotation":15},"margin_mm":4}"#)
            .unwrap();
    assert_eq!(params.transform.fit_mode, FitMode::Contain);
    assert_eq!(params.transform.rotation, 15.0);
    assert_eq!(params.transform.scale, 100.0);
    assert_eq!(params.adjustments, Adjustments::default());
    params.validate().unwrap();
}
