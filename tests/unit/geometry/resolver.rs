use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn contain_without_crop_fits_and_is_centered() {
    for (w, h) in [(1.0, 1.0), (1000.0, 1.0), (3.0, 4000.0), (640.0, 480.0), (77.0, 77.0)] {
        let p = resolve(&ResolveInput {
            fit_mode: FitMode::Contain,
            ..ResolveInput::new(w, h, 150.0)
        });
        assert!(p.dest.x0 >= -1e-9 && p.dest.y0 >= -1e-9, "{w}x{h}: {:?}", p.dest);
        assert!(p.dest.x1 <= 150.0 + 1e-9 && p.dest.y1 <= 150.0 + 1e-9, "{w}x{h}: {:?}", p.dest);
        assert!(approx(p.dest.center().x, 75.0) && approx(p.dest.center().y, 75.0));
        assert!(approx(p.dest.width().max(p.dest.height()), 150.0));
    }
}

#[test]
fn cropping_never_changes_the_apparent_zoom() {
    let crops = [
        CropFraction::NONE,
        CropFraction {
            top: 50.0,
            ..CropFraction::NONE
        },
        CropFraction {
            top: 5.0,
            bottom: 30.0,
            left: 12.5,
            right: 60.0,
        },
    ];
    for fit_mode in [FitMode::Cover, FitMode::Contain, FitMode::Fill] {
        let ratios: Vec<f64> = crops
            .iter()
            .map(|&crop| {
                let p = resolve(&ResolveInput {
                    crop,
                    fit_mode,
                    zoom: 1.17,
                    ..ResolveInput::new(800.0, 500.0, 590.0)
                });
                p.dest.width() / p.src.width()
            })
            .collect();
        for r in &ratios {
            assert!(approx(*r, ratios[0]), "{fit_mode:?}: {ratios:?}");
        }
    }
}

#[test]
fn single_badge_cover_scenario() {
    let area = 779.0 - 2.0 * 8.0 * 11.811;
    let p = resolve(&ResolveInput::new(1000.0, 1000.0, area));
    assert_eq!(p.src, Rect::new(0.0, 0.0, 1000.0, 1000.0));
    assert!(approx(p.dest.width(), area));
    assert!(approx(p.dest.height(), area));
    assert!(approx(p.dest.x0, 0.0) && approx(p.dest.y0, 0.0));

    let margin = 8.0 * 11.811;
    let on_canvas = p.dest_at(margin, margin);
    assert!(approx(on_canvas.x0, margin) && approx(on_canvas.y0, margin));
}

#[test]
fn top_half_crop_scales_from_original_size() {
    let p = resolve(&ResolveInput {
        crop: CropFraction {
            top: 50.0,
            ..CropFraction::NONE
        },
        ..ResolveInput::new(200.0, 200.0, 100.0)
    });
    assert_eq!(p.src, Rect::new(0.0, 100.0, 200.0, 200.0));
    assert!(approx(p.total_scale, 0.5));
    assert!(approx(p.dest.height(), 50.0));
    assert!(approx(p.dest.width(), 100.0));
    assert!(approx(p.dest.y0, 25.0));
}

#[test]
fn zoom_and_offset_move_the_destination() {
    let p = resolve(&ResolveInput {
        zoom: 2.0,
        offset_x_percent: 10.0,
        offset_y_percent: -20.0,
        ..ResolveInput::new(100.0, 100.0, 100.0)
    });
    assert!(approx(p.total_scale, 2.0));
    assert!(approx(p.dest.width(), 200.0));
    assert!(approx(p.dest.x0, -40.0));
    assert!(approx(p.dest.y0, -70.0));
    assert!(p.covers_area(100.0));
}

#[test]
fn fill_is_width_driven() {
    let p = resolve(&ResolveInput {
        fit_mode: FitMode::Fill,
        ..ResolveInput::new(100.0, 300.0, 150.0)
    });
    assert!(approx(p.total_scale, 1.5));
    assert!(approx(p.dest.width(), 150.0));
    assert!(approx(p.dest.height(), 450.0));
    assert!(p.covers_area(150.0));
}

#[test]
fn from_transform_copies_every_geometric_field() {
    let t = Transform {
        scale: 120.0,
        fine_zoom: 80.0,
        fit_mode: FitMode::Contain,
        offset_x: 5.0,
        offset_y: -5.0,
        ..Transform::default()
    };
    let input = ResolveInput::from_transform(10.0, 20.0, &t, 30.0);
    assert!(approx(input.zoom, 0.96));
    assert_eq!(input.zoom, t.zoom_factor());
    assert_eq!(input.fit_mode, FitMode::Contain);
    assert_eq!((input.offset_x_percent, input.offset_y_percent), (5.0, -5.0));
    assert_eq!(input.area_size, 30.0);
}
