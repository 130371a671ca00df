use super::*;
use crate::foundation::core::Rgb8;
use crate::model::params::BackgroundMode;

fn halves(w: u32, h: u32, left: [u8; 4], right: [u8; 4]) -> SourceImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..h {
        for x in 0..w {
            data.extend_from_slice(if x < w / 2 { &left } else { &right });
        }
    }
    SourceImage::from_rgba8(w, h, data).unwrap()
}

fn stacked(w: u32, h: u32, top: [u8; 4], bottom: [u8; 4]) -> SourceImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for _ in 0..w {
            data.extend_from_slice(if y < h / 2 { &top } else { &bottom });
        }
    }
    SourceImage::from_rgba8(w, h, data).unwrap()
}

fn assert_near(actual: [u8; 4], expected: [u8; 4]) {
    assert!(
        actual.iter().zip(expected).all(|(&a, e)| a.abs_diff(e) <= 2),
        "{actual:?} vs {expected:?}"
    );
}

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

#[test]
fn print_render_has_white_corners_and_image_center() {
    let img = SourceImage::solid(1000, 1000, RED).unwrap();
    let out = SlotCompositor::new(CompositorOpts::print())
        .render(&img, &RenderParameters::default(), &BadgeFrame::print())
        .unwrap();
    assert_eq!((out.width, out.height), (779, 779));
    assert_eq!(out.pixel(0, 0), [255, 255, 255, 255]);
    assert_near(out.pixel(389, 389), RED);
}

#[test]
fn default_opts_leave_outside_transparent() {
    let img = SourceImage::solid(64, 64, RED).unwrap();
    let out = SlotCompositor::default()
        .render(&img, &RenderParameters::default(), &BadgeFrame::thumbnail())
        .unwrap();
    assert_eq!(out.pixel(0, 0), [0, 0, 0, 0]);
    assert_near(out.pixel(75, 75), RED);
}

#[test]
fn render_is_deterministic() {
    let img = halves(300, 200, RED, BLUE);
    let mut params = RenderParameters::default();
    params.transform.rotation = 17.0;
    params.adjustments.saturation = -40;
    let c = SlotCompositor::new(CompositorOpts::print());
    let a = c.render(&img, &params, &BadgeFrame::preview()).unwrap();
    let b = c.render(&img, &params, &BadgeFrame::preview()).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a, b);
}

#[test]
fn empty_slot_renders_nothing() {
    let out = SlotCompositor::default()
        .render_slot(None, &RenderParameters::default(), &BadgeFrame::print())
        .unwrap();
    assert!(out.is_none());
}

#[test]
fn brightness_is_applied_to_drawn_pixels() {
    let img = SourceImage::solid(1000, 1000, [100, 100, 100, 255]).unwrap();
    let mut params = RenderParameters::default();
    params.adjustments.brightness = 20;
    let out = SlotCompositor::default()
        .render(&img, &params, &BadgeFrame::print())
        .unwrap();
    assert_near(out.pixel(389, 389), [120, 120, 120, 255]);
}

#[test]
fn contain_gap_shows_background_color() {
    let img = SourceImage::solid(200, 50, RED).unwrap();
    let mut params = RenderParameters::default();
    params.transform.fit_mode = FitMode::Contain;
    params.transform.background_color = Rgb8::new(0, 0, 255);
    let out = SlotCompositor::default()
        .render(&img, &params, &BadgeFrame::print())
        .unwrap();
    assert_near(out.pixel(389, 110), BLUE);
    assert_near(out.pixel(389, 389), RED);
}

#[test]
fn blur_background_of_uniform_image_is_uniform() {
    let img = SourceImage::solid(200, 50, [0, 200, 0, 255]).unwrap();
    let mut params = RenderParameters::default();
    params.transform.fit_mode = FitMode::Contain;
    params.transform.background_mode = BackgroundMode::Blur;
    params.transform.background_blur = 20.0;
    let out = SlotCompositor::default()
        .render(&img, &params, &BadgeFrame::print())
        .unwrap();
    assert_near(out.pixel(389, 110), [0, 200, 0, 255]);
}

#[test]
fn heavy_downscale_keeps_uniform_color() {
    let img = SourceImage::solid(2000, 2000, [10, 20, 30, 255]).unwrap();
    let out = SlotCompositor::default()
        .render(&img, &RenderParameters::default(), &BadgeFrame::thumbnail())
        .unwrap();
    assert_near(out.pixel(75, 75), [10, 20, 30, 255]);
}

#[test]
fn horizontal_flip_swaps_sides() {
    let img = halves(100, 100, RED, BLUE);
    let frame = BadgeFrame::thumbnail();
    let c = SlotCompositor::default();

    let plain = c.render(&img, &RenderParameters::default(), &frame).unwrap();
    assert_near(plain.pixel(30, 75), RED);
    assert_near(plain.pixel(120, 75), BLUE);

    let mut params = RenderParameters::default();
    params.transform.flip_horizontal = true;
    let flipped = c.render(&img, &params, &frame).unwrap();
    assert_near(flipped.pixel(30, 75), BLUE);
    assert_near(flipped.pixel(120, 75), RED);
}

#[test]
fn zero_rotation_and_no_flip_match_untransformed() {
    let img = halves(120, 90, RED, BLUE);
    let mut params = RenderParameters::default();
    params.transform.rotation = 0.0;
    params.transform.flip_horizontal = false;
    params.transform.flip_vertical = false;
    let c = SlotCompositor::default();
    let frame = BadgeFrame::preview();
    assert_eq!(
        c.render(&img, &params, &frame).unwrap(),
        c.render(&img, &RenderParameters::default(), &frame).unwrap()
    );
}

#[test]
fn quarter_turn_moves_left_half_to_the_top() {
    let img = halves(100, 100, RED, BLUE);
    let mut params = RenderParameters::default();
    params.transform.rotation = 90.0;
    let out = SlotCompositor::default()
        .render(&img, &params, &BadgeFrame::thumbnail())
        .unwrap();
    assert_near(out.pixel(75, 40), RED);
    assert_near(out.pixel(75, 110), BLUE);

    params.transform.rotation = -90.0;
    let out = SlotCompositor::default()
        .render(&img, &params, &BadgeFrame::thumbnail())
        .unwrap();
    assert_near(out.pixel(75, 40), BLUE);
    assert_near(out.pixel(75, 110), RED);
}

#[test]
fn vertical_flip_swaps_top_and_bottom() {
    let img = stacked(100, 100, RED, BLUE);
    let frame = BadgeFrame::thumbnail();
    let c = SlotCompositor::default();

    let plain = c.render(&img, &RenderParameters::default(), &frame).unwrap();
    assert_near(plain.pixel(75, 40), RED);
    assert_near(plain.pixel(75, 110), BLUE);

    let mut params = RenderParameters::default();
    params.transform.flip_vertical = true;
    let flipped = c.render(&img, &params, &frame).unwrap();
    assert_near(flipped.pixel(75, 40), BLUE);
    assert_near(flipped.pixel(75, 110), RED);
}

#[test]
fn adjustment_runs_before_prefiltering() {
    // Brightening 0/255 columns first gives 100/255, averaging near 178 once shrunk.
    // Brightening the shrunk mid gray instead would give about 228.
    let mut data = Vec::new();
    for _ in 0..400 {
        for x in 0..400 {
            let v = if x % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let img = SourceImage::from_rgba8(400, 400, data).unwrap();
    let mut params = RenderParameters::default();
    params.adjustments.brightness = 100;
    let out = SlotCompositor::default()
        .render(&img, &params, &BadgeFrame::thumbnail())
        .unwrap();
    let px = out.pixel(75, 75);
    assert!((160..=195).contains(&px[0]), "{px:?}");
}
