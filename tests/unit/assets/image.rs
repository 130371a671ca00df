use super::*;

#[test]
fn zero_sized_images_are_rejected() {
    assert!(SourceImage::from_rgba8(0, 4, vec![]).is_err());
    assert!(SourceImage::from_rgba8(4, 0, vec![]).is_err());
}

#[test]
fn buffer_length_must_match_dimensions() {
    assert!(SourceImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(SourceImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn straight_pixels_are_premultiplied_on_load() {
    let img = SourceImage::from_rgba8(1, 1, vec![100, 50, 200, 128]).unwrap();
    assert_eq!(
        img.view().pixel(0, 0),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn clones_share_pixels() {
    let a = SourceImage::solid(3, 2, [1, 2, 3, 255]).unwrap();
    let b = a.clone();
    let c = SourceImage::solid(3, 2, [1, 2, 3, 255]).unwrap();
    assert!(a.shares_pixels_with(&b));
    assert!(!a.shares_pixels_with(&c));
    assert_eq!(b.view().pixel(2, 1), [1, 2, 3, 255]);
}
