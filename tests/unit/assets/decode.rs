use std::io::Cursor;

use super::*;

#[test]
fn decode_png_dimensions_and_premul() {
    let src = image::RgbaImage::from_raw(2, 1, vec![100, 50, 200, 128, 9, 8, 7, 255]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(src)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let img = decode_image(&buf).unwrap();
    assert_eq!((img.width(), img.height()), (2, 1));
    assert_eq!(img.view().pixel(1, 0), [9, 8, 7, 255]);
    assert_eq!(img.view().pixel(0, 0)[3], 128);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn missing_file_reports_path() {
    let err = load_image(Path::new("no/such/photo.png")).unwrap_err();
    assert!(err.to_string().contains("no/such/photo.png"));
}
