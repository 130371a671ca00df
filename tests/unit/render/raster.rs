use super::*;

#[test]
fn filled_and_new_have_expected_pixels() {
    let r = Raster::filled(3, 2, [1, 2, 3, 4]).unwrap();
    assert_eq!(r.data.len(), 24);
    assert_eq!(r.pixel(2, 1), [1, 2, 3, 4]);
    assert_eq!(Raster::new(2, 2).unwrap().pixel(1, 1), [0, 0, 0, 0]);
}

#[test]
fn from_premul_checks_length() {
    assert!(Raster::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(Raster::from_premul(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn fingerprint_tracks_pixels_and_shape() {
    let a = Raster::filled(4, 1, [9, 9, 9, 255]).unwrap();
    let b = Raster::filled(2, 2, [9, 9, 9, 255]).unwrap();
    let mut c = a.clone();
    assert_eq!(a.fingerprint(), c.fingerprint());
    c.data[0] = 8;
    assert_ne!(a.fingerprint(), c.fingerprint());
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn rgba_image_is_unpremultiplied() {
    let r = Raster::from_premul(1, 1, vec![64, 32, 0, 128]).unwrap();
    let img = r.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [128, 64, 0, 128]);
}
