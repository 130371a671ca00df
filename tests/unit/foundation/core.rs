use super::*;

#[test]
fn hex_parsing_accepts_optional_hash() {
    assert_eq!(Rgb8::from_hex("#e53e3e").unwrap(), Rgb8::new(0xe5, 0x3e, 0x3e));
    assert_eq!(Rgb8::from_hex("38a169").unwrap(), Rgb8::new(0x38, 0xa1, 0x69));
    assert!(Rgb8::from_hex("#fff").is_err());
    assert!(Rgb8::from_hex("#gg0000").is_err());
}

#[test]
fn hex_parsing_rejects_signs_inside_the_digits() {
    assert!(Rgb8::from_hex("+f+f+f").is_err());
    assert!(Rgb8::from_hex("#-1-1-1").is_err());
    assert!(Rgb8::from_hex("ff ff ").is_err());
}

#[test]
fn premul_rgba_scales_channels_by_alpha() {
    assert_eq!(Rgb8::WHITE.to_premul_rgba(255), [255, 255, 255, 255]);
    assert_eq!(Rgb8::new(200, 100, 0).to_premul_rgba(0), [0, 0, 0, 0]);
    assert_eq!(Rgb8::new(200, 100, 0).to_premul_rgba(128), [100, 50, 0, 128]);
}
