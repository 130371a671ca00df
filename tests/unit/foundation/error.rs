use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BadgeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BadgeError::render("x").to_string().contains("render error:"));
    assert!(BadgeError::export("x").to_string().contains("export error:"));
    assert!(
        BadgeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = BadgeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}
