use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BoothError::device("x")
            .to_string()
            .contains("device error:")
    );
    assert!(BoothError::load("x").to_string().contains("load error:"));
    assert!(
        BoothError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BoothError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn kind_predicates() {
    assert!(BoothError::device("camera gone").is_device());
    assert!(!BoothError::device("camera gone").is_load());
    assert!(BoothError::load("missing").is_load());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BoothError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
