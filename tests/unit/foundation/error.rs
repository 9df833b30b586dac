use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PoemcardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PoemcardError::measurement("x")
            .to_string()
            .contains("measurement error:")
    );
    assert!(
        PoemcardError::rasterization("x")
            .to_string()
            .contains("rasterization error:")
    );
    assert!(
        PoemcardError::export("x")
            .to_string()
            .contains("export error:")
    );
    assert!(
        PoemcardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PoemcardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
