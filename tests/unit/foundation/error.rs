use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WalkthroughError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        WalkthroughError::layout("x")
            .to_string()
            .contains("layout error:")
    );
    assert!(
        WalkthroughError::Serde("x".to_owned())
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WalkthroughError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: WalkthroughError = serde_json::from_str::<u32>("not json").unwrap_err().into();
    assert!(matches!(err, WalkthroughError::Serde(_)));
}
