use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VitaeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        VitaeError::render_target_missing("x")
            .to_string()
            .contains("render target missing:")
    );
    assert!(VitaeError::export("x").to_string().contains("export failed:"));
    assert!(
        VitaeError::persistence("x")
            .to_string()
            .contains("persistence error:")
    );
    assert!(
        VitaeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VitaeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn export_user_message_carries_cause() {
    let err = VitaeError::export("font file unreadable");
    assert_eq!(
        err.user_message(),
        "Failed to generate PDF: font file unreadable"
    );
    assert!(err.is_retryable());
}

#[test]
fn validation_is_not_retryable() {
    let err = VitaeError::validation("Image must be smaller than 1MB");
    assert_eq!(err.user_message(), "Image must be smaller than 1MB");
    assert!(!err.is_retryable());
}

#[test]
fn serde_json_errors_convert() {
    let err: VitaeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, VitaeError::Serde(_)));
}
