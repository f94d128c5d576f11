use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(AnimateError::misuse("x").to_string().contains("misuse:"));
    assert!(
        AnimateError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        AnimateError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        AnimateError::UnknownNode(NodeId(7))
            .to_string()
            .contains("unknown node")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AnimateError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_misuse());
}

#[test]
fn json_errors_convert_to_serde_variant() {
    let err: AnimateError = serde_json::from_str::<u64>("nope").unwrap_err().into();
    assert!(matches!(err, AnimateError::Serde(_)));
}

#[test]
fn misuse_classification() {
    assert!(AnimateError::misuse("x").is_misuse());
    assert!(AnimateError::UnknownNode(NodeId(0)).is_misuse());
    assert!(!AnimateError::validation("x").is_misuse());
}
