use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollfxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollfxError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        ScrollfxError::trigger("x")
            .to_string()
            .contains("trigger error:")
    );
    assert!(
        ScrollfxError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        ScrollfxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollfxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: ScrollfxError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ScrollfxError::Serde(_)));
}
