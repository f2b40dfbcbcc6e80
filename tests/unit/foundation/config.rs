use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

#[test]
fn defaults_are_valid() {
    let cfg = Config::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.export.supersample, 2);
    assert_eq!(cfg.export.pagination, Pagination::MultiPage);
    assert_eq!(cfg.export.max_profile_picture_bytes, 1_048_576);
}

#[test]
fn partial_json_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vitae.json");
    std::fs::write(&path, r#"{ "export": { "supersample": 3 } }"#).unwrap();

    let cfg = Config::from_path(&path).unwrap();
    assert_eq!(cfg.export.supersample, 3);
    assert_eq!(cfg.export.jpeg_quality, 92);
    assert_eq!(cfg.draft_dir, PathBuf::from(".vitae"));
}

#[test]
fn out_of_range_json_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vitae.json");
    std::fs::write(&path, r#"{ "export": { "supersample": 9 } }"#).unwrap();
    assert!(matches!(
        Config::from_path(&path),
        Err(VitaeError::Validation(_))
    ));
}

#[test]
fn env_overlay_applies() {
    let cfg = Config::default()
        .with_env_lookup(lookup(&[
            ("VITAE_DRAFT_DIR", "/tmp/drafts"),
            ("VITAE_SUPERSAMPLE", "1"),
            ("VITAE_PAGINATION", "clip-first-page"),
        ]))
        .unwrap();
    assert_eq!(cfg.draft_dir, PathBuf::from("/tmp/drafts"));
    assert_eq!(cfg.export.supersample, 1);
    assert_eq!(cfg.export.pagination, Pagination::ClipFirstPage);
}

#[test]
fn env_overlay_rejects_garbage() {
    let err = Config::default()
        .with_env_lookup(lookup(&[("VITAE_SETTLE_TIMEOUT_MS", "soon")]))
        .unwrap_err();
    assert!(err.to_string().contains("VITAE_SETTLE_TIMEOUT_MS"));
}
