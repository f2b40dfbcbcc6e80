use std::sync::Arc;

use super::*;
use crate::document::model::SectionName;
use crate::draft::kv::{KeyValueStore, MemoryStore};
use crate::draft::store::DRAFT_KEY;
use crate::foundation::config::ExportOpts;
use crate::persistence::memory::InMemoryPersistence;

fn local_session() -> (Arc<MemoryStore>, EditorSession) {
    let kv = Arc::new(MemoryStore::new());
    let session = EditorSession::open_local(DraftStore::new(kv.clone()));
    (kv, session)
}

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn edits_apply_in_order_and_refresh_preview() {
    let (_, mut session) = local_session();
    assert_eq!(session.revision(), 0);
    assert!(session.preview().is_some());

    session.apply(Edit::SetSummary("A".into())).unwrap();
    let rev = session.apply(Edit::SetSummary("AB".into())).unwrap();
    assert_eq!(rev, 2);
    assert_eq!(session.document().summary, "AB");

    let preview = session.preview().unwrap();
    assert_eq!(preview.revision, 2);
    assert!(preview.layout.contains_text("AB"));
    assert!(preview.layout.has_section(SectionName::Summary));
}

#[test]
fn every_edit_writes_the_draft() {
    let (kv, mut session) = local_session();
    assert!(kv.get(DRAFT_KEY).unwrap().is_none());
    session.apply(Edit::SetTitle("CV".into())).unwrap();
    let stored = kv.get(DRAFT_KEY).unwrap().unwrap();
    assert_eq!(Document::from_json(&stored).unwrap().title, "CV");
}

#[test]
fn rejected_edit_changes_nothing() {
    let (_, mut session) = local_session();
    let before = session.preview().cloned();
    assert!(session.apply(Edit::RemoveSkill(0)).is_err());
    assert_eq!(session.revision(), 0);
    assert_eq!(session.preview().cloned(), before);
}

#[test]
fn oversized_picture_keeps_previous_value() {
    let (_, session) = local_session();
    let mut session = session.with_max_picture_bytes(1024);
    session.set_profile_picture(&tiny_png()).unwrap();
    let prior = session.document().personal_info.profile_picture.clone();
    assert!(prior.is_some());

    let mut big = tiny_png();
    big.resize(1025, 0);
    let err = session.set_profile_picture(&big).unwrap_err();
    assert!(matches!(err, VitaeError::Validation(_)));
    assert_eq!(session.document().personal_info.profile_picture, prior);
}

#[test]
fn display_scale_is_kept_on_the_preview() {
    let session = EditorSession::from_document(Document::empty()).with_display_scale(0.5);
    let preview = session.preview().unwrap();
    assert_eq!(preview.layout.width_px, 794);
    assert_eq!(preview.display_width_px(), 397.0);
}

#[tokio::test]
async fn first_save_promotes_and_clears_once() {
    let (kv, mut session) = local_session();
    session.apply(Edit::SetSummary("draft".into())).unwrap();
    let remote = InMemoryPersistence::new();

    let err = session
        .save(&IdentityContext::Anonymous, &remote)
        .await
        .unwrap_err();
    assert!(matches!(err, VitaeError::Unauthenticated));
    assert!(kv.get(DRAFT_KEY).unwrap().is_some());

    let user = IdentityContext::user("u1");
    let id = session.save(&user, &remote).await.unwrap();
    assert!(kv.get(DRAFT_KEY).unwrap().is_none());
    assert!(!session.is_local());

    session.apply(Edit::SetSummary("remote".into())).unwrap();
    assert!(kv.get(DRAFT_KEY).unwrap().is_none());
    let again = session.save(&user, &remote).await.unwrap();
    assert_eq!(again, id);
    assert_eq!(remote.get(&user, &id).await.unwrap().summary, "remote");
    assert_eq!(remote.len(), 1);
}

#[tokio::test]
async fn failed_save_keeps_edits() {
    let remote = InMemoryPersistence::new();
    let owner = IdentityContext::user("owner");
    let id = remote.create(&owner, &Document::empty()).await.unwrap();

    let mut session = EditorSession::open_remote(&owner, &remote, id.clone())
        .await
        .unwrap();
    session.apply(Edit::SetSummary("kept".into())).unwrap();

    let intruder = IdentityContext::user("intruder");
    assert!(session.save(&intruder, &remote).await.is_err());
    assert_eq!(session.document().summary, "kept");
}

#[tokio::test]
async fn second_export_while_one_runs_is_rejected() {
    let session = EditorSession::from_document(Document::empty());
    let pipeline = ExportPipeline::new(ExportOpts::default()).unwrap();

    let guard = session.begin_export().unwrap();
    assert!(session.export_in_flight());
    let err = session.export(&pipeline).await.unwrap_err();
    assert!(matches!(err, VitaeError::ExportInFlight));
    assert_eq!(pipeline.stage().attached_count(), 0);

    drop(guard);
    assert!(!session.export_in_flight());
    assert!(session.begin_export().is_ok());
}
