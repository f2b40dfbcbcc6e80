use super::*;
use crate::draft::kv::MemoryStore;
use crate::persistence::memory::InMemoryPersistence;

fn memory_draft() -> (Arc<MemoryStore>, DraftStore) {
    let kv = Arc::new(MemoryStore::new());
    (kv.clone(), DraftStore::new(kv))
}

#[test]
fn absent_draft_is_none() {
    let (_, drafts) = memory_draft();
    assert_eq!(drafts.load().unwrap(), None);
    assert_eq!(drafts.load_or_empty(), Document::empty());
}

#[test]
fn empty_document_round_trips() {
    let (_, drafts) = memory_draft();
    drafts.save(&Document::empty()).unwrap();
    assert_eq!(drafts.load().unwrap(), Some(Document::empty()));
}

#[test]
fn malformed_content_falls_back_to_empty() {
    let (kv, drafts) = memory_draft();
    kv.set(DRAFT_KEY, "{\"title\": \"half").unwrap();
    assert_eq!(drafts.load().unwrap(), Some(Document::empty()));
    kv.set(DRAFT_KEY, "[1,2,3]").unwrap();
    assert_eq!(drafts.load_or_empty(), Document::empty());
}

#[test]
fn current_shape_round_trips_exactly() {
    let (_, drafts) = memory_draft();
    let mut doc = Document::empty();
    doc.title = String::new();
    doc.summary = "  ".into();
    doc.skills = vec!["Go".into(), String::new()];
    doc.personal_info.full_name = "Jane Doe".into();
    drafts.save(&doc).unwrap();

    let back = drafts.load().unwrap().unwrap();
    assert_eq!(back, doc);

    let mut back = back;
    back.apply(crate::document::edit::Edit::SetSkill {
        index: 1,
        value: "SQL".into(),
    })
    .unwrap();
    assert_eq!(back.skills, vec!["Go", "SQL"]);
}

#[test]
fn older_shapes_are_still_normalized() {
    let (kv, drafts) = memory_draft();
    kv.set(DRAFT_KEY, r#"{"title": null, "skills": "Go, SQL"}"#)
        .unwrap();
    let doc = drafts.load().unwrap().unwrap();
    assert_eq!(doc.skills, vec!["Go", "SQL"]);
    assert_eq!(doc.title, crate::DEFAULT_TITLE);
}

#[tokio::test]
async fn promote_clears_only_after_create() {
    let (_, drafts) = memory_draft();
    let mut doc = Document::empty();
    doc.summary = "draft".into();
    drafts.save(&doc).unwrap();

    let remote = InMemoryPersistence::new();
    let err = drafts
        .promote(&IdentityContext::Anonymous, &remote, &doc)
        .await
        .unwrap_err();
    assert!(matches!(err, crate::VitaeError::Unauthenticated));
    assert!(drafts.exists().unwrap());

    let user = IdentityContext::user("u1");
    let id = drafts.promote(&user, &remote, &doc).await.unwrap();
    assert!(!drafts.exists().unwrap());
    assert_eq!(remote.get(&user, &id).await.unwrap().summary, "draft");
}
