use super::*;
use crate::persistence::IdentityContext;
use crate::persistence::memory::InMemoryPersistence;

#[tokio::test]
async fn public_resume_renders_read_only() {
    let store = InMemoryPersistence::new();
    let owner = IdentityContext::user("owner");
    let mut doc = Document::empty();
    doc.personal_info.full_name = "Jane Doe".into();
    doc.template_id = TemplateId::Elegant;
    let id = store.create(&owner, &doc).await.unwrap();

    let err = open_shared(&store, &id, None).await.unwrap_err();
    assert!(matches!(err, crate::VitaeError::NotFound(_)));

    doc.is_public = true;
    store.update(&owner, &id, &doc).await.unwrap();
    let shared = open_shared(&store, &id, None).await.unwrap();
    assert_eq!(shared.layout.template, TemplateId::Elegant);
    assert!(shared.layout.contains_text("Jane Doe"));

    let visual = open_shared(&store, &id, Some(TemplateId::Visual)).await.unwrap();
    assert_eq!(visual.layout.template, TemplateId::Visual);
    assert_eq!(visual.document, shared.document);
}
