use super::*;

fn doc(title: &str) -> Document {
    let mut d = Document::empty();
    d.title = title.to_string();
    d
}

#[tokio::test]
async fn anonymous_cannot_create() {
    let store = InMemoryPersistence::new();
    let err = store
        .create(&IdentityContext::Anonymous, &doc("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, VitaeError::Unauthenticated));
    assert!(store.is_empty());
}

#[tokio::test]
async fn owner_round_trip() {
    let store = InMemoryPersistence::new();
    let alice = IdentityContext::user("alice");
    let id = store.create(&alice, &doc("CV")).await.unwrap();
    assert_eq!(store.get(&alice, &id).await.unwrap().title, "CV");

    let updated = store.update(&alice, &id, &doc("CV v2")).await.unwrap();
    assert_eq!(updated.title, "CV v2");
    assert_eq!(store.list(&UserId("alice".into())).unwrap().len(), 1);

    store.delete(&alice, &id).await.unwrap();
    assert!(matches!(
        store.get(&alice, &id).await.unwrap_err(),
        VitaeError::NotFound(_)
    ));
}

#[tokio::test]
async fn other_users_see_not_found() {
    let store = InMemoryPersistence::new();
    let alice = IdentityContext::user("alice");
    let bob = IdentityContext::user("bob");
    let id = store.create(&alice, &doc("CV")).await.unwrap();

    assert!(matches!(
        store.get(&bob, &id).await.unwrap_err(),
        VitaeError::NotFound(_)
    ));
    assert!(store.update(&bob, &id, &doc("hijack")).await.is_err());
    assert!(store.delete(&bob, &id).await.is_err());
    assert_eq!(store.get(&alice, &id).await.unwrap().title, "CV");
}

#[tokio::test]
async fn public_read_honours_visibility() {
    let store = InMemoryPersistence::new();
    let alice = IdentityContext::user("alice");
    let mut d = doc("CV");
    let id = store.create(&alice, &d).await.unwrap();
    assert!(store.get_public(&id).await.is_err());

    d.is_public = true;
    store.update(&alice, &id, &d).await.unwrap();
    assert_eq!(store.get_public(&id).await.unwrap().title, "CV");
    assert!(store.get_public(&DocumentId::from("missing")).await.is_err());
}
