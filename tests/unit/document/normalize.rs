use super::*;

#[test]
fn non_object_root_is_empty_document() {
    assert_eq!(normalize_document(&Value::Null), Document::empty());
    assert_eq!(normalize_document(&serde_json::json!([1, 2])), Document::empty());
    assert_eq!(normalize_document(&serde_json::json!("text")), Document::empty());
}

#[test]
fn unparseable_text_is_an_error() {
    assert!(normalize_json("{not json").is_err());
}

#[test]
fn coerces_loose_field_types() {
    let v = serde_json::json!({
        "title": null,
        "personalInfo": { "fullName": "Jane Doe", "phone": 5551234, "profilePicture": "" },
        "summary": 42,
        "skills": "Go, SQL ,, Rust",
        "projects": [
            { "name": "vitae", "technologies": "rust,pdf" },
            "garbage",
        ],
        "experience": { "company": "not a list" },
        "templateId": "ELEGANT",
        "isPublic": "yes",
    });
    let doc = normalize_document(&v);
    assert_eq!(doc.title, DEFAULT_TITLE);
    assert_eq!(doc.personal_info.full_name, "Jane Doe");
    assert_eq!(doc.personal_info.phone, "5551234");
    assert_eq!(doc.personal_info.profile_picture, None);
    assert_eq!(doc.summary, "42");
    assert_eq!(doc.skills, vec!["Go", "SQL", "Rust"]);
    assert_eq!(doc.projects.len(), 1);
    assert_eq!(doc.projects[0].technologies, vec!["rust", "pdf"]);
    assert!(doc.experience.is_empty());
    assert_eq!(doc.template_id, TemplateId::Elegant);
    assert!(doc.is_public);
}

#[test]
fn snake_case_keys_are_accepted() {
    let v = serde_json::json!({
        "personal_info": { "full_name": "Ada" },
        "education": [{ "institution": "MIT", "start_date": "2010-09" }],
        "template_id": "visual",
    });
    let doc = normalize_document(&v);
    assert_eq!(doc.personal_info.full_name, "Ada");
    assert_eq!(doc.education[0].start_date, "2010-09");
    assert_eq!(doc.template_id, TemplateId::Visual);
}

#[test]
fn well_formed_documents_pass_through() {
    let mut doc = Document::empty();
    doc.title = "My Resume".into();
    doc.skills = vec!["Go".into(), "Go".into()];
    doc.experience.push(Experience {
        company: "Acme".into(),
        position: "Engineer".into(),
        start_date: "2020-01".into(),
        ..Experience::default()
    });
    let text = doc.to_json().unwrap();
    assert_eq!(normalize_json(&text).unwrap(), doc);
}

#[test]
fn only_inline_pictures_are_kept() {
    let remote = serde_json::json!({
        "personalInfo": { "profilePicture": "https://cdn.example.com/me.png" },
    });
    assert_eq!(normalize_document(&remote).personal_info.profile_picture, None);

    let inline = "data:image/png;base64,iVBORw0KGgo=";
    let v = serde_json::json!({ "personalInfo": { "profilePicture": inline } });
    assert_eq!(
        normalize_document(&v).personal_info.profile_picture.as_deref(),
        Some(inline)
    );
}
