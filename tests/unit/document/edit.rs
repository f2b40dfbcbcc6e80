use super::*;

#[test]
fn sequential_summary_edits_keep_last_value() {
    let mut doc = Document::empty();
    doc.apply(Edit::SetSummary("A".into())).unwrap();
    doc.apply(Edit::SetSummary("AB".into())).unwrap();
    assert_eq!(doc.summary, "AB");
}

#[test]
fn record_edits_target_the_indexed_record() {
    let mut doc = Document::empty();
    doc.apply(Edit::AddExperience).unwrap();
    doc.apply(Edit::AddExperience).unwrap();
    doc.apply(Edit::SetExperience {
        index: 1,
        field: ExperienceField::Company,
        value: "Acme".into(),
    })
    .unwrap();
    assert_eq!(doc.experience[0].company, "");
    assert_eq!(doc.experience[1].company, "Acme");

    doc.apply(Edit::RemoveExperience(0)).unwrap();
    assert_eq!(doc.experience.len(), 1);
    assert_eq!(doc.experience[0].company, "Acme");
}

#[test]
fn out_of_range_edit_is_rejected_without_change() {
    let mut doc = Document::empty();
    doc.apply(Edit::AddSkill("Go".into())).unwrap();
    let before = doc.clone();

    let err = doc
        .apply(Edit::SetSkill {
            index: 3,
            value: "SQL".into(),
        })
        .unwrap_err();
    assert!(matches!(err, VitaeError::Validation(_)));
    assert!(doc.apply(Edit::RemoveEducation(0)).is_err());
    assert!(
        doc.apply(Edit::Move {
            section: ListSection::Skills,
            from: 0,
            to: 1,
        })
        .is_err()
    );
    assert_eq!(doc, before);
}

#[test]
fn move_reorders_records() {
    let mut doc = Document::empty();
    for s in ["a", "b", "c"] {
        doc.apply(Edit::AddSkill(s.into())).unwrap();
    }
    doc.apply(Edit::Move {
        section: ListSection::Skills,
        from: 0,
        to: 2,
    })
    .unwrap();
    assert_eq!(doc.skills, vec!["b", "c", "a"]);
}

#[test]
fn personal_template_and_visibility_edits() {
    let mut doc = Document::empty();
    doc.apply(Edit::SetPersonal {
        field: PersonalField::FullName,
        value: "Jane Doe".into(),
    })
    .unwrap();
    doc.apply(Edit::SetTemplate(TemplateId::Visual)).unwrap();
    doc.apply(Edit::SetPublic(true)).unwrap();
    assert_eq!(doc.personal_info.full_name, "Jane Doe");
    assert_eq!(doc.template_id, TemplateId::Visual);
    assert!(doc.is_public);
}

#[test]
fn project_technologies_are_replaced() {
    let mut doc = Document::empty();
    doc.apply(Edit::AddProject).unwrap();
    doc.apply(Edit::SetTechnologies {
        index: 0,
        technologies: vec!["rust".into(), "pdf".into()],
    })
    .unwrap();
    doc.apply(Edit::SetProject {
        index: 0,
        field: ProjectField::Name,
        value: "vitae".into(),
    })
    .unwrap();
    assert_eq!(doc.projects[0].name, "vitae");
    assert_eq!(doc.projects[0].technologies, vec!["rust", "pdf"]);
}
