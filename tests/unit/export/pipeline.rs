use super::*;
use crate::document::model::Document;

fn font_available() -> bool {
    assets::resolve_font(&ExportOpts::default()).is_ok()
}

#[tokio::test]
async fn missing_layout_fails_fast() {
    let pipeline = ExportPipeline::new(ExportOpts::default()).unwrap();
    let err = pipeline.export(None, "My Resume").await.unwrap_err();
    assert!(matches!(err, VitaeError::RenderTargetMissing(_)));
    assert_eq!(pipeline.stage().attached_count(), 0);
}

#[tokio::test]
async fn settle_failure_cleans_up_and_keeps_cause() {
    let opts = ExportOpts {
        font_path: Some("/nope/missing-font.ttf".into()),
        ..ExportOpts::default()
    };
    let pipeline = ExportPipeline::new(opts).unwrap();
    let layout = crate::template::render(&Document::empty());
    let err = pipeline.export(Some(&layout), "x").await.unwrap_err();
    assert!(matches!(err, VitaeError::Export(_)));
    assert!(err.user_message().starts_with("Failed to generate PDF: "));
    assert!(err.user_message().contains("missing-font.ttf"));
    assert_eq!(pipeline.stage().attached_count(), 0);
}

#[tokio::test]
async fn bad_options_are_rejected() {
    let opts = ExportOpts {
        supersample: 9,
        ..ExportOpts::default()
    };
    assert!(matches!(
        ExportPipeline::new(opts),
        Err(VitaeError::Validation(_))
    ));
}

#[tokio::test]
async fn long_resume_spans_pages() {
    if !font_available() {
        return;
    }
    let mut doc = Document::empty();
    doc.personal_info.full_name = "Jane Doe".into();
    doc.summary = "Paragraph of text that goes on. ".repeat(400);
    let layout = crate::template::render(&doc);

    let pipeline = ExportPipeline::new(ExportOpts::default()).unwrap();
    let pdf = pipeline.export(Some(&layout), "Long").await.unwrap();
    assert!(pdf.page_count >= 2);
    assert_eq!(pipeline.stage().attached_count(), 0);

    let clip = ExportPipeline::new(ExportOpts {
        pagination: Pagination::ClipFirstPage,
        ..ExportOpts::default()
    })
    .unwrap();
    let pdf = clip.export(Some(&layout), "Long").await.unwrap();
    assert_eq!(pdf.page_count, 1);
}

#[tokio::test]
async fn unusable_photo_exports_without_it() {
    if !font_available() {
        return;
    }
    for url in [
        "https://cdn.example.com/me.png",
        "data:image/png;base64,!!!corrupt",
    ] {
        let mut doc = Document::empty();
        doc.personal_info.full_name = "Jane Doe".into();
        doc.personal_info.profile_picture = Some(url.into());
        let layout = crate::template::render(&doc);
        assert!(layout.header().and_then(|h| h.photo.as_ref()).is_some());

        let pipeline = ExportPipeline::new(ExportOpts::default()).unwrap();
        let pdf = pipeline.export(Some(&layout), "Photo").await.unwrap();
        assert!(pdf.page_count >= 1, "{url}");
        assert_eq!(pipeline.stage().attached_count(), 0);
    }
}
