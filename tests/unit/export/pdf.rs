use super::*;

fn white(width: u32, height: u32) -> Bitmap {
    Bitmap {
        width,
        height,
        rgba8: [255u8; 4].repeat((width * height) as usize),
    }
}

#[test]
fn download_names() {
    assert_eq!(download_name("My Resume"), "My Resume.pdf");
    assert_eq!(download_name(""), "resume.pdf");
    assert_eq!(download_name("   "), "resume.pdf");
    assert_eq!(download_name(" a/b:c? "), "a_b_c_.pdf");
    assert_eq!(download_name("tab\there"), "tab_here.pdf");
}

#[test]
fn assembles_one_page_per_bitmap() {
    let pages = vec![white(40, 57), white(40, 57)];
    let pdf = assemble(&pages, PaperSize::A4, "My Resume", 90).unwrap();
    assert_eq!(pdf.file_name, "My Resume.pdf");
    assert_eq!(pdf.page_count, 2);
    assert!(pdf.bytes.starts_with(b"%PDF-"));

    let text = String::from_utf8_lossy(&pdf.bytes);
    assert!(text.contains("/DCTDecode"));
    assert!(text.contains("/Count 2"));
    assert!(text.contains("/MediaBox [0 0 595."));
    assert!(text.contains(" 841."));
}

#[test]
fn empty_page_list_is_rejected() {
    assert!(matches!(
        assemble(&[], PaperSize::A4, "x", 90),
        Err(VitaeError::Export(_))
    ));
}

#[test]
fn writes_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = assemble(&[white(10, 14)], PaperSize::A4, "", 80).unwrap();
    let path = pdf.write_to_dir(&dir.path().join("out")).unwrap();
    assert!(path.ends_with("resume.pdf"));
    assert_eq!(std::fs::read(path).unwrap(), pdf.bytes);
}
