use super::*;

#[test]
fn a4_at_96_dpi_is_794_wide() {
    assert_eq!(PaperSize::A4.logical_width_px().round() as u32, PAGE_WIDTH_PX);
}

#[test]
fn a4_page_height_follows_aspect() {
    assert_eq!(PaperSize::A4.page_height_px(794), 1123);
    assert_eq!(PaperSize::A4.page_height_px(1588), 2246);
}

#[test]
fn a4_points() {
    assert!((PaperSize::A4.width_pt() - 595.2756).abs() < 1e-3);
    assert!((PaperSize::A4.height_pt() - 841.8898).abs() < 1e-3);
}

#[test]
fn align_offset_never_negative() {
    assert_eq!(align_offset(100.0, 40.0, Align::Start), 0.0);
    assert_eq!(align_offset(100.0, 40.0, Align::Center), 30.0);
    assert_eq!(align_offset(100.0, 40.0, Align::End), 60.0);
    assert_eq!(align_offset(10.0, 40.0, Align::End), 0.0);
}
