use super::*;
use crate::document::model::{Document, TemplateId};
use crate::export::assets::settle_blocking;
use crate::export::flow::flow;
use crate::export::text::TextLayoutEngine;
use crate::foundation::config::ExportOpts;

fn striped(width: u32, height: u32) -> Bitmap {
    let mut rgba8 = Vec::new();
    for y in 0..height {
        for _ in 0..width {
            rgba8.extend_from_slice(&[y as u8, 0, 0, 255]);
        }
    }
    Bitmap {
        width,
        height,
        rgba8,
    }
}

#[test]
fn page_slices_and_pads_with_last_row() {
    let bmp = striped(3, 10);
    let page = bmp.page(4..7, 5);
    assert_eq!(page.height, 5);
    assert_eq!(page.rgba8.len(), 3 * 5 * 4);
    assert_eq!(page.pixel(0, 0), Some([4, 0, 0, 255]));
    assert_eq!(page.pixel(2, 2), Some([6, 0, 0, 255]));
    assert_eq!(page.pixel(1, 4), Some([6, 0, 0, 255]));
    assert_eq!(page.pixel(3, 0), None);
}

#[test]
fn blank_detection() {
    let flat = Bitmap {
        width: 2,
        height: 2,
        rgba8: [255u8; 16].to_vec(),
    };
    assert!(flat.is_blank());
    assert!(!striped(2, 2).is_blank());
    assert_eq!(striped(2, 2).count_not(Rgba8::rgb(0, 0, 0)), 2);
}

#[test]
fn renders_text_and_backgrounds_at_supersample() {
    let opts = ExportOpts::default();
    let Ok(assets) = settle_blocking(None, &opts) else {
        eprintln!("no system font, skipping");
        return;
    };
    let mut engine = TextLayoutEngine::new(&assets.font).unwrap();

    let mut doc = Document::empty();
    doc.personal_info.full_name = "Jane Doe".into();
    doc.skills = vec!["Go".into()];
    let layout = crate::template::render_with(&doc, TemplateId::Visual);
    let f = flow(&layout, &mut engine, 1123.0).unwrap();
    let bmp = rasterize(&f, &assets, 2).unwrap();

    assert_eq!(bmp.width, 794 * 2);
    assert_eq!(bmp.height, 1123 * 2);
    assert!(!bmp.is_blank());
    // Sidebar fill reaches the last pixel row; the main column stays white.
    assert_eq!(bmp.pixel(4, bmp.height - 1), Some([30, 41, 59, 255]));
    assert_eq!(bmp.pixel(bmp.width - 4, bmp.height - 1), Some([255, 255, 255, 255]));
}
