use super::*;
use crate::foundation::config::ExportOpts;

fn engine_if_font_present() -> Option<TextLayoutEngine> {
    let font = crate::export::assets::resolve_font(&ExportOpts::default()).ok()?;
    TextLayoutEngine::new(&font).ok()
}

#[test]
fn wraps_to_max_width() {
    let Some(mut engine) = engine_if_font_present() else {
        eprintln!("no system font, skipping");
        return;
    };
    assert!(!engine.family_name().trim().is_empty());

    let style = TextStyle::new(12.0, Rgba8::rgb(0, 0, 0));
    let text = "lorem ipsum dolor sit amet ".repeat(12);
    let one_line = engine.layout(&text, &style, None).unwrap();
    let wrapped = engine.layout(&text, &style, Some(200.0)).unwrap();

    assert_eq!(one_line.line_spans().len(), 1);
    assert!(wrapped.line_spans().len() > 1);
    assert!(wrapped.height > one_line.height);
    assert!(wrapped.content_width() <= 200.0 + 0.5);
    assert_eq!(wrapped.width, 200.0);
}

#[test]
fn letter_spacing_widens_text() {
    let Some(mut engine) = engine_if_font_present() else {
        return;
    };
    let plain = TextStyle::new(14.0, Rgba8::rgb(0, 0, 0));
    let spaced = plain.spaced(3.0);
    let a = engine.layout("EXPERIENCE", &plain, None).unwrap();
    let b = engine.layout("EXPERIENCE", &spaced, None).unwrap();
    assert!(b.content_width() > a.content_width() + 20.0);
}

#[test]
fn rejects_bad_size() {
    let Some(mut engine) = engine_if_font_present() else {
        return;
    };
    let style = TextStyle::new(0.0, Rgba8::rgb(0, 0, 0));
    assert!(engine.layout("x", &style, None).is_err());
}

#[test]
fn centered_lines_are_offset() {
    let Some(mut engine) = engine_if_font_present() else {
        return;
    };
    let style = TextStyle::new(12.0, Rgba8::rgb(0, 0, 0)).aligned(Align::Center);
    let tb = engine.layout("Jane", &style, Some(300.0)).unwrap();
    let advance = tb.content_width();
    let off = tb.line_offset(advance as f32);
    assert!((off - (300.0 - advance) / 2.0).abs() < 1e-3);
}
