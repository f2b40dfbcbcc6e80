use crate::export::assets::FontFace;
use crate::foundation::core::{Align, Rgba8};
use crate::foundation::error::{VitaeError, VitaeResult};
use crate::template::layout::TextStyle;

/// Shaped text ready to place: a parley layout plus the box it is aligned in.
pub(crate) struct TextBox {
    pub layout: parley::Layout<Rgba8>,
    /// Width lines are aligned within.
    pub width: f64,
    pub height: f64,
    pub align: Align,
    pub strong: bool,
}

impl TextBox {
    /// Widest line advance.
    pub fn content_width(&self) -> f64 {
        self.layout
            .lines()
            .map(|l| f64::from(l.metrics().advance))
            .fold(0.0, f64::max)
    }

    /// Vertical extent of each line, top to bottom, relative to the box top.
    pub fn line_spans(&self) -> Vec<(f64, f64)> {
        self.layout
            .lines()
            .map(|l| {
                let m = l.metrics();
                let top = f64::from(m.baseline - m.ascent - m.leading * 0.5);
                let bottom = f64::from(m.baseline + m.descent + m.leading * 0.5);
                (top, bottom)
            })
            .collect()
    }

    /// Horizontal offset of line `advance` inside the box.
    pub fn line_offset(&self, advance: f32) -> f64 {
        crate::foundation::core::align_offset(self.width, f64::from(advance), self.align)
    }
}

/// Parley layout engine bound to the single export font face.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font` and remember its family name.
    pub(crate) fn new(font: &FontFace) -> VitaeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| VitaeError::export(format!("'{}' is not a usable font", font.source)))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| VitaeError::export("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape `text` and break it into lines of at most `max_width` pixels.
    ///
    /// With `max_width == None` the text is laid out on as few lines as its hard breaks allow,
    /// and the box is as wide as its widest line.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f64>,
    ) -> VitaeResult<TextBox> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(VitaeError::export("text size must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px as f32));
        builder.push_default(parley::style::StyleProperty::Brush(style.color));
        if style.letter_spacing_px != 0.0 {
            builder.push_default(parley::style::StyleProperty::LetterSpacing(
                style.letter_spacing_px as f32,
            ));
        }

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        let max_w = max_width.map(|w| w.max(1.0) as f32);
        layout.break_all_lines(max_w);
        if let Some(w) = max_w {
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        }

        let mut tb = TextBox {
            width: 0.0,
            height: f64::from(layout.height()),
            layout,
            align: style.align,
            strong: style.strong,
        };
        tb.width = max_width.unwrap_or_else(|| tb.content_width());
        Ok(tb)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/text.rs"]
mod tests;
