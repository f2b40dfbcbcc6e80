use std::ops::Range;
use std::sync::Arc;

use crate::export::assets::{DecodedImage, SettledAssets};
use crate::export::flow::{DrawOp, Flow};
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::{VitaeError, VitaeResult};

/// Horizontal offset of the second pass used to embolden strong text.
const STRONG_OFFSET_PX: f32 = 0.4;

/// Opaque RGBA8 raster of the whole resume, or of one page of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8. Every pixel is opaque.
    pub rgba8: Vec<u8>,
}

impl Bitmap {
    fn row_bytes(&self) -> usize {
        self.width as usize * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.rgba8.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Return `true` when every pixel has the same color.
    pub fn is_blank(&self) -> bool {
        match self.rgba8.get(..4) {
            Some(first) => self.rgba8.chunks_exact(4).all(|px| px == first),
            None => true,
        }
    }

    /// Number of pixels that differ from `color`.
    pub fn count_not(&self, color: Rgba8) -> usize {
        let c = color.to_array();
        self.rgba8.chunks_exact(4).filter(|px| **px != c).count()
    }

    /// Copy `rows` into a bitmap `page_height` tall.
    ///
    /// Short slices are padded by repeating their last row. Slices end on a break between
    /// content, so that row carries only page and column backgrounds.
    pub fn page(&self, rows: Range<u32>, page_height: u32) -> Bitmap {
        let rb = self.row_bytes();
        let start = rows.start.min(self.height) as usize;
        let end = rows.end.min(self.height) as usize;
        let mut rgba8 = Vec::with_capacity(rb * page_height as usize);
        rgba8.extend_from_slice(&self.rgba8[start * rb..end * rb]);

        let filler = if end > start {
            self.rgba8[(end - 1) * rb..end * rb].to_vec()
        } else {
            [255u8; 4].repeat(self.width as usize)
        };
        while rgba8.len() < rb * page_height as usize {
            rgba8.extend_from_slice(&filler);
        }
        rgba8.truncate(rb * page_height as usize);

        Bitmap {
            width: self.width,
            height: page_height,
            rgba8,
        }
    }
}

/// Rasterize `flow` at `supersample` device pixels per logical pixel.
///
/// Backgrounds are always painted: first opaque white, then the page background, then column
/// fills. Letter spacing is part of the shaped glyph positions, so it survives unchanged.
#[tracing::instrument(level = "debug", skip_all, fields(supersample))]
pub(crate) fn rasterize(
    flow: &Flow,
    assets: &SettledAssets,
    supersample: u32,
) -> VitaeResult<Bitmap> {
    let ss = f64::from(supersample.max(1));
    let width = (flow.width * ss).round() as u32;
    let height = (flow.height * ss).ceil() as u32;
    let w: u16 = width
        .try_into()
        .map_err(|_| VitaeError::export(format!("bitmap width {width}px exceeds 65535")))?;
    let h: u16 = height.try_into().map_err(|_| {
        VitaeError::export(format!(
            "resume is too tall to rasterize ({height}px exceeds 65535); lower supersample"
        ))
    })?;

    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(assets.font.bytes.to_vec()),
        assets.font.index,
    );
    let photo = assets.photo.as_ref().map(image_paint).transpose()?;

    let base = vello_cpu::kurbo::Affine::scale(ss);
    let mut ctx = vello_cpu::RenderContext::new(w, h);

    ctx.set_transform(base);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, flow.width, flow.height));
    ctx.set_paint(color_to_cpu(flow.background));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, flow.width, flow.height));

    for op in &flow.ops {
        match op {
            DrawOp::Fill { rect, color } => {
                ctx.set_transform(base);
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_rect(&rect_to_cpu(*rect));
            }
            DrawOp::RoundFill {
                rect,
                radius,
                color,
            } => {
                use vello_cpu::kurbo::Shape as _;
                let rr = vello_cpu::kurbo::RoundedRect::from_rect(rect_to_cpu(*rect), *radius);
                ctx.set_transform(base);
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&rr.to_path(0.1));
            }
            DrawOp::Text { text, origin } => {
                let Some(tb) = flow.texts.get(*text) else {
                    continue;
                };
                ctx.set_transform(base * vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
                for line in tb.layout.lines() {
                    let dx = tb.line_offset(line.metrics().advance) as f32;
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };

                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));

                        let passes: &[f32] = if tb.strong {
                            &[0.0, STRONG_OFFSET_PX]
                        } else {
                            &[0.0]
                        };
                        for &nudge in passes {
                            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                                id: g.id,
                                x: g.x + dx + nudge,
                                y: g.y,
                            });
                            ctx.glyph_run(&font)
                                .font_size(run.run().font_size())
                                .fill_glyphs(glyphs);
                        }
                    }
                }
            }
            DrawOp::Photo { rect } => {
                let Some((paint, iw, ih)) = photo.clone() else {
                    continue;
                };
                let sx = rect.width() / f64::from(iw);
                let sy = rect.height() / f64::from(ih);
                ctx.set_transform(
                    base * vello_cpu::kurbo::Affine::translate((rect.x0, rect.y0))
                        * vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy),
                );
                ctx.set_paint(paint);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(iw),
                    f64::from(ih),
                ));
            }
        }
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    Ok(Bitmap {
        width,
        height,
        rgba8: pixmap.data_as_u8_slice().to_vec(),
    })
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_paint(img: &DecodedImage) -> VitaeResult<(vello_cpu::Image, u32, u32)> {
    let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };
    Ok((paint, img.width, img.height))
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> VitaeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| VitaeError::export("photo width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| VitaeError::export("photo height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(VitaeError::export("photo byte length mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/export/raster.rs"]
mod tests;
