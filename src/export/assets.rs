//! Settle step: resolve the font face and decode the photo before anything is rasterized.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use crate::document::image_input::{PictureFormat, parse_data_url};
use crate::foundation::config::ExportOpts;
use crate::foundation::error::{VitaeError, VitaeResult};
use crate::template::layout::Photo;

/// Families tried, in order, when no font is configured explicitly.
const PREFERRED_FAMILIES: &[&str] = &[
    "Inter",
    "Helvetica",
    "Arial",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "Roboto",
    "Open Sans",
];

/// Raw font file plus the face index inside it.
#[derive(Clone, Debug)]
pub struct FontFace {
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
    /// Where the face came from, for logs and error messages.
    pub source: String,
}

/// Photo decoded to premultiplied RGBA8, already cropped and scaled to its box.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Everything the rasterizer needs that is not in the layout itself.
#[derive(Clone, Debug)]
pub struct SettledAssets {
    pub font: FontFace,
    pub photo: Option<DecodedImage>,
}

/// Resolve fonts and decode `photo` on the blocking pool, bounded by `settle_timeout_ms`.
pub(crate) async fn settle(photo: Option<Photo>, opts: ExportOpts) -> VitaeResult<SettledAssets> {
    let ms = opts.settle_timeout_ms;
    let task = tokio::task::spawn_blocking(move || settle_blocking(photo.as_ref(), &opts));
    match tokio::time::timeout(Duration::from_millis(ms), task).await {
        Ok(Ok(res)) => res,
        Ok(Err(join)) => Err(VitaeError::export(format!(
            "asset settle task panicked: {join}"
        ))),
        Err(_) => Err(VitaeError::export(format!(
            "timed out after {ms}ms waiting for fonts and images"
        ))),
    }
}

/// Blocking body of [`settle`]. A missing font is fatal; an unreadable photo is dropped with a
/// warning and the header renders without it.
pub fn settle_blocking(photo: Option<&Photo>, opts: &ExportOpts) -> VitaeResult<SettledAssets> {
    let font = resolve_font(opts)?;
    tracing::debug!(source = %font.source, index = font.index, "font resolved");
    let photo = photo.and_then(|p| match decode_photo(p, opts.supersample) {
        Ok(img) => Some(img),
        Err(err) => {
            tracing::warn!(error = %err, "profile picture skipped");
            None
        }
    });
    Ok(SettledAssets { font, photo })
}

/// Pick the font face used for all text.
///
/// An explicit `font_path` wins. Otherwise `font_dirs` are scanned, and the system fonts are
/// only loaded when those yield nothing.
pub fn resolve_font(opts: &ExportOpts) -> VitaeResult<FontFace> {
    if let Some(path) = &opts.font_path {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))
            .map_err(|e| VitaeError::export(format!("{e:#}")))?;
        return Ok(FontFace {
            bytes: Arc::new(bytes),
            index: 0,
            source: path.display().to_string(),
        });
    }

    let mut db = usvg::fontdb::Database::new();
    for dir in &opts.font_dirs {
        load_fonts_from_dir(&mut db, dir);
    }
    if db.len() == 0 {
        db.load_system_fonts();
    }

    let id = pick_face(&db).ok_or_else(|| {
        VitaeError::export("no usable font face found (set font_path or font_dirs)")
    })?;
    let source = db
        .face(id)
        .and_then(|f| f.families.first())
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| "system font".to_string());
    let (bytes, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| VitaeError::export(format!("font '{source}' could not be loaded")))?;

    Ok(FontFace {
        bytes: Arc::new(bytes),
        index,
        source,
    })
}

fn pick_face(db: &usvg::fontdb::Database) -> Option<usvg::fontdb::ID> {
    use usvg::fontdb::{Family, Query, Style, Weight};

    for name in PREFERRED_FAMILIES {
        let families = [Family::Name(*name)];
        let query = Query {
            families: &families,
            ..Query::default()
        };
        if let Some(id) = db.query(&query) {
            return Some(id);
        }
    }

    db.faces()
        .find(|f| !f.monospaced && f.style == Style::Normal && f.weight == Weight::NORMAL)
        .or_else(|| db.faces().next())
        .map(|f| f.id)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory unreadable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping font file");
        }
    }
}

/// Decode a header photo into a square of `size_px * supersample` pixels, center-cropped.
/// Round photos get an antialiased circular alpha mask.
pub fn decode_photo(photo: &Photo, supersample: u32) -> VitaeResult<DecodedImage> {
    let side = ((photo.size_px * f64::from(supersample)).ceil() as u32).max(1);
    let inline = parse_data_url(&photo.data_url)
        .map_err(|e| VitaeError::export(format!("profile picture: {e}")))?;

    let mut rgba8_premul = match inline.format {
        PictureFormat::Svg => rasterize_svg_cover(&inline.bytes, side)?,
        _ => decode_raster_cover(&inline.bytes, side)?,
    };
    if photo.round {
        apply_circle_mask(&mut rgba8_premul, side);
    }

    Ok(DecodedImage {
        width: side,
        height: side,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn decode_raster_cover(bytes: &[u8], side: u32) -> VitaeResult<Vec<u8>> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| VitaeError::export(format!("decode profile picture: {e}")))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(VitaeError::export("profile picture has no pixels"));
    }
    let crop = w.min(h);
    let square = image::imageops::crop_imm(&img, (w - crop) / 2, (h - crop) / 2, crop, crop)
        .to_image();
    let scaled =
        image::imageops::resize(&square, side, side, image::imageops::FilterType::Triangle);

    let mut rgba = scaled.into_raw();
    premultiply_rgba8_in_place(&mut rgba);
    Ok(rgba)
}

fn rasterize_svg_cover(bytes: &[u8], side: u32) -> VitaeResult<Vec<u8>> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| VitaeError::export(format!("parse profile picture svg: {e}")))?;
    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(VitaeError::export("profile picture svg has invalid size"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(side, side)
        .ok_or_else(|| VitaeError::export("failed to allocate svg pixmap"))?;
    let s = side as f32;
    let scale = (s / w).max(s / h);
    let xform = resvg::tiny_skia::Transform::from_scale(scale, scale)
        .post_translate((s - w * scale) * 0.5, (s - h * scale) * 0.5);
    resvg::render(&tree, xform, &mut pixmap.as_mut());
    // tiny-skia pixmaps are already premultiplied.
    Ok(pixmap.data().to_vec())
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn apply_circle_mask(rgba_premul: &mut [u8], side: u32) {
    let r = f64::from(side) * 0.5;
    for (i, px) in rgba_premul.chunks_exact_mut(4).enumerate() {
        let x = (i as u32 % side) as f64 + 0.5 - r;
        let y = (i as u32 / side) as f64 + 0.5 - r;
        let coverage = (r - (x * x + y * y).sqrt() + 0.5).clamp(0.0, 1.0);
        if coverage >= 1.0 {
            continue;
        }
        for c in px.iter_mut() {
            *c = (f64::from(*c) * coverage).round() as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/assets.rs"]
mod tests;
