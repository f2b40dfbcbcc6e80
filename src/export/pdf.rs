use std::path::{Path, PathBuf};

use anyhow::Context as _;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};

use crate::export::raster::Bitmap;
use crate::foundation::core::PaperSize;
use crate::foundation::error::{VitaeError, VitaeResult};

/// Name used when the title is blank.
pub const FALLBACK_FILE_STEM: &str = "resume";

/// The exported PDF, ready to be offered as a download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl PdfArtifact {
    /// Write the PDF into `dir` under [`PdfArtifact::file_name`] and return the full path.
    pub fn write_to_dir(&self, dir: &Path) -> VitaeResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("write pdf '{}'", path.display()))?;
        Ok(path)
    }
}

/// `<title>.pdf`, or `resume.pdf` for a blank title.
///
/// Characters that are unsafe in file names (`/ \ : * ? " < > |` and control characters) become
/// `_`. Surrounding whitespace is trimmed.
pub fn download_name(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = cleaned.trim();
    if stem.is_empty() {
        format!("{FALLBACK_FILE_STEM}.pdf")
    } else {
        format!("{stem}.pdf")
    }
}

/// Embed each page bitmap as a full-bleed JPEG on its own `paper`-sized page.
pub(crate) fn assemble(
    pages: &[Bitmap],
    paper: PaperSize,
    title: &str,
    jpeg_quality: u8,
) -> VitaeResult<PdfArtifact> {
    if pages.is_empty() {
        return Err(VitaeError::export("no pages to assemble"));
    }

    let page_w = paper.width_pt() as f32;
    let page_h = paper.height_pt() as f32;
    let image_name = Name(b"Im0");

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let info_id = Ref::new(3);
    let mut next = 4;
    let mut alloc = || {
        let r = Ref::new(next);
        next += 1;
        r
    };

    let ids: Vec<(Ref, Ref, Ref)> = pages.iter().map(|_| (alloc(), alloc(), alloc())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(ids.iter().map(|(page_id, _, _)| *page_id))
        .count(pages.len() as i32);

    for (bitmap, &(page_id, image_id, content_id)) in pages.iter().zip(&ids) {
        let jpeg = encode_jpeg(bitmap, jpeg_quality)?;

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().x_objects().pair(image_name, image_id);
        page.finish();

        let mut image = pdf.image_xobject(image_id, &jpeg);
        image.filter(Filter::DctDecode);
        image.width(bitmap.width as i32);
        image.height(bitmap.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();

        let mut content = Content::new();
        content.save_state();
        content.transform([page_w, 0.0, 0.0, page_h, 0.0, 0.0]);
        content.x_object(image_name);
        content.restore_state();
        pdf.stream(content_id, &content.finish());
    }

    let display_title = if title.trim().is_empty() {
        FALLBACK_FILE_STEM
    } else {
        title.trim()
    };
    pdf.document_info(info_id)
        .title(TextStr(display_title))
        .producer(TextStr(concat!("vitae ", env!("CARGO_PKG_VERSION"))));

    Ok(PdfArtifact {
        file_name: download_name(title),
        bytes: pdf.finish(),
        page_count: pages.len(),
    })
}

fn encode_jpeg(bitmap: &Bitmap, quality: u8) -> VitaeResult<Vec<u8>> {
    // Bitmaps are opaque, so dropping alpha loses nothing.
    let rgb: Vec<u8> = bitmap
        .rgba8
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
        .encode(
            &rgb,
            bitmap.width,
            bitmap.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| VitaeError::export(format!("encode page image: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/pdf.rs"]
mod tests;
