use std::sync::Arc;

use crate::export::assets::{self, SettledAssets};
use crate::export::flow;
use crate::export::offscreen::Stage;
use crate::export::paginate::paginate;
use crate::export::pdf::{self, PdfArtifact};
use crate::export::raster::{self, Bitmap};
use crate::export::text::TextLayoutEngine;
use crate::foundation::config::{ExportOpts, Pagination};
use crate::foundation::core::PaperSize;
use crate::foundation::error::{VitaeError, VitaeResult};
use crate::template::layout::Layout;

/// Rendered layout to PDF: isolate, settle, rasterize, paginate, assemble.
///
/// The offscreen clone is released on every path, including errors and panics inside the
/// blocking rasterizer.
#[derive(Debug, Clone)]
pub struct ExportPipeline {
    opts: ExportOpts,
    paper: PaperSize,
    stage: Arc<Stage>,
}

impl ExportPipeline {
    pub fn new(opts: ExportOpts) -> VitaeResult<Self> {
        opts.validate()?;
        Ok(Self {
            opts,
            paper: PaperSize::A4,
            stage: Stage::new(),
        })
    }

    pub fn opts(&self) -> &ExportOpts {
        &self.opts
    }

    pub fn paper(&self) -> PaperSize {
        self.paper
    }

    /// The offscreen container export clones are attached to.
    pub fn stage(&self) -> &Arc<Stage> {
        &self.stage
    }

    /// Export `layout` as `<title>.pdf`.
    ///
    /// `None` means nothing has been rendered yet: fails with
    /// [`VitaeError::RenderTargetMissing`] before any work is done.
    #[tracing::instrument(level = "info", skip_all, fields(title = %title))]
    pub async fn export(&self, layout: Option<&Layout>, title: &str) -> VitaeResult<PdfArtifact> {
        let layout = layout.ok_or_else(|| {
            VitaeError::render_target_missing("no rendered resume layout to export")
        })?;
        let target = self.stage.attach(layout)?;
        let photo = target.layout().header().and_then(|h| h.photo.clone());
        let assets = assets::settle(photo, self.opts.clone()).await?;

        let opts = self.opts.clone();
        let paper = self.paper;
        let title = title.to_string();
        let artifact = tokio::task::spawn_blocking(move || {
            let pdf = render_pdf(target.layout(), &assets, &opts, paper, &title);
            drop(target);
            pdf
        })
        .await
        .map_err(|e| VitaeError::export(format!("rasterization task panicked: {e}")))??;

        tracing::info!(
            file = %artifact.file_name,
            pages = artifact.page_count,
            bytes = artifact.bytes.len(),
            "resume exported"
        );
        Ok(artifact)
    }

    /// Settle and rasterize `layout` into one tall bitmap, without paginating.
    pub async fn rasterize(&self, layout: &Layout) -> VitaeResult<Bitmap> {
        let target = self.stage.attach(layout)?;
        let photo = target.layout().header().and_then(|h| h.photo.clone());
        let assets = assets::settle(photo, self.opts.clone()).await?;

        let supersample = self.opts.supersample;
        let paper = self.paper;
        tokio::task::spawn_blocking(move || {
            let bitmap = rasterize_layout(target.layout(), &assets, supersample, paper);
            drop(target);
            bitmap
        })
        .await
        .map_err(|e| VitaeError::export(format!("rasterization task panicked: {e}")))?
    }
}

fn rasterize_layout(
    layout: &Layout,
    assets: &SettledAssets,
    supersample: u32,
    paper: PaperSize,
) -> VitaeResult<Bitmap> {
    let mut engine = TextLayoutEngine::new(&assets.font)?;
    let min_height = f64::from(paper.page_height_px(layout.width_px));
    let flow = flow::flow(layout, &mut engine, min_height)?;
    raster::rasterize(&flow, assets, supersample)
}

fn render_pdf(
    layout: &Layout,
    assets: &SettledAssets,
    opts: &ExportOpts,
    paper: PaperSize,
    title: &str,
) -> VitaeResult<PdfArtifact> {
    let mut engine = TextLayoutEngine::new(&assets.font)?;
    tracing::debug!(family = engine.family_name(), source = %assets.font.source, "font settled");
    let min_height = f64::from(paper.page_height_px(layout.width_px));
    let flow = flow::flow(layout, &mut engine, min_height)?;
    let bitmap = raster::rasterize(&flow, assets, opts.supersample)?;

    let ss = f64::from(opts.supersample);
    let page_height = paper.page_height_px(bitmap.width);
    let spans: Vec<(u32, u32)> = flow
        .keep_together
        .iter()
        .map(|(a, b)| ((a * ss).floor() as u32, (b * ss).ceil() as u32))
        .collect();
    let ranges = paginate(bitmap.height, page_height, &spans, opts.pagination);
    if opts.pagination == Pagination::ClipFirstPage && bitmap.height > page_height {
        tracing::warn!(
            content_px = bitmap.height,
            page_px = page_height,
            "content taller than one page was clipped"
        );
    }
    tracing::debug!(
        width = bitmap.width,
        height = bitmap.height,
        pages = ranges.len(),
        "paginated"
    );

    let pages: Vec<Bitmap> = ranges
        .into_iter()
        .map(|r| bitmap.page(r, page_height))
        .collect();
    pdf::assemble(&pages, paper, title, opts.jpeg_quality)
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
