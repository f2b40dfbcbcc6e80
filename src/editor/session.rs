use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::document::edit::Edit;
use crate::document::image_input::ProfilePicture;
use crate::document::model::Document;
use crate::draft::store::DraftStore;
use crate::export::pdf::PdfArtifact;
use crate::export::pipeline::ExportPipeline;
use crate::foundation::config::DEFAULT_MAX_PROFILE_PICTURE_BYTES;
use crate::foundation::error::{VitaeError, VitaeResult};
use crate::persistence::service::PersistenceService;
use crate::persistence::{DocumentId, IdentityContext};
use crate::template::layout::Layout;

/// The on-screen rendering of the current document.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    /// Layout at full page width. Export clones this, never a scaled copy.
    pub layout: Layout,
    /// Document revision the layout was rendered from.
    pub revision: u64,
    /// Scale applied when showing the preview on screen.
    pub display_scale: f64,
}

impl Preview {
    pub fn display_width_px(&self) -> f64 {
        f64::from(self.layout.width_px) * self.display_scale
    }
}

/// Single-writer editing session over one [`Document`].
///
/// Edits apply strictly in call order; each one bumps the revision and re-renders the preview
/// before returning, so an export always sees the latest edit. Local sessions also write the
/// draft after every edit.
#[derive(Debug)]
pub struct EditorSession {
    doc: Document,
    revision: u64,
    preview: Option<Preview>,
    display_scale: f64,
    drafts: Option<DraftStore>,
    remote_id: Option<DocumentId>,
    max_picture_bytes: usize,
    exporting: AtomicBool,
}

impl EditorSession {
    /// Session over `doc` with no local draft and no remote copy.
    pub fn from_document(doc: Document) -> Self {
        let mut session = Self {
            doc,
            revision: 0,
            preview: None,
            display_scale: 1.0,
            drafts: None,
            remote_id: None,
            max_picture_bytes: DEFAULT_MAX_PROFILE_PICTURE_BYTES,
            exporting: AtomicBool::new(false),
        };
        session.render_preview();
        session
    }

    /// Unauthenticated session backed by the local draft. Starts from the stored draft, or from
    /// an empty resume when there is none or it is unreadable.
    pub fn open_local(drafts: DraftStore) -> Self {
        let doc = drafts.load_or_empty();
        let mut session = Self::from_document(doc);
        session.drafts = Some(drafts);
        session
    }

    /// Session over a remote document owned by `identity`.
    pub async fn open_remote(
        identity: &IdentityContext,
        persistence: &dyn PersistenceService,
        id: DocumentId,
    ) -> VitaeResult<Self> {
        let doc = persistence.get(identity, &id).await?;
        let mut session = Self::from_document(doc);
        session.remote_id = Some(id);
        Ok(session)
    }

    pub fn with_display_scale(mut self, scale: f64) -> Self {
        self.display_scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        if let Some(p) = &mut self.preview {
            p.display_scale = self.display_scale;
        }
        self
    }

    pub fn with_max_picture_bytes(mut self, max: usize) -> Self {
        self.max_picture_bytes = max;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn remote_id(&self) -> Option<&DocumentId> {
        self.remote_id.as_ref()
    }

    /// Return `true` while edits are written to the local draft.
    pub fn is_local(&self) -> bool {
        self.drafts.is_some()
    }

    /// Apply one edit. On error the document, revision, and preview are unchanged.
    pub fn apply(&mut self, edit: Edit) -> VitaeResult<u64> {
        self.doc.apply(edit)?;
        self.revision += 1;
        self.render_preview();
        self.write_draft();
        Ok(self.revision)
    }

    /// Validate and store a profile picture. Rejected input leaves the current picture as is.
    pub fn set_profile_picture(&mut self, bytes: &[u8]) -> VitaeResult<u64> {
        let picture = ProfilePicture::from_bytes(bytes, self.max_picture_bytes)?;
        self.apply(Edit::SetProfilePicture(picture))
    }

    pub fn set_profile_picture_from_path(&mut self, path: &Path) -> VitaeResult<u64> {
        let picture = ProfilePicture::from_path(path, self.max_picture_bytes)?;
        self.apply(Edit::SetProfilePicture(picture))
    }

    /// Save through `persistence` as `identity`.
    ///
    /// The first save of a local session creates the remote copy and clears the draft once;
    /// later saves update it. On failure the in-memory document is kept as edited.
    #[tracing::instrument(level = "info", skip_all, fields(remote = ?self.remote_id))]
    pub async fn save(
        &mut self,
        identity: &IdentityContext,
        persistence: &dyn PersistenceService,
    ) -> VitaeResult<DocumentId> {
        identity.require_user()?;

        if let Some(id) = &self.remote_id {
            persistence.update(identity, id, &self.doc).await?;
            tracing::info!(%id, revision = self.revision, "resume saved");
            return Ok(id.clone());
        }

        let id = match &self.drafts {
            Some(drafts) => drafts.promote(identity, persistence, &self.doc).await?,
            None => persistence.create(identity, &self.doc).await?,
        };
        self.drafts = None;
        self.remote_id = Some(id.clone());
        tracing::info!(%id, revision = self.revision, "resume created");
        Ok(id)
    }

    /// Claim the export slot. Fails with [`VitaeError::ExportInFlight`] while another export
    /// holds it.
    pub fn begin_export(&self) -> VitaeResult<ExportGuard<'_>> {
        self.exporting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| VitaeError::ExportInFlight)?;
        Ok(ExportGuard {
            flag: &self.exporting,
        })
    }

    pub fn export_in_flight(&self) -> bool {
        self.exporting.load(Ordering::Acquire)
    }

    /// Export the current preview as `<title>.pdf`.
    pub async fn export(&self, pipeline: &ExportPipeline) -> VitaeResult<PdfArtifact> {
        let _guard = self.begin_export()?;
        let layout = self.preview.as_ref().map(|p| &p.layout);
        pipeline.export(layout, &self.doc.title).await
    }

    fn render_preview(&mut self) {
        self.preview = Some(Preview {
            layout: crate::template::render(&self.doc),
            revision: self.revision,
            display_scale: self.display_scale,
        });
    }

    fn write_draft(&self) {
        let Some(drafts) = &self.drafts else {
            return;
        };
        if let Err(err) = drafts.save(&self.doc) {
            tracing::warn!(error = %err, revision = self.revision, "failed to write local draft");
        }
    }
}

/// Releases the export slot on drop.
#[derive(Debug)]
pub struct ExportGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
