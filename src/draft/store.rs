use std::path::PathBuf;
use std::sync::Arc;

use crate::document::model::Document;
use crate::document::normalize::normalize_json;
use crate::draft::kv::{FileStore, KeyValueStore};
use crate::foundation::error::VitaeResult;
use crate::persistence::service::PersistenceService;
use crate::persistence::{DocumentId, IdentityContext};

/// Well-known key holding the unsaved resume.
pub const DRAFT_KEY: &str = "resume-draft";

/// The single local draft of an unauthenticated editing session.
///
/// Last writer wins; there is no cross-process locking.
#[derive(Clone)]
pub struct DraftStore {
    kv: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore").finish_non_exhaustive()
    }
}

impl DraftStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// File-backed store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::new(dir)))
    }

    /// Read the draft.
    ///
    /// `Ok(None)` when no draft exists. A draft in the current shape comes back exactly as it
    /// was saved, blank entries included. Partial or older shapes are normalized, and content
    /// that is not JSON yields [`Document::empty`]. Only store I/O failures are errors.
    pub fn load(&self) -> VitaeResult<Option<Document>> {
        let Some(text) = self.kv.get(DRAFT_KEY)? else {
            return Ok(None);
        };
        if let Ok(doc) = Document::from_json(&text) {
            return Ok(Some(doc));
        }
        match normalize_json(&text) {
            Ok(doc) => Ok(Some(doc)),
            Err(err) => {
                tracing::warn!(error = %err, "malformed local draft, starting from an empty resume");
                Ok(Some(Document::empty()))
            }
        }
    }

    /// Read the draft, falling back to [`Document::empty`] on absence or any failure.
    pub fn load_or_empty(&self) -> Document {
        match self.load() {
            Ok(doc) => doc.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(error = %err, "local draft unreadable, starting from an empty resume");
                Document::empty()
            }
        }
    }

    pub fn save(&self, doc: &Document) -> VitaeResult<()> {
        self.kv.set(DRAFT_KEY, &doc.to_json()?)
    }

    pub fn clear(&self) -> VitaeResult<()> {
        self.kv.remove(DRAFT_KEY)
    }

    pub fn exists(&self) -> VitaeResult<bool> {
        Ok(self.kv.get(DRAFT_KEY)?.is_some())
    }

    /// Create `doc` remotely for `identity`, then clear the local draft.
    ///
    /// The draft is only cleared after the remote create succeeded. A failed clear is logged and
    /// does not undo the promotion.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn promote(
        &self,
        identity: &IdentityContext,
        persistence: &dyn PersistenceService,
        doc: &Document,
    ) -> VitaeResult<DocumentId> {
        let id = persistence.create(identity, doc).await?;
        if let Err(err) = self.clear() {
            tracing::warn!(error = %err, %id, "promoted draft but failed to clear local copy");
        }
        tracing::info!(%id, "local draft promoted");
        Ok(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draft/store.rs"]
mod tests;
