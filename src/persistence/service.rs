use async_trait::async_trait;

use crate::document::model::Document;
use crate::foundation::error::VitaeResult;
use crate::persistence::{DocumentId, IdentityContext};

/// Remote document storage.
///
/// Implementations are fallible and asynchronous; the transport is theirs to choose. Every call
/// that touches owned data receives the caller's [`IdentityContext`] explicitly.
#[async_trait]
pub trait PersistenceService: Send + Sync {
    /// Store a new document owned by the caller and return its id.
    async fn create(&self, identity: &IdentityContext, doc: &Document) -> VitaeResult<DocumentId>;

    /// Fetch a document owned by the caller.
    async fn get(&self, identity: &IdentityContext, id: &DocumentId) -> VitaeResult<Document>;

    /// Replace a document owned by the caller. Returns the stored value.
    async fn update(
        &self,
        identity: &IdentityContext,
        id: &DocumentId,
        doc: &Document,
    ) -> VitaeResult<Document>;

    async fn delete(&self, identity: &IdentityContext, id: &DocumentId) -> VitaeResult<()>;

    /// Fetch a document through the public read path. Private or missing documents are
    /// [`crate::VitaeError::NotFound`].
    async fn get_public(&self, id: &DocumentId) -> VitaeResult<Document>;
}
