use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::document::model::Document;
use crate::foundation::error::{VitaeError, VitaeResult};
use crate::persistence::service::PersistenceService;
use crate::persistence::{DocumentId, IdentityContext, UserId};

#[derive(Clone, Debug)]
struct Row {
    owner: UserId,
    doc: Document,
}

/// Process-local [`PersistenceService`] keyed by random v4 UUIDs.
///
/// Owners can read and write their own rows; everyone else sees [`VitaeError::NotFound`].
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    rows: Mutex<HashMap<DocumentId, Row>>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Documents owned by `user`, in id order.
    pub fn list(&self, user: &UserId) -> VitaeResult<Vec<(DocumentId, Document)>> {
        let rows = self.lock()?;
        let mut out: Vec<_> = rows
            .iter()
            .filter(|(_, r)| &r.owner == user)
            .map(|(id, r)| (id.clone(), r.doc.clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }

    fn lock(&self) -> VitaeResult<std::sync::MutexGuard<'_, HashMap<DocumentId, Row>>> {
        self.rows
            .lock()
            .map_err(|_| VitaeError::persistence("document table lock poisoned"))
    }
}

fn owned<'a>(
    rows: &'a mut HashMap<DocumentId, Row>,
    user: &UserId,
    id: &DocumentId,
) -> VitaeResult<&'a mut Row> {
    match rows.get_mut(id) {
        Some(row) if &row.owner == user => Ok(row),
        _ => Err(VitaeError::not_found(format!("resume {id}"))),
    }
}

#[async_trait]
impl PersistenceService for InMemoryPersistence {
    async fn create(&self, identity: &IdentityContext, doc: &Document) -> VitaeResult<DocumentId> {
        let owner = identity.require_user()?.clone();
        let id = DocumentId(uuid::Uuid::new_v4().to_string());
        self.lock()?.insert(
            id.clone(),
            Row {
                owner,
                doc: doc.clone(),
            },
        );
        tracing::debug!(%id, "created resume");
        Ok(id)
    }

    async fn get(&self, identity: &IdentityContext, id: &DocumentId) -> VitaeResult<Document> {
        let user = identity.require_user()?;
        let mut rows = self.lock()?;
        Ok(owned(&mut rows, user, id)?.doc.clone())
    }

    async fn update(
        &self,
        identity: &IdentityContext,
        id: &DocumentId,
        doc: &Document,
    ) -> VitaeResult<Document> {
        let user = identity.require_user()?;
        let mut rows = self.lock()?;
        let row = owned(&mut rows, user, id)?;
        row.doc = doc.clone();
        Ok(row.doc.clone())
    }

    async fn delete(&self, identity: &IdentityContext, id: &DocumentId) -> VitaeResult<()> {
        let user = identity.require_user()?;
        let mut rows = self.lock()?;
        owned(&mut rows, user, id)?;
        rows.remove(id);
        Ok(())
    }

    async fn get_public(&self, id: &DocumentId) -> VitaeResult<Document> {
        let rows = self.lock()?;
        match rows.get(id) {
            Some(row) if row.doc.is_public => Ok(row.doc.clone()),
            _ => Err(VitaeError::not_found(format!("public resume {id}"))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persistence/memory.rs"]
mod tests;
