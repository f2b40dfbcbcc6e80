use crate::document::model::{Document, TemplateId};
use crate::foundation::error::VitaeResult;
use crate::persistence::DocumentId;
use crate::persistence::service::PersistenceService;
use crate::template::layout::Layout;

/// Read-only view of a publicly shared resume.
#[derive(Clone, Debug, PartialEq)]
pub struct SharedResume {
    pub document: Document,
    pub layout: Layout,
}

/// Load a public resume and render it through its own template, or `template` when given.
///
/// Private and missing resumes are both [`crate::VitaeError::NotFound`].
#[tracing::instrument(level = "debug", skip(persistence))]
pub async fn open_shared(
    persistence: &dyn PersistenceService,
    id: &DocumentId,
    template: Option<TemplateId>,
) -> VitaeResult<SharedResume> {
    let document = persistence.get_public(id).await?;
    let layout = crate::template::render_with(&document, template.unwrap_or(document.template_id));
    Ok(SharedResume { document, layout })
}

#[cfg(test)]
#[path = "../tests/unit/share.rs"]
mod tests;
