pub(crate) mod elegant;
pub(crate) mod layout;
pub(crate) mod modern;
pub(crate) mod sections;
pub(crate) mod visual;

use crate::document::model::{Document, TemplateId};
use crate::template::layout::Layout;

/// Render `doc` through its own template.
///
/// Pure: the document is only read, and equal documents give equal layouts.
pub fn render(doc: &Document) -> Layout {
    render_with(doc, doc.template_id)
}

/// Render `doc` through `template`, ignoring the template the document selects.
#[tracing::instrument(level = "debug", skip(doc), fields(template = %template))]
pub fn render_with(doc: &Document, template: TemplateId) -> Layout {
    match template {
        TemplateId::Modern => modern::render(doc),
        TemplateId::Visual => visual::render(doc),
        TemplateId::Elegant => elegant::render(doc),
    }
}

/// Render through a template tag that may be unknown. Unknown tags use the default template.
pub fn render_tag(doc: &Document, tag: &str) -> Layout {
    render_with(doc, TemplateId::resolve(Some(tag)))
}

#[cfg(test)]
#[path = "../../tests/unit/template/mod.rs"]
mod tests;
