//! Lenient decoding of resume JSON of unknown vintage.
//!
//! Stored drafts and remote rows may predate the current shape: keys go missing, strings show
//! up as numbers or `null`, `skills` may be one comma-separated string. Everything is coerced
//! into a well-formed [`Document`]; nothing here fails once the input parses as JSON.

use serde_json::{Map, Value};

use crate::document::model::{
    DEFAULT_TITLE, Document, Education, Experience, PersonalInfo, Project, TemplateId,
};
use crate::foundation::error::VitaeResult;

/// Parse `text` as JSON and normalize it. Only unparseable JSON is an error.
pub fn normalize_json(text: &str) -> VitaeResult<Document> {
    let value: Value = serde_json::from_str(text)?;
    Ok(normalize_document(&value))
}

/// Coerce an arbitrary JSON value into a [`Document`]. A non-object root yields
/// [`Document::empty`].
pub fn normalize_document(value: &Value) -> Document {
    let Some(obj) = value.as_object() else {
        return Document::empty();
    };

    let title = string_field(obj, "title");
    let template_tag = obj
        .get("templateId")
        .or_else(|| obj.get("template_id"))
        .or_else(|| obj.get("template"))
        .and_then(Value::as_str);

    Document {
        title: if title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title
        },
        personal_info: obj
            .get("personalInfo")
            .or_else(|| obj.get("personal_info"))
            .and_then(Value::as_object)
            .map(personal_info)
            .unwrap_or_default(),
        summary: string_field(obj, "summary"),
        education: records(obj.get("education"), |o| Education {
            institution: string_field(o, "institution"),
            degree: string_field(o, "degree"),
            start_date: string_field(o, "startDate"),
            end_date: string_field(o, "endDate"),
            description: string_field(o, "description"),
        }),
        experience: records(obj.get("experience"), |o| Experience {
            company: string_field(o, "company"),
            position: string_field(o, "position"),
            start_date: string_field(o, "startDate"),
            end_date: string_field(o, "endDate"),
            description: string_field(o, "description"),
        }),
        skills: string_list(obj.get("skills")),
        projects: records(obj.get("projects"), |o| Project {
            name: string_field(o, "name"),
            description: string_field(o, "description"),
            link: string_field(o, "link"),
            technologies: string_list(o.get("technologies")),
        }),
        template_id: TemplateId::resolve(template_tag),
        is_public: obj
            .get("isPublic")
            .or_else(|| obj.get("is_public"))
            .map(truthy)
            .unwrap_or(false),
    }
}

fn personal_info(o: &Map<String, Value>) -> PersonalInfo {
    let picture = string_field(o, "profilePicture");
    PersonalInfo {
        full_name: string_field(o, "fullName"),
        email: string_field(o, "email"),
        phone: string_field(o, "phone"),
        address: string_field(o, "address"),
        linkedin: string_field(o, "linkedin"),
        github: string_field(o, "github"),
        website: string_field(o, "website"),
        profile_picture: is_inline_image(&picture).then_some(picture),
    }
}

/// Only inline `data:image/...` URLs are kept. Remote URLs and free text are dropped.
fn is_inline_image(url: &str) -> bool {
    url.trim()
        .get(..11)
        .is_some_and(|head| head.eq_ignore_ascii_case("data:image/"))
}

fn records<T>(value: Option<&Value>, build: impl Fn(&Map<String, Value>) -> T) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).map(build).collect(),
        _ => Vec::new(),
    }
}

/// Look up `key`, also trying its snake_case spelling.
fn string_field(o: &Map<String, Value>, key: &str) -> String {
    o.get(key)
        .or_else(|| o.get(&snake_case(key)))
        .map(scalar_string)
        .unwrap_or_default()
}

fn scalar_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(scalar_string)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    }
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/document/normalize.rs"]
mod tests;
