use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Title given to a freshly created resume.
pub const DEFAULT_TITLE: &str = "Untitled Resume";

/// Closed set of layouts a [`Document`] can be rendered through.
///
/// Tags outside the set resolve to [`TemplateId::default`] at the boundary, so arbitrary strings
/// never travel into the render path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateId {
    /// Single-column classic: header first, sections stacked.
    #[default]
    Modern,
    /// Sidebar-first: identity, contacts, and skills in a tinted left column.
    Visual,
    /// Centered serif-style layout with ruled section titles.
    Elegant,
}

impl TemplateId {
    /// Every template, in menu order.
    pub const ALL: [TemplateId; 3] = [TemplateId::Modern, TemplateId::Visual, TemplateId::Elegant];

    /// Stable storage tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Visual => "visual",
            Self::Elegant => "elegant",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Modern => "Modern",
            Self::Visual => "Visual",
            Self::Elegant => "Elegant",
        }
    }

    /// Parse a known tag. Case and surrounding whitespace are ignored.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "modern" | "classic" | "single-column" | "single-column-classic" => Some(Self::Modern),
            "visual" | "sidebar" | "sidebar-visual" => Some(Self::Visual),
            "elegant" | "centered" | "centered-elegant" => Some(Self::Elegant),
            _ => None,
        }
    }

    /// Parse a possibly missing tag, falling back to the default template.
    pub fn resolve(tag: Option<&str>) -> Self {
        tag.and_then(Self::parse).unwrap_or_default()
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TemplateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(Self::resolve(tag.as_deref()))
    }
}

/// Identity and contact fields. Empty strings mean "not provided".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
    /// Inline `data:` URL of the profile photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl PersonalInfo {
    /// Contact fields in display order, each with its field. Blank fields are skipped.
    pub fn contacts(&self) -> Vec<(PersonalField, &str)> {
        [
            (PersonalField::Email, self.email.as_str()),
            (PersonalField::Phone, self.phone.as_str()),
            (PersonalField::Address, self.address.as_str()),
            (PersonalField::Linkedin, self.linkedin.as_str()),
            (PersonalField::Github, self.github.as_str()),
            (PersonalField::Website, self.website.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !is_blank(v))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        is_blank(&self.full_name) && self.contacts().is_empty() && self.profile_picture.is_none()
    }
}

/// Editable scalar fields of [`PersonalInfo`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Address,
    Linkedin,
    Github,
    Website,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl Education {
    pub fn is_blank(&self) -> bool {
        [
            &self.institution,
            &self.degree,
            &self.start_date,
            &self.end_date,
            &self.description,
        ]
        .into_iter()
        .all(|s| is_blank(s))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl Experience {
    pub fn is_blank(&self) -> bool {
        [
            &self.company,
            &self.position,
            &self.start_date,
            &self.end_date,
            &self.description,
        ]
        .into_iter()
        .all(|s| is_blank(s))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    pub link: String,
    pub technologies: Vec<String>,
}

impl Project {
    pub fn is_blank(&self) -> bool {
        is_blank(&self.name)
            && is_blank(&self.description)
            && is_blank(&self.link)
            && self.technologies.iter().all(|t| is_blank(t))
    }
}

/// The resume record.
///
/// Sequence order is display order. Skills keep duplicates and insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub title: String,
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub template_id: TemplateId,
    pub is_public: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    /// A resume with every field empty and the default template selected.
    pub fn empty() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            personal_info: PersonalInfo::default(),
            summary: String::new(),
            education: Vec::new(),
            experience: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            template_id: TemplateId::default(),
            is_public: false,
        }
    }

    /// Strict JSON decode. Prefer [`crate::normalize_document`] for data of unknown vintage.
    pub fn from_json(text: &str) -> crate::VitaeResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// JSON encode.
    pub fn to_json(&self) -> crate::VitaeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Return `true` when `section` has nothing worth rendering.
    ///
    /// Scalars count as empty when blank; sequences when they hold no non-blank record.
    pub fn is_empty_section(&self, section: SectionName) -> bool {
        match section {
            SectionName::PersonalInfo => self.personal_info.is_empty(),
            SectionName::Summary => is_blank(&self.summary),
            SectionName::Education => self.education.iter().all(Education::is_blank),
            SectionName::Experience => self.experience.iter().all(Experience::is_blank),
            SectionName::Skills => self.skills.iter().all(|s| is_blank(s)),
            SectionName::Projects => self.projects.iter().all(Project::is_blank),
        }
    }
}

/// Named parts of a [`Document`] that templates render as sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    PersonalInfo,
    Summary,
    Education,
    Experience,
    Skills,
    Projects,
}

impl SectionName {
    /// Every section, in canonical order.
    pub const ALL: [SectionName; 6] = [
        SectionName::PersonalInfo,
        SectionName::Summary,
        SectionName::Experience,
        SectionName::Education,
        SectionName::Skills,
        SectionName::Projects,
    ];

    /// Look a section up by its field name (`"experience"`, `"personalInfo"`, ...).
    pub fn from_field(name: &str) -> Option<Self> {
        match name.trim() {
            "personalInfo" | "personal_info" => Some(Self::PersonalInfo),
            "summary" => Some(Self::Summary),
            "education" => Some(Self::Education),
            "experience" => Some(Self::Experience),
            "skills" => Some(Self::Skills),
            "projects" => Some(Self::Projects),
            _ => None,
        }
    }
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
