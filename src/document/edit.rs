use crate::document::image_input::ProfilePicture;
use crate::document::model::{
    Document, Education, Experience, PersonalField, Project, TemplateId,
};
use crate::foundation::error::{VitaeError, VitaeResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EducationField {
    Institution,
    Degree,
    StartDate,
    EndDate,
    Description,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExperienceField {
    Company,
    Position,
    StartDate,
    EndDate,
    Description,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectField {
    Name,
    Description,
    Link,
}

/// Sequence-valued sections whose records can be reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListSection {
    Education,
    Experience,
    Skills,
    Projects,
}

/// One field-level change to a [`Document`].
///
/// Edits are applied one at a time, in the order they were issued. An edit that fails
/// validation leaves the document untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    SetTitle(String),
    SetPersonal {
        field: PersonalField,
        value: String,
    },
    SetProfilePicture(ProfilePicture),
    ClearProfilePicture,
    SetSummary(String),

    AddEducation,
    RemoveEducation(usize),
    SetEducation {
        index: usize,
        field: EducationField,
        value: String,
    },

    AddExperience,
    RemoveExperience(usize),
    SetExperience {
        index: usize,
        field: ExperienceField,
        value: String,
    },

    AddProject,
    RemoveProject(usize),
    SetProject {
        index: usize,
        field: ProjectField,
        value: String,
    },
    SetTechnologies {
        index: usize,
        technologies: Vec<String>,
    },

    AddSkill(String),
    RemoveSkill(usize),
    SetSkill {
        index: usize,
        value: String,
    },

    /// Move the record at `from` so it ends up at `to`.
    Move {
        section: ListSection,
        from: usize,
        to: usize,
    },

    SetTemplate(TemplateId),
    SetPublic(bool),
}

impl Document {
    /// Apply a single edit.
    pub fn apply(&mut self, edit: Edit) -> VitaeResult<()> {
        match edit {
            Edit::SetTitle(v) => self.title = v,
            Edit::SetPersonal { field, value } => {
                let info = &mut self.personal_info;
                let slot = match field {
                    PersonalField::FullName => &mut info.full_name,
                    PersonalField::Email => &mut info.email,
                    PersonalField::Phone => &mut info.phone,
                    PersonalField::Address => &mut info.address,
                    PersonalField::Linkedin => &mut info.linkedin,
                    PersonalField::Github => &mut info.github,
                    PersonalField::Website => &mut info.website,
                };
                *slot = value;
            }
            Edit::SetProfilePicture(pic) => {
                self.personal_info.profile_picture = Some(pic.into_data_url());
            }
            Edit::ClearProfilePicture => self.personal_info.profile_picture = None,
            Edit::SetSummary(v) => self.summary = v,

            Edit::AddEducation => self.education.push(Education::default()),
            Edit::RemoveEducation(i) => {
                check_index("education", i, self.education.len())?;
                self.education.remove(i);
            }
            Edit::SetEducation {
                index,
                field,
                value,
            } => {
                let rec = record_mut(&mut self.education, "education", index)?;
                let slot = match field {
                    EducationField::Institution => &mut rec.institution,
                    EducationField::Degree => &mut rec.degree,
                    EducationField::StartDate => &mut rec.start_date,
                    EducationField::EndDate => &mut rec.end_date,
                    EducationField::Description => &mut rec.description,
                };
                *slot = value;
            }

            Edit::AddExperience => self.experience.push(Experience::default()),
            Edit::RemoveExperience(i) => {
                check_index("experience", i, self.experience.len())?;
                self.experience.remove(i);
            }
            Edit::SetExperience {
                index,
                field,
                value,
            } => {
                let rec = record_mut(&mut self.experience, "experience", index)?;
                let slot = match field {
                    ExperienceField::Company => &mut rec.company,
                    ExperienceField::Position => &mut rec.position,
                    ExperienceField::StartDate => &mut rec.start_date,
                    ExperienceField::EndDate => &mut rec.end_date,
                    ExperienceField::Description => &mut rec.description,
                };
                *slot = value;
            }

            Edit::AddProject => self.projects.push(Project::default()),
            Edit::RemoveProject(i) => {
                check_index("projects", i, self.projects.len())?;
                self.projects.remove(i);
            }
            Edit::SetProject {
                index,
                field,
                value,
            } => {
                let rec = record_mut(&mut self.projects, "projects", index)?;
                let slot = match field {
                    ProjectField::Name => &mut rec.name,
                    ProjectField::Description => &mut rec.description,
                    ProjectField::Link => &mut rec.link,
                };
                *slot = value;
            }
            Edit::SetTechnologies {
                index,
                technologies,
            } => {
                record_mut(&mut self.projects, "projects", index)?.technologies = technologies;
            }

            Edit::AddSkill(v) => self.skills.push(v),
            Edit::RemoveSkill(i) => {
                check_index("skills", i, self.skills.len())?;
                self.skills.remove(i);
            }
            Edit::SetSkill { index, value } => {
                *record_mut(&mut self.skills, "skills", index)? = value;
            }

            Edit::Move { section, from, to } => match section {
                ListSection::Education => move_item(&mut self.education, "education", from, to)?,
                ListSection::Experience => {
                    move_item(&mut self.experience, "experience", from, to)?
                }
                ListSection::Skills => move_item(&mut self.skills, "skills", from, to)?,
                ListSection::Projects => move_item(&mut self.projects, "projects", from, to)?,
            },

            Edit::SetTemplate(t) => self.template_id = t,
            Edit::SetPublic(v) => self.is_public = v,
        }
        Ok(())
    }
}

fn check_index(section: &str, index: usize, len: usize) -> VitaeResult<()> {
    if index >= len {
        return Err(VitaeError::validation(format!(
            "{section} index {index} out of range (len {len})"
        )));
    }
    Ok(())
}

fn record_mut<'a, T>(items: &'a mut [T], section: &str, index: usize) -> VitaeResult<&'a mut T> {
    let len = items.len();
    items.get_mut(index).ok_or_else(|| {
        VitaeError::validation(format!("{section} index {index} out of range (len {len})"))
    })
}

fn move_item<T>(items: &mut Vec<T>, section: &str, from: usize, to: usize) -> VitaeResult<()> {
    check_index(section, from, items.len())?;
    check_index(section, to, items.len())?;
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/document/edit.rs"]
mod tests;
