//! Section builders shared by every template.
//!
//! Templates differ in placement, palette, and typography only. Content selection lives here,
//! so all three agree on what is shown and what is omitted.

use crate::document::model::{Document, SectionName, is_blank};
use crate::document::period::format_period;
use crate::foundation::core::{Align, Rgba8};
use crate::template::layout::{
    EntryItem, HeaderBlock, Item, Photo, Rule, SectionBlock, TagsItem, Text, TextStyle,
};

/// Palette and type scale of one template.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Theme {
    pub text: Rgba8,
    pub muted: Rgba8,
    pub accent: Rgba8,
    pub name_px: f64,
    pub title_px: f64,
    pub heading_px: f64,
    pub body_px: f64,
    pub small_px: f64,
    pub title_align: Align,
    pub title_uppercase: bool,
    pub title_spacing_px: f64,
    pub rule: Option<Rule>,
    pub chip: Option<Rgba8>,
    pub item_gap_px: f64,
}

impl Theme {
    fn body(&self) -> TextStyle {
        TextStyle::new(self.body_px, self.text)
    }

    fn small(&self) -> TextStyle {
        TextStyle::new(self.small_px, self.muted)
    }

    fn heading(&self) -> TextStyle {
        TextStyle::new(self.heading_px, self.text).strong()
    }
}

/// How contacts are laid out inside the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ContactStyle {
    /// One contact per line.
    Stacked,
    /// All contacts on one line joined by a separator.
    Inline(&'static str),
}

pub(crate) struct HeaderSpec {
    pub align: Align,
    pub name_color: Rgba8,
    pub contact_color: Rgba8,
    pub contacts: ContactStyle,
    pub photo_px: f64,
    pub round_photo: bool,
}

/// Header block, or `None` when the personal info is entirely empty.
pub(crate) fn header(doc: &Document, theme: &Theme, spec: &HeaderSpec) -> Option<HeaderBlock> {
    let info = &doc.personal_info;
    if info.is_empty() {
        return None;
    }

    let name = (!is_blank(&info.full_name)).then(|| {
        Text::new(
            info.full_name.trim(),
            TextStyle::new(theme.name_px, spec.name_color)
                .strong()
                .aligned(spec.align),
        )
    });

    let contact_style = TextStyle::new(theme.small_px, spec.contact_color).aligned(spec.align);
    let values: Vec<&str> = info.contacts().into_iter().map(|(_, v)| v.trim()).collect();
    let contacts = match spec.contacts {
        _ if values.is_empty() => Vec::new(),
        ContactStyle::Stacked => values
            .into_iter()
            .map(|v| Text::new(v, contact_style))
            .collect(),
        ContactStyle::Inline(sep) => vec![Text::new(values.join(sep), contact_style)],
    };

    let photo = info.profile_picture.as_ref().map(|url| Photo {
        data_url: url.clone(),
        size_px: spec.photo_px,
        round: spec.round_photo,
    });

    Some(HeaderBlock {
        photo,
        name,
        contacts,
        align: spec.align,
        line_gap_px: 4.0,
    })
}

pub(crate) fn section_title(section: SectionName) -> &'static str {
    match section {
        SectionName::PersonalInfo => "Contact",
        SectionName::Summary => "Summary",
        SectionName::Experience => "Experience",
        SectionName::Education => "Education",
        SectionName::Skills => "Skills",
        SectionName::Projects => "Projects",
    }
}

/// Section block, or `None` when the section is empty.
///
/// `PersonalInfo` is rendered by [`header`] and never yields a section here.
pub(crate) fn section(doc: &Document, section: SectionName, theme: &Theme) -> Option<SectionBlock> {
    if section == SectionName::PersonalInfo || doc.is_empty_section(section) {
        return None;
    }

    let items = match section {
        SectionName::PersonalInfo => return None,
        SectionName::Summary => vec![Item::Paragraph(Text::new(doc.summary.trim(), theme.body()))],
        SectionName::Experience => doc
            .experience
            .iter()
            .filter(|e| !e.is_blank())
            .map(|e| {
                entry(
                    theme,
                    &e.position,
                    &format_period(&e.start_date, &e.end_date).unwrap_or_default(),
                    &e.company,
                    &e.description,
                    "",
                )
            })
            .collect(),
        SectionName::Education => doc
            .education
            .iter()
            .filter(|e| !e.is_blank())
            .map(|e| {
                entry(
                    theme,
                    &e.degree,
                    &format_period(&e.start_date, &e.end_date).unwrap_or_default(),
                    &e.institution,
                    &e.description,
                    "",
                )
            })
            .collect(),
        SectionName::Skills => vec![Item::Tags(TagsItem {
            tags: doc
                .skills
                .iter()
                .filter(|s| !is_blank(s))
                .map(|s| Text::new(s.trim(), skill_style(theme)))
                .collect(),
            chip: theme.chip,
            gap_px: if theme.chip.is_some() { 6.0 } else { 14.0 },
        })],
        SectionName::Projects => doc
            .projects
            .iter()
            .filter(|p| !p.is_blank())
            .map(|p| {
                let techs: Vec<&str> = p
                    .technologies
                    .iter()
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .collect();
                entry(
                    theme,
                    &p.name,
                    "",
                    &p.link,
                    &p.description,
                    &techs.join(", "),
                )
            })
            .collect(),
    };

    let raw_title = section_title(section);
    let title = if theme.title_uppercase {
        raw_title.to_uppercase()
    } else {
        raw_title.to_string()
    };

    Some(SectionBlock {
        section,
        title: Text::new(
            title,
            TextStyle::new(theme.title_px, theme.accent)
                .strong()
                .aligned(theme.title_align)
                .spaced(theme.title_spacing_px),
        ),
        rule: theme.rule,
        item_gap_px: theme.item_gap_px,
        items,
    })
}

fn skill_style(theme: &Theme) -> TextStyle {
    match theme.chip {
        Some(_) => TextStyle::new(theme.small_px, theme.text),
        None => theme.body(),
    }
}

fn entry(
    theme: &Theme,
    heading: &str,
    meta: &str,
    subheading: &str,
    body: &str,
    footnote: &str,
) -> Item {
    let opt = |s: &str, style: TextStyle| (!is_blank(s)).then(|| Text::new(s.trim(), style));
    Item::Entry(EntryItem {
        heading: opt(heading, theme.heading()),
        meta: opt(meta, theme.small().aligned(Align::End)),
        subheading: opt(subheading, TextStyle::new(theme.body_px, theme.accent)),
        body: opt(body, theme.body()),
        footnote: opt(footnote, theme.small()),
    })
}
