//! Visual block tree produced by the templates.
//!
//! A [`Layout`] is logical: widths are fixed, heights are left to the export flow, which measures
//! text with real font metrics. Colors are straight-alpha [`Rgba8`].

use serde::Serialize;

use crate::document::model::{SectionName, TemplateId};
use crate::foundation::core::{Align, Edges, Rgba8};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    pub template: TemplateId,
    /// Logical page width in pixels.
    pub width_px: u32,
    pub background: Rgba8,
    /// Stacked top to bottom.
    pub rows: Vec<Row>,
}

/// Horizontal band of side-by-side columns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Row {
    pub columns: Vec<Column>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Column {
    pub width_px: f64,
    /// Fill behind the column. In the last row it extends to the bottom of the last page.
    pub background: Option<Rgba8>,
    pub padding: Edges,
    /// Vertical gap between consecutive blocks.
    pub block_gap_px: f64,
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Header(HeaderBlock),
    Section(SectionBlock),
}

/// Name, contacts, and photo.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub photo: Option<Photo>,
    pub name: Option<Text>,
    /// One entry per line.
    pub contacts: Vec<Text>,
    pub align: Align,
    pub line_gap_px: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Photo {
    /// Inline `data:` URL as stored in the document.
    #[serde(skip)]
    pub data_url: String,
    /// Edge of the square box the photo is fitted into.
    pub size_px: f64,
    /// Clip to a circle.
    pub round: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SectionBlock {
    pub section: SectionName,
    pub title: Text,
    pub rule: Option<Rule>,
    pub item_gap_px: f64,
    pub items: Vec<Item>,
}

/// Horizontal line under a section title.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rule {
    pub color: Rgba8,
    pub thickness_px: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    Paragraph(Text),
    Entry(EntryItem),
    Tags(TagsItem),
}

/// A dated record: heading and period on the first line, then details.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EntryItem {
    pub heading: Option<Text>,
    /// Right-aligned on the heading line.
    pub meta: Option<Text>,
    pub subheading: Option<Text>,
    pub body: Option<Text>,
    pub footnote: Option<Text>,
}

/// Wrapped run of short labels.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TagsItem {
    pub tags: Vec<Text>,
    /// Chip fill. Without one the tags flow as plain text separated by `gap_px`.
    pub chip: Option<Rgba8>,
    pub gap_px: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Text {
    pub content: String,
    pub style: TextStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    pub size_px: f64,
    pub color: Rgba8,
    pub letter_spacing_px: f64,
    pub align: Align,
    /// Drawn with a slight double strike when the face has no bold weight loaded.
    pub strong: bool,
}

impl TextStyle {
    pub const fn new(size_px: f64, color: Rgba8) -> Self {
        Self {
            size_px,
            color,
            letter_spacing_px: 0.0,
            align: Align::Start,
            strong: false,
        }
    }

    pub const fn strong(mut self) -> Self {
        self.strong = true;
        self
    }

    pub const fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub const fn spaced(mut self, letter_spacing_px: f64) -> Self {
        self.letter_spacing_px = letter_spacing_px;
        self
    }
}

impl Text {
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }
}

impl Layout {
    /// Every block, in row then column order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.rows
            .iter()
            .flat_map(|r| r.columns.iter())
            .flat_map(|c| c.blocks.iter())
    }

    /// Sections present, in placement order.
    pub fn sections(&self) -> Vec<SectionName> {
        self.blocks()
            .filter_map(|b| match b {
                Block::Section(s) => Some(s.section),
                Block::Header(_) => None,
            })
            .collect()
    }

    pub fn has_section(&self, section: SectionName) -> bool {
        self.sections().contains(&section)
    }

    pub fn header(&self) -> Option<&HeaderBlock> {
        self.blocks().find_map(|b| match b {
            Block::Header(h) => Some(h),
            Block::Section(_) => None,
        })
    }

    /// All text content, in placement order.
    pub fn text(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for block in self.blocks() {
            match block {
                Block::Header(h) => {
                    out.extend(h.name.iter().map(|t| t.content.as_str()));
                    out.extend(h.contacts.iter().map(|t| t.content.as_str()));
                }
                Block::Section(s) => {
                    out.push(s.title.content.as_str());
                    for item in &s.items {
                        item.collect_text(&mut out);
                    }
                }
            }
        }
        out
    }

    /// Return `true` when any text run contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text().iter().any(|t| t.contains(needle))
    }
}

impl Item {
    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Item::Paragraph(t) => out.push(t.content.as_str()),
            Item::Entry(e) => {
                for t in [&e.heading, &e.meta, &e.subheading, &e.body, &e.footnote]
                    .into_iter()
                    .flatten()
                {
                    out.push(t.content.as_str());
                }
            }
            Item::Tags(tags) => out.extend(tags.tags.iter().map(|t| t.content.as_str())),
        }
    }
}
