//! Centered layout with letter-spaced ruled titles and plain-text skills.

use crate::document::model::{Document, SectionName, TemplateId};
use crate::foundation::core::{Align, Edges, PAGE_WIDTH_PX, Rgba8};
use crate::template::layout::{Block, Column, Layout, Row, Rule};
use crate::template::sections::{self, ContactStyle, HeaderSpec, Theme};

const INK: Rgba8 = Rgba8::rgb(41, 37, 36);

const THEME: Theme = Theme {
    text: INK,
    muted: Rgba8::rgb(120, 113, 108),
    accent: Rgba8::rgb(120, 53, 15),
    name_px: 32.0,
    title_px: 14.0,
    heading_px: 13.0,
    body_px: 12.0,
    small_px: 11.0,
    title_align: Align::Center,
    title_uppercase: true,
    title_spacing_px: 3.0,
    rule: Some(Rule {
        color: Rgba8::rgb(214, 211, 209),
        thickness_px: 1.0,
    }),
    chip: None,
    item_gap_px: 14.0,
};

const ORDER: [SectionName; 5] = [
    SectionName::Summary,
    SectionName::Experience,
    SectionName::Education,
    SectionName::Skills,
    SectionName::Projects,
];

pub(crate) fn render(doc: &Document) -> Layout {
    let mut blocks = Vec::with_capacity(ORDER.len() + 1);
    if let Some(header) = sections::header(
        doc,
        &THEME,
        &HeaderSpec {
            align: Align::Center,
            name_color: INK,
            contact_color: THEME.muted,
            contacts: ContactStyle::Inline("  ·  "),
            photo_px: 96.0,
            round_photo: true,
        },
    ) {
        blocks.push(Block::Header(header));
    }
    blocks.extend(
        ORDER
            .iter()
            .filter_map(|&s| sections::section(doc, s, &THEME))
            .map(Block::Section),
    );

    Layout {
        template: TemplateId::Elegant,
        width_px: PAGE_WIDTH_PX,
        background: Rgba8::rgb(255, 254, 250),
        rows: vec![Row {
            columns: vec![Column {
                width_px: f64::from(PAGE_WIDTH_PX),
                background: None,
                padding: Edges::symmetric(56.0, 72.0),
                block_gap_px: 26.0,
                blocks,
            }],
        }],
    }
}
