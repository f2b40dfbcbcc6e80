//! Single-column classic: a tinted header band over stacked sections.

use crate::document::model::{Document, SectionName, TemplateId};
use crate::foundation::core::{Align, Edges, PAGE_WIDTH_PX, Rgba8};
use crate::template::layout::{Block, Column, Layout, Row, Rule};
use crate::template::sections::{self, ContactStyle, HeaderSpec, Theme};

const ACCENT: Rgba8 = Rgba8::rgb(37, 99, 235);
const BAND: Rgba8 = Rgba8::rgb(239, 246, 255);

const THEME: Theme = Theme {
    text: Rgba8::rgb(17, 24, 39),
    muted: Rgba8::rgb(75, 85, 99),
    accent: ACCENT,
    name_px: 30.0,
    title_px: 16.0,
    heading_px: 13.0,
    body_px: 12.0,
    small_px: 11.0,
    title_align: Align::Start,
    title_uppercase: false,
    title_spacing_px: 0.0,
    rule: Some(Rule {
        color: ACCENT,
        thickness_px: 2.0,
    }),
    chip: Some(Rgba8::rgb(219, 234, 254)),
    item_gap_px: 12.0,
};

const ORDER: [SectionName; 5] = [
    SectionName::Summary,
    SectionName::Experience,
    SectionName::Education,
    SectionName::Projects,
    SectionName::Skills,
];

pub(crate) fn render(doc: &Document) -> Layout {
    let width = f64::from(PAGE_WIDTH_PX);
    let mut rows = Vec::with_capacity(2);

    if let Some(header) = sections::header(
        doc,
        &THEME,
        &HeaderSpec {
            align: Align::Start,
            name_color: THEME.text,
            contact_color: THEME.muted,
            contacts: ContactStyle::Inline("  |  "),
            photo_px: 88.0,
            round_photo: true,
        },
    ) {
        rows.push(Row {
            columns: vec![Column {
                width_px: width,
                background: Some(BAND),
                padding: Edges::symmetric(32.0, 48.0),
                block_gap_px: 0.0,
                blocks: vec![Block::Header(header)],
            }],
        });
    }

    let blocks: Vec<Block> = ORDER
        .iter()
        .filter_map(|&s| sections::section(doc, s, &THEME))
        .map(Block::Section)
        .collect();
    rows.push(Row {
        columns: vec![Column {
            width_px: width,
            background: None,
            padding: Edges::symmetric(28.0, 48.0),
            block_gap_px: 22.0,
            blocks,
        }],
    });

    Layout {
        template: TemplateId::Modern,
        width_px: PAGE_WIDTH_PX,
        background: Rgba8::WHITE,
        rows,
    }
}
