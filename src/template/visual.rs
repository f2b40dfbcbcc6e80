//! Two columns: a dark sidebar with identity, contacts, and skills beside the main sections.

use crate::document::model::{Document, SectionName, TemplateId};
use crate::foundation::core::{Align, Edges, PAGE_WIDTH_PX, Rgba8};
use crate::template::layout::{Block, Column, Layout, Row, Rule};
use crate::template::sections::{self, ContactStyle, HeaderSpec, Theme};

const SIDEBAR_WIDTH: f64 = 256.0;
const SIDEBAR_BG: Rgba8 = Rgba8::rgb(30, 41, 59);
const SIDEBAR_TEXT: Rgba8 = Rgba8::rgb(241, 245, 249);

const MAIN: Theme = Theme {
    text: Rgba8::rgb(15, 23, 42),
    muted: Rgba8::rgb(100, 116, 139),
    accent: Rgba8::rgb(13, 148, 136),
    name_px: 26.0,
    title_px: 15.0,
    heading_px: 13.0,
    body_px: 12.0,
    small_px: 11.0,
    title_align: Align::Start,
    title_uppercase: true,
    title_spacing_px: 1.5,
    rule: Some(Rule {
        color: Rgba8::rgb(204, 251, 241),
        thickness_px: 1.0,
    }),
    chip: None,
    item_gap_px: 12.0,
};

const SIDE: Theme = Theme {
    text: SIDEBAR_TEXT,
    muted: Rgba8::rgb(203, 213, 225),
    accent: Rgba8::rgb(94, 234, 212),
    chip: Some(Rgba8::rgb(51, 65, 85)),
    rule: None,
    ..MAIN
};

const MAIN_ORDER: [SectionName; 4] = [
    SectionName::Summary,
    SectionName::Experience,
    SectionName::Education,
    SectionName::Projects,
];

pub(crate) fn render(doc: &Document) -> Layout {
    let mut side_blocks = Vec::with_capacity(2);
    if let Some(header) = sections::header(
        doc,
        &SIDE,
        &HeaderSpec {
            align: Align::Center,
            name_color: SIDEBAR_TEXT,
            contact_color: SIDE.muted,
            contacts: ContactStyle::Stacked,
            photo_px: 128.0,
            round_photo: true,
        },
    ) {
        side_blocks.push(Block::Header(header));
    }
    if let Some(skills) = sections::section(doc, SectionName::Skills, &SIDE) {
        side_blocks.push(Block::Section(skills));
    }

    let main_blocks: Vec<Block> = MAIN_ORDER
        .iter()
        .filter_map(|&s| sections::section(doc, s, &MAIN))
        .map(Block::Section)
        .collect();

    Layout {
        template: TemplateId::Visual,
        width_px: PAGE_WIDTH_PX,
        background: Rgba8::WHITE,
        rows: vec![Row {
            columns: vec![
                Column {
                    width_px: SIDEBAR_WIDTH,
                    background: Some(SIDEBAR_BG),
                    padding: Edges::symmetric(36.0, 24.0),
                    block_gap_px: 28.0,
                    blocks: side_blocks,
                },
                Column {
                    width_px: f64::from(PAGE_WIDTH_PX) - SIDEBAR_WIDTH,
                    background: None,
                    padding: Edges::symmetric(36.0, 32.0),
                    block_gap_px: 22.0,
                    blocks: main_blocks,
                },
            ],
        }],
    }
}
