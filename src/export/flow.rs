//! Vertical flow: turns the width-only [`Layout`] into positioned draw operations.
//!
//! Coordinates are logical pixels with the origin at the top-left of the first page. Besides the
//! draw list the flow records keep-together spans (text lines, photos, chips) so pagination can
//! avoid cutting through ink.

use crate::export::text::{TextBox, TextLayoutEngine};
use crate::foundation::core::{Align, Point, Rect, Rgba8, align_offset};
use crate::foundation::error::VitaeResult;
use crate::template::layout::{
    Block, EntryItem, HeaderBlock, Item, Layout, SectionBlock, TagsItem, Text,
};

const TITLE_RULE_GAP: f64 = 4.0;
const TITLE_BOTTOM_GAP: f64 = 10.0;
const META_GAP: f64 = 16.0;
const PHOTO_GAP: f64 = 14.0;
const CHIP_PAD_X: f64 = 8.0;
const CHIP_PAD_Y: f64 = 3.0;
const TAG_ROW_GAP: f64 = 6.0;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawOp {
    Fill { rect: Rect, color: Rgba8 },
    RoundFill { rect: Rect, radius: f64, color: Rgba8 },
    /// Index into [`Flow::texts`], drawn with its box's top-left at `origin`.
    Text { text: usize, origin: Point },
    Photo { rect: Rect },
}

pub(crate) struct Flow {
    pub width: f64,
    pub height: f64,
    pub background: Rgba8,
    /// Draw order: column backgrounds first, then content in placement order.
    pub ops: Vec<DrawOp>,
    pub texts: Vec<TextBox>,
    /// `(top, bottom)` ranges a page break should not fall inside.
    pub keep_together: Vec<(f64, f64)>,
}

impl Flow {
    /// Text content in draw order.
    #[cfg(test)]
    pub fn text_runs(&self) -> impl Iterator<Item = (&TextBox, Point)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, origin } => self.texts.get(*text).map(|t| (t, *origin)),
            _ => None,
        })
    }
}

struct ColumnFill {
    x: f64,
    width: f64,
    row: usize,
    color: Rgba8,
}

/// Position every block of `layout`. The flow is at least `min_height` tall; the last row's
/// column backgrounds stretch to the bottom.
pub(crate) fn flow(
    layout: &Layout,
    engine: &mut TextLayoutEngine,
    min_height: f64,
) -> VitaeResult<Flow> {
    let mut cx = Cursor {
        engine,
        ops: Vec::new(),
        texts: Vec::new(),
        keep_together: Vec::new(),
    };

    let mut fills = Vec::new();
    let mut row_spans = Vec::with_capacity(layout.rows.len());
    let mut y = 0.0;
    for (ri, row) in layout.rows.iter().enumerate() {
        let mut x = 0.0;
        let mut row_h: f64 = 0.0;
        for col in &row.columns {
            let inner_x = x + col.padding.left;
            let inner_w = (col.width_px - col.padding.horizontal()).max(1.0);
            let mut cy = y + col.padding.top;
            for (bi, block) in col.blocks.iter().enumerate() {
                if bi > 0 {
                    cy += col.block_gap_px;
                }
                cy = match block {
                    Block::Header(h) => cx.header(h, inner_x, cy, inner_w)?,
                    Block::Section(s) => cx.section(s, inner_x, cy, inner_w)?,
                };
            }
            row_h = row_h.max(cy + col.padding.bottom - y);
            if let Some(color) = col.background {
                fills.push(ColumnFill {
                    x,
                    width: col.width_px,
                    row: ri,
                    color,
                });
            }
            x += col.width_px;
        }
        row_spans.push((y, y + row_h));
        y += row_h;
    }

    let height = y.max(min_height).ceil().max(1.0);
    let last_row = row_spans.len().saturating_sub(1);
    let mut ops = Vec::with_capacity(fills.len() + cx.ops.len());
    for fill in fills {
        let (top, mut bottom) = row_spans[fill.row];
        if fill.row == last_row {
            bottom = height;
        }
        ops.push(DrawOp::Fill {
            rect: Rect::new(fill.x, top, fill.x + fill.width, bottom),
            color: fill.color,
        });
    }
    ops.append(&mut cx.ops);

    Ok(Flow {
        width: f64::from(layout.width_px),
        height,
        background: layout.background,
        ops,
        texts: cx.texts,
        keep_together: cx.keep_together,
    })
}

struct Cursor<'e> {
    engine: &'e mut TextLayoutEngine,
    ops: Vec<DrawOp>,
    texts: Vec<TextBox>,
    keep_together: Vec<(f64, f64)>,
}

impl Cursor<'_> {
    fn place(&mut self, tb: TextBox, x: f64, y: f64) -> f64 {
        for (a, b) in tb.line_spans() {
            self.keep_together.push((y + a, y + b));
        }
        let h = tb.height;
        self.ops.push(DrawOp::Text {
            text: self.texts.len(),
            origin: Point::new(x, y),
        });
        self.texts.push(tb);
        h
    }

    /// Lay out and place `text` in a box `width` wide. Returns the height used.
    fn text(&mut self, text: &Text, x: f64, y: f64, width: f64) -> VitaeResult<f64> {
        if text.content.trim().is_empty() {
            return Ok(0.0);
        }
        let tb = self.engine.layout(&text.content, &text.style, Some(width))?;
        Ok(self.place(tb, x, y))
    }

    fn header(&mut self, h: &HeaderBlock, x: f64, y: f64, w: f64) -> VitaeResult<f64> {
        let mut text_w = w;
        let mut cy = y;
        let mut photo_bottom = y;

        if let Some(photo) = &h.photo {
            let side = photo.size_px.min(w);
            let rect = match h.align {
                // Photo sits to the right of left-aligned identity text.
                Align::Start => {
                    text_w = (w - side - PHOTO_GAP).max(w * 0.5);
                    Rect::new(x + w - side, y, x + w, y + side)
                }
                Align::Center | Align::End => {
                    let px = x + align_offset(w, side, h.align);
                    cy += side + PHOTO_GAP;
                    Rect::new(px, y, px + side, y + side)
                }
            };
            photo_bottom = rect.y1;
            self.keep_together.push((rect.y0, rect.y1));
            self.ops.push(DrawOp::Photo { rect });
        }

        if let Some(name) = &h.name {
            cy += self.text(name, x, cy, text_w)?;
        }
        for contact in &h.contacts {
            cy += h.line_gap_px;
            cy += self.text(contact, x, cy, text_w)?;
        }
        Ok(cy.max(photo_bottom))
    }

    fn section(&mut self, s: &SectionBlock, x: f64, y: f64, w: f64) -> VitaeResult<f64> {
        let mut cy = y + self.text(&s.title, x, y, w)?;
        if let Some(rule) = s.rule {
            cy += TITLE_RULE_GAP;
            self.ops.push(DrawOp::Fill {
                rect: Rect::new(x, cy, x + w, cy + rule.thickness_px),
                color: rule.color,
            });
            cy += rule.thickness_px;
        }
        cy += TITLE_BOTTOM_GAP;
        // Keep the title with the start of its first item.
        let title_top = y;

        for (i, item) in s.items.iter().enumerate() {
            if i > 0 {
                cy += s.item_gap_px;
            }
            let item_top = cy;
            cy = match item {
                Item::Paragraph(t) => cy + self.text(t, x, cy, w)?,
                Item::Entry(e) => self.entry(e, x, cy, w)?,
                Item::Tags(t) => self.tags(t, x, cy, w)?,
            };
            if i == 0 {
                let first_line = self
                    .keep_together
                    .iter()
                    .filter(|(a, _)| *a >= item_top)
                    .map(|(_, b)| *b)
                    .fold(f64::NAN, f64::min);
                if first_line.is_finite() {
                    self.keep_together.push((title_top, first_line));
                }
            }
        }
        Ok(cy)
    }

    fn entry(&mut self, e: &EntryItem, x: f64, y: f64, w: f64) -> VitaeResult<f64> {
        let mut meta_w = 0.0;
        let mut line_h: f64 = 0.0;
        if let Some(meta) = e.meta.as_ref().filter(|m| !m.content.trim().is_empty()) {
            let mut tb = self.engine.layout(&meta.content, &meta.style, None)?;
            if tb.width > w * 0.5 {
                tb = self.engine.layout(&meta.content, &meta.style, Some(w * 0.5))?;
            }
            meta_w = tb.content_width();
            tb.width = meta_w;
            line_h = line_h.max(self.place(tb, x + w - meta_w, y));
        }

        let heading_w = if meta_w > 0.0 {
            (w - meta_w - META_GAP).max(w * 0.4)
        } else {
            w
        };
        if let Some(heading) = &e.heading {
            line_h = line_h.max(self.text(heading, x, y, heading_w)?);
        }

        let mut cy = y + line_h;
        for (gap, t) in [(2.0, &e.subheading), (4.0, &e.body), (3.0, &e.footnote)] {
            if let Some(t) = t {
                cy += gap;
                cy += self.text(t, x, cy, w)?;
            }
        }
        Ok(cy)
    }

    fn tags(&mut self, t: &TagsItem, x: f64, y: f64, w: f64) -> VitaeResult<f64> {
        let (pad_x, pad_y) = match t.chip {
            Some(_) => (CHIP_PAD_X, CHIP_PAD_Y),
            None => (0.0, 0.0),
        };
        let max_text_w = (w - 2.0 * pad_x).max(1.0);

        let mut lx = x;
        let mut ly = y;
        let mut row_h: f64 = 0.0;
        for tag in &t.tags {
            if tag.content.trim().is_empty() {
                continue;
            }
            let mut tb = self.engine.layout(&tag.content, &tag.style, None)?;
            if tb.width > max_text_w {
                tb = self.engine.layout(&tag.content, &tag.style, Some(max_text_w))?;
            }
            let cw = tb.width + 2.0 * pad_x;
            let ch = tb.height + 2.0 * pad_y;
            if lx > x && lx + cw > x + w {
                lx = x;
                ly += row_h + TAG_ROW_GAP;
                row_h = 0.0;
            }
            if let Some(color) = t.chip {
                self.ops.push(DrawOp::RoundFill {
                    rect: Rect::new(lx, ly, lx + cw, ly + ch),
                    radius: ch * 0.5,
                    color,
                });
            }
            self.keep_together.push((ly, ly + ch));
            self.place(tb, lx + pad_x, ly + pad_y);
            lx += cw + t.gap_px;
            row_h = row_h.max(ch);
        }
        Ok(ly + row_h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/flow.rs"]
mod tests;
