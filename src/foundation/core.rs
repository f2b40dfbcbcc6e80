use serde::{Deserialize, Serialize};

pub use kurbo::{Point, Rect};

/// Logical page width every template lays out at: A4 width at 96 DPI.
pub const PAGE_WIDTH_PX: u32 = 794;

/// Logical pixels per inch (CSS reference pixel).
pub const LOGICAL_DPI: f64 = 96.0;

const MM_PER_INCH: f64 = 25.4;
const PT_PER_INCH: f64 = 72.0;

/// Physical paper dimensions in millimetres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaperSize {
    /// Width in millimetres.
    pub width_mm: f64,
    /// Height in millimetres.
    pub height_mm: f64,
}

impl PaperSize {
    /// ISO A4, 210mm x 297mm.
    pub const A4: PaperSize = PaperSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    /// Height-to-width ratio.
    pub fn aspect(self) -> f64 {
        self.height_mm / self.width_mm
    }

    /// Width in PDF points.
    pub fn width_pt(self) -> f64 {
        self.width_mm / MM_PER_INCH * PT_PER_INCH
    }

    /// Height in PDF points.
    pub fn height_pt(self) -> f64 {
        self.height_mm / MM_PER_INCH * PT_PER_INCH
    }

    /// Page height in pixels for a bitmap `width_px` wide, keeping the paper aspect.
    pub fn page_height_px(self, width_px: u32) -> u32 {
        ((f64::from(width_px) * self.aspect()).round() as u32).max(1)
    }

    /// Page width in logical pixels at [`LOGICAL_DPI`].
    pub fn logical_width_px(self) -> f64 {
        self.width_mm / MM_PER_INCH * LOGICAL_DPI
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Return `true` when fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Channels as an array, straight alpha.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Padding on the four sides of a box, in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    /// Left padding.
    pub left: f64,
    /// Right padding.
    pub right: f64,
    /// Top padding.
    pub top: f64,
    /// Bottom padding.
    pub bottom: f64,
}

impl Edges {
    /// Same padding on every side.
    pub const fn uniform(v: f64) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    /// `vertical` on top/bottom, `horizontal` on left/right.
    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }

    /// Sum of left and right.
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }
}

/// Horizontal alignment of content inside its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Align to start (left).
    #[default]
    Start,
    /// Align to center.
    Center,
    /// Align to end (right).
    End,
}

/// Offset of `content` inside `container` for the given alignment. Never negative.
pub fn align_offset(container: f64, content: f64, align: Align) -> f64 {
    let rem = (container - content).max(0.0);
    match align {
        Align::Start => 0.0,
        Align::Center => rem * 0.5,
        Align::End => rem,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
