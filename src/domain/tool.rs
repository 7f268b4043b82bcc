//! Annotation tool types and the options shared between tools

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque ink color, stored and exchanged as `#rrggbb`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` or `#rgb` hex color
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Some(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            _ => None,
        }
    }

    /// Convert to tiny-skia RGBA (0-255) with full opacity
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for Color {
    fn default() -> Self {
        // Bright red
        Self::rgb(0xff, 0x38, 0x38)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value).ok_or_else(|| format!("invalid hex color: {value}"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// The active annotation tool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    None,
    Draw,
    Text,
}

impl ToolMode {
    /// Result of pressing the button for `requested` while `self` is active.
    ///
    /// Pressing the active tool again turns it off; any other tool replaces it.
    pub fn toggled(self, requested: ToolMode) -> ToolMode {
        if self == requested {
            ToolMode::None
        } else {
            requested
        }
    }
}

/// Freehand stroke width choices
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LineWidth {
    Thin,
    #[default]
    Medium,
    Thick,
    XThick,
}

impl LineWidth {
    pub const ALL: [LineWidth; 4] = [
        LineWidth::Thin,
        LineWidth::Medium,
        LineWidth::Thick,
        LineWidth::XThick,
    ];

    pub fn px(self) -> u32 {
        match self {
            LineWidth::Thin => 2,
            LineWidth::Medium => 5,
            LineWidth::Thick => 10,
            LineWidth::XThick => 20,
        }
    }
}

impl TryFrom<u32> for LineWidth {
    type Error = String;

    fn try_from(px: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|w| w.px() == px)
            .ok_or_else(|| format!("unsupported line width: {px}"))
    }
}

impl From<LineWidth> for u32 {
    fn from(w: LineWidth) -> Self {
        w.px()
    }
}

/// Text size choices in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FontSize(u32);

impl FontSize {
    pub const CHOICES: [u32; 8] = [14, 16, 18, 24, 32, 42, 56, 72];

    pub fn new(px: u32) -> Option<Self> {
        Self::CHOICES.contains(&px).then_some(Self(px))
    }

    pub fn px(self) -> u32 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(24)
    }
}

impl TryFrom<u32> for FontSize {
    type Error = String;

    fn try_from(px: u32) -> Result<Self, Self::Error> {
        Self::new(px).ok_or_else(|| format!("unsupported font size: {px}"))
    }
}

impl From<FontSize> for u32 {
    fn from(s: FontSize) -> Self {
        s.0
    }
}

/// Text font family choices
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Arial,
    Verdana,
    Georgia,
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
    #[serde(rename = "Courier New")]
    CourierNew,
}

impl FontFamily {
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Arial,
        FontFamily::Verdana,
        FontFamily::Georgia,
        FontFamily::TimesNewRoman,
        FontFamily::CourierNew,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::Verdana => "Verdana",
            FontFamily::Georgia => "Georgia",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::CourierNew => "Courier New",
        }
    }
}

/// Configuration consulted by both the draw and the text tool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOptions {
    pub color: Color,
    pub line_width: LineWidth,
    pub font_size: FontSize,
    pub font_family: FontFamily,
}
