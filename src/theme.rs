//! Light/dark page detection for the dimming tint

use crate::domain::PageElement;
use crate::page::Page;

/// Luminance below which a background counts as dark
pub const DARK_LUMINANCE_THRESHOLD: f32 = 140.0;

/// A parsed CSS color with straight (non-premultiplied) alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CssColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl CssColor {
    pub const WHITE: CssColor = CssColor {
        r: 255,
        g: 255,
        b: 255,
        a: 1.0,
    };

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Perceptual luminance on a 0-255 scale
    pub fn luminance(&self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }
}

/// Parse the subset of CSS colors a computed style can report
///
/// Accepts `rgb()`, `rgba()`, `#rgb`, `#rrggbb` and `transparent`.
pub fn parse_css_color(s: &str) -> Option<CssColor> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("transparent") {
        return Some(CssColor {
            r: 0,
            g: 0,
            b: 0,
            a: 0.0,
        });
    }
    if let Some(color) = crate::domain::Color::parse_hex(s) {
        return Some(CssColor {
            r: color.r,
            g: color.g,
            b: color.b,
            a: 1.0,
        });
    }

    let args = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut parts = args.split(',').map(str::trim);
    let mut channel = || -> Option<u8> {
        let v: f32 = parts.next()?.parse().ok()?;
        Some(v.round().clamp(0.0, 255.0) as u8)
    };
    let (r, g, b) = (channel()?, channel()?, channel()?);
    let a = match parts.next() {
        Some(alpha) => alpha.parse::<f32>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };
    Some(CssColor { r, g, b, a })
}

/// Semi-transparent fill covering the unselected part of the page
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub opacity: f32,
}

impl Tint {
    pub fn alpha_u8(&self) -> u8 {
        (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.opacity)
    }
}

/// Outcome of theme detection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub dark: bool,
    pub tint: Tint,
}

impl Theme {
    pub fn new(dark: bool, opacity: f32) -> Self {
        // Lighten dark pages, darken light ones
        let level = if dark { 255 } else { 0 };
        Self {
            dark,
            tint: Tint {
                r: level,
                g: level,
                b: level,
                opacity,
            },
        }
    }
}

fn opaque_background(page: &impl Page, element: PageElement) -> Option<String> {
    let raw = page.computed_background(element)?;
    match parse_css_color(&raw) {
        Some(color) if color.is_transparent() => None,
        _ => Some(raw),
    }
}

/// Effective page background: body, then root, then white
pub fn page_background(page: &impl Page) -> String {
    opaque_background(page, PageElement::Body)
        .or_else(|| opaque_background(page, PageElement::Root))
        .unwrap_or_else(|| "rgb(255, 255, 255)".to_string())
}

/// Whether a CSS color is dark. Unparseable colors count as light.
pub fn is_color_dark(css: &str) -> bool {
    parse_css_color(css).is_some_and(|c| c.luminance() < DARK_LUMINANCE_THRESHOLD)
}

/// Classify the page and pick the matching tint
pub fn detect(page: &impl Page, opacity: f32) -> Theme {
    let background = page_background(page);
    let dark = is_color_dark(&background);
    log::debug!("Page background {background} classified as dark={dark}");
    Theme::new(dark, opacity)
}
