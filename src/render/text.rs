//! Text rasterization onto the surface pixmap using ab_glyph

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use tiny_skia::{Pixmap, PremultipliedColorU8};

use crate::domain::{Color, FontFamily, Point};
use crate::error::AnnotationRenderFailure;

/// A block of text to bake into the surface
#[derive(Clone, Copy, Debug)]
pub struct TextBlock<'a> {
    pub text: &'a str,
    /// Top-left corner of the first line
    pub origin: Point,
    /// Em size in pixels
    pub font_size: f32,
    /// Distance between the tops of consecutive lines
    pub line_pitch: f32,
    pub color: Color,
    /// Family the face was looked up for, reported on failure
    pub family: FontFamily,
}

impl TextBlock<'_> {
    /// Top edge of every line, in order
    pub fn line_tops(&self) -> impl Iterator<Item = f32> + '_ {
        self.text
            .split('\n')
            .enumerate()
            .map(|(i, _)| self.origin.y + i as f32 * self.line_pitch)
    }
}

/// Scale at which one em equals `size` pixels
fn em_scale(font: &FontArc, size: f32) -> Option<PxScale> {
    let units_per_em = font.units_per_em()?;
    Some(PxScale::from(size * font.height_unscaled() / units_per_em))
}

/// Rasterize each line of `block` with its top edge at the line's top
pub fn draw_text(
    pixmap: &mut Pixmap,
    font: &FontArc,
    block: &TextBlock<'_>,
) -> Result<(), AnnotationRenderFailure> {
    let scale = em_scale(font, block.font_size)
        .ok_or(AnnotationRenderFailure::InvalidFont(block.family.name()))?;
    let scaled = font.as_scaled(scale);

    for (line, top) in block.text.split('\n').zip(block.line_tops()) {
        let mut caret = point(block.origin.x, top + scaled.ascent());
        let mut prev = None;
        for ch in line.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            if let Some(prev) = prev {
                caret.x += scaled.kern(prev, glyph.id);
            }
            glyph.position = caret;
            caret.x += scaled.h_advance(glyph.id);
            prev = Some(glyph.id);

            if let Some(outlined) = scaled.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|x, y, coverage| {
                    let px = x as i32 + bounds.min.x as i32;
                    let py = y as i32 + bounds.min.y as i32;
                    blend_pixel(pixmap, px, py, block.color, coverage);
                });
            }
        }
    }
    Ok(())
}

/// Source-over blend of an opaque color at `coverage` into a premultiplied pixel
fn blend_pixel(pixmap: &mut Pixmap, x: i32, y: i32, color: Color, coverage: f32) {
    let (w, h) = (pixmap.width() as i32, pixmap.height() as i32);
    if x < 0 || y < 0 || x >= w || y >= h {
        return;
    }
    let idx = y as usize * w as usize + x as usize;
    let pixels = pixmap.pixels_mut();
    let dst = pixels[idx];

    let a = coverage.clamp(0.0, 1.0);
    let inv = 1.0 - a;
    let out_a = (255.0 * a + dst.alpha() as f32 * inv).round().min(255.0);
    let channel = |src: u8, dst: u8| (src as f32 * a + dst as f32 * inv).round().min(out_a) as u8;

    if let Some(blended) = PremultipliedColorU8::from_rgba(
        channel(color.r, dst.red()),
        channel(color.g, dst.green()),
        channel(color.b, dst.blue()),
        out_a as u8,
    ) {
        pixels[idx] = blended;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FontBook;

    /// Start rows of each horizontal band of inked pixels
    fn ink_bands(pixmap: &Pixmap) -> Vec<u32> {
        let mut bands = Vec::new();
        let mut in_band = false;
        for y in 0..pixmap.height() {
            let inked = (0..pixmap.width()).any(|x| pixmap.pixel(x, y).unwrap().alpha() > 0);
            if inked && !in_band {
                bands.push(y);
            }
            in_band = inked;
        }
        bands
    }

    #[test]
    fn test_line_tops() {
        let block = TextBlock {
            text: "a\nb\nc",
            origin: Point::new(10.0, 20.0),
            font_size: 32.0,
            line_pitch: 32.0 * 1.2,
            color: Color::rgb(0, 0, 255),
            family: FontFamily::Arial,
        };
        let tops: Vec<f32> = block.line_tops().collect();
        assert_eq!(tops.len(), 3);
        assert!((tops[1] - tops[0] - 38.4).abs() < 1e-4);
    }

    #[test]
    fn test_two_lines_are_one_pitch_apart() {
        let book = FontBook::new();
        let font = book.face(FontFamily::Arial).unwrap();
        let mut pixmap = Pixmap::new(300, 200).unwrap();
        let block = TextBlock {
            text: "Hello\nWorld",
            origin: Point::new(20.0, 20.0),
            font_size: 32.0,
            line_pitch: 32.0 * 1.2,
            color: Color::rgb(0, 0, 255),
            family: FontFamily::Arial,
        };
        draw_text(&mut pixmap, font, &block).unwrap();

        let bands = ink_bands(&pixmap);
        assert_eq!(bands.len(), 2, "bands: {bands:?}");
        let gap = bands[1] as f32 - bands[0] as f32;
        assert!((gap - 38.4).abs() <= 1.5, "gap: {gap}");
        assert!(bands[0] >= 20);
    }

    #[test]
    fn test_failure_names_the_family() {
        let err = AnnotationRenderFailure::InvalidFont(FontFamily::Georgia.name());
        assert_eq!(err.to_string(), "invalid font data for Georgia");

        let book = FontBook::empty();
        let err = book.face(FontFamily::CourierNew).unwrap_err();
        assert_eq!(err.to_string(), "no font available for Courier New");
    }

    #[test]
    fn test_blend_is_clipped_to_pixmap() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        blend_pixel(&mut pixmap, -1, 2, Color::rgb(255, 0, 0), 1.0);
        blend_pixel(&mut pixmap, 4, 2, Color::rgb(255, 0, 0), 1.0);
        blend_pixel(&mut pixmap, 1, 1, Color::rgb(255, 0, 0), 1.0);
        let p = pixmap.pixel(1, 1).unwrap();
        assert_eq!((p.red(), p.alpha()), (255, 255));
        assert_eq!(pixmap.pixels().iter().filter(|p| p.alpha() > 0).count(), 1);
    }
}
