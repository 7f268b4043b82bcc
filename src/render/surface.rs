//! Full-viewport raster surface using tiny-skia
//!
//! Layer order is fixed: the dimming tint first, the selection hole cut into
//! it second, then ink. Once a selection is committed the dim layer is sealed
//! and later redraw requests are ignored, so ink is never erased.

use image::RgbaImage;
use tiny_skia::{
    BlendMode, Color, ColorU8, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

use crate::domain::{self, Point, SelectionRect, Viewport};
use crate::theme::Tint;

pub struct RasterSurface {
    pixmap: Pixmap,
    tint: Tint,
    sealed: bool,
}

impl RasterSurface {
    /// Create a surface covering `viewport`, initially fully dimmed.
    ///
    /// Returns `None` for an empty viewport.
    pub fn new(viewport: Viewport, tint: Tint) -> Option<Self> {
        let pixmap = Pixmap::new(viewport.width, viewport.height)?;
        let mut surface = Self {
            pixmap,
            tint,
            sealed: false,
        };
        surface.redraw(None);
        Some(surface)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Re-establish the dim layer and cut the selection hole
    pub fn redraw(&mut self, selection: Option<&SelectionRect>) {
        if self.sealed {
            log::debug!("Ignoring redraw of sealed surface");
            return;
        }
        // fill() replaces every pixel, so it also clears the previous frame
        let Tint { r, g, b, .. } = self.tint;
        self.pixmap
            .fill(Color::from_rgba8(r, g, b, self.tint.alpha_u8()));
        if let Some(rect) = selection {
            self.clear_rect(rect);
        }
    }

    /// Final redraw for a committed selection. Seals the dim layer.
    pub fn commit(&mut self, selection: &SelectionRect) {
        self.redraw(Some(selection));
        self.sealed = true;
    }

    fn clear_rect(&mut self, rect: &SelectionRect) {
        let Some(rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.w, rect.h) else {
            return;
        };
        let paint = Paint {
            blend_mode: BlendMode::Clear,
            anti_alias: false,
            ..Default::default()
        };
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Stroke one segment of a freehand path with round caps and joins
    pub fn stroke_segment(&mut self, from: Point, to: Point, color: domain::Color, width: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };

        let [r, g, b, a] = color.to_rgba_u8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// Straight-alpha color of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<ColorU8> {
        self.pixmap.pixel(x, y).map(|p| p.demultiply())
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Copy the surface into a straight-alpha image
    pub fn to_rgba_image(&self) -> RgbaImage {
        let (w, h) = (self.width(), self.height());
        let data: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(w, h, data).unwrap_or_else(|| RgbaImage::new(w, h))
    }
}
