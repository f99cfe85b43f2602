//! Raster target for rendered frames.
//! Pixels are premultiplied, gamma encoded (sRGB) colours stored rows first, starting from an
//! opaque black background. Compositing happens in that encoded space, so a stroke with
//! opacity `a` over black ends up at `a` of its colour in the written image.

use crate::error::Result;
use crate::render::raster;
use egui::{Color32, Pos2};
use image::RgbaImage;
use log::debug;
use ndarray::Array2;
use std::path::Path;

/*
== Colour arithmetic ==========================================================
*/

/// Premultiplied sRGB colour with components in `[0, 1]`.
pub type Paint = [f32; 4];

pub const BLACK: Paint = [0.0, 0.0, 0.0, 1.0];

/// `colour` with its coverage applied.
pub fn paint(colour: Color32, coverage: f32) -> Paint {
    colour.to_array().map(|c| c as f32 / 255.0 * coverage)
}

/// Source-over compositing of premultiplied colours.
pub fn over(dst: Paint, src: Paint) -> Paint {
    let keep = 1.0 - src[3];
    std::array::from_fn(|i| src[i] + dst[i] * keep)
}

pub fn to_color32(paint: Paint) -> Color32 {
    let [r, g, b, a] = paint.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgba_premultiplied(r, g, b, a)
}

/*
== Canvas =====================================================================
*/

pub struct Canvas {
    pixels: Array2<Paint>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            pixels: Array2::from_elem((height as usize, width as usize), BLACK),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.nrows() as u32
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixels.get((y as usize, x as usize)).copied().map(to_color32)
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut Array2<Paint> {
        &mut self.pixels
    }

    /// Strokes a segment in premultiplied `colour`; edge pixels are blended by coverage.
    pub fn draw_segment(&mut self, from: Pos2, to: Pos2, width: f32, colour: Color32) {
        let (rows, columns) = self.pixels.dim();
        raster::stroke_segment(from, to, width, columns, rows, |c| {
            let dst = &mut self.pixels[[c.y, c.x]];
            *dst = over(*dst, paint(colour, c.alpha));
        });
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let colour = to_color32(self.pixels[[y as usize, x as usize]]);
            image::Rgba(colour.to_srgba_unmultiplied())
        })
    }

    /// Encodes the canvas as an image; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.to_image().save(path)?;
        debug!("saved {}x{} canvas to {}", self.width(), self.height(), path.display());
        Ok(())
    }
}
