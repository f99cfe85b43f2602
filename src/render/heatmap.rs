//! Colour ramps read from the first row of an image.

use crate::error::{FieldLineError, Result};
use egui::Color32;
use log::debug;
use ndarray::Array1;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    colors: Array1<Color32>,
}

impl Heatmap {
    /// Loads the first pixel row of the image at `path`, raising each channel to `gamma`.
    /// Colours are made opaque.
    pub fn load(path: &Path, gamma: f64) -> Result<Self> {
        let image = image::open(path)?.to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(FieldLineError::EmptyHeatmap(path.to_path_buf()));
        }
        let adjust = |c: u8| ((c as f64 / 255.0).powf(gamma) * 255.0).round() as u8;
        let colors: Array1<Color32> = (0..image.width())
            .map(|x| {
                let [r, g, b, _] = image.get_pixel(x, 0).0;
                Color32::from_rgb(adjust(r), adjust(g), adjust(b))
            })
            .collect();
        debug!("loaded {} heatmap colours from {}", colors.len(), path.display());
        Ok(Heatmap { colors })
    }

    pub fn from_colors(colors: impl IntoIterator<Item = Color32>) -> Self {
        Heatmap {
            colors: colors.into_iter().collect(),
        }
    }

    /// Colour at `t` in `[0, 1]`; values outside are clamped. An empty heatmap is black.
    pub fn color_at(&self, t: f64) -> Color32 {
        if self.colors.is_empty() {
            return Color32::BLACK;
        }
        let last = self.colors.len() - 1;
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        self.colors[(t * last as f64) as usize]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
