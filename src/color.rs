//! Stroke colours for field lines.

use egui::Color32;
use rand::Rng;

/// Number of evenly spaced hues [`random_hue`] draws from.
pub const HUE_STEPS: usize = 1024;

/// Fully saturated, full value colour for hue `h` in `[0, 1)`.
pub fn hue(h: f64) -> Color32 {
    let channel = |offset: f64| {
        let k = (offset + h * 6.0).rem_euclid(6.0);
        let v = 1.0 - k.min(4.0 - k).min(1.0).max(0.0);
        (v * 255.0).round() as u8
    };
    Color32::from_rgb(channel(5.0), channel(3.0), channel(1.0))
}

pub fn random_hue<R: Rng + ?Sized>(rng: &mut R) -> Color32 {
    hue(rng.random_range(0..HUE_STEPS) as f64 / HUE_STEPS as f64)
}
