//! Field of a point dipole along z, sampled on a sphere and drawn as short arrows with
//! depth occlusion. Arrow opacity follows field strength; colour follows height, from a
//! heatmap when one is given.

use crate::camera::Camera;
use crate::color::hue;
use crate::error::Result;
use crate::options::RenderOptions;
use crate::render::canvas::Canvas;
use crate::render::heatmap::Heatmap;
use crate::render::zpainter::{DepthPoint, DepthStroke, ZPainter};
use crate::tracer::fading::TangentRange;
use crate::vec3::Vec3;
use egui::Color32;
use log::info;
use std::f64::consts::{PI, TAU};
use std::path::PathBuf;

const SPHERE_RADIUS: f64 = 0.6;
const THETA_SAMPLES: usize = 48;
const PHI_SAMPLES: usize = 96;
// Length of the strongest arrow, in world units.
const MAX_ARROW: f64 = 0.06;
const AXIS_LENGTH: f64 = 0.85;
const AXIS_WIDTH: f32 = 2.0;

struct Glyph {
    base: Vec3,
    field: Vec3,
}

fn dipole(direction: Vec3) -> Vec3 {
    direction.scale(3.0 * direction.z) - Vec3::Z
}

/// Both poles plus `THETA_SAMPLES - 1` rings of `PHI_SAMPLES` points.
fn glyphs() -> Vec<Glyph> {
    let mut directions = vec![Vec3::Z, -Vec3::Z];
    for t in 1..THETA_SAMPLES {
        let (st, ct) = (PI * t as f64 / THETA_SAMPLES as f64).sin_cos();
        for p in 0..PHI_SAMPLES {
            let (sp, cp) = (TAU * p as f64 / PHI_SAMPLES as f64).sin_cos();
            directions.push(Vec3::new(st * cp, st * sp, ct));
        }
    }
    directions
        .into_iter()
        .map(|d| Glyph {
            base: d.scale(SPHERE_RADIUS),
            field: dipole(d),
        })
        .collect()
}

fn height_colour(z: f64, heatmap: Option<&Heatmap>) -> Color32 {
    let t = (z / SPHERE_RADIUS + 1.0) / 2.0;
    match heatmap {
        Some(heatmap) if !heatmap.is_empty() => heatmap.color_at(t),
        _ => hue(2.0 / 3.0 * (1.0 - t)),
    }
}

fn stroke(
    camera: &Camera,
    opts: &RenderOptions,
    from: Vec3,
    to: Vec3,
    color: Color32,
    width: f32,
) -> DepthStroke {
    let point = |p: Vec3| {
        let (pixel, depth) = camera.project_with_depth(p, opts.width, opts.height);
        DepthPoint { pixel, depth }
    };
    DepthStroke {
        from: point(from),
        to: point(to),
        color,
        width,
    }
}

fn strokes(
    camera: &Camera,
    opts: &RenderOptions,
    glyphs: &[Glyph],
    heatmap: Option<&Heatmap>,
) -> Vec<DepthStroke> {
    let range = TangentRange::scan(glyphs.iter().map(|g| g.field.norm()));
    let mut strokes: Vec<DepthStroke> = glyphs
        .iter()
        .map(|g| {
            let opacity = range.opacity(g.field.norm(), opts.fading_gamma);
            let colour = height_colour(g.base.z, heatmap).gamma_multiply(opacity);
            let tip = g.base + g.field.scale(MAX_ARROW / range.max);
            stroke(camera, opts, g.base, tip, colour, opts.line_width)
        })
        .collect();
    let axes = [
        (Vec3::X, Color32::RED),
        (Vec3::Y, Color32::GREEN),
        (Vec3::Z, Color32::BLUE),
    ];
    for (axis, colour) in axes {
        strokes.push(stroke(
            camera,
            opts,
            Vec3::ZERO,
            axis.scale(AXIS_LENGTH),
            colour,
            AXIS_WIDTH,
        ));
    }
    strokes
}

/// Paints one image per camera. Frames are produced one after another; the painting of
/// each frame is spread over the rayon pool.
pub fn render(opts: &RenderOptions, heatmap: Option<&Heatmap>) -> Result<Vec<PathBuf>> {
    opts.validate()?;
    let glyphs = glyphs();
    let mut written = Vec::with_capacity(opts.camera_count());
    for (i, camera) in opts.viewpoint.cameras().iter().enumerate() {
        let mut painter = ZPainter::new(opts.width, opts.height, rayon::current_num_threads());
        painter.paint(&strokes(camera, opts, &glyphs, heatmap));
        let mut canvas = Canvas::new(opts.width, opts.height);
        painter.commit(&mut canvas)?;
        let path = opts.output_path(i);
        canvas.save(&path)?;
        written.push(path);
    }
    info!("painted {} glyphs into {} images", glyphs.len(), written.len());
    Ok(written)
}
