//! Catalogue of ready made fields to trace, used by the `fieldline` binary.

mod dipole_glyphs;
mod polarized_ball;
mod spinning_sphere;
mod tetrahedron;

use crate::error::Result;
use crate::options::RenderOptions;
use crate::pipeline;
use crate::render::heatmap::Heatmap;
use rand::Rng;
use std::path::PathBuf;
use strum_macros::{Display, EnumIter};

/*
== Available scenes ===========================================================
*/

// `--list` and `--scene` are populated from these variants
#[derive(Debug, PartialEq, Clone, Copy, EnumIter, Display, clap::ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum Scene {
    Tetrahedron,    // two positive and two negative point charges
    PolarizedBall,  // dielectric sphere in a uniform field
    SpinningSphere, // uniformly magnetized sphere
    DipoleGlyphs,   // dipole field vectors on a sphere
}

impl Scene {
    pub fn properties(&self) -> SceneProperties {
        // function separated out to allow for future flexibility
        self.retrieve_properties()
    }

    fn retrieve_properties(&self) -> SceneProperties {
        match self {
            Scene::Tetrahedron => SceneProperties {
                name: "Tetrahedron",
                description: "Charges of alternating sign on the corners of a tetrahedron",
                fading_gamma: 0.25,
                line_width: 1.5,
                roll_degrees: 30.6,
            },
            Scene::PolarizedBall => SceneProperties {
                name: "Polarized Ball",
                description: "Linear dielectric ball placed in a uniform electric field",
                fading_gamma: 1.2,
                line_width: 1.5,
                roll_degrees: 30.6,
            },
            Scene::SpinningSphere => SceneProperties {
                name: "Spinning Sphere",
                description: "Magnetic field inside and outside a uniformly magnetized sphere",
                fading_gamma: 0.5,
                line_width: 1.0,
                roll_degrees: 30.6,
            },
            Scene::DipoleGlyphs => SceneProperties {
                name: "Dipole Glyphs",
                description: "Dipole field vectors on a sphere, painted with depth occlusion",
                fading_gamma: 1.0,
                line_width: 1.0,
                roll_degrees: 17.0,
            },
        }
    }

    /// Traces and renders the scene with `opts`, returning the written images.
    /// Line colours are drawn from `rng`; only the glyph scene uses `heatmap`.
    pub fn render<R: Rng + ?Sized>(
        &self,
        opts: &RenderOptions,
        rng: &mut R,
        heatmap: Option<&Heatmap>,
    ) -> Result<Vec<PathBuf>> {
        match self {
            Scene::Tetrahedron => {
                let mut trajectories = tetrahedron::trajectories(rng);
                pipeline::run(opts, &tetrahedron::field, &mut trajectories)
            }
            Scene::PolarizedBall => {
                let mut trajectories = polarized_ball::trajectories(rng);
                pipeline::run(opts, &polarized_ball::field, &mut trajectories)
            }
            Scene::SpinningSphere => {
                let mut trajectories = spinning_sphere::trajectories(rng);
                pipeline::run(opts, &spinning_sphere::field, &mut trajectories)
            }
            Scene::DipoleGlyphs => dipole_glyphs::render(opts, heatmap),
        }
    }
}

/*
== Per scene rendering defaults ===============================================
*/

pub struct SceneProperties {
    pub name: &'static str,
    pub description: &'static str,
    pub fading_gamma: f64,
    pub line_width: f32,
    /// Tilt of the camera orbit, see [`crate::camera::CameraOrbit::new`].
    pub roll_degrees: f64,
}
