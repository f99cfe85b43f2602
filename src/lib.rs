//! Field line tracing and rendering.
//!
//! Callers supply a vector field, a set of [`Trajectory`] start points with their
//! termination policy and spatial symmetries, and [`RenderOptions`]. [`run`] integrates
//! every line with fourth order Runge-Kutta, records its projection for each camera and
//! symmetry, fades each stroke by relative field strength and writes one image per camera.
//!
//! The [`render::zpainter`] module draws short 3D strokes, such as field vectors on a grid,
//! with back to front occlusion.

pub mod camera;
pub mod color;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod render;
pub mod scenes;
pub mod tracer;
pub mod vec3;

pub use camera::{Camera, CameraOrbit, Pixel, Viewpoint};
pub use error::{FieldLineError, Result};
pub use options::RenderOptions;
pub use pipeline::run;
pub use tracer::trajectory::{TraceOutcome, TracePoint, Trajectory};
pub use vec3::Vec3;

use static_assertions::assert_impl_all;

assert_impl_all!(Trajectory: Send, Sync);
assert_impl_all!(RenderOptions: Send, Sync);
assert_impl_all!(render::zpainter::ZPainter: Send, Sync);
assert_impl_all!(render::canvas::Canvas: Send, Sync);
