//! Settings for one tracing and rendering run.

pub mod variables;

use crate::camera::Viewpoint;
use crate::error::{FieldLineError, Result};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use variables::{FADING_GAMMA, HEIGHT, LINE_WIDTH, ORBIT_FRAMES, STEP, Variable, WIDTH};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Image path for a fixed viewpoint, or the file name prefix for an orbit.
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Runge-Kutta step length in world units.
    pub step: f64,
    pub line_width: f32,
    /// Exponent applied to the normalized tangent length to get stroke opacity.
    pub fading_gamma: f64,
    pub viewpoint: Viewpoint,
    /// Upper bound on integration steps per trajectory. `None` traces until the
    /// termination policy fires or the line leaves every frame.
    pub max_steps: Option<usize>,
    /// Stop projecting a (camera, symmetry) slot once it first leaves the frame.
    /// Only valid for fields whose lines never re-enter a frame.
    pub latch_out_of_bounds: bool,
}

impl RenderOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        RenderOptions {
            output: output.into(),
            ..Default::default()
        }
    }

    pub fn camera_count(&self) -> usize {
        self.viewpoint.cameras().len()
    }

    /// Where the image of camera `index` is written.
    pub fn output_path(&self, index: usize) -> PathBuf {
        match self.viewpoint {
            Viewpoint::Fixed(_) => self.output.clone(),
            Viewpoint::Orbit(ref orbit) => PathBuf::from(format!(
                "{}-{:03}-of-{:03}.png",
                self.output.display(),
                index,
                orbit.len()
            )),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check("width", &self.width, &WIDTH)?;
        check("height", &self.height, &HEIGHT)?;
        check("step", &self.step, &STEP)?;
        check("line width", &self.line_width, &LINE_WIDTH)?;
        check("fading gamma", &self.fading_gamma, &FADING_GAMMA)?;
        check("camera count", &self.camera_count(), &ORBIT_FRAMES)?;
        if self.max_steps == Some(0) {
            return Err(FieldLineError::InvalidOption(
                "max steps must be positive".to_string(),
            ));
        }
        if is_blank(&self.output) {
            return Err(FieldLineError::InvalidOption(
                "output path is empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            output: PathBuf::from("fieldline.png"),
            width: WIDTH.default,
            height: HEIGHT.default,
            step: STEP.default,
            line_width: LINE_WIDTH.default,
            fading_gamma: FADING_GAMMA.default,
            viewpoint: Viewpoint::default(),
            max_steps: None,
            latch_out_of_bounds: false,
        }
    }
}

fn check<T: PartialOrd + Display>(name: &str, value: &T, range: &Variable<T>) -> Result<()> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(FieldLineError::InvalidOption(format!(
            "{name} {value} outside [{}, {}]",
            range.min, range.max
        )))
    }
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().is_empty()
}
