//! Stroke opacity from field strength.
//!
//! Tangent lengths are normalized against the range observed over every recorded point of
//! a run, then raised to the fading gamma. Weak-field stretches of a line fade out.

use crate::tracer::trajectory::{TracePoint, Trajectory};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentRange {
    pub min: f64,
    pub max: f64,
}

impl TangentRange {
    /// Used when nothing was recorded.
    pub const DEFAULT: TangentRange = TangentRange { min: 0.0, max: 1.0 };

    pub fn scan(lengths: impl IntoIterator<Item = f64>) -> Self {
        lengths
            .into_iter()
            .fold(None, |range: Option<TangentRange>, len| {
                Some(match range {
                    None => TangentRange { min: len, max: len },
                    Some(r) => TangentRange {
                        min: r.min.min(len),
                        max: r.max.max(len),
                    },
                })
            })
            .unwrap_or(Self::DEFAULT)
    }

    /// Range over every point recorded by every camera and symmetry of `trajectories`.
    pub fn of_trajectories(trajectories: &[Trajectory]) -> Self {
        Self::scan(
            trajectories
                .iter()
                .flat_map(Trajectory::recorded_points)
                .map(|p| p.tangent_length),
        )
    }

    /// Opacity in `[0, 1]` for a tangent length. A collapsed range is fully opaque.
    pub fn opacity(&self, tangent_length: f64, gamma: f64) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 1.0;
        }
        ((tangent_length - self.min) / span).clamp(0.0, 1.0).powf(gamma) as f32
    }

    /// Opacity of the segment joining two consecutive trace points.
    pub fn segment_opacity(&self, from: &TracePoint, to: &TracePoint, gamma: f64) -> f32 {
        self.opacity((from.tangent_length + to.tangent_length) / 2.0, gamma)
    }
}

impl Default for TangentRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}
