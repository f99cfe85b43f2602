//! A field line to trace, plus everything recorded about it during a run.

use crate::camera::Pixel;
use crate::tracer::policy::{SpatialTransform, TerminationPolicy};
use crate::vec3::Vec3;
use egui::Color32;
use std::sync::Arc;

/// A projected sample along a traced line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    pub pixel: Pixel,
    /// Field magnitude where the sample was taken.
    pub tangent_length: f64,
}

/// Why the integration of a trajectory stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOutcome {
    /// The termination policy fired.
    Terminated,
    /// Every (camera, symmetry) projection fell outside its frame.
    LeftFrames,
    /// The configured step cap was reached.
    StepLimit,
    /// The position or a field sample stopped being finite.
    NonFinite,
}

pub struct Symmetry {
    transform: Box<dyn SpatialTransform>,
    color: Color32,
}

pub struct Trajectory {
    start: Vec3,
    color: Color32,
    termination: Arc<dyn TerminationPolicy>,
    symmetries: Vec<Symmetry>,

    // One trace per camera x symmetry, index `camera * symmetry_count + symmetry`.
    pub(crate) traces: Vec<Vec<TracePoint>>,
    pub(crate) outcome: Option<TraceOutcome>,
    pub(crate) steps: usize,
}

impl Trajectory {
    pub fn new(start: Vec3, color: Color32, termination: impl TerminationPolicy + 'static) -> Self {
        Self::with_policy(start, color, Arc::new(termination))
    }

    /// Builds a trajectory whose termination policy is shared with other trajectories.
    pub fn with_policy(start: Vec3, color: Color32, termination: Arc<dyn TerminationPolicy>) -> Self {
        Trajectory {
            start,
            color,
            termination,
            symmetries: Vec::new(),
            traces: Vec::new(),
            outcome: None,
            steps: 0,
        }
    }

    /// Adds a symmetric copy drawn in `color`. The identity copy, drawn in the
    /// trajectory's own colour, is always present at index 0.
    pub fn add_symmetry(&mut self, transform: impl SpatialTransform + 'static, color: Color32) {
        self.symmetries.push(Symmetry {
            transform: Box::new(transform),
            color,
        });
    }

    pub fn with_symmetry(mut self, transform: impl SpatialTransform + 'static, color: Color32) -> Self {
        self.add_symmetry(transform, color);
        self
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn symmetry_count(&self) -> usize {
        1 + self.symmetries.len()
    }

    pub fn symmetry_color(&self, symmetry: usize) -> Color32 {
        match symmetry {
            0 => self.color,
            s => self.symmetries[s - 1].color,
        }
    }

    pub(crate) fn should_stop(&self, position: Vec3, field: Vec3) -> bool {
        self.termination.should_stop(position, field)
    }

    pub(crate) fn transform(&self, symmetry: usize, position: Vec3) -> Vec3 {
        match symmetry {
            0 => position,
            s => self.symmetries[s - 1].transform.apply(position),
        }
    }

    /// Clears everything recorded by a previous run.
    pub(crate) fn reset(&mut self, cameras: usize) {
        self.traces = vec![Vec::new(); cameras * self.symmetry_count()];
        self.outcome = None;
        self.steps = 0;
    }

    /// Recorded trace of one symmetric copy as seen by one camera. Empty before a run.
    pub fn points(&self, camera: usize, symmetry: usize) -> &[TracePoint] {
        self.traces
            .get(camera * self.symmetry_count() + symmetry)
            .map_or(&[], Vec::as_slice)
    }

    pub fn recorded_points(&self) -> impl Iterator<Item = &TracePoint> {
        self.traces.iter().flatten()
    }

    pub fn outcome(&self) -> Option<TraceOutcome> {
        self.outcome
    }

    /// Runge-Kutta steps taken by the last run.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::policy::{Never, Reflect};

    #[test]
    fn identity_symmetry_is_implicit() {
        let traj = Trajectory::new(Vec3::X, Color32::RED, Never);
        assert_eq!(traj.symmetry_count(), 1);
        assert_eq!(traj.symmetry_color(0), Color32::RED);
        assert_eq!(traj.transform(0, Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn symmetries_follow_identity() {
        let traj = Trajectory::new(Vec3::X, Color32::RED, Never)
            .with_symmetry(Reflect::new(Vec3::Y), Color32::BLUE);
        assert_eq!(traj.symmetry_count(), 2);
        assert_eq!(traj.symmetry_color(1), Color32::BLUE);
        assert_eq!(traj.transform(1, Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn reset_allocates_one_trace_per_slot() {
        let mut traj = Trajectory::new(Vec3::X, Color32::RED, Never)
            .with_symmetry(Reflect::new(Vec3::Y), Color32::BLUE);
        assert!(traj.points(0, 0).is_empty());
        traj.reset(3);
        assert_eq!(traj.traces.len(), 6);
        assert!(traj.points(2, 1).is_empty());
        assert_eq!(traj.recorded_points().count(), 0);
        assert_eq!(traj.outcome(), None);
    }
}
