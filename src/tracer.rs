//! Field line tracing.
//!
//! Every trajectory is integrated on its own rayon task; the call returns once all of them
//! have finished, which is the barrier rendering relies on to see the global tangent range.

pub mod fading;
pub mod integrator;
pub mod policy;
pub mod trajectory;

use crate::options::RenderOptions;
use log::info;
use policy::FieldSampler;
use rayon::prelude::*;
use std::time::Instant;
use trajectory::{TraceOutcome, Trajectory};

/// Traces every trajectory through `field`, replacing whatever a previous run recorded.
pub fn trace_all<F: FieldSampler + ?Sized>(
    opts: &RenderOptions,
    field: &F,
    trajectories: &mut [Trajectory],
) {
    let started = Instant::now();
    let cameras = opts.viewpoint.cameras();
    trajectories
        .par_iter_mut()
        .for_each(|traj| integrator::trace(traj, field, cameras, opts));

    let capped = trajectories
        .iter()
        .filter(|t| t.outcome() == Some(TraceOutcome::StepLimit))
        .count();
    info!(
        "completed tracing {} trajectories across {} cameras in {:.2?} ({capped} hit the step limit)",
        trajectories.len(),
        cameras.len(),
        started.elapsed()
    );
}
