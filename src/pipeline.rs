//! A complete run: trace every trajectory, then render and save one image per camera.

use crate::error::Result;
use crate::options::RenderOptions;
use crate::render::render_frame;
use crate::tracer::fading::TangentRange;
use crate::tracer::policy::FieldSampler;
use crate::tracer::{trace_all, trajectory::Trajectory};
use log::info;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

/// Traces `trajectories` through `field` and writes one image per camera of
/// `opts.viewpoint`. Returns the written paths in camera order. Rendering only starts once
/// every trajectory has finished tracing; the first encoding failure aborts the run.
pub fn run<F: FieldSampler + ?Sized>(
    opts: &RenderOptions,
    field: &F,
    trajectories: &mut [Trajectory],
) -> Result<Vec<PathBuf>> {
    opts.validate()?;
    trace_all(opts, field, trajectories);

    let trajectories: &[Trajectory] = trajectories;
    let range = TangentRange::of_trajectories(trajectories);
    info!("tangent lengths span [{}, {}]", range.min, range.max);

    let started = Instant::now();
    let written = (0..opts.camera_count())
        .into_par_iter()
        .map(|camera| -> Result<PathBuf> {
            let path = opts.output_path(camera);
            render_frame(opts, trajectories, camera, &range).save(&path)?;
            Ok(path)
        })
        .collect::<Result<Vec<_>>>()?;
    info!("rendered {} images in {:.2?}", written.len(), started.elapsed());
    Ok(written)
}
