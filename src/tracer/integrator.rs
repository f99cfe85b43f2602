//! Classical fourth order Runge-Kutta integration of a single field line.

use crate::camera::Camera;
use crate::options::RenderOptions;
use crate::tracer::policy::FieldSampler;
use crate::tracer::trajectory::{TraceOutcome, TracePoint, Trajectory};
use crate::vec3::Vec3;
use log::{debug, warn};

/// Advances `x` by one step of length `h`, given `a`, the field already sampled at `x`.
pub fn rk4_step<F: FieldSampler + ?Sized>(field: &F, x: Vec3, a: Vec3, h: f64) -> Vec3 {
    let b = field.sample(x + a.scale(h / 2.0));
    let c = field.sample(x + b.scale(h / 2.0));
    let d = field.sample(x + c.scale(h));
    x + (a + b.scale(2.0) + c.scale(2.0) + d).scale(h / 6.0)
}

/// Integrates `traj` from its start point, recording its projection into every
/// (camera, symmetry) slot. A slot only gains a point when the pixel differs from
/// the last one it recorded.
pub(crate) fn trace<F: FieldSampler + ?Sized>(
    traj: &mut Trajectory,
    field: &F,
    cameras: &[Camera],
    opts: &RenderOptions,
) {
    let symmetries = traj.symmetry_count();
    traj.reset(cameras.len());
    let (width, height) = (opts.width, opts.height);
    let mut latched = vec![false; cameras.len() * symmetries];
    let mut x = traj.start();
    let mut steps = 0;

    let outcome = loop {
        let a = field.sample(x);
        if !x.is_finite() || !a.is_finite() {
            warn!("field line from {} became non-finite at {x} after {steps} steps", traj.start());
            break TraceOutcome::NonFinite;
        }
        if traj.should_stop(x, a) {
            break TraceOutcome::Terminated;
        }

        let tangent_length = a.norm();
        let mut all_out_of_bounds = true;
        for (c, camera) in cameras.iter().enumerate() {
            for s in 0..symmetries {
                let slot = c * symmetries + s;
                if latched[slot] {
                    continue;
                }
                let pixel = camera.project_to_pixel(traj.transform(s, x), width, height);
                if pixel.in_bounds(width, height) {
                    all_out_of_bounds = false;
                } else if opts.latch_out_of_bounds {
                    latched[slot] = true;
                }
                let points = &mut traj.traces[slot];
                if points.last().is_none_or(|last| last.pixel != pixel) {
                    points.push(TracePoint {
                        pixel,
                        tangent_length,
                    });
                }
            }
        }
        if all_out_of_bounds {
            break TraceOutcome::LeftFrames;
        }
        if opts.max_steps.is_some_and(|max| steps >= max) {
            break TraceOutcome::StepLimit;
        }

        x = rk4_step(field, x, a, opts.step);
        steps += 1;
    };

    if outcome == TraceOutcome::StepLimit {
        warn!("field line from {} hit the {steps} step limit", traj.start());
    }
    debug!("field line from {} ended after {steps} steps: {outcome:?}", traj.start());
    traj.steps = steps;
    traj.outcome = Some(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::policy::{Never, Reflect};
    use approx::assert_relative_eq;
    use egui::Color32;

    fn options(width: u32, height: u32, step: f64) -> RenderOptions {
        RenderOptions {
            width,
            height,
            step,
            ..RenderOptions::new("unused.png")
        }
    }

    #[test]
    fn constant_field_advances_linearly() {
        let field = |_: Vec3| Vec3::X;
        let h = 0.01;
        let mut x = Vec3::ZERO;
        for _ in 0..250 {
            x = rk4_step(&field, x, field(x), h);
        }
        assert_relative_eq!(x.x, 250.0 * h, max_relative = 1e-12);
        assert_eq!(x.y, 0.0);
        assert_eq!(x.z, 0.0);
    }

    #[test]
    fn rk4_follows_a_circle() {
        // Tangent field of circles around the z axis.
        let field = |p: Vec3| Vec3::new(-p.y, p.x, 0.0);
        let h = 0.01;
        let mut x = Vec3::X;
        let n = (2.0 * std::f64::consts::PI / h).round() as usize;
        for _ in 0..n {
            x = rk4_step(&field, x, field(x), h);
        }
        assert_relative_eq!(x.norm(), 1.0, epsilon = 1e-8);
    }

    #[test]
    fn immediate_termination_records_nothing() {
        let cameras = [Camera::default()];
        let mut traj = Trajectory::new(Vec3::ZERO, Color32::WHITE, |_: Vec3, _: Vec3| true)
            .with_symmetry(Reflect::new(Vec3::X), Color32::RED);
        trace(&mut traj, &|_: Vec3| Vec3::X, &cameras, &options(100, 100, 0.1));
        assert_eq!(traj.outcome(), Some(TraceOutcome::Terminated));
        assert!(traj.points(0, 0).is_empty());
        assert!(traj.points(0, 1).is_empty());
        assert_eq!(traj.steps(), 0);
    }

    #[test]
    fn consecutive_samples_on_one_pixel_are_deduplicated() {
        let cameras = [Camera::default()];
        // 1000 steps of 1e-4 cover 0.1 world units, i.e. 5 pixels at width 100.
        let mut traj = Trajectory::new(Vec3::ZERO, Color32::WHITE, |p: Vec3, _: Vec3| p.x > 0.1);
        trace(&mut traj, &|_: Vec3| Vec3::X, &cameras, &options(100, 100, 1e-4));
        let points = traj.points(0, 0);
        assert!(points.len() <= 6, "{} points recorded", points.len());
        assert!(traj.steps() > 900);
        for pair in points.windows(2) {
            assert_ne!(pair[0].pixel, pair[1].pixel);
        }
    }

    #[test]
    fn leaving_every_frame_stops_the_trace() {
        let cameras = [Camera::default()];
        let mut traj = Trajectory::new(Vec3::ZERO, Color32::WHITE, Never);
        trace(&mut traj, &|_: Vec3| Vec3::X, &cameras, &options(100, 100, 0.05));
        assert_eq!(traj.outcome(), Some(TraceOutcome::LeftFrames));
        let last = traj.points(0, 0).last().copied();
        assert!(last.is_some_and(|p| !p.pixel.in_bounds(100, 100)));
    }

    #[test]
    fn mirrored_copy_is_recorded_in_its_own_slot() {
        let cameras = [Camera::default()];
        let mut traj = Trajectory::new(Vec3::ZERO, Color32::WHITE, |p: Vec3, _: Vec3| p.x > 0.5)
            .with_symmetry(Reflect::new(Vec3::X), Color32::RED);
        trace(&mut traj, &|_: Vec3| Vec3::X, &cameras, &options(100, 100, 0.01));
        let direct = traj.points(0, 0);
        let mirrored = traj.points(0, 1);
        assert!(direct.len() > 1 && mirrored.len() > 1);
        assert!(direct.iter().all(|p| p.pixel.x >= 50 && p.pixel.y == 50));
        assert!(mirrored.iter().all(|p| p.pixel.x <= 50 && p.pixel.y == 50));
    }

    #[test]
    fn step_limit_bounds_endless_traces() {
        let cameras = [Camera::default()];
        let mut traj = Trajectory::new(Vec3::X.scale(0.5), Color32::WHITE, Never);
        let mut opts = options(100, 100, 0.01);
        opts.max_steps = Some(500);
        let circle = |p: Vec3| Vec3::new(-p.y, p.x, 0.0);
        trace(&mut traj, &circle, &cameras, &opts);
        assert_eq!(traj.outcome(), Some(TraceOutcome::StepLimit));
        assert_eq!(traj.steps(), 500);
    }

    #[test]
    fn non_finite_samples_end_the_trace() {
        let cameras = [Camera::default()];
        let mut traj = Trajectory::new(Vec3::ZERO, Color32::WHITE, Never);
        let field = |p: Vec3| if p.x > 0.2 { Vec3::new(f64::NAN, 0.0, 0.0) } else { Vec3::X };
        trace(&mut traj, &field, &cameras, &options(100, 100, 0.01));
        assert_eq!(traj.outcome(), Some(TraceOutcome::NonFinite));
        assert!(traj.recorded_points().all(|p| p.tangent_length.is_finite()));
    }

    #[test]
    fn latch_stops_projecting_a_slot_after_it_leaves() {
        let cameras = [Camera::default()];
        // The shifted copy starts left of the frame and drifts into it.
        let shifted = |p: Vec3| p - Vec3::new(1.2, 0.0, 0.0);
        let make = || {
            Trajectory::new(Vec3::new(-0.5, 0.0, 0.0), Color32::WHITE, |p: Vec3, _: Vec3| p.x > 0.9)
                .with_symmetry(shifted, Color32::RED)
        };
        let mut opts = options(100, 100, 0.01);

        let mut retest = make();
        trace(&mut retest, &|_: Vec3| Vec3::X, &cameras, &opts);
        opts.latch_out_of_bounds = true;
        let mut latched = make();
        trace(&mut latched, &|_: Vec3| Vec3::X, &cameras, &opts);

        assert_eq!(retest.outcome(), Some(TraceOutcome::Terminated));
        assert_eq!(latched.outcome(), Some(TraceOutcome::Terminated));
        assert_eq!(retest.points(0, 0), latched.points(0, 0));
        assert!(!retest.points(0, 1)[0].pixel.in_bounds(100, 100));
        assert!(retest.points(0, 1).iter().any(|p| p.pixel.in_bounds(100, 100)));
        assert_eq!(latched.points(0, 1).len(), 1);
    }

    #[test]
    fn rerunning_clears_previous_traces() {
        let cameras = [Camera::default()];
        let mut traj = Trajectory::new(Vec3::new(-1.0, 0.0, 0.0), Color32::WHITE, |p: Vec3, _: Vec3| p.x > 1.0);
        let opts = options(100, 100, 0.1);
        trace(&mut traj, &|_: Vec3| Vec3::X, &cameras, &opts);
        let first: Vec<_> = traj.points(0, 0).to_vec();
        trace(&mut traj, &|_: Vec3| Vec3::X, &cameras, &opts);
        assert_eq!(traj.points(0, 0), first.as_slice());
    }
}
