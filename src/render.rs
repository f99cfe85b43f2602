//! Turning recorded traces into images.

pub mod canvas;
pub mod heatmap;
pub mod raster;
pub mod zpainter;

use crate::options::RenderOptions;
use crate::tracer::fading::TangentRange;
use crate::tracer::trajectory::{TracePoint, Trajectory};
use canvas::Canvas;

/// Maximal runs of consecutive in-frame points that can be joined by segments.
/// A line that leaves the frame and comes back yields two runs, never a bridge.
pub fn in_bounds_runs(
    points: &[TracePoint],
    width: u32,
    height: u32,
) -> impl Iterator<Item = &[TracePoint]> {
    points
        .split(move |p| !p.pixel.in_bounds(width, height))
        .filter(|run| run.len() >= 2)
}

/// Draws every symmetric copy of every trajectory as seen by camera `camera`.
pub fn render_frame(
    opts: &RenderOptions,
    trajectories: &[Trajectory],
    camera: usize,
    range: &TangentRange,
) -> Canvas {
    let mut canvas = Canvas::new(opts.width, opts.height);
    for traj in trajectories {
        for symmetry in 0..traj.symmetry_count() {
            let colour = traj.symmetry_color(symmetry);
            let points = traj.points(camera, symmetry);
            for run in in_bounds_runs(points, opts.width, opts.height) {
                for pair in run.windows(2) {
                    let opacity = range.segment_opacity(&pair[0], &pair[1], opts.fading_gamma);
                    canvas.draw_segment(
                        pair[0].pixel.centre(),
                        pair[1].pixel.centre(),
                        opts.line_width,
                        colour.gamma_multiply(opacity),
                    );
                }
            }
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Pixel;
    use crate::tracer::policy::Never;
    use crate::vec3::Vec3;
    use egui::Color32;

    fn point(x: i32, y: i32, tangent_length: f64) -> TracePoint {
        TracePoint {
            pixel: Pixel::new(x, y),
            tangent_length,
        }
    }

    fn options() -> RenderOptions {
        RenderOptions {
            width: 20,
            height: 10,
            line_width: 1.0,
            ..RenderOptions::new("unused.png")
        }
    }

    #[test]
    fn runs_split_at_out_of_frame_points() {
        let points = [
            point(1, 5, 1.0),
            point(2, 5, 1.0),
            point(3, 5, 1.0),
            point(-1, 5, 1.0),
            point(8, 5, 1.0),
            point(25, 5, 1.0),
            point(12, 5, 1.0),
            point(13, 5, 1.0),
        ];
        let runs: Vec<&[TracePoint]> = in_bounds_runs(&points, 20, 10).collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], &points[0..3]);
        assert_eq!(runs[1], &points[6..8]);
    }

    #[test]
    fn gaps_are_not_bridged() {
        let mut traj = Trajectory::new(Vec3::ZERO, Color32::WHITE, Never);
        traj.reset(1);
        traj.traces[0] = vec![
            point(1, 5, 1.0),
            point(4, 5, 1.0),
            point(30, 5, 1.0),
            point(14, 5, 1.0),
            point(18, 5, 1.0),
        ];
        let canvas = render_frame(&options(), &[traj], 0, &TangentRange::DEFAULT);
        assert_eq!(canvas.pixel(2, 5), Some(Color32::WHITE));
        assert_eq!(canvas.pixel(16, 5), Some(Color32::WHITE));
        assert_eq!(canvas.pixel(9, 5), Some(Color32::BLACK));
    }

    #[test]
    fn weak_field_segments_fade() {
        let line = |y: i32, tangent_length: f64| {
            let mut traj = Trajectory::new(Vec3::ZERO, Color32::WHITE, Never);
            traj.reset(1);
            traj.traces[0] = vec![point(1, y, tangent_length), point(8, y, tangent_length)];
            traj
        };
        let range = TangentRange { min: 0.0, max: 1.0 };
        let lines = [line(2, 1.0), line(5, 0.5), line(7, 0.0)];
        let canvas = render_frame(&options(), &lines, 0, &range);
        assert_eq!(canvas.pixel(4, 2), Some(Color32::WHITE));
        assert_eq!(canvas.pixel(4, 7), Some(Color32::BLACK));

        let image = canvas.to_image();
        assert_eq!(image.get_pixel(4, 5).0, [128, 128, 128, 255]);

        let squared_opts = RenderOptions {
            fading_gamma: 2.0,
            ..options()
        };
        let squared = render_frame(&squared_opts, &lines, 0, &range);
        assert_eq!(squared.to_image().get_pixel(4, 5).0, [64, 64, 64, 255]);
    }

    #[test]
    fn other_cameras_are_not_drawn() {
        let mut traj = Trajectory::new(Vec3::ZERO, Color32::WHITE, Never);
        traj.reset(2);
        traj.traces[1] = vec![point(1, 5, 1.0), point(8, 5, 1.0)];
        let canvas = render_frame(&options(), &[traj], 0, &TangentRange::DEFAULT);
        assert_eq!(canvas.pixel(4, 5), Some(Color32::BLACK));
    }
}
