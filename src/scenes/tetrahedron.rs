//! Two positive and two negative unit charges on alternating corners of a cube, which
//! form a regular tetrahedron. Lines leave small spheres around the positive charges and
//! end on the negative ones or where the field dies out.

use crate::color::random_hue;
use crate::tracer::policy::{AnyOf, NearPoints, TerminationPolicy, WeakField};
use crate::tracer::trajectory::Trajectory;
use crate::vec3::Vec3;
use rand::Rng;
use std::sync::Arc;

const A: f64 = 0.3;
const POSITIVES: [Vec3; 2] = [Vec3::new(A, A, A), Vec3::new(-A, A, -A)];
const NEGATIVES: [Vec3; 2] = [Vec3::new(A, -A, -A), Vec3::new(-A, -A, A)];
// Radius of the launch spheres, also used as the capture radius of the sinks.
const SEED_RADIUS: f64 = 0.02;
const STRENGTH: f64 = 1.0 / 2000.0;

pub fn field(p: Vec3) -> Vec3 {
    let coulomb = |charge: Vec3| {
        let d = p - charge;
        d.scale(1.0 / d.norm_squared().powf(1.5))
    };
    let total = POSITIVES.iter().map(|&q| coulomb(q)).fold(Vec3::ZERO, |acc, e| acc + e)
        - NEGATIVES.iter().map(|&q| coulomb(q)).fold(Vec3::ZERO, |acc, e| acc + e);
    total.scale(STRENGTH)
}

fn termination() -> Arc<dyn TerminationPolicy> {
    Arc::new(
        AnyOf::new()
            .or(WeakField::new(1e-4))
            .or(NearPoints::new(NEGATIVES.to_vec(), SEED_RADIUS)),
    )
}

/// Seeds on a small sphere around `charge`: both poles of the local frame plus rings at
/// every 30 degrees of polar angle, six seeds per ring.
fn launch_sphere<R: Rng + ?Sized>(
    charge: Vec3,
    local_z: Vec3,
    local_x: Vec3,
    policy: &Arc<dyn TerminationPolicy>,
    rng: &mut R,
) -> Vec<Trajectory> {
    let lz = local_z.normalize();
    let lx = (local_x - lz.scale(local_x.dot(lz))).normalize();
    let ly = lz.cross(lx);
    let (lx, ly, lz) = (lx.scale(SEED_RADIUS), ly.scale(SEED_RADIUS), lz.scale(SEED_RADIUS));

    let mut offsets = vec![lz, -lz];
    for theta in (30..=150).step_by(30) {
        let (st, ct) = (theta as f64).to_radians().sin_cos();
        for phi in (0..360).step_by(60) {
            let (sp, cp) = (phi as f64).to_radians().sin_cos();
            offsets.push(lx.scale(st * cp) + ly.scale(st * sp) + lz.scale(ct));
        }
    }
    offsets
        .into_iter()
        .map(|offset| Trajectory::with_policy(charge + offset, random_hue(rng), policy.clone()))
        .collect()
}

pub fn trajectories<R: Rng + ?Sized>(rng: &mut R) -> Vec<Trajectory> {
    let policy = termination();
    let mut trajectories = launch_sphere(
        POSITIVES[0],
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(0.0, -1.0, -1.0),
        &policy,
        rng,
    );
    trajectories.extend(launch_sphere(
        POSITIVES[1],
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, 0.0),
        &policy,
        rng,
    ));
    trajectories
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn field_points_from_positive_to_negative() {
        // midway between a positive and a negative charge on the same cube edge
        let mid = (POSITIVES[0] + NEGATIVES[0]).scale(0.5);
        let e = field(mid);
        assert!(e.dot(NEGATIVES[0] - POSITIVES[0]) > 0.0);
    }

    #[test]
    fn field_at_the_centre_points_down() {
        // both positive charges sit at y = +A
        let e = field(Vec3::ZERO);
        assert!(e.y < 0.0);
        assert_relative_eq!(e.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(e.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn seeds_surround_the_positive_charges() {
        let trajectories = trajectories(&mut StdRng::seed_from_u64(3));
        assert_eq!(trajectories.len(), 2 * (2 + 5 * 6));
        for (i, traj) in trajectories.iter().enumerate() {
            let charge = POSITIVES[i / 32];
            assert_relative_eq!((traj.start() - charge).norm(), SEED_RADIUS, epsilon = 1e-12);
        }
    }
}
