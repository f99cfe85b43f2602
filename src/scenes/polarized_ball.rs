//! Linear dielectric ball of radius `RADIUS` in a uniform field along x. Inside the ball
//! the field is uniform and weaker; outside it is the applied field plus that of a dipole.

use crate::color::random_hue;
use crate::tracer::policy::Never;
use crate::tracer::trajectory::Trajectory;
use crate::vec3::Vec3;
use rand::Rng;
use std::f64::consts::TAU;

const APPLIED: f64 = 1.0;
const PERMITTIVITY: f64 = 1.2;
const RADIUS: f64 = 0.5;
const INSIDE: f64 = 3.0 * APPLIED / (PERMITTIVITY + 2.0);
// Strength of the equivalent dipole at the centre, `p / (4 pi eps0)`.
const DIPOLE: f64 = (PERMITTIVITY - 1.0) / (PERMITTIVITY + 2.0) * APPLIED * RADIUS * RADIUS * RADIUS;

const SEEDS_PER_RING: usize = 60;
const START_X: f64 = -0.6;

pub fn field(p: Vec3) -> Vec3 {
    let r2 = p.norm_squared();
    if r2 < RADIUS * RADIUS {
        return Vec3::new(INSIDE, 0.0, 0.0);
    }
    let r = r2.sqrt();
    let r5 = r2 * r2 * r;
    Vec3::new(
        APPLIED - DIPOLE * (1.0 / (r2 * r) - 3.0 * p.x * p.x / r5),
        3.0 * DIPOLE * p.x * p.y / r5,
        3.0 * DIPOLE * p.x * p.z / r5,
    )
}

/// Four rings of seeds in the plane `x = START_X`, centred above, below, in front of and
/// behind the ball.
pub fn trajectories<R: Rng + ?Sized>(rng: &mut R) -> Vec<Trajectory> {
    let ring_radius = RADIUS / 2.0;
    let centres = [
        Vec3::new(START_X, RADIUS, 0.0),
        Vec3::new(START_X, 0.0, RADIUS),
        Vec3::new(START_X, -RADIUS, 0.0),
        Vec3::new(START_X, 0.0, -RADIUS),
    ];
    let mut trajectories = Vec::with_capacity(centres.len() * SEEDS_PER_RING);
    for centre in centres {
        for i in 0..SEEDS_PER_RING {
            let (s, c) = (TAU * i as f64 / SEEDS_PER_RING as f64).sin_cos();
            let start = centre + Vec3::new(0.0, ring_radius * s, ring_radius * c);
            trajectories.push(Trajectory::new(start, random_hue(rng), Never));
        }
    }
    trajectories
}
