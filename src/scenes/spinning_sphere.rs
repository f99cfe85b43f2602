//! Magnetic field of a uniformly magnetized sphere (equivalently, a spinning charged
//! shell). The field is uniform inside and a pure dipole outside. It is symmetric about
//! the y axis and under reflection in the y = 0 plane, so only lines in the upper half of
//! the xy plane are traced and everything else is produced through symmetries.

use crate::color::random_hue;
use crate::tracer::policy::{Reflect, Rotate, SpatialTransform};
use crate::tracer::trajectory::Trajectory;
use crate::vec3::Vec3;
use rand::Rng;

const B0: f64 = 1.0;
const RADIUS: f64 = 0.2;

const SEED_ANGLES: [u32; 6] = [0, 15, 30, 45, 60, 75];
const AZIMUTHS: [u32; 7] = [45, 90, 135, 180, 225, 270, 315];

pub fn field(p: Vec3) -> Vec3 {
    let r = p.norm();
    if r <= RADIUS {
        return Vec3::new(0.0, 2.0 * B0 * RADIUS, 0.0);
    }
    let (st, ct) = (p.x / r, p.y / r);
    Vec3::new(3.0 * st * ct, 2.0 * ct * ct - st * st, 0.0).scale(RADIUS * (RADIUS / r).powi(3))
}

// A line ends once it curls back down to the equatorial plane, or fades out.
fn back_at_equator(p: Vec3, b: Vec3) -> bool {
    (b.y < 0.0 && p.y < 1e-3) || b.norm() < 1e-4
}

/// One traced line per seed angle, leaving the sphere's equator in the xy plane. Each line
/// is mirrored below the equator and, except for the axial line, copied around the y axis.
pub fn trajectories<R: Rng + ?Sized>(rng: &mut R) -> Vec<Trajectory> {
    let mirror = Reflect::new(Vec3::Y);
    SEED_ANGLES
        .iter()
        .map(|&theta| {
            let start = Vec3::new(RADIUS * f64::from(theta).to_radians().sin(), 0.0, 0.0);
            let colour = random_hue(rng);
            let mut traj = Trajectory::new(start, colour, back_at_equator);
            traj.add_symmetry(mirror, colour);
            if theta != 0 {
                for &phi in &AZIMUTHS {
                    // traced points have z = 0, so turning by -phi about y puts them at
                    // azimuth phi measured from x towards z
                    let turn = Rotate::new(Vec3::Y, -f64::from(phi).to_radians());
                    let colour = random_hue(rng);
                    traj.add_symmetry(turn, colour);
                    traj.add_symmetry(move |p: Vec3| turn.apply(mirror.apply(p)), colour);
                }
            }
            traj
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn inside_field_is_uniform_along_y() {
        assert_eq!(field(Vec3::new(0.05, -0.1, 0.0)), Vec3::new(0.0, 2.0 * B0 * RADIUS, 0.0));
    }

    #[test]
    fn outside_field_is_a_dipole() {
        // on the axis the dipole field is twice as strong as in the equatorial plane
        let axial = field(Vec3::new(0.0, 0.5, 0.0));
        let equatorial = field(Vec3::new(0.5, 0.0, 0.0));
        assert_relative_eq!(axial.y, -2.0 * equatorial.y, epsilon = 1e-12);
        assert!(axial.y > 0.0);
    }

    #[test]
    fn lines_stop_back_at_the_equator() {
        assert!(back_at_equator(Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.0, -0.1, 0.0)));
        assert!(!back_at_equator(Vec3::new(0.5, 0.2, 0.0), Vec3::new(0.0, -0.1, 0.0)));
        assert!(!back_at_equator(Vec3::new(0.1, 0.0, 0.0), Vec3::new(0.0, 0.4, 0.0)));
    }

    #[test]
    fn off_axis_lines_are_copied_around_y() {
        let trajectories = trajectories(&mut StdRng::seed_from_u64(5));
        assert_eq!(trajectories.len(), SEED_ANGLES.len());
        assert_eq!(trajectories[0].symmetry_count(), 2);
        let line = &trajectories[1];
        assert_eq!(line.symmetry_count(), 2 + 2 * AZIMUTHS.len());

        // the 90 degree copy and its mirror image
        let p = Vec3::new(0.3, 0.1, 0.0);
        let copy = line.transform(4, p);
        assert_relative_eq!((copy - Vec3::new(0.0, 0.1, 0.3)).norm(), 0.0, epsilon = 1e-12);
        let mirrored = line.transform(5, p);
        assert_relative_eq!((mirrored - Vec3::new(0.0, -0.1, 0.3)).norm(), 0.0, epsilon = 1e-12);
    }
}
