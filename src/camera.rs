//! Orthographic cameras looking at the origin, and rings of them for orbit animations.
//!
//! A camera maps the world square `[-1, 1]` (measured along its screen axes, relative to the
//! camera position) onto the full image, with image row 0 at the top.

use crate::vec3::Vec3;
use egui::{Pos2, pos2};
use std::f64::consts::PI;

/// Integer pixel coordinate. Values outside the image are legal and are checked with
/// [`Pixel::in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub const fn new(x: i32, y: i32) -> Self {
        Pixel { x, y }
    }

    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.x >= 0 && (self.x as i64) < width as i64 && self.y >= 0 && (self.y as i64) < height as i64
    }

    /// Centre of the pixel in continuous screen space.
    pub fn centre(&self) -> Pos2 {
        pos2(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    // Orthonormal screen frame in world coordinates.
    sx: Vec3,
    sy: Vec3,
    sz: Vec3,
}

impl Camera {
    /// Builds a camera at `position` looking towards the origin.
    /// `approx_right` only needs a component perpendicular to `position`; it is
    /// Gram-Schmidt orthogonalized against the viewing axis. If it is parallel to
    /// `position` the basis is NaN.
    pub fn new(position: Vec3, approx_right: Vec3) -> Self {
        let sz = position.normalize();
        let sx = (approx_right - sz.scale(approx_right.dot(sz))).normalize();
        let sy = sz.cross(sx);
        Camera {
            position,
            sx,
            sy,
            sz,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Screen basis as `(right, up, backwards)`.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.sx, self.sy, self.sz)
    }

    pub fn project_to_pixel(&self, p: Vec3, width: u32, height: u32) -> Pixel {
        let q = p - self.position;
        let (w, h) = (width as f64, height as f64);
        Pixel::new(
            (width / 2) as i32 + (w * q.dot(self.sx) / 2.0).floor() as i32,
            (height / 2) as i32 - (h * q.dot(self.sy) / 2.0).floor() as i32,
        )
    }

    /// Continuous screen position and view depth of `p`. Depth grows away from the camera.
    pub fn project_with_depth(&self, p: Vec3, width: u32, height: u32) -> (Pos2, f32) {
        let q = p - self.position;
        let (w, h) = (width as f64, height as f64);
        let x = w / 2.0 + w * q.dot(self.sx) / 2.0;
        let y = h / 2.0 - h * q.dot(self.sy) / 2.0;
        (pos2(x as f32, y as f32), -q.dot(self.sz) as f32)
    }
}

impl Default for Camera {
    /// Sits on the +z axis looking down towards the origin, with +x to the right.
    fn default() -> Self {
        Camera::new(Vec3::Z, Vec3::X)
    }
}

/// Cameras evenly spread around a unit circle centred at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraOrbit {
    cameras: Vec<Camera>,
}

impl CameraOrbit {
    /// The orbit plane has normal equal to the y axis rolled by `roll_degrees` around z.
    /// Frame 0 always sits on the +z axis.
    pub fn new(roll_degrees: f64, frames: usize) -> Self {
        let roll = roll_degrees.to_radians();
        let ry = Vec3::new(-roll.sin(), roll.cos(), 0.0);
        let rz = Vec3::Z;
        let rx = ry.cross(rz);
        let dtheta = 2.0 * PI / frames as f64;
        let cameras = (0..frames)
            .map(|f| {
                let theta = f as f64 * dtheta;
                let (st, ct) = theta.sin_cos();
                let position = rz.scale(ct) + rx.scale(st);
                let sx = rx.scale(ct) - rz.scale(st);
                Camera {
                    position,
                    sx,
                    sy: position.cross(sx),
                    sz: position,
                }
            })
            .collect();
        CameraOrbit { cameras }
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}

/// Where the images of a run are taken from.
#[derive(Debug, Clone, PartialEq)]
pub enum Viewpoint {
    /// One camera, one image written to the output path as given.
    Fixed(Camera),
    /// One image per orbit camera, suffixed with the frame index and count.
    Orbit(CameraOrbit),
}

impl Viewpoint {
    /// Cameras of `CameraOrbit::new(roll_degrees, frames)`. A lone camera is kept as a
    /// fixed viewpoint, with its roll, so it writes to the output path unnumbered.
    pub fn orbit(roll_degrees: f64, frames: usize) -> Self {
        let orbit = CameraOrbit::new(roll_degrees, frames);
        match orbit.cameras() {
            [camera] => Viewpoint::Fixed(*camera),
            _ => Viewpoint::Orbit(orbit),
        }
    }

    pub fn cameras(&self) -> &[Camera] {
        match self {
            Viewpoint::Fixed(camera) => std::slice::from_ref(camera),
            Viewpoint::Orbit(orbit) => orbit.cameras(),
        }
    }
}

impl Default for Viewpoint {
    fn default() -> Self {
        Viewpoint::Fixed(Camera::default())
    }
}
