//! Behaviour injected into a trace: the field being followed, when a line stops, and the
//! spatial symmetries that replicate a traced line.
//!
//! Each capability is a trait with a blanket implementation for the matching closure, so
//! callers can pass either a stock type from this module or a plain `Fn`.

use crate::vec3::Vec3;

/// Tangent field whose integral curves are traced.
pub trait FieldSampler: Send + Sync {
    fn sample(&self, position: Vec3) -> Vec3;
}

impl<F> FieldSampler for F
where
    F: Fn(Vec3) -> Vec3 + Send + Sync,
{
    fn sample(&self, position: Vec3) -> Vec3 {
        self(position)
    }
}

/// Decides, from the current position and the field sampled there, whether a line ends.
pub trait TerminationPolicy: Send + Sync {
    fn should_stop(&self, position: Vec3, field: Vec3) -> bool;
}

impl<F> TerminationPolicy for F
where
    F: Fn(Vec3, Vec3) -> bool + Send + Sync,
{
    fn should_stop(&self, position: Vec3, field: Vec3) -> bool {
        self(position, field)
    }
}

/// Maps a traced point onto its symmetric image.
pub trait SpatialTransform: Send + Sync {
    fn apply(&self, position: Vec3) -> Vec3;
}

impl<F> SpatialTransform for F
where
    F: Fn(Vec3) -> Vec3 + Send + Sync,
{
    fn apply(&self, position: Vec3) -> Vec3 {
        self(position)
    }
}

/*
== Stock termination policies =================================================
*/

/// Trace until the line leaves every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl TerminationPolicy for Never {
    fn should_stop(&self, _position: Vec3, _field: Vec3) -> bool {
        false
    }
}

/// Stops once the field magnitude drops below `threshold`.
#[derive(Debug, Clone, Copy)]
pub struct WeakField {
    pub threshold: f64,
}

impl WeakField {
    pub fn new(threshold: f64) -> Self {
        WeakField { threshold }
    }
}

impl TerminationPolicy for WeakField {
    fn should_stop(&self, _position: Vec3, field: Vec3) -> bool {
        field.norm_squared() < self.threshold * self.threshold
    }
}

/// Stops within `radius` of any of `points`, typically sinks such as negative charges.
#[derive(Debug, Clone)]
pub struct NearPoints {
    pub points: Vec<Vec3>,
    pub radius: f64,
}

impl NearPoints {
    pub fn new(points: Vec<Vec3>, radius: f64) -> Self {
        NearPoints { points, radius }
    }
}

impl TerminationPolicy for NearPoints {
    fn should_stop(&self, position: Vec3, _field: Vec3) -> bool {
        let r2 = self.radius * self.radius;
        self.points
            .iter()
            .any(|p| (position - *p).norm_squared() < r2)
    }
}

/// Stops as soon as any of the inner policies does.
#[derive(Default)]
pub struct AnyOf(pub Vec<Box<dyn TerminationPolicy>>);

impl AnyOf {
    pub fn new() -> Self {
        AnyOf(Vec::new())
    }

    pub fn or(mut self, policy: impl TerminationPolicy + 'static) -> Self {
        self.0.push(Box::new(policy));
        self
    }
}

impl TerminationPolicy for AnyOf {
    fn should_stop(&self, position: Vec3, field: Vec3) -> bool {
        self.0.iter().any(|p| p.should_stop(position, field))
    }
}

/*
== Stock symmetries ===========================================================
*/

/// Mirror through the plane through the origin with the given normal.
#[derive(Debug, Clone, Copy)]
pub struct Reflect {
    normal: Vec3,
}

impl Reflect {
    /// `normal` must be non-zero.
    pub fn new(normal: Vec3) -> Self {
        Reflect {
            normal: normal.normalize(),
        }
    }
}

impl SpatialTransform for Reflect {
    fn apply(&self, position: Vec3) -> Vec3 {
        position - self.normal.scale(2.0 * position.dot(self.normal))
    }
}

/// Right-handed rotation by `angle` radians about an axis through the origin.
#[derive(Debug, Clone, Copy)]
pub struct Rotate {
    axis: Vec3,
    sin: f64,
    cos: f64,
}

impl Rotate {
    /// `axis` must be non-zero.
    pub fn new(axis: Vec3, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Rotate {
            axis: axis.normalize(),
            sin,
            cos,
        }
    }
}

impl SpatialTransform for Rotate {
    fn apply(&self, position: Vec3) -> Vec3 {
        // Rodrigues' formula
        let k = self.axis;
        position.scale(self.cos)
            + k.cross(position).scale(self.sin)
            + k.scale(k.dot(position) * (1.0 - self.cos))
    }
}
