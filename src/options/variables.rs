//! Defaults and accepted ranges for every tunable render option.

pub struct Variable<T> {
    pub default: T,
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> Variable<T> {
    pub fn contains(&self, value: &T) -> bool {
        *value >= self.min && *value <= self.max
    }
}

pub const WIDTH: Variable<u32> = Variable {
    default: 800,
    min: 1,
    max: 16384,
};
pub const HEIGHT: Variable<u32> = Variable {
    default: 800,
    min: 1,
    max: 16384,
};
pub const STEP: Variable<f64> = Variable {
    default: 0.005,
    min: 1e-6,
    max: 1.0,
};
pub const LINE_WIDTH: Variable<f32> = Variable {
    default: 1.5,
    min: 0.1,
    max: 32.0,
};
pub const FADING_GAMMA: Variable<f64> = Variable {
    default: 1.0,
    min: 0.01,
    max: 16.0,
};
pub const ORBIT_FRAMES: Variable<usize> = Variable {
    default: 1,
    min: 1,
    max: 10000,
};
