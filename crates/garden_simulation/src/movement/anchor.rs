//! Target anchor: источник случайных точек внутри bounds (для wander)

use bevy::prelude::*;
use rand::Rng;

/// Axis-aligned объём, внутри которого актор бродит
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct AnchorBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl AnchorBounds {
    /// Bounds из двух произвольных углов (порядок не важен)
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self { min: center - half, max: center + half }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl Default for AnchorBounds {
    fn default() -> Self {
        Self::from_center_size(Vec3::ZERO, Vec3::new(10.0, 0.0, 10.0))
    }
}

/// Component: anchor для случайного блуждания актора
///
/// Bounds мутируются владельцами (например garden zone, job station).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct TargetAnchor {
    bounds: AnchorBounds,
}

impl TargetAnchor {
    pub fn new(bounds: AnchorBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> AnchorBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: AnchorBounds) {
        self.bounds = AnchorBounds::from_corners(bounds.min, bounds.max);
    }

    /// Равномерная случайная точка внутри bounds
    ///
    /// Вырожденные оси (min == max) дают фиксированную координату, без panic.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let t = Vec3::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
        self.bounds.min + (self.bounds.max - self.bounds.min) * t
    }
}
