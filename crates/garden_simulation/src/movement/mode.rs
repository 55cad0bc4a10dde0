//! Movement modes (tagged variant) + вычисление target позиции

use bevy::prelude::*;
use std::collections::HashMap;
use std::f32::consts::TAU;

/// Снимок позиций потенциальных целей (Entity → world position)
///
/// Собирается системой тика перед мутацией Transform'ов.
/// Отсутствие entity = цель despawned (weak reference не резолвится).
pub type TargetPositions = HashMap<Entity, Vec3>;

/// Текущий режим движения
///
/// Ровно один режим активен; смена: атомарная замена значения.
#[derive(Debug, Clone, PartialEq)]
pub enum MovementMode {
    /// Следовать за другим актором, останавливаясь за `distance_threshold` до него
    TargetFollow { target: Entity, distance_threshold: f32 },

    /// Бесконечное движение вдоль луча (direction normalized, может быть ZERO)
    FixedDirection { direction: Vec3 },

    /// Одна статическая точка (поддерживает completion watch)
    FixedPosition { position: Vec3 },

    /// Орбита вокруг origin; angle нормализован в [0, TAU)
    RadialOrbit {
        origin: Vec3,
        radius: f32,
        angular_speed: f32,
        angle: f32,
    },
}

impl MovementMode {
    /// Target позиция для актора в `position`
    ///
    /// TargetFollow с мёртвой целью → позиция самого актора (стоим на месте).
    pub fn target_position(&self, position: Vec3, targets: &TargetPositions) -> Vec3 {
        match self {
            MovementMode::TargetFollow { target, distance_threshold } => {
                let Some(&target_pos) = targets.get(target) else {
                    return position;
                };
                let to_target = (target_pos - position).normalize_or_zero();
                target_pos - to_target * *distance_threshold
            }
            MovementMode::FixedDirection { direction } => position + *direction,
            MovementMode::FixedPosition { position: destination } => *destination,
            MovementMode::RadialOrbit { origin, radius, angle, .. } => {
                *origin + Vec3::new(angle.cos(), 0.0, angle.sin()) * *radius
            }
        }
    }

    /// Режимы без точки назначения (никогда не "прибывают")
    pub fn is_perpetual(&self) -> bool {
        matches!(
            self,
            MovementMode::FixedDirection { .. } | MovementMode::RadialOrbit { .. }
        )
    }

    /// Продвинуть угол орбиты на `delta` секунд (no-op для остальных режимов)
    pub fn advance_orbit(&mut self, delta: f32) {
        if let MovementMode::RadialOrbit { angle, angular_speed, .. } = self {
            *angle = (*angle + *angular_speed * delta).rem_euclid(TAU);
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MovementMode::TargetFollow { .. } => "TargetFollow",
            MovementMode::FixedDirection { .. } => "FixedDirection",
            MovementMode::FixedPosition { .. } => "FixedPosition",
            MovementMode::RadialOrbit { .. } => "RadialOrbit",
        }
    }
}
