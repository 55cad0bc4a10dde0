//! Movement tuning: скорость, пороги, idle диапазон, параметры орбиты
//!
//! Значения по умолчанию: дизайнерские константы садовых существ.
//! Загружается из JSON/RON через serde (`#[serde(default)]`: частичные файлы ok).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибка конфигурации движения (fail fast при создании контроллера)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TuningError {
    #[error("{field} must be a finite non-negative number, got {value}")]
    InvalidValue { field: &'static str, value: f32 },

    #[error("min_idle_duration ({min}) is greater than max_idle_duration ({max})")]
    IdleRangeInverted { min: f32, max: f32 },
}

/// Параметры движения актора
///
/// Мутируются в runtime владельцами (escort, job stations) через setters контроллера.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Скорость движения (м/с)
    pub speed: f32,
    /// TargetFollow: дистанция остановки перед целью (м)
    pub distance_threshold: f32,
    /// Начинать random movement с idle (а не сразу с wander)
    pub start_idle: bool,
    /// Idle: минимальная длительность отдыха (сек)
    pub min_idle_duration: f32,
    /// Idle: максимальная длительность отдыха (сек)
    pub max_idle_duration: f32,
    /// RadialOrbit: радиус (м)
    pub orbit_radius: f32,
    /// RadialOrbit: угловая скорость (рад/с)
    pub orbit_angular_speed: f32,
    /// Максимальная скорость поворота (градусы/с)
    pub turn_rate_degrees: f32,
    /// Дистанция, ближе которой актор считается прибывшим (м)
    pub arrival_epsilon: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            speed: 2.0,
            distance_threshold: 2.0,
            start_idle: false,
            min_idle_duration: 2.0,
            max_idle_duration: 5.0,
            orbit_radius: 4.0,
            orbit_angular_speed: 0.25,
            turn_rate_degrees: 500.0,
            arrival_epsilon: 0.1,
        }
    }
}

impl MovementTuning {
    /// Clamp idle диапазона в [0, ∞) + проверка остальных параметров
    ///
    /// Возвращает нормализованную копию; инвертированный idle диапазон: ошибка.
    pub fn validated(mut self) -> Result<Self, TuningError> {
        self.min_idle_duration = self.min_idle_duration.max(0.0);
        self.max_idle_duration = self.max_idle_duration.max(0.0);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("speed", self.speed),
            ("distance_threshold", self.distance_threshold),
            ("min_idle_duration", self.min_idle_duration),
            ("max_idle_duration", self.max_idle_duration),
            ("orbit_radius", self.orbit_radius),
            ("turn_rate_degrees", self.turn_rate_degrees),
            ("arrival_epsilon", self.arrival_epsilon),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::InvalidValue { field, value });
            }
        }

        // Угловая скорость может быть отрицательной (орбита по часовой)
        if !self.orbit_angular_speed.is_finite() {
            return Err(TuningError::InvalidValue {
                field: "orbit_angular_speed",
                value: self.orbit_angular_speed,
            });
        }

        if self.min_idle_duration > self.max_idle_duration {
            return Err(TuningError::IdleRangeInverted {
                min: self.min_idle_duration,
                max: self.max_idle_duration,
            });
        }

        Ok(())
    }

    /// Ширина диапазона случайного head start для idle таймера
    pub fn idle_spread(&self) -> f32 {
        (self.max_idle_duration - self.min_idle_duration).max(0.0)
    }

    /// Максимальный угол поворота за `delta` секунд (радианы)
    pub fn max_turn_step(&self, delta: f32) -> f32 {
        self.turn_rate_degrees.to_radians() * delta
    }
}
