//! Idle cycle: отдых между wander перемещениями

use rand::Rng;
use super::tuning::MovementTuning;

/// Состояние отдыха (присутствует только пока актор idle)
///
/// Таймер стартует со случайного head start из [0, max - min),
/// истекает когда head_start + elapsed > max_idle_duration.
/// Итоговая длительность отдыха: (min, max].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleState {
    pub head_start: f32,
    pub elapsed: f32,
}

impl IdleState {
    /// Новый idle с случайным head start
    pub fn draw<R: Rng + ?Sized>(tuning: &MovementTuning, rng: &mut R) -> Self {
        let spread = tuning.idle_spread();
        let head_start = if spread > 0.0 {
            rng.gen_range(0.0..spread)
        } else {
            0.0
        };

        Self { head_start, elapsed: 0.0 }
    }

    /// Накопить время; true когда отдых закончился
    pub fn tick(&mut self, delta: f32, max_idle_duration: f32) -> bool {
        self.elapsed += delta;
        self.head_start + self.elapsed > max_idle_duration
    }

    /// Сколько осталось до конца отдыха (сек)
    pub fn remaining(&self, max_idle_duration: f32) -> f32 {
        (max_idle_duration - self.head_start - self.elapsed).max(0.0)
    }
}
