//! MovementController: locomotion state machine актора
//!
//! Составные части:
//! - Mode selector: setters + `current_target_position`
//! - Steering: движение к target с ограниченной скоростью и поворотом
//! - Idle cycle: отдых → wander к случайной точке → отдых
//! - Completion watch: одноразовый poll прибытия (generation token)
//!
//! Контроллер не знает про World: позиции целей, anchor и RNG передаются
//! в `tick()` системой `tick_movement_controllers`. Сигналы копятся в outbox
//! и публикуются как Bevy events в том же тике.

use bevy::prelude::*;
use rand::Rng;

use super::anchor::TargetAnchor;
use super::events::MovementSignal;
use super::idle::IdleState;
use super::mode::{MovementMode, TargetPositions};
use super::steering::{look_rotation, rotate_towards};
use super::tuning::{MovementTuning, TuningError};
use super::watch::{CompletionWatch, OnArrived};

/// Locomotion контроллер (один на актора, живёт и умирает вместе с ним)
#[derive(Component, Debug)]
pub struct MovementController {
    mode: MovementMode,
    tuning: MovementTuning,
    idle: Option<IdleState>,
    watch: Option<CompletionWatch>,
    /// Увеличивается при каждой смене режима (отмена watch)
    generation: u64,
    is_moving: bool,
    signals: Vec<MovementSignal>,
}

impl MovementController {
    /// Контроллер стоящий в `position` (эквивалент stop())
    pub fn new(position: Vec3, tuning: MovementTuning) -> Result<Self, TuningError> {
        Ok(Self::stopped(position, tuning.validated()?))
    }

    /// Контроллер с default tuning
    pub fn at(position: Vec3) -> Self {
        Self::stopped(position, MovementTuning::default())
    }

    fn stopped(position: Vec3, tuning: MovementTuning) -> Self {
        let mut controller = Self {
            mode: MovementMode::FixedPosition { position },
            tuning,
            idle: None,
            watch: None,
            generation: 0,
            is_moving: false,
            signals: Vec::new(),
        };
        controller.stop(position);
        controller
    }

    // === Getters ===

    pub fn mode(&self) -> &MovementMode {
        &self.mode
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn speed(&self) -> f32 {
        self.tuning.speed
    }

    pub fn distance_threshold(&self) -> f32 {
        self.tuning.distance_threshold
    }

    pub fn is_idle(&self) -> bool {
        self.idle.is_some()
    }

    pub fn idle_state(&self) -> Option<&IdleState> {
        self.idle.as_ref()
    }

    /// Флаг анимации "isMoving" (зеркалится в AnimatorFlags)
    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn has_pending_watch(&self) -> bool {
        self.watch.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Entity цели, если режим TargetFollow (для снимка позиций)
    pub fn follow_target(&self) -> Option<Entity> {
        match self.mode {
            MovementMode::TargetFollow { target, .. } => Some(target),
            _ => None,
        }
    }

    // === Tuning setters ===

    pub fn set_speed(&mut self, speed: f32) {
        self.tuning.speed = clamp_non_negative("speed", speed);
    }

    /// Default stand-off дистанция; обновляет и текущий TargetFollow
    pub fn set_distance_threshold(&mut self, distance_threshold: f32) {
        let value = clamp_non_negative("distance_threshold", distance_threshold);
        self.tuning.distance_threshold = value;

        if let MovementMode::TargetFollow { distance_threshold, .. } = &mut self.mode {
            *distance_threshold = value;
        }
    }

    /// Заменить tuning целиком (с валидацией); текущий режим не трогаем
    pub fn set_tuning(&mut self, tuning: MovementTuning) -> Result<(), TuningError> {
        self.tuning = tuning.validated()?;
        Ok(())
    }

    // === Mode selector ===

    /// Следовать за `target`, останавливаясь за `distance_threshold` (None → tuning)
    pub fn set_target_follow(&mut self, target: Entity, distance_threshold: Option<f32>) {
        let distance_threshold = distance_threshold
            .filter(|d| d.is_finite())
            .map(|d| d.max(0.0))
            .unwrap_or(self.tuning.distance_threshold);
        self.set_mode(MovementMode::TargetFollow { target, distance_threshold });
    }

    /// Бесконечное движение в направлении (нормализуется здесь)
    pub fn set_fixed_direction(&mut self, direction: Vec3) {
        self.set_mode(MovementMode::FixedDirection {
            direction: direction.normalize_or_zero(),
        });
    }

    /// Движение к точке + новый completion watch
    pub fn set_fixed_position(&mut self, position: Vec3, on_arrived: Option<OnArrived>) {
        self.set_mode(MovementMode::FixedPosition { position });
        self.signals.push(MovementSignal::Started);
        self.watch = Some(CompletionWatch::new(self.generation, on_arrived));
    }

    /// Орбита вокруг origin (radius/speed из tuning, угол с нуля)
    pub fn start_radial_orbit(&mut self, origin: Vec3) {
        self.set_mode(MovementMode::RadialOrbit {
            origin,
            radius: self.tuning.orbit_radius,
            angular_speed: self.tuning.orbit_angular_speed,
            angle: 0.0,
        });
    }

    /// Остановиться: мгновенно выполненная FixedPosition в текущей точке
    pub fn stop(&mut self, current_position: Vec3) {
        self.set_fixed_position(current_position, None);
    }

    fn set_mode(&mut self, mode: MovementMode) {
        crate::log(&format!(
            "MovementController: {} → {} (gen {})",
            self.mode.name(),
            mode.name(),
            self.generation.wrapping_add(1)
        ));
        self.generation = self.generation.wrapping_add(1);
        self.mode = mode;
        self.idle = None;
        self.watch = None;
    }

    // === Idle cycle ===

    /// Войти в idle (steering приостановлен до конца отдыха)
    pub fn engage_idle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.idle = Some(IdleState::draw(&self.tuning, rng));
        self.is_moving = false;
    }

    /// Точка входа random movement (вызывается один раз при инициализации)
    pub fn start_random_movement<R: Rng + ?Sized>(
        &mut self,
        anchor: Option<&TargetAnchor>,
        rng: &mut R,
    ) {
        if self.tuning.start_idle {
            self.engage_idle(rng);
        } else {
            self.wander(anchor, rng);
        }
    }

    /// Идти к случайной точке anchor'а, по прибытии: снова idle
    fn wander<R: Rng + ?Sized>(&mut self, anchor: Option<&TargetAnchor>, rng: &mut R) {
        let Some(anchor) = anchor else {
            crate::log_warning("MovementController: wander without TargetAnchor, resting in place");
            self.engage_idle(rng);
            return;
        };

        let point = anchor.random_point(rng);
        crate::log(&format!("MovementController: wander → {:?}", point));
        self.set_fixed_position(point, Some(OnArrived::EngageIdle));
    }

    // === Queries ===

    /// Target позиция для текущего режима (чистая функция от mode + state)
    pub fn current_target_position(&self, position: Vec3, targets: &TargetPositions) -> Vec3 {
        self.mode.target_position(position, targets)
    }

    /// Прибыл ли актор (perpetual режимы: никогда)
    pub fn is_at_destination(&self, position: Vec3, targets: &TargetPositions) -> bool {
        if self.mode.is_perpetual() {
            return false;
        }
        let target = self.current_target_position(position, targets);
        position.distance(target) < self.tuning.arrival_epsilon
    }

    // === Tick ===

    /// Один тик симуляции: idle ИЛИ steering, затем poll watch
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        transform: &mut Transform,
        delta: f32,
        targets: &TargetPositions,
        anchor: Option<&TargetAnchor>,
        rng: &mut R,
    ) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

        if self.idle.is_some() {
            self.tick_idle(delta, anchor, rng);
        } else {
            self.tick_steering(transform, delta, targets);
        }

        self.poll_watch(transform.translation, targets, rng);
    }

    fn tick_idle<R: Rng + ?Sized>(&mut self, delta: f32, anchor: Option<&TargetAnchor>, rng: &mut R) {
        self.is_moving = false;

        let max_idle = self.tuning.max_idle_duration;
        let expired = self
            .idle
            .as_mut()
            .map(|idle| idle.tick(delta, max_idle))
            .unwrap_or(false);

        if expired {
            self.wander(anchor, rng);
        }
    }

    fn tick_steering(&mut self, transform: &mut Transform, delta: f32, targets: &TargetPositions) {
        self.mode.advance_orbit(delta);

        let position = transform.translation;
        if self.is_at_destination(position, targets) {
            self.is_moving = false;
            return;
        }

        let offset = self.current_target_position(position, targets) - position;
        let direction = offset.normalize_or_zero();

        // Не перелетаем цель (иначе осцилляция вокруг точки); луч: без ограничения
        let mut step = self.tuning.speed * delta;
        if !matches!(self.mode, MovementMode::FixedDirection { .. }) {
            step = step.min(offset.length());
        }

        transform.translation += direction * step;
        self.is_moving = true;

        if let Some(look) = look_rotation(direction) {
            transform.rotation =
                rotate_towards(transform.rotation, look, self.tuning.max_turn_step(delta));
        }

        self.signals.push(MovementSignal::PositionUpdated { direction });
    }

    fn poll_watch<R: Rng + ?Sized>(&mut self, position: Vec3, targets: &TargetPositions, rng: &mut R) {
        let Some(watch) = self.watch.as_ref() else {
            return;
        };

        if watch.is_stale(self.generation) {
            self.watch = None;
            return;
        }

        if !self.is_at_destination(position, targets) {
            return;
        }

        let Some(watch) = self.watch.take() else {
            return;
        };

        let hook = match watch.on_arrived {
            Some(OnArrived::EngageIdle) => {
                self.engage_idle(rng);
                None
            }
            Some(OnArrived::Hook(hook)) => Some(hook),
            None => None,
        };

        crate::log(&format!("MovementController: arrived at {:?} (gen {})", position, watch.generation));
        self.signals.push(MovementSignal::Arrived { hook });
    }

    pub fn has_signals(&self) -> bool {
        !self.signals.is_empty()
    }

    /// Забрать накопленные сигналы (outbox очищается)
    pub fn drain_signals(&mut self) -> Vec<MovementSignal> {
        std::mem::take(&mut self.signals)
    }
}

/// Runtime setters не падают: мусор → 0 + warning
fn clamp_non_negative(field: &str, value: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        return value;
    }
    crate::log_warning(&format!("MovementController: invalid {} {}, clamped to 0", field, value));
    0.0
}

/// Component: флаги анимации (bound animator)
///
/// Вставка компонента = SetAnimator; godot/render слой читает is_moving.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimatorFlags {
    pub is_moving: bool,
}
