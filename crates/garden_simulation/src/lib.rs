//! Fungal Garden Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (headless, без рендера)
//!
//! Движение садовых существ:
//! - MovementController: locomotion FSM (follow / direction / position / orbit)
//! - Idle cycle: отдых → wander к случайной точке anchor'а → отдых
//! - Escort: следование за игроком по запросу UI/job station
//!
//! Godot/render слой читает Transform + AnimatorFlags и слушает movement events.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod escort;
pub mod logger;
pub mod movement;

// Re-export базовых типов для удобства
pub use escort::{EscortPlugin, EscortRequest, Escorted};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter, LOGGER_LEVEL,
};
pub use movement::{
    AnchorBounds, AnimatorFlags, MovementController, MovementEnded, MovementMode, MovementPlugin,
    MovementStarted, MovementTuning, OnArrived, PositionUpdated, TargetAnchor, TargetPositions,
    TuningError, Wanderer,
};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins((MovementPlugin, EscortPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Headless App с ручным временем: каждый app.update() = ровно один fixed тик `step`
///
/// Первый update имеет нулевой delta (Time<Real> стартует), fixed тиков в нём нет.
pub fn create_stepped_app(seed: u64, step: Duration) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(step))
        .insert_resource(Time::<Fixed>::from_duration(step));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
