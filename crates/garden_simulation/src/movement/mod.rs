//! Movement domain: locomotion state machine + idle cycle
//!
//! Содержит:
//! - MovementController (mode selector, steering, idle, completion watch)
//! - MovementMode (TargetFollow / FixedDirection / FixedPosition / RadialOrbit)
//! - MovementTuning (скорость, пороги, idle диапазон)
//! - TargetAnchor (случайные точки для wander)
//! - MovementStarted / MovementEnded / PositionUpdated (events)

use bevy::prelude::*;

pub mod anchor;
pub mod controller;
pub mod events;
pub mod idle;
pub mod mode;
pub mod steering;
pub mod systems;
pub mod tuning;
pub mod watch;


// Re-export all components and events
pub use anchor::*;
pub use controller::*;
pub use events::*;
pub use idle::IdleState;
pub use mode::*;
pub use steering::{face_towards, look_rotation, rotate_towards};
pub use systems::*;
pub use tuning::*;
pub use watch::{ArrivalHook, OnArrived};

/// Movement Plugin
///
/// Регистрирует movement системы в FixedUpdate.
/// Порядок выполнения:
/// 1. start_wandering_on_spawn: init random movement для новых Wanderer
/// 2. tick_movement_controllers: idle/steering + poll completion watch
/// 3. publish_movement_signals: outbox → events (+ arrival hooks)
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<crate::DeterministicRng>() {
            app.insert_resource(crate::DeterministicRng::new(42));
        }

        app.add_event::<MovementStarted>()
            .add_event::<MovementEnded>()
            .add_event::<PositionUpdated>()
            .register_type::<TargetAnchor>()
            .register_type::<AnimatorFlags>()
            .register_type::<Wanderer>();

        app.add_systems(
            FixedUpdate,
            (
                systems::start_wandering_on_spawn,
                systems::tick_movement_controllers,
                systems::publish_movement_signals,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
    }
}
