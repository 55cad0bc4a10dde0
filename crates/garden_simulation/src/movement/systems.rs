//! Movement systems (FixedUpdate): spawn init → tick → publish events

use bevy::prelude::*;

use crate::DeterministicRng;
use super::anchor::TargetAnchor;
use super::controller::{AnimatorFlags, MovementController};
use super::events::{MovementEnded, MovementSignal, MovementStarted, PositionUpdated};
use super::mode::TargetPositions;

/// Marker: актор бродит по своему TargetAnchor (wander → rest цикл)
///
/// При вставке контроллер один раз вызывает start_random_movement.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Wanderer;

/// Система: запуск random movement для новых Wanderer
pub fn start_wandering_on_spawn(
    mut wanderers: Query<(Entity, &mut MovementController, Option<&TargetAnchor>), Added<Wanderer>>,
    mut rng: ResMut<DeterministicRng>,
) {
    for (entity, mut controller, anchor) in wanderers.iter_mut() {
        controller.start_random_movement(anchor, &mut rng.rng);
        crate::log(&format!(
            "Wanderer {:?}: random movement started (idle: {})",
            entity,
            controller.is_idle()
        ));
    }
}

/// Система: тик всех MovementController
///
/// 1. Снимок позиций follow-целей (ParamSet: read → write)
/// 2. controller.tick(): idle ИЛИ steering, затем poll watch
/// 3. Зеркалим is_moving в AnimatorFlags (только при изменении)
pub fn tick_movement_controllers(
    mut actors: ParamSet<(
        Query<&Transform>,
        Query<(
            &mut MovementController,
            &mut Transform,
            Option<&TargetAnchor>,
            Option<&mut AnimatorFlags>,
        )>,
    )>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    let wanted: Vec<Entity> = actors
        .p1()
        .iter()
        .filter_map(|(controller, ..)| controller.follow_target())
        .collect();

    let targets: TargetPositions = {
        let transforms = actors.p0();
        wanted
            .into_iter()
            .filter_map(|entity| transforms.get(entity).ok().map(|t| (entity, t.translation)))
            .collect()
    };

    for (mut controller, mut transform, anchor, flags) in actors.p1().iter_mut() {
        controller.tick(&mut transform, delta, &targets, anchor, &mut rng.rng);

        if let Some(mut flags) = flags {
            if flags.is_moving != controller.is_moving() {
                flags.is_moving = controller.is_moving();
            }
        }
    }
}

/// Система: outbox контроллеров → Bevy events (тот же тик)
///
/// Arrival hook и MovementEnded идут через commands в порядке постановки:
/// сначала hook владельца, потом событие.
pub fn publish_movement_signals(
    mut commands: Commands,
    mut controllers: Query<(Entity, &mut MovementController)>,
    mut started: EventWriter<MovementStarted>,
    mut updated: EventWriter<PositionUpdated>,
) {
    for (entity, mut controller) in controllers.iter_mut() {
        if !controller.has_signals() {
            continue;
        }

        for signal in controller.drain_signals() {
            match signal {
                MovementSignal::Started => {
                    started.write(MovementStarted { entity });
                }
                MovementSignal::PositionUpdated { direction } => {
                    updated.write(PositionUpdated { entity, direction });
                }
                MovementSignal::Arrived { hook } => {
                    if let Some(hook) = hook {
                        commands.queue(move |world: &mut World| hook(world));
                    }
                    commands.queue(move |world: &mut World| {
                        world.send_event(MovementEnded { entity });
                    });
                }
            }
        }
    }
}
