//! Escort: актор следует за лидером (игроком) вместо блуждания
//!
//! UI/job station шлют EscortRequest; система переключает MovementController:
//! - leader = Some → TargetFollow(leader)
//! - leader = None → возврат в wander цикл

use bevy::prelude::*;

use crate::movement::{systems::tick_movement_controllers, MovementController, TargetAnchor};
use crate::DeterministicRng;

/// Event: начать/закончить escort
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EscortRequest {
    pub follower: Entity,
    pub leader: Option<Entity>,
}

/// Component: актор сейчас сопровождает лидера
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Escorted {
    pub leader: Entity,
}

/// Система: EscortRequest → смена режима движения
pub fn apply_escort_requests(
    mut commands: Commands,
    mut requests: EventReader<EscortRequest>,
    mut followers: Query<(&mut MovementController, Option<&TargetAnchor>)>,
    mut rng: ResMut<DeterministicRng>,
) {
    for request in requests.read() {
        let Ok((mut controller, anchor)) = followers.get_mut(request.follower) else {
            crate::log_warning(&format!(
                "Escort: follower {:?} has no MovementController",
                request.follower
            ));
            continue;
        };

        match request.leader {
            Some(leader) => {
                controller.set_target_follow(leader, None);
                commands.entity(request.follower).insert(Escorted { leader });
                crate::log_info(&format!("Escort: {:?} follows {:?}", request.follower, leader));
            }
            None => {
                controller.start_random_movement(anchor, &mut rng.rng);
                commands.entity(request.follower).remove::<Escorted>();
                crate::log_info(&format!("Escort: {:?} released", request.follower));
            }
        }
    }
}

/// Escort Plugin (требует MovementPlugin)
pub struct EscortPlugin;

impl Plugin for EscortPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EscortRequest>()
            .register_type::<Escorted>()
            .add_systems(
                FixedUpdate,
                apply_escort_requests.before(tick_movement_controllers),
            );
    }
}
