//! Movement events (lifecycle + per-tick direction)

use bevy::prelude::*;

/// Event: началось движение к точке (FixedPosition)
///
/// Генерируется: set_fixed_position / stop / wander из idle
#[derive(Event, Debug, Clone, PartialEq)]
pub struct MovementStarted {
    pub entity: Entity,
}

/// Event: актор прибыл в точку FixedPosition
///
/// Приходит ПОСЛЕ arrival hook (оба через commands, в порядке постановки).
/// Отменённые watch'и это событие не генерируют.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct MovementEnded {
    pub entity: Entity,
}

/// Event: актор сдвинулся в этом тике
///
/// Каждый активный тик (не idle, не прибыл). Слушатели: footsteps, dust trail.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PositionUpdated {
    pub entity: Entity,
    pub direction: Vec3,
}

/// Сигналы, накопленные контроллером за тик (drain → Bevy events)
pub enum MovementSignal {
    Started,
    PositionUpdated { direction: Vec3 },
    /// Watch сработал: hook (если был) → MovementEnded
    Arrived { hook: Option<super::watch::ArrivalHook> },
}

impl std::fmt::Debug for MovementSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementSignal::Started => f.write_str("Started"),
            MovementSignal::PositionUpdated { direction } => {
                f.debug_struct("PositionUpdated").field("direction", direction).finish()
            }
            MovementSignal::Arrived { hook } => f
                .debug_struct("Arrived")
                .field("hook", &hook.as_ref().map(|_| ".."))
                .finish(),
        }
    }
}
