//! Completion watch: одноразовое ожидание прибытия (generation token)
//!
//! Проверяется poll раз в тик. Любая смена режима увеличивает
//! generation контроллера, поэтому старый watch никогда не срабатывает.

use bevy::prelude::*;
use std::fmt;

/// Callback по прибытию, исполняется как world command (после fixed тика)
pub type ArrivalHook = Box<dyn FnOnce(&mut World) + Send + Sync + 'static>;

/// Действие по прибытию в FixedPosition
pub enum OnArrived {
    /// Внутреннее: вернуться в idle (wander → rest цикл)
    EngageIdle,
    /// Внешний callback владельца
    Hook(ArrivalHook),
}

impl OnArrived {
    pub fn hook(hook: impl FnOnce(&mut World) + Send + Sync + 'static) -> Self {
        Self::Hook(Box::new(hook))
    }
}

impl fmt::Debug for OnArrived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnArrived::EngageIdle => f.write_str("EngageIdle"),
            OnArrived::Hook(_) => f.write_str("Hook(..)"),
        }
    }
}

/// Outstanding watch, привязанный к одной активации FixedPosition
#[derive(Debug)]
pub struct CompletionWatch {
    pub generation: u64,
    pub on_arrived: Option<OnArrived>,
}

impl CompletionWatch {
    pub fn new(generation: u64, on_arrived: Option<OnArrived>) -> Self {
        Self { generation, on_arrived }
    }

    /// Watch устарел (режим сменился после его запуска)
    pub fn is_stale(&self, current_generation: u64) -> bool {
        self.generation != current_generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_after_generation_bump() {
        let watch = CompletionWatch::new(3, None);
        assert!(!watch.is_stale(3));
        assert!(watch.is_stale(4));
    }

    #[test]
    fn test_hook_runs_against_world() {
        #[derive(Resource, Default)]
        struct Arrivals(u32);

        let mut world = World::new();
        world.init_resource::<Arrivals>();

        let on_arrived = OnArrived::hook(|world: &mut World| {
            world.resource_mut::<Arrivals>().0 += 1;
        });
        assert_eq!(format!("{:?}", on_arrived), "Hook(..)");

        let OnArrived::Hook(hook) = on_arrived else {
            panic!("expected hook");
        };
        hook(&mut world);

        assert_eq!(world.resource::<Arrivals>().0, 1);
    }
}
