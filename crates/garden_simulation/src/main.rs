//! Headless симуляция сада
//!
//! Несколько существ бродят по грядке, одно кружит вокруг колодца.

use bevy::prelude::*;
use garden_simulation::{
    create_headless_app, AnchorBounds, AnimatorFlags, MovementController, SimulationPlugin,
    TargetAnchor, Wanderer,
};

fn main() {
    let seed = 42;
    println!("Starting garden headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    let bed = AnchorBounds::from_center_size(Vec3::ZERO, Vec3::new(12.0, 0.0, 12.0));
    for i in 0..3 {
        let position = Vec3::new(i as f32 * 2.0, 0.0, 0.0);
        app.world_mut().spawn((
            Transform::from_translation(position),
            MovementController::at(position),
            TargetAnchor::new(bed),
            AnimatorFlags::default(),
            Wanderer,
        ));
    }

    let well = Vec3::new(0.0, 0.0, 10.0);
    let mut orbiter = MovementController::at(well);
    orbiter.start_radial_orbit(well);
    app.world_mut().spawn((Transform::from_translation(well), orbiter));

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let mut query = app.world_mut().query::<(Entity, &Transform, &MovementController)>();
            for (entity, transform, controller) in query.iter(app.world()) {
                println!(
                    "Tick {}: {:?} at {:.2?} ({}, idle: {})",
                    tick,
                    entity,
                    transform.translation,
                    controller.mode().name(),
                    controller.is_idle()
                );
            }
        }
    }

    println!("Simulation complete!");
}
