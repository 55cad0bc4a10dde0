//! Steering helpers: look rotation + ограниченный поворот

use bevy::prelude::*;

/// Look rotation для направления (forward = -Z, up = Y)
///
/// None для нулевого вектора: иначе NaN уйдёт в rotation.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    if direction.length_squared() < 1e-8 {
        return None;
    }
    Some(Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation)
}

/// Повернуть `from` к `to` не больше чем на `max_angle` радиан
pub fn rotate_towards(from: Quat, to: Quat, max_angle: f32) -> Quat {
    let angle = from.angle_between(to);
    if angle <= max_angle || angle < 1e-6 {
        return to;
    }
    from.slerp(to, max_angle / angle).normalize()
}

/// Мгновенно развернуть актора к точке по горизонтали (y игнорируется)
pub fn face_towards(transform: &mut Transform, target: Vec3) {
    let mut direction = target - transform.translation;
    direction.y = 0.0;
    if let Some(rotation) = look_rotation(direction) {
        transform.rotation = rotation;
    }
}
