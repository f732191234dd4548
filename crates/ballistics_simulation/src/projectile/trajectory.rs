//! TrajectoryIntegrator — closed-form движение снаряда
//!
//! Позиция — чистая функция от накопленного времени:
//!
//! ```text
//! d(t) = (v.x·t, v.y·t − g·t², v.z·t)
//! p(t) = start + d(t)
//! ```
//!
//! Никакой пошаговой интеграции velocity: ошибка не накапливается между
//! тиками, а позицию можно пересчитать для любого `t` (replay/rewind).

use bevy::prelude::*;

use super::components::ProjectileFlight;

/// Смещение от точки запуска через `time` секунд
///
/// `gravity` — модуль, направление всегда world-down (−Y).
#[inline]
pub fn displacement_at(initial_velocity: Vec3, time: f32, gravity: f32) -> Vec3 {
    Vec3::new(
        initial_velocity.x * time,
        initial_velocity.y * time - gravity * time * time,
        initial_velocity.z * time,
    )
}

/// Абсолютная позиция снаряда в момент `time`
#[inline]
pub fn position_at(flight: &ProjectileFlight, time: f32, gravity: f32) -> Vec3 {
    flight.start_position + displacement_at(flight.initial_velocity, time, gravity)
}

/// Один fixed тик: `elapsed += dt`, позиция пересчитывается из закрытой формы
///
/// Preconditions: `dt > 0`, `gravity >= 0`, все значения конечны.
/// Возвращает новое состояние и новую world позицию; входное состояние не трогает.
pub fn advance(flight: &ProjectileFlight, dt: f32, gravity: f32) -> (ProjectileFlight, Vec3) {
    debug_assert!(dt > 0.0, "fixed delta must be positive, got {dt}");
    debug_assert!(gravity >= 0.0, "gravity is a magnitude, got {gravity}");

    let elapsed_time = flight.elapsed_time + dt;
    let next = ProjectileFlight {
        elapsed_time,
        ..*flight
    };
    let position = position_at(&next, elapsed_time, gravity);

    (next, position)
}

/// Момент, когда снаряд возвращается на высоту запуска (`v.y > 0`)
pub fn return_to_launch_height_time(initial_velocity: Vec3, gravity: f32) -> Option<f32> {
    if gravity <= 0.0 || initial_velocity.y <= 0.0 {
        return None;
    }
    Some(initial_velocity.y / gravity)
}
