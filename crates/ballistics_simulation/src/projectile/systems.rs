//! Motion система: TrajectoryIntegrator + SweptVolumeBuilder каждый fixed тик

use bevy::prelude::*;

use crate::config::BallisticsConfig;

use super::components::{Projectile, ProjectileFlight, SweptCollisionProxy};
use super::{swept_volume, trajectory};

/// Система: продвигает все летящие снаряды на один тик
///
/// Каждый снаряд читает/пишет только свои компоненты → `par_iter_mut`.
/// Снаряды без `ProjectileFlight` (Resolved) в query не попадают.
///
/// Для каждого снаряда:
/// 1. `elapsed += dt`, позиция из закрытой формы
/// 2. swept proxy между прошлой и новой позицией
/// 3. Transform ← новая позиция + ориентация proxy
pub fn advance_projectiles(
    time: Res<Time<Fixed>>,
    config: Res<BallisticsConfig>,
    mut projectiles: Query<
        (&mut ProjectileFlight, &mut Transform, &mut SweptCollisionProxy),
        With<Projectile>,
    >,
) {
    let dt = time.timestep().as_secs_f32();
    let gravity = config.gravity;
    let lateral = config.lateral_half_extent;

    projectiles
        .par_iter_mut()
        .for_each(|(mut flight, mut transform, mut proxy)| {
            let previous = transform.translation;
            let (next, position) = trajectory::advance(&flight, dt, gravity);
            let swept = swept_volume::build(previous, position, lateral);

            *flight = next;
            transform.translation = position;
            transform.rotation = swept.orientation;
            *proxy = swept;
        });
}
