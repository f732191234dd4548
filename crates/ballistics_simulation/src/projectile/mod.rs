//! Projectile domain — полёт снаряда и его swept collision proxy
//!
//! Содержит:
//! - Компоненты: Projectile, Player, ProjectileFlight, SweptCollisionProxy
//! - TrajectoryIntegrator (`trajectory`) — closed-form позиция от времени
//! - SweptVolumeBuilder (`swept_volume`) — коробка вдоль пути за тик
//! - Launcher — FireVolley + FlightCounters
//!
//! Обе математические части чистые: никакого доступа к World, только значения.

use bevy::prelude::*;

use crate::schedule::BallisticsSet;

pub mod components;
pub mod launcher;
pub mod swept_volume;
pub mod systems;
pub mod trajectory;


pub use components::*;
pub use launcher::{
    fire_volleys, jittered_position, spawn_player, spawn_projectile, FireVolley, FlightCounters,
};
pub use systems::advance_projectiles;

/// Projectile Plugin
///
/// Порядок (FixedUpdate):
/// 1. fire_volleys — BallisticsSet::Launch
/// 2. advance_projectiles — BallisticsSet::Motion
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireVolley>()
            .init_resource::<FlightCounters>()
            .register_type::<Projectile>()
            .register_type::<Player>()
            .register_type::<ProjectileFlight>()
            .register_type::<SweptCollisionProxy>()
            .register_type::<FlightCounters>();

        app.add_systems(FixedUpdate, fire_volleys.in_set(BallisticsSet::Launch))
            .add_systems(FixedUpdate, advance_projectiles.in_set(BallisticsSet::Motion));
    }
}
