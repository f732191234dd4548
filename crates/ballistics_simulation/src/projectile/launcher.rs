//! Launcher: залпы снарядов + счётчики полёта
//!
//! Позиция спавна = `origin` + детерминированный jitter из `DeterministicRng`,
//! поэтому одинаковый seed даёт одинаковый залп.

use bevy::prelude::*;
use rand::Rng;

use crate::config::BallisticsConfig;
use crate::DeterministicRng;

use super::components::{Player, Projectile, ProjectileFlight};
use super::swept_volume;

/// Event: выпустить залп
///
/// `count = None` → `BallisticsConfig::launcher.volley_size`
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct FireVolley {
    pub count: Option<u32>,
}

/// Счётчики снарядов (для UI/логов host'а)
///
/// Инвариант: `launched == in_flight + resolved`
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct FlightCounters {
    pub launched: u64,
    pub in_flight: u64,
    pub resolved: u64,
}

impl FlightCounters {
    pub fn record_launch(&mut self, count: u64) {
        self.launched += count;
        self.in_flight += count;
    }

    pub fn record_resolved(&mut self, count: u64) {
        self.in_flight = self.in_flight.saturating_sub(count);
        self.resolved += count;
    }
}

/// Spawn одного снаряда в состоянии `elapsed_time = 0`
///
/// Proxy на старте — вырожденная swept коробка (нулевая длина, identity).
pub fn spawn_projectile(
    commands: &mut Commands,
    position: Vec3,
    rotation: Quat,
    initial_velocity: Vec3,
    lateral_half_extent: f32,
) -> Entity {
    commands
        .spawn((
            Projectile,
            ProjectileFlight::launch(position, initial_velocity),
            Transform::from_translation(position).with_rotation(rotation),
            swept_volume::build(position, position, lateral_half_extent),
        ))
        .id()
}

/// Spawn игрока (цель для trigger resolution)
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((Player, Transform::from_translation(position)))
        .id()
}

fn jitter_axis(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if min < max {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

/// Случайная точка в jitter box вокруг `origin`
pub fn jittered_position(rng: &mut impl Rng, origin: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    origin
        + Vec3::new(
            jitter_axis(rng, min.x, max.x),
            jitter_axis(rng, min.y, max.y),
            jitter_axis(rng, min.z, max.z),
        )
}

/// Система: обработка FireVolley → spawn снарядов
pub fn fire_volleys(
    mut commands: Commands,
    mut volleys: EventReader<FireVolley>,
    config: Res<BallisticsConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut counters: ResMut<FlightCounters>,
) {
    let launcher = &config.launcher;

    for volley in volleys.read() {
        let count = volley.count.unwrap_or(launcher.volley_size);

        for _ in 0..count {
            let position = jittered_position(
                &mut rng.rng,
                launcher.origin(),
                launcher.jitter_min(),
                launcher.jitter_max(),
            );
            spawn_projectile(
                &mut commands,
                position,
                launcher.rotation(),
                launcher.initial_velocity(),
                config.lateral_half_extent,
            );
        }

        counters.record_launch(count as u64);
        crate::log_info(&format!(
            "🚀 Volley fired: {} projectiles (in flight: {})",
            count, counters.in_flight
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_counters_invariant() {
        let mut counters = FlightCounters::default();
        counters.record_launch(3);
        counters.record_resolved(1);

        assert_eq!(counters.launched, 3);
        assert_eq!(counters.in_flight, 2);
        assert_eq!(counters.resolved, 1);
        assert_eq!(counters.launched, counters.in_flight + counters.resolved);
    }

    #[test]
    fn test_jitter_stays_in_box() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let (min, max) = (Vec3::new(-5.0, -5.0, 0.0), Vec3::new(5.0, 5.0, 0.0));

        for _ in 0..100 {
            let p = jittered_position(&mut rng, origin, min, max);
            let offset = p - origin;
            assert!(offset.cmpge(min).all() && offset.cmple(max).all(), "offset = {offset:?}");
            // Плоский box по Z
            assert_eq!(p.z, origin.z);
        }
    }

    #[test]
    fn test_jitter_same_seed_same_positions() {
        let mut a = ChaCha8Rng::seed_from_u64(1851936439);
        let mut b = ChaCha8Rng::seed_from_u64(1851936439);
        let (min, max) = (Vec3::splat(-1.0), Vec3::splat(1.0));

        for _ in 0..10 {
            assert_eq!(
                jittered_position(&mut a, Vec3::ZERO, min, max),
                jittered_position(&mut b, Vec3::ZERO, min, max)
            );
        }
    }
}
