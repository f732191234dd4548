//! Headless симуляция снарядов
//!
//! Usage: `ballistics_simulation [collision_profiles.json] [ballistics.json]`
//!
//! Профили обязательны: без валидных профилей симуляция не стартует.
//! Detection в демо — простой probe «точка игрока внутри proxy снаряда».

use std::path::PathBuf;

use bevy::prelude::*;
use ballistics_simulation::collision::{
    CollisionResponse, COLLISION_LAYER_PLAYERS, COLLISION_LAYER_PROJECTILES,
};
use ballistics_simulation::projectile::trajectory;
use ballistics_simulation::*;

const TICK_COUNT: usize = 1000;
const SECOND_VOLLEY_TICK: usize = 500;
/// Запас вокруг proxy, в котором demo probe считает игрока задетым (метры)
const PLAYER_REACH: f32 = 5.0;

fn default_profiles_path() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/collision_profiles.json"))
}

/// Filter игрока: слой Players, видит снаряды
fn player_profile() -> CollisionProfile {
    CollisionProfile {
        belongs_to: COLLISION_LAYER_PLAYERS,
        collides_with: COLLISION_LAYER_PROJECTILES,
        group_index: 0,
        response: CollisionResponse::RaiseTriggerEvents,
        friction: 0.0,
        restitution: 0.0,
        custom_tags: 0,
    }
}

/// Demo detection: игрок внутри (расширенного) proxy летящего снаряда
///
/// Пары, которые профили не пускают друг к другу, не проверяются.
fn probe_player_contacts(
    profiles: Res<CollisionProfiles>,
    projectiles: Query<(Entity, &Transform, &SweptCollisionProxy), With<ProjectileFlight>>,
    players: Query<(Entity, &Transform), With<Player>>,
    mut contacts: EventWriter<ContactEvent>,
) {
    let player_filter = player_profile();

    for (projectile, transform, proxy) in projectiles.iter() {
        if !profiles.get(proxy.profile).interacts_with(&player_filter) {
            continue;
        }
        for (player, player_transform) in players.iter() {
            if proxy.contains_point(transform.translation, player_transform.translation, PLAYER_REACH) {
                contacts.write(ContactEvent::new(player, projectile));
            }
        }
    }
}

fn main() {
    init_logger();

    let mut args = std::env::args().skip(1);
    let profiles_path = args.next().map(PathBuf::from).unwrap_or_else(default_profiles_path);
    let config_path = args.next();

    let profiles = match CollisionProfiles::load(&profiles_path) {
        Ok(profiles) => profiles,
        Err(err) => {
            log_error(&format!("Refusing to start: {}", err));
            std::process::exit(1);
        }
    };

    let config = match config_path {
        Some(path) => match BallisticsConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Refusing to start: {}", err));
                std::process::exit(1);
            }
        },
        None => BallisticsConfig::default(),
    };

    logger::set_log_level(config.log_level);
    log_info(&format!(
        "Starting headless ballistics simulation (seed: {}, {} Hz, g = {})",
        config.seed, config.tick_hz, config.gravity
    ));

    // Игрок на пути залпа: там, где снаряд из origin вернётся на высоту запуска
    // (или через 1 секунду, если снаряд вверх не летит)
    let velocity = config.launcher.initial_velocity();
    let intercept_time = trajectory::return_to_launch_height_time(velocity, config.gravity).unwrap_or(1.0);
    let player_position =
        config.launcher.origin() + trajectory::displacement_at(velocity, intercept_time, config.gravity);

    let mut app = create_headless_app(config.seed);
    app.add_plugins(SimulationPlugin::new(config, profiles))
        .add_systems(FixedUpdate, probe_player_contacts.in_set(BallisticsSet::Detection));

    spawn_player(&mut app.world_mut().commands(), player_position);
    app.world_mut().flush();
    app.world_mut().send_event(FireVolley::default());

    for tick in 0..TICK_COUNT {
        if tick == SECOND_VOLLEY_TICK {
            app.world_mut().send_event(FireVolley { count: Some(4) });
        }

        run_fixed_ticks(&mut app, 1);

        if tick % 100 == 0 {
            let counters = *app.world().resource::<FlightCounters>();
            log_info(&format!(
                "Tick {}: launched {}, in flight {}, resolved {}",
                tick, counters.launched, counters.in_flight, counters.resolved
            ));
        }
    }

    let counters = *app.world().resource::<FlightCounters>();
    log_info(&format!(
        "Simulation complete! launched {}, in flight {}, resolved {}",
        counters.launched, counters.in_flight, counters.resolved
    ));
}
