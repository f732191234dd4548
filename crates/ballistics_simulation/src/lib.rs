//! Ballistics Simulation Core
//!
//! Headless ECS-симуляция снарядов на Bevy 0.16:
//! - closed-form траектория (без накопления ошибки между тиками)
//! - swept collision proxy против tunneling на дискретных тиках
//! - trigger resolution игрок/снаряд с deferred commit
//!
//! Collision detection внешний: host (или RapierBridgePlugin) пишет
//! `ContactEvent` в стадии `BallisticsSet::Detection`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod collision;
pub mod config;
pub mod logger;
pub mod projectile;
pub mod schedule;
pub mod trigger;

pub use collision::{CollisionProfile, CollisionProfiles, ProfileError, ProfileKind, RapierBridgePlugin};
pub use config::{BallisticsConfig, ConfigError};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use projectile::{
    spawn_player, spawn_projectile, FireVolley, FlightCounters, Player, Projectile, ProjectileFlight,
    ProjectilePlugin, SweptCollisionProxy,
};
pub use schedule::BallisticsSet;
pub use trigger::{ContactEvent, ProjectileResolved, TriggerPlugin};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Конфигурация и профили передаются готовыми: загрузка (и отказ стартовать
/// при битых профилях) — забота вызывающего кода.
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: BallisticsConfig,
    pub profiles: CollisionProfiles,
}

impl SimulationPlugin {
    pub fn new(config: BallisticsConfig, profiles: CollisionProfiles) -> Self {
        Self { config, profiles }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep из конфига (по умолчанию 90Hz)
            .insert_resource(Time::<Fixed>::from_seconds(self.config.tick_seconds()))
            .insert_resource(self.config.clone())
            .insert_resource(self.profiles.clone())
            .register_type::<BallisticsConfig>()
            .register_type::<CollisionProfiles>();

        // Seed из конфига, если host не поставил свой RNG
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(self.config.seed));
        }

        schedule::configure_ballistics_sets(app);

        app.add_plugins((ProjectilePlugin, TriggerPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // Переопределяется SimulationPlugin

    app
}

/// Прогоняет `ticks` fixed тиков напрямую, без привязки к wall clock
///
/// Каждый вызов FixedUpdate использует `Time<Fixed>::timestep()` как dt,
/// поэтому результат зависит только от числа тиков (replay, тесты).
/// `First` (и bevy event update) здесь не запускается, поэтому буферы
/// событий симуляции переключаются вручную после каждого тика.
pub fn run_fixed_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        let world = app.world_mut();
        world.run_schedule(FixedUpdate);
        update_simulation_events(world);
    }
}

/// Double-buffer swap событий симуляции (как `event_update_system` за тик)
///
/// Событие живёт два тика: тот, в котором отправлено, и следующий.
pub fn update_simulation_events(world: &mut World) {
    world.resource_mut::<Events<FireVolley>>().update();
    world.resource_mut::<Events<ContactEvent>>().update();
    world.resource_mut::<Events<ProjectileResolved>>().update();

    // Только если подключён RapierBridgePlugin
    if let Some(mut rapier_events) = world.get_resource_mut::<Events<bevy_rapier3d::prelude::CollisionEvent>>() {
        rapier_events.update();
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
