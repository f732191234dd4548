//! Тесты детерминизма
//!
//! Одинаковый seed + одинаковое число тиков → идентичный мир

use bevy::prelude::*;
use ballistics_simulation::*;

/// Запускает залп и возвращает snapshot flight state + transforms
fn run_simulation(seed: u64, volley: u32, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin::new(
        BallisticsConfig {
            seed,
            ..default()
        },
        CollisionProfiles::default(),
    ));

    app.world_mut().send_event(FireVolley { count: Some(volley) });
    run_fixed_ticks(&mut app, tick_count);

    let mut snapshot = world_snapshot::<ProjectileFlight>(app.world_mut());
    snapshot.extend(world_snapshot::<Transform>(app.world_mut()));
    snapshot.extend(world_snapshot::<SweptCollisionProxy>(app.world_mut()));
    snapshot
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let snapshot1 = run_simulation(SEED, 100, 500);
    let snapshot2 = run_simulation(SEED, 100, 500);

    assert!(!snapshot1.is_empty());
    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    // Запускаем 5 раз — все должны быть идентичны
    let snapshots: Vec<_> = (0..5).map(|_| run_simulation(SEED, 50, 300)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seed_changes_spawn_positions() {
    let a = run_simulation(1, 10, 1);
    let b = run_simulation(2, 10, 1);

    assert_ne!(a, b);
}
