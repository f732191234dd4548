//! Порядок стадий внутри одного fixed тика
//!
//! Launch → Motion → Detection → Resolution → Commit → ProxySync
//!
//! Detection принадлежит host'у (или `RapierBridgePlugin`): ядро только
//! объявляет слот, куда пишутся `ContactEvent`. ProxySync — последний слот
//! тика: backend видит proxy уже после commit, включая resting коробки.

use bevy::prelude::*;

/// Стадии баллистического pipeline (FixedUpdate)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallisticsSet {
    /// Spawn новых снарядов из `FireVolley`
    Launch,
    /// TrajectoryIntegrator + SweptVolumeBuilder (parallel per projectile)
    Motion,
    /// Внешний contact detection, пишет `ContactEvent`
    Detection,
    /// TriggerResolver: события → `ResolutionBatch`
    Resolution,
    /// Атомарное применение batch в конце тика
    Commit,
    /// Зеркалирование итоговых proxies во внешний collision backend
    ProxySync,
}

/// Регистрирует цепочку стадий в `FixedUpdate`
pub fn configure_ballistics_sets(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            BallisticsSet::Launch,
            BallisticsSet::Motion,
            BallisticsSet::Detection,
            BallisticsSet::Resolution,
            BallisticsSet::Commit,
            BallisticsSet::ProxySync,
        )
            .chain(),
    );
}
