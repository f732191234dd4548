//! Trigger события
//!
//! ContactEvent приходит извне (host collision detector или RapierBridgePlugin).
//! ProjectileResolved уходит наружу после commit (UI, звук, статистика).

use bevy::prelude::*;

/// Event: пересечение двух collision volumes (без импульса)
///
/// Пара неупорядоченная: `(a, b)` и `(b, a)` означают одно и то же.
/// Классификация участников делается в момент resolution.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: Entity,
    pub b: Entity,
}

impl ContactEvent {
    pub fn new(a: Entity, b: Entity) -> Self {
        Self { a, b }
    }

    /// Тот же контакт с переставленными участниками
    pub fn swapped(&self) -> Self {
        Self { a: self.b, b: self.a }
    }
}

/// Event: снаряд остановлен попаданием в игрока (после commit)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileResolved {
    pub projectile: Entity,
    pub player: Entity,
}
