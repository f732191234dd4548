//! Projectile компоненты: теги, состояние полёта, swept collision proxy

use bevy::prelude::*;

use crate::collision::ProfileKind;

/// Маркер: entity — снаряд (остаётся и после остановки)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Projectile;

/// Маркер: entity — игрок (цель снарядов)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Состояние полёта снаряда
///
/// Инварианты:
/// - `start_position` и `initial_velocity` не меняются после launch
/// - `elapsed_time >= 0`, монотонно растёт пока снаряд активен
/// - Отсутствие компонента = снаряд остановлен (Resolved), больше не двигается
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ProjectileFlight {
    pub start_position: Vec3,
    pub initial_velocity: Vec3,
    pub elapsed_time: f32,
}

impl ProjectileFlight {
    /// Новый полёт с `elapsed_time = 0`
    pub fn launch(start_position: Vec3, initial_velocity: Vec3) -> Self {
        Self {
            start_position,
            initial_velocity,
            elapsed_time: 0.0,
        }
    }
}

/// Collision proxy снаряда
///
/// Пока снаряд летит — коробка, растянутая между позицией прошлого и текущего
/// тика (пересчитывается каждый тик). После попадания — маленькая resting
/// коробка с `NonColliding` профилем.
///
/// Local frame: +Z смотрит по направлению движения, коробка тянется назад по -Z.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SweptCollisionProxy {
    pub orientation: Quat,
    pub half_extents: Vec3,
    /// Центр коробки относительно позиции entity (в local frame proxy)
    pub center_offset: Vec3,
    pub bevel_radius: f32,
    pub profile: ProfileKind,
}

impl SweptCollisionProxy {
    /// Resting коробка: без вращения, по центру entity, NonColliding
    pub fn resting(half_extents: Vec3, bevel_radius: f32) -> Self {
        Self {
            orientation: Quat::IDENTITY,
            half_extents,
            center_offset: Vec3::ZERO,
            bevel_radius,
            profile: ProfileKind::NonColliding,
        }
    }

    /// Лежит ли world-space точка внутри коробки, если entity стоит в `position`
    pub fn contains_point(&self, position: Vec3, point: Vec3, tolerance: f32) -> bool {
        let local = self.orientation.inverse() * (point - position) - self.center_offset;
        let limit = self.half_extents + Vec3::splat(self.bevel_radius + tolerance);
        local.abs().cmple(limit).all()
    }
}
