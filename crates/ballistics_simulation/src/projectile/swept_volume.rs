//! SweptVolumeBuilder — коробка, покрывающая путь снаряда за один тик
//!
//! Contact detection дискретный: быстрый маленький снаряд может целиком
//! проскочить тонкий collider между двумя тиками (tunneling). Поэтому proxy —
//! не точка, а коробка от прошлой позиции до новой.

use bevy::prelude::*;

use crate::collision::ProfileKind;

use super::components::SweptCollisionProxy;

/// Ниже этой дистанции направление не определено → identity
pub const DEGENERATE_DISTANCE: f32 = 1e-5;

/// Look rotation: local +Z → `forward`, local +Y максимально близко к `up`
///
/// - `forward` нулевой длины → identity
/// - `forward` параллелен `up` → shortest arc от +Z (ось коробки всё равно
///   лежит вдоль пути)
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(z_axis) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };

    let Some(x_axis) = up.cross(z_axis).try_normalize() else {
        return Quat::from_rotation_arc(Vec3::Z, z_axis);
    };
    let y_axis = z_axis.cross(x_axis);

    Quat::from_mat3(&Mat3::from_cols(x_axis, y_axis, z_axis)).normalize()
}

/// Строит swept proxy между `previous` и `current`
///
/// - `half_extents = (lateral, lateral, distance / 2)`
/// - `center_offset = (0, 0, -distance / 2)` — коробка тянется от новой позиции
///   назад к прошлой
/// - профиль всегда `Colliding` (proxy летящего снаряда)
pub fn build(previous: Vec3, current: Vec3, lateral_half_extent: f32) -> SweptCollisionProxy {
    let direction = current - previous;
    let distance = direction.length();

    let orientation = if distance < DEGENERATE_DISTANCE {
        Quat::IDENTITY
    } else {
        look_rotation(direction, Vec3::Y)
    };

    let half_length = distance * 0.5;

    SweptCollisionProxy {
        orientation,
        half_extents: Vec3::new(lateral_half_extent, lateral_half_extent, half_length),
        center_offset: Vec3::new(0.0, 0.0, -half_length),
        bevel_radius: 0.0,
        profile: ProfileKind::Colliding,
    }
}
