//! Rapier bridge — опциональная связка ядра с bevy_rapier3d
//!
//! - SweptCollisionProxy → Collider (compound cuboid) + groups/material/events
//!   (BallisticsSet::ProxySync, после commit)
//! - rapier `CollisionEvent::Started` → `ContactEvent` (BallisticsSet::Detection)
//!
//! Сам physics step (RapierPhysicsPlugin) подключает host; он идёт после
//! FixedUpdate и видит уже итоговый proxy тика: остановленный в этом тике
//! снаряд попадает в step с `ColliderDisabled`.
//!
//! `group_index` и `custom_tags` профиля в rapier не зеркалятся: у rapier нет
//! group index override, это данные host'а (см. `CollisionProfile::interacts_with`).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::projectile::SweptCollisionProxy;
use crate::schedule::BallisticsSet;
use crate::trigger::ContactEvent;

use super::layers::layer_name;
use super::profile::{CollisionProfile, CollisionProfiles, CollisionResponse};

/// Минимальный half-extent: нулевая толщина cuboid'а в rapier нежелательна
pub const MIN_HALF_EXTENT: f32 = 1e-3;

/// Filter bits профиля → rapier CollisionGroups
pub fn collision_groups(profile: &CollisionProfile) -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(profile.belongs_to),
        Group::from_bits_truncate(profile.collides_with),
    )
}

/// Какие события rapier должен генерировать для профиля
pub fn active_events(profile: &CollisionProfile) -> ActiveEvents {
    if profile.response.raises_events() {
        ActiveEvents::COLLISION_EVENTS
    } else {
        ActiveEvents::empty()
    }
}

/// Collider для proxy в local frame entity
///
/// `entity_rotation` — текущий `Transform::rotation`; коробка повёрнута
/// относительно него так, чтобы в world space ориентация совпала с proxy.
pub fn proxy_collider(proxy: &SweptCollisionProxy, entity_rotation: Quat) -> Collider {
    let half = proxy.half_extents.max(Vec3::splat(MIN_HALF_EXTENT));
    let shape = if proxy.bevel_radius > 0.0 {
        Collider::round_cuboid(half.x, half.y, half.z, proxy.bevel_radius)
    } else {
        Collider::cuboid(half.x, half.y, half.z)
    };

    let relative = entity_rotation.inverse() * proxy.orientation;
    Collider::compound(vec![(relative * proxy.center_offset, relative, shape)])
}

/// Rapier событие → ContactEvent (только начало пересечения)
pub fn contact_from_rapier(event: &CollisionEvent) -> Option<ContactEvent> {
    match event {
        CollisionEvent::Started(a, b, _) => Some(ContactEvent::new(*a, *b)),
        CollisionEvent::Stopped(..) => None,
    }
}

/// Система: зеркалит изменённые proxies в rapier компоненты
pub fn sync_proxy_colliders(
    mut commands: Commands,
    profiles: Res<CollisionProfiles>,
    proxies: Query<(Entity, &SweptCollisionProxy, &Transform), Changed<SweptCollisionProxy>>,
) {
    for (entity, proxy, transform) in proxies.iter() {
        let profile = profiles.get(proxy.profile);
        let mut entity_commands = commands.entity(entity);

        entity_commands.insert((
            RigidBody::KinematicPositionBased,
            proxy_collider(proxy, transform.rotation),
            collision_groups(profile),
            active_events(profile),
            ActiveCollisionTypes::all(),
            Friction::coefficient(profile.friction),
            Restitution::coefficient(profile.restitution),
        ));

        match profile.response {
            CollisionResponse::RaiseTriggerEvents => {
                entity_commands.insert(Sensor).remove::<ColliderDisabled>();
            }
            CollisionResponse::Disabled => {
                entity_commands.insert(ColliderDisabled).remove::<Sensor>();
                crate::log(&format!(
                    "Collider of {:?} disabled (layer: {})",
                    entity,
                    layer_name(profile.belongs_to)
                ));
            }
            CollisionResponse::Collide | CollisionResponse::CollideRaiseCollisionEvents => {
                entity_commands.remove::<(Sensor, ColliderDisabled)>();
            }
        }
    }
}

/// Система: rapier CollisionEvent → ContactEvent
pub fn forward_rapier_contacts(
    mut rapier_events: EventReader<CollisionEvent>,
    mut contacts: EventWriter<ContactEvent>,
) {
    for event in rapier_events.read() {
        if let Some(contact) = contact_from_rapier(event) {
            contacts.write(contact);
        }
    }
}

/// Rapier Bridge Plugin
///
/// Подключается поверх SimulationPlugin, если host использует bevy_rapier3d.
pub struct RapierBridgePlugin;

impl Plugin for RapierBridgePlugin {
    fn build(&self, app: &mut App) {
        // No-op если RapierPhysicsPlugin уже зарегистрировал событие
        app.add_event::<CollisionEvent>();

        app.add_systems(FixedUpdate, forward_rapier_contacts.in_set(BallisticsSet::Detection))
            .add_systems(FixedUpdate, sync_proxy_colliders.in_set(BallisticsSet::ProxySync));
    }
}
