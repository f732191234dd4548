//! Trigger системы: read phase (resolve) → commit phase (apply)
//!
//! Resolution читает события и read-only query, пишет только в batch.
//! Commit — одна exclusive система: все эффекты применяются разом после того,
//! как read phase закончилась.

use bevy::prelude::*;

use crate::config::BallisticsConfig;
use crate::projectile::{FlightCounters, Player, Projectile, ProjectileFlight, SweptCollisionProxy};

use super::events::{ContactEvent, ProjectileResolved};
use super::resolver::{resolve, ContactTag, Resolution, TriggerAction};

/// Накопленные за тик resolutions (deferred command buffer)
///
/// Один снаряд попадает в batch не больше одного раза.
#[derive(Resource, Debug, Default)]
pub struct ResolutionBatch {
    pending: Vec<Resolution>,
}

impl ResolutionBatch {
    /// Добавляет resolution; `false` если снаряд уже в batch
    pub fn push(&mut self, resolution: Resolution) -> bool {
        if self
            .pending
            .iter()
            .any(|queued| queued.projectile == resolution.projectile)
        {
            return false;
        }
        self.pending.push(resolution);
        true
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn take(&mut self) -> Vec<Resolution> {
        std::mem::take(&mut self.pending)
    }
}

type ParticipantQuery<'w, 's> =
    Query<'w, 's, (Has<Player>, Has<Projectile>, Has<ProjectileFlight>)>;

fn classify(participants: &ParticipantQuery, entity: Entity) -> ContactTag {
    participants
        .get(entity)
        .map(|(is_player, is_projectile, in_flight)| ContactTag {
            is_player,
            is_projectile,
            in_flight,
        })
        .unwrap_or_default()
}

/// Система: ContactEvent → ResolutionBatch (read phase)
pub fn resolve_contacts(
    mut contacts: EventReader<ContactEvent>,
    participants: ParticipantQuery,
    mut batch: ResMut<ResolutionBatch>,
) {
    for contact in contacts.read() {
        match resolve(contact, |entity| classify(&participants, entity)) {
            TriggerAction::Resolve(resolution) => {
                if !batch.push(resolution) {
                    crate::log(&format!(
                        "Duplicate contact for {:?} in this tick, skipped",
                        resolution.projectile
                    ));
                }
            }
            TriggerAction::Ignore(reason) => {
                crate::log(&format!(
                    "Contact {:?} ↔ {:?} ignored: {:?}",
                    contact.a, contact.b, reason
                ));
            }
        }
    }
}

/// Система: применяет ResolutionBatch (commit phase, exclusive)
///
/// Для каждого снаряда:
/// 1. Удаляет ProjectileFlight → Resolved, motion больше не трогает
/// 2. Ставит resting proxy (NonColliding, размеры из `BallisticsConfig`)
///
/// Если к моменту commit у снаряда уже нет ProjectileFlight (или entity
/// исчез) — no-op, счётчики не трогаем.
pub fn commit_resolutions(world: &mut World) {
    let mut batch = world.resource_mut::<ResolutionBatch>();
    if batch.is_empty() {
        return;
    }
    crate::log(&format!("Committing {} resolution(s)", batch.len()));
    let pending = batch.take();

    let resting_box = world.resource::<BallisticsConfig>().resting_box;
    let resting = SweptCollisionProxy::resting(resting_box.half_extents(), resting_box.bevel_radius);

    let mut committed = Vec::with_capacity(pending.len());
    for resolution in pending {
        let Ok(mut projectile) = world.get_entity_mut(resolution.projectile) else {
            crate::log(&format!(
                "Stale resolution: projectile {:?} no longer exists",
                resolution.projectile
            ));
            continue;
        };

        if !projectile.contains::<ProjectileFlight>() {
            crate::log(&format!(
                "Projectile {:?} already resolved, skipped",
                resolution.projectile
            ));
            continue;
        }

        projectile.remove::<ProjectileFlight>();
        projectile.insert(resting);
        committed.push(resolution);
    }

    if committed.is_empty() {
        return;
    }

    world
        .resource_mut::<FlightCounters>()
        .record_resolved(committed.len() as u64);

    for resolution in committed {
        crate::log_info(&format!(
            "🎯 Projectile {:?} hit player {:?}, stopped",
            resolution.projectile, resolution.player
        ));
        world.send_event(ProjectileResolved {
            projectile: resolution.projectile,
            player: resolution.player,
        });
    }
}
