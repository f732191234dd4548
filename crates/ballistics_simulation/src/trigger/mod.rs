//! Trigger domain — контакт игрок/снаряд останавливает снаряд
//!
//! Flow:
//! 1. Host (или RapierBridgePlugin) пишет ContactEvent — BallisticsSet::Detection
//! 2. resolve_contacts: правила → ResolutionBatch — BallisticsSet::Resolution
//! 3. commit_resolutions: batch → World, ProjectileResolved — BallisticsSet::Commit

use bevy::prelude::*;

use crate::schedule::BallisticsSet;

pub mod events;
pub mod resolver;
pub mod systems;


pub use events::{ContactEvent, ProjectileResolved};
pub use resolver::{resolve, ContactTag, IgnoreReason, Resolution, TriggerAction};
pub use systems::{commit_resolutions, resolve_contacts, ResolutionBatch};

/// Trigger Plugin
pub struct TriggerPlugin;

impl Plugin for TriggerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ContactEvent>()
            .add_event::<ProjectileResolved>()
            .init_resource::<ResolutionBatch>();

        app.add_systems(FixedUpdate, resolve_contacts.in_set(BallisticsSet::Resolution))
            .add_systems(FixedUpdate, commit_resolutions.in_set(BallisticsSet::Commit));
    }
}
