//! Collision domain — filter/material профили и мост к rapier
//!
//! Ядро не делает broad/narrow phase: здесь только конфигурация того, КАК
//! proxy снаряда должен участвовать во внешнем collision detection.

pub mod layers;
pub mod profile;
pub mod rapier_bridge;

#[cfg(test)]
mod profile_tests;

pub use layers::*;
pub use profile::{CollisionProfile, CollisionProfiles, CollisionResponse, ProfileError, ProfileKind};
pub use rapier_bridge::RapierBridgePlugin;
