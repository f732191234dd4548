//! Collision profiles (filter bits + material response)
//!
//! Два именованных профиля: `Colliding` (снаряд в полёте) и `NonColliding`
//! (снаряд остановлен). Загружаются один раз при старте из внешнего JSON;
//! отсутствие любого обязательного поля — фатальная ошибка, симуляция не стартует.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layers::{
    COLLISION_LAYER_PROJECTILES, COLLISION_MASK_NONE, COLLISION_MASK_PROJECTILES,
};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read collision profiles {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed collision profiles: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid {profile:?} profile: {reason}")]
    Invalid {
        profile: ProfileKind,
        reason: &'static str,
    },
}

/// Какой из двух профилей применён к proxy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum ProfileKind {
    #[default]
    Colliding,
    NonColliding,
}

/// Реакция на пересечение (как broad/narrow phase должен обработать пару)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "snake_case")]
pub enum CollisionResponse {
    /// Обычный физический контакт, без событий
    Collide,
    /// Физический контакт + collision events
    CollideRaiseCollisionEvents,
    /// Trigger: без импульса, только события
    RaiseTriggerEvents,
    /// Никакой реакции
    Disabled,
}

impl CollisionResponse {
    pub fn raises_events(&self) -> bool {
        matches!(
            self,
            CollisionResponse::CollideRaiseCollisionEvents | CollisionResponse::RaiseTriggerEvents
        )
    }
}

/// Filter + material одного профиля
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(deny_unknown_fields)]
pub struct CollisionProfile {
    /// Слои, которым принадлежит объект
    pub belongs_to: u32,
    /// Слои, с которыми объект пересекается
    pub collides_with: u32,
    /// Override масок для пар с одинаковым ненулевым индексом:
    /// `> 0` — всегда пересекаются, `< 0` — никогда. `0` — только маски.
    ///
    /// В rapier не зеркалится (там нет такого override), учитывается
    /// host-side detection через `interacts_with`.
    pub group_index: i32,
    pub response: CollisionResponse,
    pub friction: f32,
    pub restitution: f32,
    /// Непрозрачные биты host'а (материалы, звуки попадания); ядро их только хранит
    pub custom_tags: u8,
}

impl CollisionProfile {
    /// Могут ли два профиля вообще сгенерировать контакт
    pub fn interacts_with(&self, other: &CollisionProfile) -> bool {
        if self.response == CollisionResponse::Disabled || other.response == CollisionResponse::Disabled {
            return false;
        }
        if self.group_index != 0 && self.group_index == other.group_index {
            return self.group_index > 0;
        }
        (self.belongs_to & other.collides_with) != 0 && (other.belongs_to & self.collides_with) != 0
    }

    fn validate(&self, kind: ProfileKind) -> Result<(), ProfileError> {
        if !(self.friction.is_finite() && self.friction >= 0.0) {
            return Err(ProfileError::Invalid {
                profile: kind,
                reason: "friction must be finite and non-negative",
            });
        }
        if !(self.restitution.is_finite() && self.restitution >= 0.0) {
            return Err(ProfileError::Invalid {
                profile: kind,
                reason: "restitution must be finite and non-negative",
            });
        }
        if self.belongs_to == 0 {
            return Err(ProfileError::Invalid {
                profile: kind,
                reason: "belongs_to must name at least one layer",
            });
        }
        if kind == ProfileKind::Colliding
            && (self.collides_with == 0 || self.response == CollisionResponse::Disabled)
        {
            return Err(ProfileError::Invalid {
                profile: kind,
                reason: "colliding profile must be able to generate contacts",
            });
        }
        Ok(())
    }
}

/// Пара профилей, общая для всех систем (read-only после старта)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(deny_unknown_fields)]
pub struct CollisionProfiles {
    pub colliding: CollisionProfile,
    pub non_colliding: CollisionProfile,
}

impl Default for CollisionProfiles {
    fn default() -> Self {
        Self {
            colliding: CollisionProfile {
                belongs_to: COLLISION_LAYER_PROJECTILES,
                collides_with: COLLISION_MASK_PROJECTILES,
                group_index: 0,
                response: CollisionResponse::RaiseTriggerEvents,
                friction: 0.5,
                restitution: 0.0,
                custom_tags: 0,
            },
            non_colliding: CollisionProfile {
                belongs_to: COLLISION_LAYER_PROJECTILES,
                collides_with: COLLISION_MASK_NONE,
                group_index: 0,
                response: CollisionResponse::Disabled,
                friction: 0.5,
                restitution: 0.0,
                custom_tags: 0,
            },
        }
    }
}

impl CollisionProfiles {
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        let profiles: Self = serde_json::from_str(json)?;
        profiles.colliding.validate(ProfileKind::Colliding)?;
        profiles.non_colliding.validate(ProfileKind::NonColliding)?;
        Ok(profiles)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, kind: ProfileKind) -> &CollisionProfile {
        match kind {
            ProfileKind::Colliding => &self.colliding,
            ProfileKind::NonColliding => &self.non_colliding,
        }
    }
}
