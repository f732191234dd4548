//! Ballistics configuration (tick rate, gravity, proxy sizes, launcher)
//!
//! Все значения имеют defaults; JSON файл может переопределить любую часть.
//! Векторы хранятся как `[f32; 3]`, чтобы формат не зависел от bevy features.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logger::LogLevel;

/// Ошибки загрузки конфигурации
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Коробка, которой заменяется swept proxy после попадания в игрока.
///
/// Маленькая, без swept-растяжения, с NonColliding профилем.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct RestingBox {
    pub half_extents: [f32; 3],
    pub bevel_radius: f32,
}

impl Default for RestingBox {
    fn default() -> Self {
        Self {
            // Полный размер 0.5 × 0.5 × 1.0
            half_extents: [0.25, 0.25, 0.5],
            bevel_radius: 0.05,
        }
    }
}

impl RestingBox {
    pub fn half_extents(&self) -> Vec3 {
        Vec3::from_array(self.half_extents)
    }
}

/// Параметры залпа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct LauncherConfig {
    /// Центр области спавна (world space)
    pub origin: [f32; 3],
    /// Стартовая ориентация снаряда (x, y, z, w)
    pub rotation: [f32; 4],
    /// Начальная скорость каждого снаряда (m/s)
    pub initial_velocity: [f32; 3],
    /// Сколько снарядов в одном залпе
    pub volley_size: u32,
    /// Jitter box вокруг origin (min corner)
    pub jitter_min: [f32; 3],
    /// Jitter box вокруг origin (max corner)
    pub jitter_max: [f32; 3],
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            initial_velocity: [0.0, 10.0, 20.0],
            volley_size: 1,
            jitter_min: [-5.0, -5.0, 0.0],
            jitter_max: [5.0, 5.0, 0.0],
        }
    }
}

impl LauncherConfig {
    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.origin)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_array(self.rotation).normalize()
    }

    pub fn initial_velocity(&self) -> Vec3 {
        Vec3::from_array(self.initial_velocity)
    }

    pub fn jitter_min(&self) -> Vec3 {
        Vec3::from_array(self.jitter_min)
    }

    pub fn jitter_max(&self) -> Vec3 {
        Vec3::from_array(self.jitter_max)
    }
}

/// Главный resource конфигурации баллистики
///
/// Загружается один раз до первого тика; после старта только читается.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct BallisticsConfig {
    /// Частота fixed тиков (Hz)
    pub tick_hz: f64,
    /// Модуль гравитации (m/s²), направление всегда world-down
    pub gravity: f32,
    /// Поперечный half-extent swept коробки (метры)
    pub lateral_half_extent: f32,
    pub resting_box: RestingBox,
    /// Seed для deterministic spawn jitter
    pub seed: u64,
    pub launcher: LauncherConfig,
    /// Порог глобального logger'а (`debug` показывает каждый отброшенный контакт)
    #[reflect(ignore)]
    pub log_level: LogLevel,
}

impl Default for BallisticsConfig {
    fn default() -> Self {
        Self {
            tick_hz: 90.0,
            gravity: 9.81,
            lateral_half_extent: 0.5,
            resting_box: RestingBox::default(),
            seed: 1851936439,
            launcher: LauncherConfig::default(),
            log_level: LogLevel::Info,
        }
    }
}

impl BallisticsConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Fixed delta одного тика (секунды)
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.tick_hz
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            return Err(ConfigError::Invalid {
                field: "tick_hz",
                reason: "must be a positive finite rate",
            });
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "gravity",
                reason: "must be a non-negative magnitude",
            });
        }
        if !(self.lateral_half_extent.is_finite() && self.lateral_half_extent > 0.0) {
            return Err(ConfigError::Invalid {
                field: "lateral_half_extent",
                reason: "must be positive",
            });
        }
        if self.resting_box.half_extents.iter().any(|e| !(e.is_finite() && *e > 0.0)) {
            return Err(ConfigError::Invalid {
                field: "resting_box.half_extents",
                reason: "must be positive",
            });
        }
        if !(self.resting_box.bevel_radius.is_finite() && self.resting_box.bevel_radius >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "resting_box.bevel_radius",
                reason: "must be finite and non-negative",
            });
        }
        self.launcher.validate()
    }
}

impl LauncherConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.origin().is_finite() {
            return Err(ConfigError::Invalid {
                field: "launcher.origin",
                reason: "must be finite",
            });
        }
        if !self.initial_velocity().is_finite() {
            return Err(ConfigError::Invalid {
                field: "launcher.initial_velocity",
                reason: "must be finite",
            });
        }
        // normalize() нулевого/бесконечного кватерниона даёт NaN
        let rotation = Quat::from_array(self.rotation);
        if !(rotation.is_finite() && rotation.length_squared() > f32::EPSILON) {
            return Err(ConfigError::Invalid {
                field: "launcher.rotation",
                reason: "must be a finite non-zero quaternion",
            });
        }
        let (min, max) = (self.jitter_min(), self.jitter_max());
        if !(min.is_finite() && max.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "launcher.jitter_min",
                reason: "jitter box must be finite",
            });
        }
        if min.cmpgt(max).any() {
            return Err(ConfigError::Invalid {
                field: "launcher.jitter_min",
                reason: "must not exceed jitter_max",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BallisticsConfig::default();
        assert_eq!(config.tick_hz, 90.0);
        assert_eq!(config.lateral_half_extent, 0.5);
        assert_eq!(config.resting_box.half_extents(), Vec3::new(0.25, 0.25, 0.5));
        assert_eq!(config.resting_box.bevel_radius, 0.05);
        assert!((config.tick_seconds() - 1.0 / 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BallisticsConfig::from_json_str(r#"{ "gravity": 9.8, "launcher": { "volley_size": 4 } }"#)
            .expect("valid config");

        assert_eq!(config.gravity, 9.8);
        assert_eq!(config.launcher.volley_size, 4);
        assert_eq!(config.launcher.jitter_min, [-5.0, -5.0, 0.0]);
        assert_eq!(config.tick_hz, 90.0);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_log_level_from_json() {
        let config = BallisticsConfig::from_json_str(r#"{ "log_level": "debug" }"#).expect("valid config");
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_negative_gravity_rejected() {
        let err = BallisticsConfig::from_json_str(r#"{ "gravity": -9.8 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "gravity", .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = BallisticsConfig::from_json_str("{ gravity: ").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_zero_rotation_rejected() {
        let err = BallisticsConfig::from_json_str(r#"{ "launcher": { "rotation": [0.0, 0.0, 0.0, 0.0] } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "launcher.rotation", .. }));
    }

    #[test]
    fn test_unnormalized_rotation_accepted() {
        let config = BallisticsConfig::from_json_str(r#"{ "launcher": { "rotation": [0.0, 0.0, 0.0, 2.0] } }"#)
            .expect("scaled identity is valid");
        assert!(config.launcher.rotation().is_normalized());
        assert!(config.launcher.rotation().is_finite());
    }

    #[test]
    fn test_negative_bevel_rejected() {
        let err = BallisticsConfig::from_json_str(r#"{ "resting_box": { "bevel_radius": -0.1 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "resting_box.bevel_radius", .. }));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        // JSON не умеет NaN/inf: проверяем validate напрямую
        let mut config = BallisticsConfig::default();
        config.resting_box.bevel_radius = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "resting_box.bevel_radius", .. })
        ));

        let mut config = BallisticsConfig::default();
        config.launcher.initial_velocity = [0.0, f32::INFINITY, 0.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "launcher.initial_velocity", .. })
        ));

        let mut config = BallisticsConfig::default();
        config.launcher.origin = [f32::NAN, 0.0, 0.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "launcher.origin", .. })
        ));

        let mut config = BallisticsConfig::default();
        config.launcher.rotation = [f32::NAN, 0.0, 0.0, 1.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "launcher.rotation", .. })
        ));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(BallisticsConfig::default().validate().is_ok());
    }
}
