//! Collision layer bits
//!
//! ## Layers (битовая маска, на каком слое объект):
//! - bit 0 (0b1 = 1): Reserved
//! - bit 1 (0b10 = 2): Players
//! - bit 2 (0b100 = 4): Environment (walls, thin colliders, terrain)
//! - bit 3 (0b1000 = 8): Projectiles
//!
//! Mask = с какими слоями объект коллидирует. Default профили снарядов
//! (`CollisionProfiles::default`) собраны из этих констант.

/// Layer: players (цели снарядов)
pub const COLLISION_LAYER_PLAYERS: u32 = 0b10; // 2

/// Layer: environment (static scenery)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100; // 4

/// Layer: projectiles
pub const COLLISION_LAYER_PROJECTILES: u32 = 0b1000; // 8

/// Mask: летящий снаряд видит игроков и окружение, но не другие снаряды
pub const COLLISION_MASK_PROJECTILES: u32 = COLLISION_LAYER_PLAYERS | COLLISION_LAYER_ENVIRONMENT;

/// Mask: остановленный снаряд ни с чем не пересекается
pub const COLLISION_MASK_NONE: u32 = 0;

/// Название слоя для debug логов
pub fn layer_name(layer_bits: u32) -> &'static str {
    match layer_bits {
        COLLISION_LAYER_PLAYERS => "Players",
        COLLISION_LAYER_ENVIRONMENT => "Environment",
        COLLISION_LAYER_PROJECTILES => "Projectiles",
        0 => "None",
        _ => "Mixed",
    }
}
