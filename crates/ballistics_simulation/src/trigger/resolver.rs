//! TriggerResolver — решает, останавливает ли контакт снаряд
//!
//! State machine снаряда: Active → Resolved (terminal).
//!
//! Правила:
//! 1. Ровно один участник — игрок (оба или ни одного → ignore)
//! 2. Второй участник — снаряд (scenery и прочее → ignore)
//! 3. У снаряда ещё есть ProjectileFlight (иначе уже Resolved → ignore)
//!
//! Сам resolver ничего не мутирует: возвращает action, эффекты собирает
//! `ResolutionBatch` и применяет commit pass в конце тика.

use bevy::prelude::*;

use super::events::ContactEvent;

/// Классификация участника контакта
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactTag {
    pub is_player: bool,
    pub is_projectile: bool,
    /// Есть ли ещё ProjectileFlight (для снарядов)
    pub in_flight: bool,
}

/// Почему контакт проигнорирован
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    BothPlayers,
    NoPlayer,
    NotProjectile,
    AlreadyResolved,
}

/// Подтверждённое попадание: projectile должен перейти в Resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub projectile: Entity,
    pub player: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Ignore(IgnoreReason),
    Resolve(Resolution),
}

/// Применяет правила к одному контакту
///
/// `classify` — read-only lookup; неизвестный entity → `ContactTag::default()`.
pub fn resolve(event: &ContactEvent, classify: impl Fn(Entity) -> ContactTag) -> TriggerAction {
    let tag_a = classify(event.a);
    let tag_b = classify(event.b);

    let (player, other, other_tag) = match (tag_a.is_player, tag_b.is_player) {
        (true, true) => return TriggerAction::Ignore(IgnoreReason::BothPlayers),
        (false, false) => return TriggerAction::Ignore(IgnoreReason::NoPlayer),
        (true, false) => (event.a, event.b, tag_b),
        (false, true) => (event.b, event.a, tag_a),
    };

    if !other_tag.is_projectile {
        return TriggerAction::Ignore(IgnoreReason::NotProjectile);
    }
    if !other_tag.in_flight {
        return TriggerAction::Ignore(IgnoreReason::AlreadyResolved);
    }

    TriggerAction::Resolve(Resolution {
        projectile: other,
        player,
    })
}
