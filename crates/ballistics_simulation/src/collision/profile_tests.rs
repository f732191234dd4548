//! Tests for collision profile loading.

#[cfg(test)]
mod tests {
    use super::super::layers::*;
    use super::super::profile::*;

    const VALID: &str = r#"{
        "colliding": {
            "belongs_to": 8,
            "collides_with": 6,
            "group_index": 0,
            "response": "raise_trigger_events",
            "friction": 0.5,
            "restitution": 0.0,
            "custom_tags": 0
        },
        "non_colliding": {
            "belongs_to": 8,
            "collides_with": 0,
            "group_index": 0,
            "response": "disabled",
            "friction": 0.5,
            "restitution": 0.0,
            "custom_tags": 0
        }
    }"#;

    #[test]
    fn test_load_valid_profiles() {
        let profiles = CollisionProfiles::from_json_str(VALID).expect("valid profiles");

        assert_eq!(profiles.colliding.belongs_to, COLLISION_LAYER_PROJECTILES);
        assert_eq!(profiles.colliding.collides_with, COLLISION_MASK_PROJECTILES);
        assert_eq!(profiles.colliding.response, CollisionResponse::RaiseTriggerEvents);
        assert_eq!(profiles.non_colliding.collides_with, COLLISION_MASK_NONE);
        assert_eq!(profiles, CollisionProfiles::default());
    }

    #[test]
    fn test_missing_field_is_fatal() {
        // non_colliding без collides_with
        let json = VALID.replace(r#""collides_with": 0,"#, "");
        let err = CollisionProfiles::from_json_str(&json).unwrap_err();
        assert!(matches!(err, ProfileError::Malformed(_)), "got {err:?}");
    }

    #[test]
    fn test_missing_profile_is_fatal() {
        let err = CollisionProfiles::from_json_str(r#"{ "colliding": null }"#).unwrap_err();
        assert!(matches!(err, ProfileError::Malformed(_)));
    }

    #[test]
    fn test_colliding_profile_must_collide() {
        let json = VALID.replace(r#""collides_with": 6"#, r#""collides_with": 0"#);
        let err = CollisionProfiles::from_json_str(&json).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Invalid {
                profile: ProfileKind::Colliding,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_friction_rejected() {
        let json = VALID.replacen(r#""friction": 0.5"#, r#""friction": -1.0"#, 1);
        assert!(CollisionProfiles::from_json_str(&json).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = CollisionProfiles::load("/definitely/not/here.json").unwrap_err();
        match err {
            ProfileError::Io { path, .. } => assert!(path.contains("not/here.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_interaction_filter() {
        let profiles = CollisionProfiles::default();
        let player = CollisionProfile {
            belongs_to: COLLISION_LAYER_PLAYERS,
            collides_with: COLLISION_LAYER_PROJECTILES,
            group_index: 0,
            response: CollisionResponse::Collide,
            friction: 0.5,
            restitution: 0.0,
            custom_tags: 0,
        };

        assert!(profiles.colliding.interacts_with(&player));
        assert!(!profiles.non_colliding.interacts_with(&player));
        // Снаряды не видят друг друга
        assert!(!profiles.colliding.interacts_with(&profiles.colliding));
    }

    #[test]
    fn test_group_index_overrides_masks() {
        let profiles = CollisionProfiles::default();

        // Одинаковый положительный индекс: снаряды видят друг друга вопреки маскам
        let swarm = CollisionProfile {
            group_index: 3,
            ..profiles.colliding.clone()
        };
        assert!(swarm.interacts_with(&swarm));

        // Одинаковый отрицательный индекс: никогда, даже если маски пускают
        let player = CollisionProfile {
            belongs_to: COLLISION_LAYER_PLAYERS,
            collides_with: COLLISION_LAYER_PROJECTILES,
            group_index: -1,
            response: CollisionResponse::Collide,
            friction: 0.5,
            restitution: 0.0,
            custom_tags: 0,
        };
        let friendly = CollisionProfile {
            group_index: -1,
            ..profiles.colliding.clone()
        };
        assert!(!friendly.interacts_with(&player));

        // Разные индексы → решают маски
        let other = CollisionProfile {
            group_index: -2,
            ..profiles.colliding.clone()
        };
        assert!(other.interacts_with(&player));

        // Disabled сильнее любого индекса
        let disabled = CollisionProfile {
            group_index: 3,
            ..profiles.non_colliding.clone()
        };
        assert!(!disabled.interacts_with(&swarm));
    }

    #[test]
    fn test_bridge_ignores_host_only_fields() {
        use crate::collision::rapier_bridge::{active_events, collision_groups};

        let profiles = CollisionProfiles::default();
        let tagged = CollisionProfile {
            group_index: -7,
            custom_tags: 0b1010,
            ..profiles.colliding.clone()
        };

        assert_eq!(collision_groups(&tagged), collision_groups(&profiles.colliding));
        assert_eq!(active_events(&tagged), active_events(&profiles.colliding));
    }

    #[test]
    fn test_get_by_kind() {
        let profiles = CollisionProfiles::default();
        assert_eq!(profiles.get(ProfileKind::Colliding), &profiles.colliding);
        assert_eq!(profiles.get(ProfileKind::NonColliding), &profiles.non_colliding);
        assert_eq!(layer_name(COLLISION_LAYER_PROJECTILES), "Projectiles");
    }
}
