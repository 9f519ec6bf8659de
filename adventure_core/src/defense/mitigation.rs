//! Mitigation - Reduce a raw hit by the defender's armor
//!
//! Formula:
//! - If the hit's damage type matches the armor's protection type:
//!   `mitigated = raw - ceil(protection * raw)`, never below zero
//! - Otherwise (including `none` damage): `mitigated = raw`

use super::snap;
use crate::equipment::Armor;
use crate::types::DamageType;

/// Breakdown of one hit after armor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mitigation {
    /// Damage rolled by the attacker
    pub raw: u32,
    /// Damage negated by armor
    pub blocked: u32,
    /// Damage that reaches the defender's health
    pub dealt: u32,
}

/// Calculate the damage that gets through the defender's armor
///
/// Pure: identical inputs always give identical output.
pub fn mitigated_damage(raw: u32, damage_type: DamageType, armor: &Armor) -> u32 {
    resolve_damage(raw, damage_type, armor).dealt
}

/// Resolve a hit against armor, keeping the blocked amount for reporting
pub fn resolve_damage(raw: u32, damage_type: DamageType, armor: &Armor) -> Mitigation {
    if raw == 0 || !armor.protects_against(damage_type) {
        return Mitigation {
            raw,
            blocked: 0,
            dealt: raw,
        };
    }

    let protection = armor.protection.clamp(0.0, 1.0);
    let blocked = snap(protection * raw as f64).ceil() as u32;
    let dealt = raw.saturating_sub(blocked);

    Mitigation {
        raw,
        blocked: raw - dealt,
        dealt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::Availability;
    use proptest::prelude::*;

    fn armor(protection: f64, protection_type: DamageType) -> Armor {
        Armor {
            name: "Test Plate".to_string(),
            protection,
            speed_penalty: 0.0,
            protection_type,
            starter: false,
            player_usable: true,
            availability: Availability::default(),
        }
    }

    #[test]
    fn test_half_protection() {
        // 6 - ceil(0.5 * 6) = 3
        let plate = armor(0.5, DamageType::Physical);
        assert_eq!(mitigated_damage(6, DamageType::Physical, &plate), 3);
    }

    #[test]
    fn test_ceiling_favours_defender() {
        // 5 - ceil(0.5 * 5) = 5 - 3 = 2
        let plate = armor(0.5, DamageType::Physical);
        let result = resolve_damage(5, DamageType::Physical, &plate);
        assert_eq!(result.dealt, 2);
        assert_eq!(result.blocked, 3);
    }

    #[test]
    fn test_mismatched_type_unmitigated() {
        let plate = armor(0.9, DamageType::Physical);
        assert_eq!(mitigated_damage(7, DamageType::Magic, &plate), 7);
    }

    #[test]
    fn test_none_damage_unmitigated() {
        let plate = armor(1.0, DamageType::None);
        assert_eq!(mitigated_damage(7, DamageType::None, &plate), 7);
    }

    #[test]
    fn test_zero_protection() {
        let cloth = armor(0.0, DamageType::Physical);
        assert_eq!(mitigated_damage(4, DamageType::Physical, &cloth), 4);
    }

    #[test]
    fn test_full_protection() {
        let plate = armor(1.0, DamageType::Magic);
        assert_eq!(mitigated_damage(9, DamageType::Magic, &plate), 0);
    }

    #[test]
    fn test_float_noise_does_not_over_block() {
        // 0.1 * 30 must block exactly 3
        let plate = armor(0.1, DamageType::True);
        assert_eq!(mitigated_damage(30, DamageType::True, &plate), 27);
    }

    fn damage_type_strategy() -> impl Strategy<Value = DamageType> {
        prop_oneof![
            Just(DamageType::None),
            Just(DamageType::Physical),
            Just(DamageType::Magic),
            Just(DamageType::True),
        ]
    }

    proptest! {
        #[test]
        fn prop_matching_type_formula(raw in 0u32..1000, protection in 0.0f64..=1.0) {
            let plate = armor(protection, DamageType::Physical);
            let dealt = mitigated_damage(raw, DamageType::Physical, &plate);
            let expected = raw.saturating_sub(snap(protection * raw as f64).ceil() as u32);
            prop_assert_eq!(dealt, expected);
            prop_assert!(dealt <= raw);
        }

        #[test]
        fn prop_other_types_pass_through(
            raw in 0u32..1000,
            protection in 0.0f64..=1.0,
            attack in damage_type_strategy(),
            guard in damage_type_strategy(),
        ) {
            prop_assume!(attack != guard || attack == DamageType::None);
            let plate = armor(protection, guard);
            prop_assert_eq!(mitigated_damage(raw, attack, &plate), raw);
        }

        #[test]
        fn prop_resolver_is_pure(
            raw in 0u32..1000,
            protection in 0.0f64..=1.0,
            attack in damage_type_strategy(),
        ) {
            let plate = armor(protection, DamageType::Magic);
            prop_assert_eq!(
                resolve_damage(raw, attack, &plate),
                resolve_damage(raw, attack, &plate)
            );
        }
    }
}
