//! Armor - Damage mitigation and its speed cost

use super::Availability;
use crate::defense::snap;
use crate::types::DamageType;

/// An armor record from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Armor {
    pub name: String,
    /// Fraction of matching damage negated (0.0-1.0)
    pub protection: f64,
    /// Fraction of base speed lost while worn (0.0-1.0)
    pub speed_penalty: f64,
    /// Damage type this armor protects against
    pub protection_type: DamageType,
    /// Offered during character creation
    pub starter: bool,
    /// Players may wear it (creature hides set this to false)
    pub player_usable: bool,
    pub availability: Availability,
}

impl Armor {
    /// Whether this armor mitigates damage of the given type
    ///
    /// `DamageType::None` is never mitigated, even by armor tagged `none`.
    pub fn protects_against(&self, damage_type: DamageType) -> bool {
        damage_type != DamageType::None && damage_type == self.protection_type
    }

    /// Effective speed for a wearer with the given base speed, rounded up
    pub fn adjusted_speed(&self, base_speed: u32) -> u32 {
        let base = base_speed as f64;
        let penalty = self.speed_penalty.clamp(0.0, 1.0);
        snap(base - penalty * base).ceil().max(0.0) as u32
    }

    /// Protection as a whole percentage for display
    pub fn protection_percent(&self) -> f64 {
        self.protection * 100.0
    }

    /// Speed penalty as a whole percentage for display
    pub fn speed_penalty_percent(&self) -> f64 {
        self.speed_penalty * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leather(protection_type: DamageType) -> Armor {
        Armor {
            name: "Leather Vest".to_string(),
            protection: 0.2,
            speed_penalty: 0.1,
            protection_type,
            starter: true,
            player_usable: true,
            availability: Availability::default(),
        }
    }

    #[test]
    fn test_protects_matching_type() {
        let armor = leather(DamageType::Physical);
        assert!(armor.protects_against(DamageType::Physical));
        assert!(!armor.protects_against(DamageType::Magic));
    }

    #[test]
    fn test_none_never_protected() {
        let armor = leather(DamageType::None);
        assert!(!armor.protects_against(DamageType::None));
    }

    #[test]
    fn test_adjusted_speed_rounds_up() {
        // 30 - 0.1 * 30 = 27
        assert_eq!(leather(DamageType::Physical).adjusted_speed(30), 27);

        // 45 - 0.15 * 45 = 38.25 -> 39
        let mut armor = leather(DamageType::Physical);
        armor.speed_penalty = 0.15;
        assert_eq!(armor.adjusted_speed(45), 39);
    }

    #[test]
    fn test_adjusted_speed_ignores_float_noise() {
        // 0.3 * 30 is not exactly 9.0 in binary floating point
        let mut armor = leather(DamageType::Physical);
        armor.speed_penalty = 0.3;
        assert_eq!(armor.adjusted_speed(30), 21);
    }

    #[test]
    fn test_full_penalty_stops_wearer() {
        let mut armor = leather(DamageType::Physical);
        armor.speed_penalty = 1.0;
        assert_eq!(armor.adjusted_speed(30), 0);
    }
}
