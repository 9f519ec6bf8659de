//! Weapon - Damage dealing equipment

use super::Availability;
use crate::types::DamageType;
use rand::Rng;
use std::fmt;

/// Inclusive integer damage interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    /// Create a damage range, swapping the bounds if given out of order
    pub fn new(min: u32, max: u32) -> Self {
        if min <= max {
            DamageRange { min, max }
        } else {
            DamageRange { min: max, max: min }
        }
    }

    /// Roll a damage value uniformly from the interval
    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        if self.min >= self.max {
            self.max
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl fmt::Display for DamageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// A weapon record from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    pub name: String,
    /// Free-form kind label ("melee", "ranged", ...)
    pub kind: String,
    pub damage: DamageRange,
    /// Maximum distance in meters this weapon can strike at
    pub range: u32,
    pub damage_type: DamageType,
    /// Offered during character creation
    pub starter: bool,
    /// Players may wield it (creature-only weapons set this to false)
    pub player_usable: bool,
    pub availability: Availability,
}

impl Weapon {
    /// Whether a target at `distance` meters can be struck
    pub fn reaches(&self, distance: u32) -> bool {
        self.range >= distance
    }

    /// Short summary used in status lines, e.g. "Short Sword (3-5)"
    pub fn summary(&self) -> String {
        format!("{} ({})", self.name, self.damage)
    }
}
