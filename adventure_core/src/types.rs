//! Core enums and identifiers shared across the crate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Damage type carried by weapons and protected against by armor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    /// Untyped damage, never mitigated
    None,
    Physical,
    Magic,
    True,
}

impl DamageType {
    /// Get all damage types
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::None,
            DamageType::Physical,
            DamageType::Magic,
            DamageType::True,
        ]
    }

    /// Name as written in data files
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::None => "none",
            DamageType::Physical => "physical",
            DamageType::Magic => "magic",
            DamageType::True => "true",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DamageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DamageType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown damage type '{}'", s))
    }
}

/// What the player was doing when the session was last saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    Sleeping,
    Resting,
    Travelling,
    Fighting,
    Idle,
    /// Terminal: the character died and can no longer act
    Dead,
}

impl PlayerStatus {
    pub fn all() -> &'static [PlayerStatus] {
        &[
            PlayerStatus::Sleeping,
            PlayerStatus::Resting,
            PlayerStatus::Travelling,
            PlayerStatus::Fighting,
            PlayerStatus::Idle,
            PlayerStatus::Dead,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerStatus::Sleeping => "sleeping",
            PlayerStatus::Resting => "resting",
            PlayerStatus::Travelling => "travelling",
            PlayerStatus::Fighting => "fighting",
            PlayerStatus::Idle => "idle",
            PlayerStatus::Dead => "dead",
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown player status '{}'", s))
    }
}

/// Index of a weapon in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeaponId(pub(crate) usize);

/// Index of an armor in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArmorId(pub(crate) usize);

/// Index of a creature in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CreatureId(pub(crate) usize);

/// Index of a location in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub(crate) usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_type_parse() {
        assert_eq!("physical".parse::<DamageType>(), Ok(DamageType::Physical));
        assert_eq!("none".parse::<DamageType>(), Ok(DamageType::None));
        assert!("fire".parse::<DamageType>().is_err());
    }

    #[test]
    fn test_status_round_trips_through_text() {
        for status in PlayerStatus::all() {
            assert_eq!(status.as_str().parse::<PlayerStatus>(), Ok(*status));
        }
    }
}
