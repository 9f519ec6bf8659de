//! Game constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
    #[serde(default)]
    pub player: PlayerConstants,
    #[serde(default)]
    pub shop: ShopConstants,
}

impl GameConstants {
    /// Reject values that would break the combat or level formulas
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.combat.max_start_distance == 0 {
            return Err(ConfigError::ValidationError(
                "combat.max_start_distance must be at least 1".to_string(),
            ));
        }
        if self.combat.escape_chance > 100 {
            return Err(ConfigError::ValidationError(format!(
                "combat.escape_chance must be a percentage, got {}",
                self.combat.escape_chance
            )));
        }
        if self.progression.exp_per_level == 0 {
            return Err(ConfigError::ValidationError(
                "progression.exp_per_level must be at least 1".to_string(),
            ));
        }
        if self.player.base_health == 0 || self.player.bonus_health == 0 {
            return Err(ConfigError::ValidationError(
                "player health values must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Opponents start uniformly between 1 and this many meters away
    #[serde(default = "default_max_start_distance")]
    pub max_start_distance: u32,
    /// Percent chance an escape attempt succeeds without a speed advantage
    #[serde(default = "default_escape_chance")]
    pub escape_chance: u32,
    /// Speed lead over the opponent that guarantees escape
    #[serde(default = "default_escape_speed_margin")]
    pub escape_speed_margin: u32,
    /// Also guarantee escape when the distance exceeds
    /// `player_speed - (opponent_speed + escape_speed_margin)`
    #[serde(default = "default_escape_distance_override")]
    pub escape_distance_override: bool,
    /// Health restored by patching wounds mid-fight
    #[serde(default = "default_heal_amount")]
    pub heal_amount: u32,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            max_start_distance: default_max_start_distance(),
            escape_chance: default_escape_chance(),
            escape_speed_margin: default_escape_speed_margin(),
            escape_distance_override: default_escape_distance_override(),
            heal_amount: default_heal_amount(),
        }
    }
}

fn default_max_start_distance() -> u32 {
    60
}
fn default_escape_chance() -> u32 {
    60
}
fn default_escape_speed_margin() -> u32 {
    20
}
fn default_escape_distance_override() -> bool {
    true
}
fn default_heal_amount() -> u32 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Formula: level = floor((exp + exp_per_level) / exp_per_level)
    #[serde(default = "default_exp_per_level")]
    pub exp_per_level: u32,
    /// Max health gained per level
    #[serde(default = "default_health_per_level")]
    pub health_per_level: u32,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            exp_per_level: default_exp_per_level(),
            health_per_level: default_health_per_level(),
        }
    }
}

fn default_exp_per_level() -> u32 {
    25
}
fn default_health_per_level() -> u32 {
    1
}

/// Starting values for new characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConstants {
    #[serde(default = "default_base_health")]
    pub base_health: u32,
    #[serde(default = "default_base_speed")]
    pub base_speed: u32,
    #[serde(default = "default_gold")]
    pub gold: u32,
    /// Health when the health starter bonus is picked
    #[serde(default = "default_bonus_health")]
    pub bonus_health: u32,
    /// Speed when the speed starter bonus is picked
    #[serde(default = "default_bonus_speed")]
    pub bonus_speed: u32,
    /// Gold when the gold starter bonus is picked
    #[serde(default = "default_bonus_gold")]
    pub bonus_gold: u32,
}

impl Default for PlayerConstants {
    fn default() -> Self {
        PlayerConstants {
            base_health: default_base_health(),
            base_speed: default_base_speed(),
            gold: default_gold(),
            bonus_health: default_bonus_health(),
            bonus_speed: default_bonus_speed(),
            bonus_gold: default_bonus_gold(),
        }
    }
}

fn default_base_health() -> u32 {
    10
}
fn default_base_speed() -> u32 {
    30
}
fn default_gold() -> u32 {
    5
}
fn default_bonus_health() -> u32 {
    15
}
fn default_bonus_speed() -> u32 {
    45
}
fn default_bonus_gold() -> u32 {
    20
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopConstants {
    /// Gold charged per health point restored by the healer
    #[serde(default = "default_heal_cost_per_hp")]
    pub heal_cost_per_hp: u32,
}

impl Default for ShopConstants {
    fn default() -> Self {
        ShopConstants {
            heal_cost_per_hp: default_heal_cost_per_hp(),
        }
    }
}

fn default_heal_cost_per_hp() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert_eq!(constants.combat.max_start_distance, 60);
        assert_eq!(constants.combat.escape_chance, 60);
        assert_eq!(constants.progression.exp_per_level, 25);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[combat]
heal_amount = 3

[shop]
heal_cost_per_hp = 2
"#;

        let constants: GameConstants = toml::from_str(toml).unwrap();
        assert_eq!(constants.combat.heal_amount, 3);
        assert_eq!(constants.combat.escape_speed_margin, 20);
        assert_eq!(constants.shop.heal_cost_per_hp, 2);
        assert_eq!(constants.player, PlayerConstants::default());
    }

    #[test]
    fn test_escape_chance_over_100_rejected() {
        let mut constants = GameConstants::default();
        constants.combat.escape_chance = 101;
        assert!(constants.validate().is_err());
    }
}
