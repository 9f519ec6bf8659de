//! Player - The character controlled by the user

use crate::catalog::Catalog;
use crate::config::{PlayerConstants, ProgressionConstants};
use crate::types::{ArmorId, LocationId, PlayerStatus, WeaponId};

/// Bonus picked during character creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarterBonus {
    Health,
    Speed,
    Gold,
}

impl StarterBonus {
    pub fn all() -> &'static [StarterBonus] {
        &[StarterBonus::Health, StarterBonus::Speed, StarterBonus::Gold]
    }
}

/// Complete persistent state for a player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    // === Identity ===
    pub name: String,
    pub species: String,

    // === Progression ===
    pub level: u32,
    pub exp: u32,
    pub gold: u32,

    // === Resources ===
    base_health: u32,
    current_health: u32,
    base_speed: u32,
    current_speed: u32,

    // === Placement ===
    pub location: LocationId,
    weapon: WeaponId,
    armor: ArmorId,
    pub status: PlayerStatus,

    /// Created this session and never saved
    pub is_new: bool,
}

impl Player {
    /// Create a fresh level 1 character
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        location: LocationId,
        weapon: WeaponId,
        armor: ArmorId,
        defaults: &PlayerConstants,
        catalog: &Catalog,
    ) -> Self {
        let mut player = Player {
            name: name.into(),
            species: species.into(),
            level: 1,
            exp: 0,
            gold: defaults.gold,
            base_health: defaults.base_health.max(1),
            current_health: defaults.base_health.max(1),
            base_speed: defaults.base_speed,
            current_speed: defaults.base_speed,
            location,
            weapon,
            armor,
            status: PlayerStatus::Sleeping,
            is_new: true,
        };
        player.update_speed(catalog);
        player
    }

    /// Apply the starter bonus chosen at creation
    pub fn apply_starter_bonus(
        &mut self,
        bonus: StarterBonus,
        defaults: &PlayerConstants,
        catalog: &Catalog,
    ) {
        match bonus {
            StarterBonus::Health => {
                self.base_health = defaults.bonus_health.max(1);
                self.current_health = self.base_health;
            }
            StarterBonus::Speed => {
                self.base_speed = defaults.bonus_speed;
                self.update_speed(catalog);
            }
            StarterBonus::Gold => self.gold = defaults.bonus_gold,
        }
    }

    // === Health ===

    pub fn health(&self) -> u32 {
        self.current_health
    }

    pub fn base_health(&self) -> u32 {
        self.base_health
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn is_dead(&self) -> bool {
        self.status == PlayerStatus::Dead || !self.is_alive()
    }

    pub fn is_hurt(&self) -> bool {
        self.current_health < self.base_health
    }

    /// Health missing from the maximum
    pub fn missing_health(&self) -> u32 {
        self.base_health - self.current_health
    }

    /// Set health, clamped to `[0, base_health]`
    pub fn set_health(&mut self, health: u32) {
        self.current_health = health.min(self.base_health);
    }

    /// Set maximum health; current health is clamped to the new maximum
    pub fn set_base_health(&mut self, base_health: u32) {
        self.base_health = base_health.max(1);
        self.current_health = self.current_health.min(self.base_health);
    }

    /// Lose health, never going below zero. Returns the new health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.current_health = self.current_health.saturating_sub(amount);
        self.current_health
    }

    /// Restore up to `amount` health. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.missing_health());
        self.current_health += healed;
        healed
    }

    /// Mark the character as dead; a dead character cannot act again
    pub fn die(&mut self) {
        self.current_health = 0;
        self.status = PlayerStatus::Dead;
    }

    // === Speed ===

    pub fn speed(&self) -> u32 {
        self.current_speed
    }

    pub fn base_speed(&self) -> u32 {
        self.base_speed
    }

    pub fn set_base_speed(&mut self, base_speed: u32, catalog: &Catalog) {
        self.base_speed = base_speed;
        self.update_speed(catalog);
    }

    /// Re-derive speed from base speed and the worn armor's penalty
    pub fn update_speed(&mut self, catalog: &Catalog) {
        self.current_speed = catalog.armor(self.armor).adjusted_speed(self.base_speed);
    }

    // === Equipment ===

    pub fn weapon(&self) -> WeaponId {
        self.weapon
    }

    pub fn armor(&self) -> ArmorId {
        self.armor
    }

    pub fn equip_weapon(&mut self, weapon: WeaponId) {
        self.weapon = weapon;
    }

    /// Wear new armor and re-derive speed
    pub fn equip_armor(&mut self, armor: ArmorId, catalog: &Catalog) {
        self.armor = armor;
        self.update_speed(catalog);
    }

    // === Progression ===

    /// Level implied by the current experience
    pub fn level_for_exp(exp: u32, progression: &ProgressionConstants) -> u32 {
        let per_level = progression.exp_per_level.max(1);
        exp / per_level + 1
    }

    /// Recompute level from experience
    ///
    /// Each level gained raises max health by `health_per_level`. Levels are
    /// never lost. Returns the number of levels gained.
    pub fn update_level(&mut self, progression: &ProgressionConstants) -> u32 {
        let level = Self::level_for_exp(self.exp, progression);
        if level <= self.level {
            return 0;
        }
        let gained = level - self.level;
        self.level = level;
        self.base_health = self
            .base_health
            .saturating_add(gained.saturating_mul(progression.health_per_level));
        tracing::info!("{} reached level {} (+{} max health)", self.name, level, gained);
        gained
    }

    /// Spend gold if the player has enough. Returns whether it was spent.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }
}
