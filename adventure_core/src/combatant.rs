//! Combatant - What the combat engine needs to know about each side

use crate::catalog::Catalog;
use crate::creature::Creature;
use crate::player::Player;
use crate::types::{ArmorId, CreatureId, WeaponId};

/// Shared view of an entity taking part in an encounter
pub trait Combatant {
    /// Display name, e.g. "Snarl the Wolf"
    fn title(&self) -> String;

    fn health(&self) -> u32;

    fn base_health(&self) -> u32;

    /// Effective speed after armor penalty
    fn speed(&self) -> u32;

    fn weapon(&self) -> WeaponId;

    fn armor(&self) -> ArmorId;

    /// Lose health, clamped at zero. Returns the new health.
    fn take_damage(&mut self, amount: u32) -> u32;

    fn is_alive(&self) -> bool {
        self.health() > 0
    }
}

impl Combatant for Player {
    fn title(&self) -> String {
        format!("{} the {}", self.name, self.species)
    }

    fn health(&self) -> u32 {
        Player::health(self)
    }

    fn base_health(&self) -> u32 {
        Player::base_health(self)
    }

    fn speed(&self) -> u32 {
        Player::speed(self)
    }

    fn weapon(&self) -> WeaponId {
        Player::weapon(self)
    }

    fn armor(&self) -> ArmorId {
        Player::armor(self)
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        Player::take_damage(self, amount)
    }
}

/// A creature brought to life for one encounter
///
/// Holds the encounter's own health pool; the catalog record it was built
/// from is never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Opponent {
    pub creature: CreatureId,
    pub name: String,
    pub species: String,
    health: u32,
    base_health: u32,
    speed: u32,
    weapon: WeaponId,
    armor: ArmorId,
}

impl Opponent {
    /// Spawn a creature at full health with its armor-adjusted speed
    pub fn spawn(catalog: &Catalog, id: CreatureId) -> Self {
        let creature: &Creature = catalog.creature(id);
        Opponent {
            creature: id,
            name: creature.name.clone(),
            species: creature.species.clone(),
            health: creature.base_health,
            base_health: creature.base_health,
            speed: catalog
                .armor(creature.armor)
                .adjusted_speed(creature.base_speed),
            weapon: creature.weapon,
            armor: creature.armor,
        }
    }
}

impl Combatant for Opponent {
    fn title(&self) -> String {
        format!("{} the {}", self.name, self.species)
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn base_health(&self) -> u32 {
        self.base_health
    }

    fn speed(&self) -> u32 {
        self.speed
    }

    fn weapon(&self) -> WeaponId {
        self.weapon
    }

    fn armor(&self) -> ArmorId {
        self.armor
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }
}
