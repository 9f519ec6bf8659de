//! Loot - Equipment a defeated opponent may leave behind
//!
//! An item is eligible when it is marked droppable, is usable by players and
//! differs from what the player already has in that slot. Each eligible item
//! then drops on its own `drop_chance` roll, weapon first.

use super::chance::roll_chance;
use crate::catalog::Catalog;
use crate::combatant::{Combatant, Opponent};
use crate::player::Player;
use crate::types::{ArmorId, WeaponId};
use rand::Rng;

/// An item offered to the player after a victory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LootDrop {
    Weapon(WeaponId),
    Armor(ArmorId),
}

impl LootDrop {
    pub fn name<'a>(&self, catalog: &'a Catalog) -> &'a str {
        match self {
            LootDrop::Weapon(id) => &catalog.weapon(*id).name,
            LootDrop::Armor(id) => &catalog.armor(*id).name,
        }
    }

    /// Name of what the player currently has in the same slot
    pub fn replaces<'a>(&self, player: &Player, catalog: &'a Catalog) -> &'a str {
        match self {
            LootDrop::Weapon(_) => &catalog.weapon(player.weapon()).name,
            LootDrop::Armor(_) => &catalog.armor(player.armor()).name,
        }
    }

    /// Drop chance in percent
    pub fn chance(&self, catalog: &Catalog) -> u32 {
        match self {
            LootDrop::Weapon(id) => catalog.weapon(*id).availability.drop_chance,
            LootDrop::Armor(id) => catalog.armor(*id).availability.drop_chance,
        }
    }

    /// Equip the dropped item, replacing the current one
    pub fn apply(&self, player: &mut Player, catalog: &Catalog) {
        match self {
            LootDrop::Weapon(id) => player.equip_weapon(*id),
            LootDrop::Armor(id) => player.equip_armor(*id, catalog),
        }
        tracing::debug!("{} equipped {}", player.name, self.name(catalog));
    }
}

/// Items the opponent could drop for this player, before any roll
pub fn eligible_drops(catalog: &Catalog, opponent: &Opponent, player: &Player) -> Vec<LootDrop> {
    let mut drops = Vec::new();

    let weapon = catalog.weapon(opponent.weapon());
    if weapon.availability.droppable && weapon.player_usable && opponent.weapon() != player.weapon() {
        drops.push(LootDrop::Weapon(opponent.weapon()));
    }

    let armor = catalog.armor(opponent.armor());
    if armor.availability.droppable && armor.player_usable && opponent.armor() != player.armor() {
        drops.push(LootDrop::Armor(opponent.armor()));
    }

    drops
}

/// Roll each eligible item's drop chance
pub fn roll_drops(
    catalog: &Catalog,
    opponent: &Opponent,
    player: &Player,
    rng: &mut impl Rng,
) -> Vec<LootDrop> {
    eligible_drops(catalog, opponent, player)
        .into_iter()
        .filter(|drop| roll_chance(drop.chance(catalog), rng))
        .collect()
}
