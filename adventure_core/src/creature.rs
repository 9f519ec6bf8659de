//! Creature - Catalog entry for the inhabitants of the world

use crate::types::{ArmorId, WeaponId};

/// A creature template from the catalog
///
/// Encounters never mutate this record; each fight builds an
/// [`Opponent`](crate::combatant::Opponent) with its own health pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    pub name: String,
    pub species: String,
    pub base_health: u32,
    pub base_speed: u32,
    pub armor: ArmorId,
    pub weapon: WeaponId,
    /// Friendly creatures are never picked as opponents
    pub friendly: bool,
}

impl Creature {
    /// Whether this creature may be picked as an opponent for a player
    /// with the given base health
    pub fn is_fair_fight(&self, player_base_health: u32) -> bool {
        !self.friendly && self.base_health <= player_base_health
    }
}
