//! adventure_core - Game rules for a single-player text adventure
//!
//! This library provides:
//! - Catalog: Weapons, armor, creatures and locations loaded from data files
//! - Player: Character state, equipment and progression
//! - Defense: Armor mitigation of incoming hits
//! - Combat: Distance tracking, the encounter state machine and the driver
//!   that chains fights together
//! - Shop, travel and the player save file

pub mod catalog;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod creature;
pub mod defense;
pub mod equipment;
pub mod player;
pub mod prelude;
pub mod session;
pub mod shop;
pub mod store;
pub mod travel;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export core types for convenience
pub use catalog::{Catalog, CatalogError, CatalogSources, Location};
pub use combat::{
    run_encounters, CombatEvent, CombatPrompt, Distance, Encounter, EncounterError,
    EncounterOutcome, FightSummary, LootDrop, PlayerAction, RoundReport, RoundStatus,
};
pub use combatant::{Combatant, Opponent};
pub use config::{default_constants, load_constants, ConfigError, GameConstants};
pub use creature::Creature;
pub use defense::{mitigated_damage, resolve_damage, Mitigation};
pub use equipment::{Armor, DamageRange, Weapon};
pub use player::{Player, StarterBonus};
pub use session::Session;
pub use store::{PlayerStore, StoreError};
pub use types::{ArmorId, CreatureId, DamageType, LocationId, PlayerStatus, WeaponId};
