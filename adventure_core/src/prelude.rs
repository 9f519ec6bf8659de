//! Prelude module for convenient imports
//!
//! ```rust
//! use adventure_core::prelude::*;
//! ```

// Data
pub use crate::catalog::{Catalog, Location};
pub use crate::creature::Creature;
pub use crate::equipment::{Armor, Weapon};
pub use crate::types::{ArmorId, CreatureId, DamageType, LocationId, PlayerStatus, WeaponId};

// Player
pub use crate::player::{Player, StarterBonus};
pub use crate::session::Session;

// Combat
pub use crate::combat::{
    run_encounters, CombatEvent, CombatPrompt, Encounter, EncounterOutcome, FightSummary,
    LootDrop, PlayerAction, RoundReport, RoundStatus,
};
pub use crate::combatant::Combatant;

// Config
pub use crate::config::GameConstants;
