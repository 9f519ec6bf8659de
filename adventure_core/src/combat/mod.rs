//! Combat - Turn-based encounters between the player and one creature
//!
//! - [`Distance`]: separation tracking, movement and escape rolls
//! - [`Encounter`]: the round state machine for a single fight
//! - [`run_encounters`]: chains fights and hands decisions to a [`CombatPrompt`]

mod action;
mod chance;
mod distance;
mod driver;
mod encounter;
mod loot;
mod result;

pub use action::PlayerAction;
pub use chance::roll_chance;
pub use distance::{ClosingPace, Distance, EscapeAttempt, Retreat, MIN_DISTANCE};
pub use driver::{run_encounters, select_opponent, CombatPrompt, FightSummary};
pub use encounter::{Encounter, EncounterPhase, RoundStatus};
pub use loot::{eligible_drops, roll_drops, LootDrop};
pub use result::{CombatEvent, EncounterOutcome, EscapeKind, Rewards, RoundReport};

use thiserror::Error;

/// Error driving an encounter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncounterError {
    #[error("No hostile creature is weak enough for a player with {0} max health")]
    NoEligibleOpponent(u32),
    #[error("The encounter is already over")]
    Finished,
    #[error("Cannot {0} right now")]
    ActionUnavailable(PlayerAction),
    #[error("{0} is dead and cannot fight")]
    PlayerDead(String),
}
