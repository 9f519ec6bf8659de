//! Encounter driver - Chains fights until the player stops, flees or dies
//!
//! The driver owns no I/O. Everything the player decides goes through a
//! [`CombatPrompt`], which the game implements with terminal menus and tests
//! implement with scripts.

use super::action::PlayerAction;
use super::encounter::{Encounter, RoundStatus};
use super::loot::LootDrop;
use super::result::{EncounterOutcome, EscapeKind, RoundReport};
use super::EncounterError;
use crate::catalog::Catalog;
use crate::player::Player;
use crate::session::Session;
use crate::types::{CreatureId, PlayerStatus};
use rand::seq::SliceRandom;
use rand::Rng;

/// Decisions and notifications during a run of encounters
pub trait CombatPrompt {
    /// A new opponent appeared
    fn encounter_started(&mut self, _number: u32, _status: &RoundStatus) {}

    /// Pick one of `actions`, or `None` when the player backs out
    fn choose_action(&mut self, status: &RoundStatus, actions: &[PlayerAction]) -> Option<PlayerAction>;

    fn round_played(&mut self, _report: &RoundReport) {}

    fn encounter_ended(&mut self, _outcome: &EncounterOutcome) {}

    /// Whether to equip a dropped item in place of the current one
    fn offer_drop(&mut self, drop: LootDrop, player: &Player, catalog: &Catalog) -> bool;

    /// Whether to look for another fight after a win or escape
    fn continue_fighting(&mut self, location: &str) -> bool;
}

/// Totals over one call to [`run_encounters`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FightSummary {
    pub encounters: u32,
    pub victories: u32,
    pub escapes: u32,
    pub gold: u32,
    pub exp: u32,
    pub levels_gained: u32,
    /// The run ended with the player's death
    pub died: bool,
    /// The run ended because a decision was cancelled in range
    pub disengaged: bool,
}

/// Pick a random hostile creature the player can fairly fight
///
/// Candidates are non-friendly creatures whose base health does not exceed
/// the player's.
pub fn select_opponent(
    catalog: &Catalog,
    player: &Player,
    rng: &mut impl Rng,
) -> Result<CreatureId, EncounterError> {
    let candidates: Vec<CreatureId> = catalog
        .creatures()
        .filter(|(_, creature)| creature.is_fair_fight(player.base_health()))
        .map(|(id, _)| id)
        .collect();

    candidates
        .choose(rng)
        .copied()
        .ok_or(EncounterError::NoEligibleOpponent(player.base_health()))
}

/// Run encounters back to back until the player declines to continue
///
/// The player is `Fighting` for the duration and `Idle` afterwards, unless
/// they died.
pub fn run_encounters(
    session: &mut Session<'_>,
    prompt: &mut impl CombatPrompt,
    rng: &mut impl Rng,
) -> Result<FightSummary, EncounterError> {
    if session.player.is_dead() {
        return Err(EncounterError::PlayerDead(session.player.name.clone()));
    }

    session.player.status = PlayerStatus::Fighting;
    let result = fight(session, prompt, rng);
    if session.player.status != PlayerStatus::Dead {
        session.player.status = PlayerStatus::Idle;
    }

    if let Ok(summary) = &result {
        tracing::info!(
            "{} fought {} encounter(s): {} won, {} escaped",
            session.player.name,
            summary.encounters,
            summary.victories,
            summary.escapes
        );
    }
    result
}

fn fight(
    session: &mut Session<'_>,
    prompt: &mut impl CombatPrompt,
    rng: &mut impl Rng,
) -> Result<FightSummary, EncounterError> {
    let mut summary = FightSummary::default();

    loop {
        let creature = select_opponent(session.catalog, session.player, rng)?;
        let mut encounter =
            Encounter::start(session.catalog, creature, &session.constants.combat, rng);
        summary.encounters += 1;
        prompt.encounter_started(
            summary.encounters,
            &encounter.status(session.player, session.catalog),
        );

        while !encounter.is_over() {
            let status = encounter.status(session.player, session.catalog);
            let actions = encounter.available_actions(session.player, session.catalog);
            let report = match prompt.choose_action(&status, &actions) {
                Some(action) => encounter.play_round(session, action, rng)?,
                // Backing out of a decision is an escape attempt where one is offered
                None if actions.contains(&PlayerAction::Escape) => {
                    encounter.play_round(session, PlayerAction::Escape, rng)?
                }
                None => encounter.disengage()?,
            };
            prompt.round_played(&report);
        }

        let Some(outcome) = encounter.outcome().cloned() else {
            return Ok(summary);
        };
        prompt.encounter_ended(&outcome);

        match outcome {
            EncounterOutcome::Victory(rewards) => {
                summary.victories += 1;
                summary.gold += rewards.gold;
                summary.exp += rewards.exp;
                summary.levels_gained += rewards.levels_gained;
                for drop in rewards.drops {
                    if prompt.offer_drop(drop, session.player, session.catalog) {
                        drop.apply(session.player, session.catalog);
                    }
                }
            }
            EncounterOutcome::Defeat => {
                summary.died = true;
                return Ok(summary);
            }
            EncounterOutcome::Escaped(EscapeKind::Fled) => summary.escapes += 1,
            EncounterOutcome::Escaped(EscapeKind::Disengaged) => {
                summary.disengaged = true;
                return Ok(summary);
            }
        }

        if !prompt.continue_fighting(&session.location().name) {
            return Ok(summary);
        }
    }
}
