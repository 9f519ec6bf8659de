//! Encounter - One fight between the player and a single opponent
//!
//! Each call to [`Encounter::play_round`] walks the round through
//! `RoundStart -> PlayerActing -> OpponentActing -> RoundEnd` and back to
//! `RoundStart`, unless the round lands in one of the terminal phases
//! `Victory`, `Defeat` or `Escaped`. A terminal encounter rejects further
//! rounds.

use super::action::PlayerAction;
use super::chance::randint;
use super::distance::{ClosingPace, Distance};
use super::loot::roll_drops;
use super::result::{CombatEvent, EncounterOutcome, EscapeKind, Rewards, RoundReport};
use super::EncounterError;
use crate::catalog::Catalog;
use crate::combatant::{Combatant, Opponent};
use crate::config::CombatConstants;
use crate::defense::resolve_damage;
use crate::player::Player;
use crate::session::Session;
use crate::types::CreatureId;
use rand::Rng;

/// Where an encounter is in its round cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterPhase {
    RoundStart,
    PlayerActing,
    OpponentActing,
    RoundEnd,
    Victory,
    Defeat,
    Escaped,
}

impl EncounterPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EncounterPhase::Victory | EncounterPhase::Defeat | EncounterPhase::Escaped
        )
    }
}

/// Snapshot of both sides for presenting a round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundStatus {
    pub round: u32,
    pub distance: Distance,
    pub player_title: String,
    pub player_health: u32,
    pub player_base_health: u32,
    pub player_speed: u32,
    pub player_weapon: String,
    /// The player's weapon reaches the opponent
    pub in_range: bool,
    pub opponent_title: String,
    pub opponent_health: u32,
    pub opponent_base_health: u32,
    pub opponent_speed: u32,
    pub opponent_weapon: String,
    /// The opponent's weapon reaches the player
    pub opponent_in_range: bool,
}

#[derive(Debug, Clone)]
pub struct Encounter {
    opponent: Opponent,
    distance: Distance,
    round: u32,
    phase: EncounterPhase,
    outcome: Option<EncounterOutcome>,
}

impl Encounter {
    /// Spawn `creature` at a random distance in `[1, max_start_distance]`
    pub fn start(
        catalog: &Catalog,
        creature: CreatureId,
        constants: &CombatConstants,
        rng: &mut impl Rng,
    ) -> Self {
        let distance = Distance::random(constants.max_start_distance, rng);
        Self::at_distance(catalog, creature, distance)
    }

    /// Spawn `creature` at a known distance
    pub fn at_distance(catalog: &Catalog, creature: CreatureId, distance: Distance) -> Self {
        let opponent = Opponent::spawn(catalog, creature);
        tracing::debug!("Encounter with {} at {}", opponent.title(), distance);
        Encounter {
            opponent,
            distance,
            round: 1,
            phase: EncounterPhase::RoundStart,
            outcome: None,
        }
    }

    pub fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Number of the round about to be played (or the last one, once over)
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&EncounterOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Whether the player's weapon reaches the opponent
    pub fn player_in_range(&self, player: &Player, catalog: &Catalog) -> bool {
        self.distance.within_range(catalog.weapon(player.weapon()).range)
    }

    /// Whether the opponent's weapon reaches the player
    pub fn opponent_in_range(&self, catalog: &Catalog) -> bool {
        self.distance.within_range(catalog.weapon(self.opponent.weapon()).range)
    }

    /// Actions the player may take this round; empty once the encounter is over
    pub fn available_actions(&self, player: &Player, catalog: &Catalog) -> Vec<PlayerAction> {
        if self.is_over() {
            return Vec::new();
        }
        PlayerAction::options(self.player_in_range(player, catalog), player.is_hurt())
    }

    pub fn status(&self, player: &Player, catalog: &Catalog) -> RoundStatus {
        RoundStatus {
            round: self.round,
            distance: self.distance,
            player_title: Combatant::title(player),
            player_health: player.health(),
            player_base_health: player.base_health(),
            player_speed: player.speed(),
            player_weapon: catalog.weapon(player.weapon()).name.clone(),
            in_range: self.player_in_range(player, catalog),
            opponent_title: self.opponent.title(),
            opponent_health: self.opponent.health(),
            opponent_base_health: self.opponent.base_health(),
            opponent_speed: self.opponent.speed(),
            opponent_weapon: catalog.weapon(self.opponent.weapon()).name.clone(),
            opponent_in_range: self.opponent_in_range(catalog),
        }
    }

    /// Play one full round with the player's chosen action
    ///
    /// The opponent's turn is skipped when the player's action ends the
    /// encounter. On victory the rewards are credited to the player before
    /// returning; on defeat the player is marked dead.
    pub fn play_round(
        &mut self,
        session: &mut Session<'_>,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<RoundReport, EncounterError> {
        if self.is_over() {
            return Err(EncounterError::Finished);
        }
        if session.player.is_dead() {
            return Err(EncounterError::PlayerDead(session.player.name.clone()));
        }
        if !self
            .available_actions(session.player, session.catalog)
            .contains(&action)
        {
            return Err(EncounterError::ActionUnavailable(action));
        }

        let mut report = RoundReport::new(self.round, action);

        self.enter(EncounterPhase::PlayerActing);
        self.player_turn(session, action, &mut report, rng);

        if !self.is_over() {
            self.enter(EncounterPhase::OpponentActing);
            self.opponent_turn(session, action, &mut report, rng);
        }

        if !self.is_over() {
            self.enter(EncounterPhase::RoundEnd);
            self.round += 1;
            self.enter(EncounterPhase::RoundStart);
        }

        report.outcome = self.outcome.clone();
        Ok(report)
    }

    /// End the encounter without a roll when the player backs out of a decision
    pub fn disengage(&mut self) -> Result<RoundReport, EncounterError> {
        if self.is_over() {
            return Err(EncounterError::Finished);
        }
        let mut report = RoundReport::new(self.round, PlayerAction::Escape);
        report.events.push(CombatEvent::Disengaged);
        self.finish(EncounterOutcome::Escaped(EscapeKind::Disengaged));
        report.outcome = self.outcome.clone();
        Ok(report)
    }

    fn enter(&mut self, phase: EncounterPhase) {
        tracing::trace!(round = self.round, ?phase, "encounter phase");
        self.phase = phase;
    }

    fn finish(&mut self, outcome: EncounterOutcome) {
        let phase = match outcome {
            EncounterOutcome::Victory(_) => EncounterPhase::Victory,
            EncounterOutcome::Defeat => EncounterPhase::Defeat,
            EncounterOutcome::Escaped(_) => EncounterPhase::Escaped,
        };
        self.enter(phase);
        self.outcome = Some(outcome);
    }

    fn player_turn(
        &mut self,
        session: &mut Session<'_>,
        action: PlayerAction,
        report: &mut RoundReport,
        rng: &mut impl Rng,
    ) {
        let catalog = session.catalog;
        let constants = session.constants;
        let player_speed = session.player.speed();
        let opponent_speed = self.opponent.speed();

        match action {
            PlayerAction::Attack => {
                let weapon = catalog.weapon(session.player.weapon());
                let raw = weapon.damage.roll(rng);
                let mitigation =
                    resolve_damage(raw, weapon.damage_type, catalog.armor(self.opponent.armor()));
                let opponent_health = self.opponent.take_damage(mitigation.dealt);
                report.events.push(CombatEvent::PlayerHit {
                    mitigation,
                    opponent_health,
                });
                if opponent_health == 0 {
                    self.win(session, report, rng);
                }
            }
            PlayerAction::Retreat => {
                let retreat = self.distance.retreat(player_speed, opponent_speed, rng);
                report.events.push(CombatEvent::Retreated {
                    outran: retreat.outran,
                    distance: self.distance,
                });
            }
            PlayerAction::Approach => {
                self.distance.approach(player_speed);
                report.events.push(CombatEvent::Approached {
                    distance: self.distance,
                });
            }
            PlayerAction::Wait => report.events.push(CombatEvent::Waited),
            PlayerAction::Escape => {
                let attempt = self
                    .distance
                    .attempt_escape(player_speed, opponent_speed, &constants.combat, rng);
                if attempt.escaped {
                    report.events.push(CombatEvent::Escaped {
                        guaranteed: attempt.guaranteed,
                    });
                    tracing::info!("{} escaped from {}", session.player.name, self.opponent.title());
                    self.finish(EncounterOutcome::Escaped(EscapeKind::Fled));
                } else {
                    report.events.push(CombatEvent::EscapeFailed {
                        distance: self.distance,
                    });
                }
            }
            PlayerAction::Heal => {
                let amount = session.player.heal(constants.combat.heal_amount);
                report.events.push(CombatEvent::Healed {
                    amount,
                    health: session.player.health(),
                });
            }
        }
    }

    fn opponent_turn(
        &mut self,
        session: &mut Session<'_>,
        action: PlayerAction,
        report: &mut RoundReport,
        rng: &mut impl Rng,
    ) {
        let catalog = session.catalog;
        let weapon = catalog.weapon(self.opponent.weapon());

        if self.distance.within_range(weapon.range) {
            let raw = weapon.damage.roll(rng);
            let mitigation =
                resolve_damage(raw, weapon.damage_type, catalog.armor(session.player.armor()));
            let player_health = session.player.take_damage(mitigation.dealt);
            report.events.push(CombatEvent::OpponentHit {
                mitigation,
                player_health,
            });
            if player_health == 0 {
                session.player.die();
                report.events.push(CombatEvent::PlayerDefeated);
                tracing::info!("{} was slain by {}", session.player.name, self.opponent.title());
                self.finish(EncounterOutcome::Defeat);
            }
            return;
        }

        let pace = match action {
            PlayerAction::Attack | PlayerAction::Approach => ClosingPace::Steady,
            PlayerAction::Retreat | PlayerAction::Escape => ClosingPace::Pursuing,
            PlayerAction::Wait | PlayerAction::Heal => ClosingPace::Rushing,
        };
        let closed = self.distance.opponent_closes(self.opponent.speed(), pace, rng);
        report.events.push(CombatEvent::OpponentClosed {
            pace,
            closed,
            distance: self.distance,
        });
    }

    fn win(&mut self, session: &mut Session<'_>, report: &mut RoundReport, rng: &mut impl Rng) {
        let bounty = self.opponent.base_health() as i64;
        let gold = randint(bounty / 4, bounty, rng) as u32;
        let exp = randint(bounty / 2, bounty, rng) as u32;

        let player = &mut *session.player;
        player.gold = player.gold.saturating_add(gold);
        player.exp = player.exp.saturating_add(exp);
        let levels_gained = player.update_level(&session.constants.progression);
        let drops = roll_drops(session.catalog, &self.opponent, player, rng);

        report.events.push(CombatEvent::OpponentDefeated);
        tracing::info!(
            "{} defeated {} (+{} gold, +{} exp)",
            player.name,
            self.opponent.title(),
            gold,
            exp
        );
        self.finish(EncounterOutcome::Victory(Rewards {
            gold,
            exp,
            levels_gained,
            drops,
        }));
    }
}
