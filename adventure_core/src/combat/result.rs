//! Round reports and encounter outcomes

use super::action::PlayerAction;
use super::distance::{ClosingPace, Distance};
use super::loot::LootDrop;
use crate::defense::Mitigation;

/// Something that happened during a round, in order
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    /// The player's weapon hit the opponent
    PlayerHit {
        mitigation: Mitigation,
        opponent_health: u32,
    },
    Retreated {
        outran: bool,
        distance: Distance,
    },
    Approached {
        distance: Distance,
    },
    Waited,
    Healed {
        amount: u32,
        health: u32,
    },
    Escaped {
        guaranteed: bool,
    },
    EscapeFailed {
        distance: Distance,
    },
    /// The opponent's weapon hit the player
    OpponentHit {
        mitigation: Mitigation,
        player_health: u32,
    },
    /// The opponent could not reach the player and moved closer instead
    OpponentClosed {
        pace: ClosingPace,
        closed: u32,
        distance: Distance,
    },
    OpponentDefeated,
    PlayerDefeated,
    /// The player walked away from the fight without a roll
    Disengaged,
}

/// Loot and progression earned by winning
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rewards {
    pub gold: u32,
    pub exp: u32,
    pub levels_gained: u32,
    /// Items offered to the player; equipping is the caller's choice
    pub drops: Vec<LootDrop>,
}

/// How an escape came about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeKind {
    /// A successful escape action
    Fled,
    /// The decision prompt was cancelled while in range
    Disengaged,
}

/// Terminal state of an encounter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncounterOutcome {
    Victory(Rewards),
    Defeat,
    Escaped(EscapeKind),
}

impl EncounterOutcome {
    pub fn is_victory(&self) -> bool {
        matches!(self, EncounterOutcome::Victory(_))
    }

    pub fn rewards(&self) -> Option<&Rewards> {
        match self {
            EncounterOutcome::Victory(rewards) => Some(rewards),
            _ => None,
        }
    }
}

/// Everything that happened in one round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// 1-based round number
    pub round: u32,
    pub action: PlayerAction,
    pub events: Vec<CombatEvent>,
    /// Set on the round that ended the encounter
    pub outcome: Option<EncounterOutcome>,
}

impl RoundReport {
    pub(crate) fn new(round: u32, action: PlayerAction) -> Self {
        RoundReport {
            round,
            action,
            events: Vec::new(),
            outcome: None,
        }
    }

    /// Damage the player dealt this round
    pub fn damage_dealt(&self) -> u32 {
        self.events
            .iter()
            .map(|event| match event {
                CombatEvent::PlayerHit { mitigation, .. } => mitigation.dealt,
                _ => 0,
            })
            .sum()
    }

    /// Damage the player took this round
    pub fn damage_taken(&self) -> u32 {
        self.events
            .iter()
            .map(|event| match event {
                CombatEvent::OpponentHit { mitigation, .. } => mitigation.dealt,
                _ => 0,
            })
            .sum()
    }

    /// Whether the opponent attacked this round
    pub fn opponent_attacked(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, CombatEvent::OpponentHit { .. }))
    }

    pub fn is_final(&self) -> bool {
        self.outcome.is_some()
    }
}
