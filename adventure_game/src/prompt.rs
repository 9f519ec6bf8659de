//! Terminal implementation of the combat prompt

use crate::console::Console;
use crate::flavor::{pick, ADJECTIVES_BAD, ADJECTIVES_GOOD};
use crate::ui;
use adventure_core::combat::{EncounterOutcome, EscapeKind, RoundStatus};
use adventure_core::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::io::{self, BufRead, Write};

/// Drives fights through the console
///
/// Prompt methods cannot return I/O errors, so the first one is kept and the
/// pending decision is treated as cancelled. The caller checks
/// [`TerminalPrompt::finish`] once the fight is over.
pub struct TerminalPrompt<'c, R, W> {
    console: &'c mut Console<R, W>,
    heal_amount: u32,
    fight_place: String,
    rng: ChaCha8Rng,
    last_status: Option<RoundStatus>,
    error: Option<io::Error>,
}

impl<'c, R: BufRead, W: Write> TerminalPrompt<'c, R, W> {
    pub fn new(console: &'c mut Console<R, W>, heal_amount: u32, fight_place: &str, rng: ChaCha8Rng) -> Self {
        TerminalPrompt {
            console,
            heal_amount,
            fight_place: fight_place.to_string(),
            rng,
            last_status: None,
            error: None,
        }
    }

    /// Surface the first I/O error hit while prompting
    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn keep<T>(&mut self, result: io::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!("Terminal error during fight: {}", error);
                if self.error.is_none() {
                    self.error = Some(error);
                }
                None
            }
        }
    }

    fn say_lines(&mut self, lines: &[String]) {
        let result = self.console.say_all(lines);
        self.keep(result);
    }
}

impl<'c, R: BufRead, W: Write> CombatPrompt for TerminalPrompt<'c, R, W> {
    fn encounter_started(&mut self, number: u32, status: &RoundStatus) {
        let adjective = pick(ADJECTIVES_BAD, &mut self.rng);
        let line = if number == 1 {
            format!(
                "You venture into the {} and run into {}, a truly {} foe wielding a {}!",
                self.fight_place, status.opponent_title, adjective, status.opponent_weapon
            )
        } else {
            format!(
                "Another {} foe appears: {}, wielding a {}!",
                adjective, status.opponent_title, status.opponent_weapon
            )
        };
        self.say_lines(&[line]);
        self.last_status = Some(status.clone());
    }

    fn choose_action(&mut self, status: &RoundStatus, actions: &[PlayerAction]) -> Option<PlayerAction> {
        self.last_status = Some(status.clone());
        let heal = self
            .heal_amount
            .min(status.player_base_health.saturating_sub(status.player_health));

        let result = self.console.heading(&format!("Round {}", status.round));
        self.keep(result)?;
        self.say_lines(&ui::round_status(status));

        let labels: Vec<String> = actions
            .iter()
            .map(|action| ui::action_label(*action, status, heal))
            .collect();
        let result = self.console.menu(&labels);
        let choice = self.keep(result)??;
        let result = self.console.clear();
        self.keep(result);
        actions.get(choice - 1).copied()
    }

    fn round_played(&mut self, report: &RoundReport) {
        let Some(status) = self.last_status.clone() else {
            return;
        };
        let lines: Vec<String> = report
            .events
            .iter()
            .map(|event| ui::event_line(event, &status))
            .collect();
        self.say_lines(&lines);
    }

    fn encounter_ended(&mut self, outcome: &EncounterOutcome) {
        let lines = match outcome {
            EncounterOutcome::Victory(_) => Vec::new(),
            EncounterOutcome::Defeat => vec!["Your adventure ends here.".to_string()],
            EncounterOutcome::Escaped(EscapeKind::Fled) => {
                vec!["You catch your breath somewhere safe.".to_string()]
            }
            EncounterOutcome::Escaped(EscapeKind::Disengaged) => {
                vec!["You leave the fight behind.".to_string()]
            }
        };
        self.say_lines(&lines);
    }

    fn offer_drop(&mut self, drop: LootDrop, player: &Player, catalog: &Catalog) -> bool {
        let question = ui::drop_offer(drop, player, catalog);
        let result = self.console.yes_no(&question);
        let accepted = self.keep(result).unwrap_or(false);
        if accepted {
            self.say_lines(&[format!("You equip the {}.", drop.name(catalog))]);
        }
        accepted
    }

    fn continue_fighting(&mut self, location: &str) -> bool {
        let question = format!("Keep fighting in the {} of {}? (Y/N): ", self.fight_place, location);
        let result = self.console.yes_no(&question);
        self.keep(result).unwrap_or(false)
    }
}

/// Lines summarising a fight once the driver returns
pub fn victory_lines(
    summary: &FightSummary,
    player: &Player,
    rng: &mut ChaCha8Rng,
) -> Vec<String> {
    if summary.victories == 0 {
        return Vec::new();
    }
    let rewards = adventure_core::combat::Rewards {
        gold: summary.gold,
        exp: summary.exp,
        levels_gained: summary.levels_gained,
        drops: Vec::new(),
    };
    ui::rewards_lines(&rewards, player, pick(ADJECTIVES_GOOD, rng))
}
