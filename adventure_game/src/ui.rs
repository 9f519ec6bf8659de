//! Text rendering for menus, stats and combat
//!
//! Pure functions from game state to lines of text, so the wording can be
//! tested without a terminal.

use crate::flavor::plural;
use adventure_core::combat::{ClosingPace, CombatEvent, Rewards, RoundStatus};
use adventure_core::prelude::*;

pub fn location_offer(location: &Location) -> String {
    format!("{} in the country of {}", location.name, location.country)
}

pub fn weapon_offer(weapon: &Weapon) -> String {
    format!(
        "{}, a {} weapon dealing between {} and {} {} damage with a reach of {} meters.",
        weapon.name, weapon.kind, weapon.damage.min, weapon.damage.max, weapon.damage_type, weapon.range
    )
}

pub fn armor_offer(armor: &Armor) -> String {
    format!(
        "{} which slows you down by {:.0}%, but negates {:.0}% of incoming {} damage.",
        armor.name,
        armor.speed_penalty_percent(),
        armor.protection_percent(),
        armor.protection_type
    )
}

fn percent(value: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    (value as f64 / max as f64 * 100.0).round() as u32
}

/// The stats screen
pub fn player_stats(player: &Player, catalog: &Catalog) -> Vec<String> {
    let weapon = catalog.weapon(player.weapon());
    let armor = catalog.armor(player.armor());
    let mut lines = Vec::new();

    if player.is_dead() {
        lines.push(format!("{} the {} is dead!", player.name, player.species));
    } else {
        lines.push(format!(
            "{} the {} is at {}",
            player.name,
            player.species,
            catalog.location(player.location).name
        ));
        lines.push(format!(
            "They are level {} with {} experience and have {} {}",
            player.level,
            player.exp,
            player.gold,
            plural("gold pieces", player.gold)
        ));
    }
    lines.push(format!(
        "Weapon: {}, {} to {} {} damage, reach {}",
        weapon.name, weapon.damage.min, weapon.damage.max, weapon.damage_type, weapon.range
    ));
    lines.push(format!(
        "Armor: {}, slows {:.0}% and negates {:.0}% of {} damage",
        armor.name,
        armor.speed_penalty_percent(),
        armor.protection_percent(),
        armor.protection_type
    ));
    lines.push(format!(
        "Health: {}/{} ({}%)",
        player.health(),
        player.base_health(),
        percent(player.health(), player.base_health())
    ));
    lines.push(format!(
        "Speed: {}/{} ({}%)",
        player.speed(),
        player.base_speed(),
        percent(player.speed(), player.base_speed())
    ));
    lines
}

/// One line per stored player
pub fn scoreboard(players: &[Player], catalog: &Catalog) -> Vec<String> {
    if players.is_empty() {
        return vec!["No adventurers yet.".to_string()];
    }
    players
        .iter()
        .map(|player| {
            let state = if player.is_dead() {
                "fell in battle".to_string()
            } else {
                format!("is at {}", catalog.location(player.location).name)
            };
            format!(
                "{} the {} {}. They are level {}.",
                player.name, player.species, state, player.level
            )
        })
        .collect()
}

pub fn round_status(status: &RoundStatus) -> Vec<String> {
    let reach = if status.in_range {
        "within your reach"
    } else {
        "out of your reach"
    };
    vec![
        format!(
            "{}: {}/{} HP, speed {}, wielding {}",
            status.player_title,
            status.player_health,
            status.player_base_health,
            status.player_speed,
            status.player_weapon
        ),
        format!(
            "{}: {}/{} HP, speed {}, wielding {}",
            status.opponent_title,
            status.opponent_health,
            status.opponent_base_health,
            status.opponent_speed,
            status.opponent_weapon
        ),
        format!("Distance: {} ({})", status.distance, reach),
    ]
}

/// Menu label for an action; `heal` is what a heal would restore
pub fn action_label(action: PlayerAction, status: &RoundStatus, heal: u32) -> String {
    let opponent = &status.opponent_title;
    match action {
        PlayerAction::Attack => format!("Attack {} with your {}!", opponent, status.player_weapon),
        PlayerAction::Retreat => "Retreat and consider your options".to_string(),
        PlayerAction::Approach => format!("Close the distance to try to attack {}", opponent),
        PlayerAction::Wait => format!("Wait for {} to approach", opponent),
        PlayerAction::Escape => "Escape back to safety".to_string(),
        PlayerAction::Heal => format!("Quickly patch your wounds (+{} HP)", heal),
    }
}

/// Narrate one combat event; `status` is the snapshot from before the round
pub fn event_line(event: &CombatEvent, status: &RoundStatus) -> String {
    let opponent = &status.opponent_title;
    match event {
        CombatEvent::PlayerHit { mitigation, .. } if mitigation.blocked > 0 => format!(
            "You hit {} with your {} for {} damage ({} blocked by armor)!",
            opponent, status.player_weapon, mitigation.dealt, mitigation.blocked
        ),
        CombatEvent::PlayerHit { mitigation, .. } => format!(
            "You hit {} with your {} for {} damage!",
            opponent, status.player_weapon, mitigation.dealt
        ),
        CombatEvent::Retreated { outran: true, distance } => format!(
            "You retreat and gain some ground. {} is now {} away.",
            opponent, distance
        ),
        CombatEvent::Retreated { outran: false, .. } => {
            format!("You try to retreat, but {} is faster than you!", opponent)
        }
        CombatEvent::Approached { distance } => {
            format!("You close the distance. {} is now {} away.", opponent, distance)
        }
        CombatEvent::Waited => format!("You waited for {} to close the distance!", opponent),
        CombatEvent::Healed { amount, health } => {
            format!("You patch your wounds for {} HP and are at {} HP.", amount, health)
        }
        CombatEvent::Escaped { .. } => {
            format!("You run away as fast as you can, escaping {}!", opponent)
        }
        CombatEvent::EscapeFailed { .. } => format!(
            "You try to run away, but {} is too fast to escape that easily!",
            opponent
        ),
        CombatEvent::OpponentHit { mitigation, .. } => format!(
            "{} angrily attacks you with their {}! They dealt {} damage!",
            opponent, status.opponent_weapon, mitigation.dealt
        ),
        CombatEvent::OpponentClosed { pace, distance, .. } => match pace {
            ClosingPace::Steady => format!(
                "{} can't reach you with their {}, but they are closing range rapidly! ({} away)",
                opponent, status.opponent_weapon, distance
            ),
            ClosingPace::Pursuing => format!(
                "Luckily, {} is still too far away to attack you! They are gaining still! ({} away)",
                opponent, distance
            ),
            ClosingPace::Rushing => format!(
                "Fortunately, {} is still too far away to attack you! However, they are rapidly gaining! ({} away)",
                opponent, distance
            ),
        },
        CombatEvent::OpponentDefeated => format!("You defeated {}!", opponent),
        CombatEvent::PlayerDefeated => format!("You were slain by {}...", opponent),
        CombatEvent::Disengaged => format!("You back away from {} and leave the fight.", opponent),
    }
}

pub fn rewards_lines(rewards: &Rewards, player: &Player, adjective: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "What a {} fight! You earned {} {} and {} experience.",
        adjective,
        rewards.gold,
        plural("gold pieces", rewards.gold),
        rewards.exp
    )];
    if rewards.levels_gained > 0 {
        lines.push(format!(
            "You feel stronger! You are now level {} with {} max health.",
            player.level,
            player.base_health()
        ));
    }
    lines
}

/// Question asked when a defeated opponent leaves an item behind
pub fn drop_offer(drop: LootDrop, player: &Player, catalog: &Catalog) -> String {
    let detail = match drop {
        LootDrop::Weapon(id) => weapon_offer(catalog.weapon(id)),
        LootDrop::Armor(id) => armor_offer(catalog.armor(id)),
    };
    format!(
        "The opponent dropped {}\nReplace your {} with it? (Y/N): ",
        detail,
        drop.replaces(player, catalog)
    )
}
