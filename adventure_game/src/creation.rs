//! New character wizard

use crate::console::{Console, MAX_ATTEMPTS};
use crate::ui;
use adventure_core::prelude::*;
use adventure_core::store::{validate_name, PlayerStore};
use std::io::{self, BufRead, Write};

fn cancelled<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<Option<Player>> {
    console.clear()?;
    console.say("Creation cancelled!")?;
    Ok(None)
}

/// Ask for a storable name, rejecting names already taken when `taken` says so
fn ask_name<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
    taken: impl Fn(&str) -> bool,
) -> io::Result<Option<String>> {
    for _ in 0..MAX_ATTEMPTS {
        let Some(name) = console.ask(prompt)? else {
            return Ok(None);
        };
        if let Err(e) = validate_name(&name) {
            console.say(e)?;
        } else if taken(&name) {
            console.say(format!("{} is already in use! Specify a unique name.", name))?;
        } else {
            return Ok(Some(name));
        }
    }
    Ok(None)
}

/// Walk the player through creating a character
///
/// Returns `None` if any step is cancelled.
pub fn create_player<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    catalog: &Catalog,
    constants: &GameConstants,
    store: &PlayerStore,
) -> io::Result<Option<Player>> {
    console.clear()?;
    console.heading("New Player Creation")?;

    let Some(name) = ask_name(console, "What is your name? : ", |name| store.contains(name))? else {
        return cancelled(console);
    };
    let Some(species) = ask_name(console, "What species are you? : ", |_| false)? else {
        return cancelled(console);
    };

    console.say("Would you rather have... ")?;
    let bonuses = [StarterBonus::Health, StarterBonus::Speed, StarterBonus::Gold];
    let Some(bonus) = console.choose(&bonuses, |bonus| {
        match bonus {
            StarterBonus::Health => "More starting health",
            StarterBonus::Speed => "More starting speed",
            StarterBonus::Gold => "More starting gold",
        }
        .to_string()
    })?
    else {
        return cancelled(console);
    };
    console.say("An excellent choice.")?;

    console.say("\nWhere would you like to start out?")?;
    let locations = catalog.starter_locations();
    let Some(&location) = console.choose(&locations, |id| ui::location_offer(catalog.location(*id)))? else {
        return cancelled(console);
    };
    console.say(format!("I knew someone from {} once.", catalog.location(location).name))?;

    console.say("\nNow, what weapon would you like to start with?")?;
    let weapons = catalog.starter_weapons();
    let Some(&weapon) = console.choose(&weapons, |id| ui::weapon_offer(catalog.weapon(*id)))? else {
        return cancelled(console);
    };
    console.say(format!(
        "The {} is a powerful tool in the hands of a competent warrior.",
        catalog.weapon(weapon).name
    ))?;

    console.say("\nFinally, you must choose your armor.")?;
    let armors = catalog.starter_armors();
    let Some(&armor) = console.choose(&armors, |id| ui::armor_offer(catalog.armor(*id)))? else {
        return cancelled(console);
    };
    console.say(format!(
        "Your new {} will serve you well, provided you don't overdo it.",
        catalog.armor(armor).name
    ))?;

    let mut player = Player::new(name, species, location, weapon, armor, &constants.player, catalog);
    player.apply_starter_bonus(*bonus, &constants.player, catalog);
    tracing::info!("Created {} the {}", player.name, player.species);
    Ok(Some(player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run(input: &str, store: &PlayerStore, catalog: &Catalog) -> (Option<Player>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false);
        let player = create_player(&mut console, catalog, &GameConstants::default(), store).unwrap();
        (player, String::from_utf8(console.into_output()).unwrap())
    }

    #[test]
    fn test_full_creation() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::builtin().unwrap();
        let store = PlayerStore::open_or_seed(&dir.path().join("players.csv"), &catalog).unwrap();

        // Name, species, health bonus, Millbrook, Hunting Bow, Leather Vest
        let (player, output) = run("Ada\nElf\n1\n2\n2\n2\n", &store, &catalog);
        let player = player.unwrap();

        assert_eq!(player.name, "Ada");
        assert_eq!(player.species, "Elf");
        assert_eq!(player.base_health(), 15);
        assert_eq!(player.health(), 15);
        assert_eq!(player.location, catalog.location_id("Millbrook").unwrap());
        assert_eq!(player.weapon(), catalog.weapon_id("Hunting Bow").unwrap());
        assert_eq!(player.armor(), catalog.armor_id("Leather Vest").unwrap());
        assert_eq!(player.status, PlayerStatus::Sleeping);
        assert!(player.is_new);
        assert!(output.contains("I knew someone from Millbrook once."));
    }

    #[test]
    fn test_taken_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::builtin().unwrap();
        let mut store = PlayerStore::open_or_seed(&dir.path().join("players.csv"), &catalog).unwrap();
        let (existing, _) = run("Ada\nElf\n3\n1\n1\n1\n", &store, &catalog);
        store.save(&mut existing.unwrap(), &catalog).unwrap();

        let (player, output) = run("Ada\nBea\nDwarf\n2\n1\n1\n1\n", &store, &catalog);
        assert!(output.contains("Ada is already in use!"));
        let player = player.unwrap();
        assert_eq!(player.name, "Bea");
        assert_eq!(player.base_speed(), 45);
    }

    #[test]
    fn test_cancel_mid_wizard() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::builtin().unwrap();
        let store = PlayerStore::open_or_seed(&dir.path().join("players.csv"), &catalog).unwrap();

        let (player, output) = run("Ada\nElf\n1\nq\n", &store, &catalog);
        assert!(player.is_none());
        assert!(output.contains("Creation cancelled!"));
    }
}
