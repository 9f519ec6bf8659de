//! Game flow - Main menu, loaded character menu and the idle loop

use crate::console::{Console, MAX_ATTEMPTS};
use crate::creation::create_player;
use crate::flavor::{pick, PLACES_FIGHT, PLACES_SLEEPING};
use crate::prompt::{victory_lines, TerminalPrompt};
use crate::ui;
use adventure_core::prelude::*;
use adventure_core::shop::{self, Ware};
use adventure_core::store::PlayerStore;
use adventure_core::travel;
use adventure_core::EncounterError;
use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::{BufRead, Write};

/// What the caller should do after a menu returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App<R, W> {
    catalog: Catalog,
    constants: GameConstants,
    store: PlayerStore,
    console: Console<R, W>,
    rng: ChaCha8Rng,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(
        catalog: Catalog,
        constants: GameConstants,
        store: PlayerStore,
        console: Console<R, W>,
        rng: ChaCha8Rng,
    ) -> Self {
        App {
            catalog,
            constants,
            store,
            console,
            rng,
        }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    pub fn run(&mut self) -> Result<()> {
        self.console.clear()?;
        self.console.heading("Adventure")?;

        loop {
            let choice = self.console.menu(&[
                "Start a new game",
                "Load a saved game",
                "View the scoreboard",
                "Quit",
            ])?;
            let player = match choice {
                Some(1) => create_player(&mut self.console, &self.catalog, &self.constants, &self.store)?,
                Some(2) => self.find_saved_player()?,
                Some(3) => {
                    self.console.clear()?;
                    self.console.heading("Scoreboard")?;
                    let lines = ui::scoreboard(self.store.players(), &self.catalog);
                    self.console.say_all(&lines)?;
                    continue;
                }
                _ => break,
            };
            if let Some(player) = player {
                if self.loaded_menu(player)? == Flow::Quit {
                    break;
                }
            }
        }

        self.console.say("Farewell, brave warrior.")?;
        Ok(())
    }

    fn find_saved_player(&mut self) -> Result<Option<Player>> {
        self.console.clear()?;
        if self.store.is_empty() {
            self.console.say("No players to load.")?;
            return Ok(None);
        }
        for _ in 0..MAX_ATTEMPTS {
            let Some(name) = self.console.ask("What is your name? : ")? else {
                self.console.say("Menu cancelled!")?;
                return Ok(None);
            };
            if let Some(player) = self.store.find(&name) {
                self.console.say(format!("{} found!", name))?;
                return Ok(Some(player.clone()));
            }
            self.console
                .say("Name not found. Specify a name that has been used.")?;
        }
        Ok(None)
    }

    fn loaded_menu(&mut self, mut player: Player) -> Result<Flow> {
        loop {
            let choice = self.console.menu(&[
                format!("Play as {}", player.name),
                "View stats".to_string(),
                "Save".to_string(),
                "Save and quit".to_string(),
            ])?;
            match choice {
                Some(1) => self.play(&mut player)?,
                Some(2) => {
                    self.console.clear()?;
                    self.console.heading("Player Stats")?;
                    let lines = ui::player_stats(&player, &self.catalog);
                    self.console.say_all(&lines)?;
                }
                Some(3) => self.save(&mut player)?,
                Some(4) => {
                    self.save(&mut player)?;
                    return Ok(Flow::Quit);
                }
                _ => {
                    if player.is_new {
                        self.console
                            .say(format!("{} was never saved and is lost to history.", player.name))?;
                    }
                    return Ok(Flow::Continue);
                }
            }
        }
    }

    fn save(&mut self, player: &mut Player) -> Result<()> {
        match self.store.save(player, &self.catalog) {
            Ok(()) => self.console.say(format!("Saved {}.", player.name))?,
            Err(e) => {
                tracing::error!("Failed to save {}: {}", player.name, e);
                self.console.say(format!("Could not save: {}", e))?;
            }
        }
        Ok(())
    }

    /// Resume the character according to how their last session ended
    fn play(&mut self, player: &mut Player) -> Result<()> {
        let here = self.catalog.location(player.location).name.clone();
        self.console.clear()?;
        if player.is_new {
            self.console
                .say(format!("Welcome to {}, brave warrior.", here))?;
        } else {
            self.console
                .say(format!("Welcome back to {}, brave warrior.", here))?;
        }

        if player.is_dead() {
            self.console.say(format!(
                "{} has passed away! Cannot play with this character.",
                player.name
            ))?;
            return Ok(());
        }

        match player.status {
            PlayerStatus::Sleeping => {
                let place = pick(PLACES_SLEEPING, &mut self.rng);
                self.console
                    .say(format!("You were sleeping {}, but you just woke up.", place))?;
                player.status = PlayerStatus::Idle;
            }
            PlayerStatus::Fighting => {
                self.console.say("You collapsed in the fight you were in!")?;
                self.console.say("You wake up near where you left off.")?;
                player.status = PlayerStatus::Idle;
            }
            PlayerStatus::Travelling => {
                travel::arrive(player);
                self.console
                    .say(format!("After a long journey you arrive in {}.", here))?;
            }
            PlayerStatus::Resting | PlayerStatus::Idle | PlayerStatus::Dead => {}
        }

        self.idle_loop(player)
    }

    fn idle_loop(&mut self, player: &mut Player) -> Result<()> {
        loop {
            if player.is_dead() {
                self.console.say(format!(
                    "{} has passed away! Cannot play with this character.",
                    player.name
                ))?;
                return Ok(());
            }

            let here = self.catalog.location(player.location).name.clone();
            let fight_place = pick(PLACES_FIGHT, &mut self.rng);
            let sleep_place = pick(PLACES_SLEEPING, &mut self.rng);

            self.console
                .say("You have a couple of options on how to proceed: ")?;
            let choice = self.console.menu(&[
                format!("Go to the {} of {} to fight", fight_place, here),
                format!("Return to {} to sleep {}", here, sleep_place),
                "Travel to a distant city".to_string(),
                format!("Visit the market of {}", here),
            ])?;

            match choice {
                Some(1) => self.fight(player, fight_place)?,
                Some(2) => {
                    self.console.clear()?;
                    player.status = PlayerStatus::Sleeping;
                    self.console
                        .say(format!("You decide to return to {} for the night.", here))?;
                    if !self
                        .console
                        .yes_no("Would you like to continue playing? (Y/N): ")?
                    {
                        return Ok(());
                    }
                    self.console.say("You wake up, ready for another day.")?;
                    player.status = PlayerStatus::Idle;
                }
                Some(3) => {
                    if self.travel(player)? {
                        return Ok(());
                    }
                }
                Some(4) => self.market(player)?,
                _ => return Ok(()),
            }
        }
    }

    fn fight(&mut self, player: &mut Player, place: &str) -> Result<()> {
        self.console.clear()?;
        let flavor = ChaCha8Rng::seed_from_u64(self.rng.gen());
        let mut prompt = TerminalPrompt::new(
            &mut self.console,
            self.constants.combat.heal_amount,
            place,
            flavor,
        );
        let mut session = Session::new(&self.catalog, &self.constants, player);
        let result = run_encounters(&mut session, &mut prompt, &mut self.rng);
        prompt.finish()?;

        match result {
            Ok(summary) => {
                let lines = victory_lines(&summary, player, &mut self.rng);
                self.console.say_all(&lines)?;
                if summary.died {
                    self.console
                        .say(format!("{} has passed away!", player.name))?;
                    self.save(player)?;
                }
            }
            Err(EncounterError::NoEligibleOpponent(_)) => {
                let here = &self.catalog.location(player.location).name;
                self.console.say(format!(
                    "The {} of {} are quiet. Nothing there is willing to fight you.",
                    place, here
                ))?;
            }
            Err(e) => self.console.say(e)?,
        }
        Ok(())
    }

    /// Returns whether the player set out on a journey
    fn travel(&mut self, player: &mut Player) -> Result<bool> {
        self.console.clear()?;
        let catalog = &self.catalog;
        let destinations = travel::destinations(catalog, player);
        self.console.say("Where would you like to travel?")?;
        let chosen = self.console.choose(&destinations, |destination| {
            let location = catalog.location(destination.location);
            format!(
                "{} in the country of {} ({} leagues away)",
                location.name, location.country, destination.distance
            )
        })?;
        let Some(destination) = chosen else {
            return Ok(false);
        };

        match travel::begin_travel(player, catalog, destination.location) {
            Ok(()) => {
                self.console.say(format!(
                    "You set out for {}. You will arrive when you next take up your adventure.",
                    catalog.location(destination.location).name
                ))?;
                Ok(true)
            }
            Err(e) => {
                self.console.say(e)?;
                Ok(false)
            }
        }
    }

    fn market(&mut self, player: &mut Player) -> Result<()> {
        self.console.clear()?;
        loop {
            let here = &self.catalog.location(player.location).name;
            self.console.heading(&format!("Market of {}", here))?;
            self.console
                .say(format!("You have {} gold.", player.gold))?;

            let wares = shop::offers(&self.catalog, player);
            let mut labels: Vec<String> = wares
                .iter()
                .map(|ware| {
                    let detail = match ware {
                        Ware::Weapon(id) => ui::weapon_offer(self.catalog.weapon(*id)),
                        Ware::Armor(id) => ui::armor_offer(self.catalog.armor(*id)),
                    };
                    format!("[{} gold] {}", ware.price(&self.catalog), detail)
                })
                .collect();
            let quote = shop::heal_quote(player, &self.constants.shop);
            labels.push(if player.is_hurt() {
                format!("Pay a healer ({} gold for {} HP)", quote.cost, quote.amount)
            } else {
                "Pay a healer (you are not hurt)".to_string()
            });
            labels.push("Leave the market".to_string());

            match self.console.menu(&labels)? {
                Some(choice) if choice <= wares.len() => {
                    let ware = wares[choice - 1];
                    match shop::buy(player, &self.catalog, ware) {
                        Ok(()) => self
                            .console
                            .say(format!("You bought the {}.", ware.name(&self.catalog)))?,
                        Err(e) => self.console.say(e)?,
                    }
                }
                Some(choice) if choice == wares.len() + 1 => {
                    match shop::buy_healing(player, &self.constants.shop) {
                        Ok(quote) => self.console.say(format!(
                            "The healer restores {} HP for {} gold.",
                            quote.amount, quote.cost
                        ))?,
                        Err(e) => self.console.say(e)?,
                    }
                }
                _ => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn app(input: &str, dir: &TempDir) -> App<Cursor<Vec<u8>>, Vec<u8>> {
        let catalog = Catalog::builtin().unwrap();
        let store = PlayerStore::open_or_seed(&dir.path().join("players.csv"), &catalog).unwrap();
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false);
        App::new(
            catalog,
            GameConstants::default(),
            store,
            console,
            ChaCha8Rng::seed_from_u64(7),
        )
    }

    fn output(app: App<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(app.into_console().into_output()).unwrap()
    }

    #[test]
    fn test_quit_immediately() {
        let dir = TempDir::new().unwrap();
        let mut app = app("4\n", &dir);
        app.run().unwrap();
        assert!(output(app).contains("Farewell"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let dir = TempDir::new().unwrap();
        let mut app = app("", &dir);
        app.run().unwrap();
    }

    #[test]
    fn test_load_with_no_players() {
        let dir = TempDir::new().unwrap();
        let mut app = app("2\n4\n", &dir);
        app.run().unwrap();
        assert!(output(app).contains("No players to load."));
    }

    #[test]
    fn test_create_save_and_quit() {
        let dir = TempDir::new().unwrap();
        // New game, wizard answers, then "Save and quit"
        let mut app = app("1\nAda\nHuman\n3\n1\n1\n1\n4\n", &dir);
        app.run().unwrap();

        let catalog = Catalog::builtin().unwrap();
        let store = PlayerStore::open_or_seed(&dir.path().join("players.csv"), &catalog).unwrap();
        let ada = store.find("Ada").unwrap();
        assert_eq!(ada.gold, 20);
        assert_eq!(ada.status, PlayerStatus::Sleeping);
    }

    #[test]
    fn test_wake_sleep_and_stop() {
        let dir = TempDir::new().unwrap();
        // Create, play, sleep and stop, then save and quit
        let mut app = app("1\nAda\nHuman\n1\n1\n1\n1\n1\n2\nn\n4\n", &dir);
        app.run().unwrap();
        let text = output(app);
        assert!(text.contains("Welcome to Eastwatch, brave warrior."));
        assert!(text.contains("but you just woke up."));
        assert!(text.contains("You decide to return to Eastwatch for the night."));

        let catalog = Catalog::builtin().unwrap();
        let store = PlayerStore::open_or_seed(&dir.path().join("players.csv"), &catalog).unwrap();
        assert_eq!(store.find("Ada").unwrap().status, PlayerStatus::Sleeping);
    }

    #[test]
    fn test_travel_then_arrive() {
        let dir = TempDir::new().unwrap();
        // Create, play, travel to the nearest city (Millbrook), play again to arrive,
        // stop at the idle menu, then save and quit
        let mut app = app("1\nAda\nHuman\n1\n1\n1\n1\n1\n3\n1\n1\nq\n4\n", &dir);
        app.run().unwrap();
        let text = output(app);
        assert!(text.contains("You set out for Millbrook."));
        assert!(text.contains("After a long journey you arrive in Millbrook."));

        let catalog = Catalog::builtin().unwrap();
        let store = PlayerStore::open_or_seed(&dir.path().join("players.csv"), &catalog).unwrap();
        let ada = store.find("Ada").unwrap();
        assert_eq!(ada.location, catalog.location_id("Millbrook").unwrap());
        assert_eq!(ada.status, PlayerStatus::Idle);
    }

    #[test]
    fn test_market_purchase() {
        let dir = TempDir::new().unwrap();
        // Gold bonus (20 gold), play, visit the market and buy the first ware
        // (Hunting Bow for 15), leave, stop, save and quit
        let mut app = app("1\nAda\nHuman\n3\n1\n1\n1\n1\n4\n1\nq\nq\n4\n", &dir);
        app.run().unwrap();
        let text = output(app);
        assert!(text.contains("You bought the Hunting Bow."));

        let catalog = Catalog::builtin().unwrap();
        let store = PlayerStore::open_or_seed(&dir.path().join("players.csv"), &catalog).unwrap();
        let ada = store.find("Ada").unwrap();
        assert_eq!(ada.gold, 5);
        assert_eq!(ada.weapon(), catalog.weapon_id("Hunting Bow").unwrap());
    }
}
