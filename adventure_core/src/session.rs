//! Session - The context shared by every game operation
//!
//! Bundles the read-only catalog and constants with the one mutable player,
//! so operations take a single argument instead of reaching for globals.

use crate::catalog::{Catalog, Location};
use crate::config::GameConstants;
use crate::player::Player;

pub struct Session<'a> {
    pub catalog: &'a Catalog,
    pub constants: &'a GameConstants,
    pub player: &'a mut Player,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog, constants: &'a GameConstants, player: &'a mut Player) -> Self {
        Session {
            catalog,
            constants,
            player,
        }
    }

    /// Where the player currently is
    pub fn location(&self) -> &'a Location {
        self.catalog.location(self.player.location)
    }
}
