//! Shared fixtures for unit tests

use crate::catalog::Catalog;
use crate::config::PlayerConstants;
use crate::player::Player;

/// Level 1 player in Eastwatch with a Short Sword and Traveller's Cloak
pub(crate) fn player(catalog: &Catalog) -> Player {
    Player::new(
        "Ada",
        "Human",
        catalog.location_id("Eastwatch").unwrap(),
        catalog.weapon_id("Short Sword").unwrap(),
        catalog.armor_id("Traveller's Cloak").unwrap(),
        &PlayerConstants::default(),
        catalog,
    )
}
