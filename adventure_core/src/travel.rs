//! Travel between locations
//!
//! Setting out moves the player immediately and marks them `Travelling`; the
//! journey completes when the next session starts.

use crate::catalog::Catalog;
use crate::player::Player;
use crate::types::{LocationId, PlayerStatus};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TravelError {
    #[error("Already in {0}")]
    AlreadyThere(String),
    #[error("{0} is dead and cannot travel")]
    Dead(String),
}

/// A place the player can travel to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub location: LocationId,
    /// Straight-line distance from the current location
    pub distance: u32,
}

/// Every other location, nearest first
pub fn destinations(catalog: &Catalog, player: &Player) -> Vec<Destination> {
    let here = catalog.location(player.location);
    let mut destinations: Vec<Destination> = catalog
        .locations()
        .filter(|(id, _)| *id != player.location)
        .map(|(id, location)| Destination {
            location: id,
            distance: here.distance_to(location),
        })
        .collect();
    destinations.sort_by_key(|destination| (destination.distance, destination.location));
    destinations
}

/// Set out for `destination`
pub fn begin_travel(
    player: &mut Player,
    catalog: &Catalog,
    destination: LocationId,
) -> Result<(), TravelError> {
    if player.is_dead() {
        return Err(TravelError::Dead(player.name.clone()));
    }
    if player.location == destination {
        return Err(TravelError::AlreadyThere(catalog.location(destination).name.clone()));
    }
    player.location = destination;
    player.status = PlayerStatus::Travelling;
    tracing::info!("{} set out for {}", player.name, catalog.location(destination).name);
    Ok(())
}

/// Finish a journey in progress. Returns whether the player was travelling.
pub fn arrive(player: &mut Player) -> bool {
    if player.status != PlayerStatus::Travelling {
        return false;
    }
    player.status = PlayerStatus::Idle;
    true
}
