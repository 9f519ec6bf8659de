//! Catalog - Immutable game data loaded once at startup
//!
//! Weapons, armor, creatures and locations live in indexed tables. Everything
//! else in the crate refers to them through typed ids, so a record can never
//! be modified or duplicated once the game is running.

mod location;
pub mod rows;

pub use location::Location;
pub use rows::{Record, RowTable};

use crate::creature::Creature;
use crate::equipment::{Armor, Availability, DamageRange, Weapon};
use crate::types::{ArmorId, CreatureId, DamageType, LocationId, WeaponId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const FILE_LOCATIONS: &str = "locations.csv";
pub const FILE_WEAPONS: &str = "weapons.csv";
pub const FILE_ARMORS: &str = "armors.csv";
pub const FILE_CREATURES: &str = "creatures.csv";

/// Error loading catalog data
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read '{path}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("{file} has no header row")]
    Empty { file: String },
    #[error("{file}: missing column '{column}'")]
    MissingColumn { file: String, column: String },
    #[error("{file} line {line}: invalid {column} '{value}': {reason}")]
    InvalidValue {
        file: String,
        line: usize,
        column: String,
        value: String,
        reason: String,
    },
    #[error("{file} line {line}: unknown {kind} '{name}'")]
    UnknownReference {
        file: String,
        line: usize,
        kind: &'static str,
        name: String,
    },
    #[error("{file} line {line}: duplicate name '{name}'")]
    DuplicateName {
        file: String,
        line: usize,
        name: String,
    },
}

/// Raw text of the four data files
#[derive(Debug, Clone, Copy)]
pub struct CatalogSources<'a> {
    pub locations: &'a str,
    pub weapons: &'a str,
    pub armors: &'a str,
    pub creatures: &'a str,
}

impl CatalogSources<'static> {
    /// The data files bundled with the crate
    pub fn builtin() -> Self {
        CatalogSources {
            locations: include_str!("../../data/locations.csv"),
            weapons: include_str!("../../data/weapons.csv"),
            armors: include_str!("../../data/armors.csv"),
            creatures: include_str!("../../data/creatures.csv"),
        }
    }
}

/// Name-indexed table of catalog records
#[derive(Debug, Clone)]
struct Table<T> {
    entries: Vec<T>,
    by_name: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn insert(&mut self, name: &str, entry: T, record: &Record<'_>) -> Result<usize, CatalogError> {
        if self.by_name.contains_key(name) {
            return Err(CatalogError::DuplicateName {
                file: record.file().to_string(),
                line: record.line(),
                name: name.to_string(),
            });
        }
        let index = self.entries.len();
        self.entries.push(entry);
        self.by_name.insert(name.to_string(), index);
        Ok(index)
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }
}

/// All static game data
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locations: Table<Location>,
    weapons: Table<Weapon>,
    armors: Table<Armor>,
    creatures: Table<Creature>,
}

impl Catalog {
    /// Load all data files from a directory
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|error| CatalogError::Io { error, path })
        };

        let locations = read(FILE_LOCATIONS)?;
        let weapons = read(FILE_WEAPONS)?;
        let armors = read(FILE_ARMORS)?;
        let creatures = read(FILE_CREATURES)?;

        let catalog = Self::from_sources(CatalogSources {
            locations: &locations,
            weapons: &weapons,
            armors: &armors,
            creatures: &creatures,
        })?;

        tracing::info!(
            "Loaded catalog from {}: {} locations, {} weapons, {} armors, {} creatures",
            dir.display(),
            catalog.locations.entries.len(),
            catalog.weapons.entries.len(),
            catalog.armors.entries.len(),
            catalog.creatures.entries.len()
        );
        Ok(catalog)
    }

    /// The catalog bundled with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_sources(CatalogSources::builtin())
    }

    /// Parse the catalog from file contents
    ///
    /// Creatures are loaded last since they refer to weapons and armor by name.
    pub fn from_sources(sources: CatalogSources<'_>) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();
        catalog.load_locations(&RowTable::parse(FILE_LOCATIONS, sources.locations)?)?;
        catalog.load_weapons(&RowTable::parse(FILE_WEAPONS, sources.weapons)?)?;
        catalog.load_armors(&RowTable::parse(FILE_ARMORS, sources.armors)?)?;
        catalog.load_creatures(&RowTable::parse(FILE_CREATURES, sources.creatures)?)?;
        Ok(catalog)
    }

    fn load_locations(&mut self, table: &RowTable) -> Result<(), CatalogError> {
        table.require_columns(&["name", "country", "position", "starter"])?;
        for record in table.records() {
            let name = record.text("name")?;
            let location = Location {
                name: name.to_string(),
                country: record.text("country")?.to_string(),
                position: record.pair("position")?,
                starter: record.flag("starter")?,
            };
            self.locations.insert(name, location, &record)?;
        }
        Ok(())
    }

    fn load_weapons(&mut self, table: &RowTable) -> Result<(), CatalogError> {
        table.require_columns(&["name", "type", "range", "damageRange", "damageType", "starter"])?;
        for record in table.records() {
            let name = record.text("name")?;
            let (min, max) = record.pair::<u32>("damageRange")?;
            let weapon = Weapon {
                name: name.to_string(),
                kind: record.text("type")?.to_string(),
                damage: DamageRange::new(min, max),
                range: record.parse("range")?,
                damage_type: record.parse::<DamageType>("damageType")?,
                starter: record.flag("starter")?,
                player_usable: record.flag_or("player", true)?,
                availability: availability(&record)?,
            };
            self.weapons.insert(name, weapon, &record)?;
        }
        Ok(())
    }

    fn load_armors(&mut self, table: &RowTable) -> Result<(), CatalogError> {
        table.require_columns(&[
            "name",
            "speedPenalty",
            "protection",
            "protectionType",
            "starter",
            "player",
        ])?;
        for record in table.records() {
            let name = record.text("name")?;
            let armor = Armor {
                name: name.to_string(),
                protection: fraction(&record, "protection")?,
                speed_penalty: fraction(&record, "speedPenalty")?,
                protection_type: record.parse::<DamageType>("protectionType")?,
                starter: record.flag("starter")?,
                player_usable: record.flag("player")?,
                availability: availability(&record)?,
            };
            self.armors.insert(name, armor, &record)?;
        }
        Ok(())
    }

    fn load_creatures(&mut self, table: &RowTable) -> Result<(), CatalogError> {
        table.require_columns(&[
            "name",
            "species",
            "baseHealth",
            "baseSpeed",
            "armor",
            "weapon",
            "friendly",
        ])?;
        for record in table.records() {
            let name = record.text("name")?;
            let base_health: u32 = record.parse("baseHealth")?;
            if base_health == 0 {
                return Err(record.invalid("baseHealth", "0", "must be positive"));
            }
            let creature = Creature {
                name: name.to_string(),
                species: record.text("species")?.to_string(),
                base_health,
                base_speed: record.parse("baseSpeed")?,
                armor: self.resolve_armor(&record, "armor")?,
                weapon: self.resolve_weapon(&record, "weapon")?,
                friendly: record.flag("friendly")?,
            };
            self.creatures.insert(name, creature, &record)?;
        }
        Ok(())
    }

    /// Resolve a weapon name in `column`, failing with the row's position
    pub fn resolve_weapon(&self, record: &Record<'_>, column: &str) -> Result<WeaponId, CatalogError> {
        let name = record.text(column)?;
        self.weapon_id(name)
            .ok_or_else(|| unknown(record, "weapon", name))
    }

    pub fn resolve_armor(&self, record: &Record<'_>, column: &str) -> Result<ArmorId, CatalogError> {
        let name = record.text(column)?;
        self.armor_id(name).ok_or_else(|| unknown(record, "armor", name))
    }

    pub fn resolve_location(
        &self,
        record: &Record<'_>,
        column: &str,
    ) -> Result<LocationId, CatalogError> {
        let name = record.text(column)?;
        self.location_id(name)
            .ok_or_else(|| unknown(record, "location", name))
    }

    // === Lookups ===

    pub fn weapon(&self, id: WeaponId) -> &Weapon {
        &self.weapons.entries[id.0]
    }

    pub fn armor(&self, id: ArmorId) -> &Armor {
        &self.armors.entries[id.0]
    }

    pub fn creature(&self, id: CreatureId) -> &Creature {
        &self.creatures.entries[id.0]
    }

    pub fn location(&self, id: LocationId) -> &Location {
        &self.locations.entries[id.0]
    }

    pub fn weapon_id(&self, name: &str) -> Option<WeaponId> {
        self.weapons.find(name).map(WeaponId)
    }

    pub fn armor_id(&self, name: &str) -> Option<ArmorId> {
        self.armors.find(name).map(ArmorId)
    }

    pub fn creature_id(&self, name: &str) -> Option<CreatureId> {
        self.creatures.find(name).map(CreatureId)
    }

    pub fn location_id(&self, name: &str) -> Option<LocationId> {
        self.locations.find(name).map(LocationId)
    }

    // === Iteration ===

    pub fn weapons(&self) -> impl Iterator<Item = (WeaponId, &Weapon)> {
        self.weapons
            .entries
            .iter()
            .enumerate()
            .map(|(i, w)| (WeaponId(i), w))
    }

    pub fn armors(&self) -> impl Iterator<Item = (ArmorId, &Armor)> {
        self.armors
            .entries
            .iter()
            .enumerate()
            .map(|(i, a)| (ArmorId(i), a))
    }

    pub fn creatures(&self) -> impl Iterator<Item = (CreatureId, &Creature)> {
        self.creatures
            .entries
            .iter()
            .enumerate()
            .map(|(i, c)| (CreatureId(i), c))
    }

    pub fn locations(&self) -> impl Iterator<Item = (LocationId, &Location)> {
        self.locations
            .entries
            .iter()
            .enumerate()
            .map(|(i, l)| (LocationId(i), l))
    }

    /// Weapons offered during character creation
    pub fn starter_weapons(&self) -> Vec<WeaponId> {
        self.weapons()
            .filter(|(_, w)| w.starter && w.player_usable)
            .map(|(id, _)| id)
            .collect()
    }

    /// Armor offered during character creation
    pub fn starter_armors(&self) -> Vec<ArmorId> {
        self.armors()
            .filter(|(_, a)| a.starter && a.player_usable)
            .map(|(id, _)| id)
            .collect()
    }

    /// Locations offered during character creation
    pub fn starter_locations(&self) -> Vec<LocationId> {
        self.locations()
            .filter(|(_, l)| l.starter)
            .map(|(id, _)| id)
            .collect()
    }
}

fn unknown(record: &Record<'_>, kind: &'static str, name: &str) -> CatalogError {
    CatalogError::UnknownReference {
        file: record.file().to_string(),
        line: record.line(),
        kind,
        name: name.to_string(),
    }
}

fn fraction(record: &Record<'_>, column: &str) -> Result<f64, CatalogError> {
    let value: f64 = record.parse(column)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(record.invalid(column, record.text(column)?, "must be between 0 and 1"));
    }
    Ok(value)
}

fn availability(record: &Record<'_>) -> Result<Availability, CatalogError> {
    let drop_chance: u32 = record.parse_or("dropChance", 0)?;
    if drop_chance > 100 {
        return Err(record.invalid(
            "dropChance",
            record.text("dropChance")?,
            "must be a percentage",
        ));
    }
    Ok(Availability {
        market: record.flag_or("market", false)?,
        droppable: record.flag_or("drop", false)?,
        drop_chance,
        price: record.parse_or("price", 0)?,
    })
}
