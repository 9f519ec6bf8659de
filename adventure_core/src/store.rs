//! Player store - Saved characters in a flat row file
//!
//! Uses the same row format as the catalog data. A missing save file is
//! seeded from the default players template. Saving replaces the row whose
//! name field matches exactly, or appends a new row; comment lines and other
//! players' rows are left as they were.

use crate::catalog::rows::{RowTable, DELIMITER};
use crate::catalog::{Catalog, CatalogError, Record};
use crate::config::PlayerConstants;
use crate::player::Player;
use crate::types::PlayerStatus;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const FILE_PLAYERS: &str = "players.csv";
pub const FILE_DEFAULT_PLAYERS: &str = "players_default.csv";

/// Columns of a saved player, in file order
pub const PLAYER_COLUMNS: [&str; 13] = [
    "name",
    "species",
    "level",
    "exp",
    "gold",
    "baseHealth",
    "currentHealth",
    "baseSpeed",
    "currentSpeed",
    "location",
    "armor",
    "weapon",
    "status",
];

/// Header-only template bundled with the crate
pub const DEFAULT_PLAYERS: &str = include_str!("../data/players_default.csv");

/// Error reading or writing saved players
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access '{path}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Invalid player data: {0}")]
    Data(#[from] CatalogError),
    #[error("Invalid player name '{0}': names must be non-empty and cannot contain '{1}' or start with '#'")]
    InvalidName(String, char),
}

/// Whether a name can be stored without corrupting the row format
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(DELIMITER) || trimmed.starts_with('#') {
        return Err(StoreError::InvalidName(name.to_string(), DELIMITER));
    }
    Ok(())
}

/// Status as written in the save file
///
/// Older saves stored the numeric codes 0-4.
pub fn parse_status(value: &str) -> Option<PlayerStatus> {
    match value {
        "0" => Some(PlayerStatus::Sleeping),
        "1" => Some(PlayerStatus::Resting),
        "2" => Some(PlayerStatus::Travelling),
        "3" => Some(PlayerStatus::Fighting),
        "4" => Some(PlayerStatus::Idle),
        other => other.parse().ok(),
    }
}

/// Render one player as a save file row
pub fn format_player(player: &Player, catalog: &Catalog) -> String {
    let fields = [
        player.name.clone(),
        player.species.clone(),
        player.level.to_string(),
        player.exp.to_string(),
        player.gold.to_string(),
        player.base_health().to_string(),
        player.health().to_string(),
        player.base_speed().to_string(),
        player.speed().to_string(),
        catalog.location(player.location).name.clone(),
        catalog.armor(player.armor()).name.clone(),
        catalog.weapon(player.weapon()).name.clone(),
        player.status.to_string(),
    ];
    let mut line = String::new();
    for field in fields {
        line.push_str(&field);
        line.push(DELIMITER);
    }
    line
}

fn header() -> String {
    let separator = DELIMITER.to_string();
    let mut line = PLAYER_COLUMNS.join(separator.as_str());
    line.push(DELIMITER);
    line
}

fn player_from_record(record: &Record<'_>, catalog: &Catalog) -> Result<Player, CatalogError> {
    let status_text = record.text("status")?;
    let status = parse_status(status_text)
        .ok_or_else(|| record.invalid("status", status_text, "unknown player status"))?;

    let mut player = Player::new(
        record.text("name")?,
        record.text("species")?,
        catalog.resolve_location(record, "location")?,
        catalog.resolve_weapon(record, "weapon")?,
        catalog.resolve_armor(record, "armor")?,
        &PlayerConstants::default(),
        catalog,
    );
    player.level = record.parse::<u32>("level")?.max(1);
    player.exp = record.parse("exp")?;
    player.gold = record.parse("gold")?;
    player.set_base_health(record.parse("baseHealth")?);
    player.set_health(record.parse("currentHealth")?);
    // Current speed is derived from armor, the stored value is informational
    player.set_base_speed(record.parse("baseSpeed")?, catalog);
    player.status = status;
    player.is_new = false;
    Ok(player)
}

/// Parse saved players from file content
pub fn parse_players(file: &str, content: &str, catalog: &Catalog) -> Result<Vec<Player>, StoreError> {
    let table = RowTable::parse(file, content)?;
    table.require_columns(&PLAYER_COLUMNS)?;
    let players = table
        .records()
        .map(|record| player_from_record(&record, catalog))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(players)
}

/// Saved players backed by a file on disk
#[derive(Debug)]
pub struct PlayerStore {
    path: PathBuf,
    players: Vec<Player>,
}

impl PlayerStore {
    /// Open the save file, seeding it from `template` when it does not exist
    pub fn open(path: &Path, template: &str, catalog: &Catalog) -> Result<Self, StoreError> {
        let io_error = |error| StoreError::Io {
            error,
            path: path.to_path_buf(),
        };

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
            std::fs::write(path, template).map_err(io_error)?;
            tracing::info!("Created new save file at {}", path.display());
        }

        let content = std::fs::read_to_string(path).map_err(io_error)?;
        let file = path.display().to_string();
        let players = parse_players(&file, &content, catalog)?;
        tracing::debug!("Loaded {} player(s) from {}", players.len(), file);

        Ok(PlayerStore {
            path: path.to_path_buf(),
            players,
        })
    }

    /// Open with the bundled header-only template
    pub fn open_or_seed(path: &Path, catalog: &Catalog) -> Result<Self, StoreError> {
        Self::open(path, DEFAULT_PLAYERS, catalog)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Write `player` to disk, replacing an existing row with the same name
    pub fn save(&mut self, player: &mut Player, catalog: &Catalog) -> Result<(), StoreError> {
        validate_name(&player.name)?;
        let io_error = |error| StoreError::Io {
            error,
            path: self.path.clone(),
        };

        let content = std::fs::read_to_string(&self.path).map_err(io_error)?;
        let row = format_player(player, catalog);

        let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
        if lines.iter().all(|line| line.trim().is_empty()) {
            lines = vec![header()];
        }
        let existing = lines.iter().skip(1).position(|line| {
            !line.trim_start().starts_with('#')
                && line.split(DELIMITER).next().map(str::trim) == Some(player.name.as_str())
        });
        match existing {
            Some(index) => lines[index + 1] = row,
            None => lines.push(row),
        }

        let mut output = lines.join("\n");
        output.push('\n');
        std::fs::write(&self.path, output).map_err(io_error)?;

        player.is_new = false;
        match self.players.iter_mut().find(|p| p.name == player.name) {
            Some(stored) => *stored = player.clone(),
            None => self.players.push(player.clone()),
        }
        tracing::info!("Saved {} to {}", player.name, self.path.display());
        Ok(())
    }
}
