//! Player choices during a round

use std::fmt;

/// What the player does on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    /// Strike with the equipped weapon (in range only)
    Attack,
    /// Fall back while the opponent gives chase (in range only)
    Retreat,
    /// Close the distance by the player's full speed
    Approach,
    /// Hold position and let the opponent come
    Wait,
    /// Try to leave the fight
    Escape,
    /// Patch wounds for a little health (out of range and hurt only)
    Heal,
}

impl PlayerAction {
    /// Actions offered for the current situation, in menu order
    pub fn options(in_range: bool, hurt: bool) -> Vec<PlayerAction> {
        if in_range {
            return vec![PlayerAction::Attack, PlayerAction::Retreat];
        }
        let mut actions = vec![PlayerAction::Approach, PlayerAction::Wait, PlayerAction::Escape];
        if hurt {
            actions.push(PlayerAction::Heal);
        }
        actions
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::Attack => "attack",
            PlayerAction::Retreat => "retreat",
            PlayerAction::Approach => "approach",
            PlayerAction::Wait => "wait",
            PlayerAction::Escape => "escape",
            PlayerAction::Heal => "heal",
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
