//! Equipment - Weapon and armor catalog records

mod armor;
mod weapon;

pub use armor::Armor;
pub use weapon::{DamageRange, Weapon};

/// Availability of an item outside of its owner
///
/// Shared by weapons and armor: whether the item can be bought, whether it
/// can drop from a defeated creature, and how likely that drop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Availability {
    /// Offered at the market
    pub market: bool,
    /// Can drop from a defeated creature
    pub droppable: bool,
    /// Drop chance in percent (0-100)
    pub drop_chance: u32,
    /// Market price in gold
    pub price: u32,
}
