//! Shop - Market gear and paid healing in town

use crate::catalog::Catalog;
use crate::config::ShopConstants;
use crate::player::Player;
use crate::types::{ArmorId, WeaponId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    #[error("{item} costs {price} gold, but only {gold} gold is on hand")]
    NotEnoughGold { item: String, price: u32, gold: u32 },
    #[error("{0} is not sold at the market")]
    NotForSale(String),
    #[error("{0} is already equipped")]
    AlreadyOwned(String),
    #[error("Already at full health")]
    NotHurt,
}

/// Something the market sells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ware {
    Weapon(WeaponId),
    Armor(ArmorId),
}

impl Ware {
    pub fn name<'a>(&self, catalog: &'a Catalog) -> &'a str {
        match self {
            Ware::Weapon(id) => &catalog.weapon(*id).name,
            Ware::Armor(id) => &catalog.armor(*id).name,
        }
    }

    pub fn price(&self, catalog: &Catalog) -> u32 {
        match self {
            Ware::Weapon(id) => catalog.weapon(*id).availability.price,
            Ware::Armor(id) => catalog.armor(*id).availability.price,
        }
    }

    fn for_sale(&self, catalog: &Catalog) -> bool {
        match self {
            Ware::Weapon(id) => {
                let weapon = catalog.weapon(*id);
                weapon.availability.market && weapon.player_usable
            }
            Ware::Armor(id) => {
                let armor = catalog.armor(*id);
                armor.availability.market && armor.player_usable
            }
        }
    }

    fn equipped_by(&self, player: &Player) -> bool {
        match self {
            Ware::Weapon(id) => player.weapon() == *id,
            Ware::Armor(id) => player.armor() == *id,
        }
    }
}

/// Market items the player does not already have equipped, weapons first
pub fn offers(catalog: &Catalog, player: &Player) -> Vec<Ware> {
    let weapons = catalog.weapons().map(|(id, _)| Ware::Weapon(id));
    let armors = catalog.armors().map(|(id, _)| Ware::Armor(id));
    weapons
        .chain(armors)
        .filter(|ware| ware.for_sale(catalog) && !ware.equipped_by(player))
        .collect()
}

/// Pay for `ware` and equip it in place of the current item
pub fn buy(player: &mut Player, catalog: &Catalog, ware: Ware) -> Result<(), ShopError> {
    let name = ware.name(catalog);
    if !ware.for_sale(catalog) {
        return Err(ShopError::NotForSale(name.to_string()));
    }
    if ware.equipped_by(player) {
        return Err(ShopError::AlreadyOwned(name.to_string()));
    }

    let price = ware.price(catalog);
    if !player.spend_gold(price) {
        return Err(ShopError::NotEnoughGold {
            item: name.to_string(),
            price,
            gold: player.gold,
        });
    }

    match ware {
        Ware::Weapon(id) => player.equip_weapon(id),
        Ware::Armor(id) => player.equip_armor(id, catalog),
    }
    tracing::info!("{} bought {} for {} gold", player.name, name, price);
    Ok(())
}

/// Healing the player can afford right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealQuote {
    pub amount: u32,
    pub cost: u32,
}

/// Largest heal the player can pay for, up to their missing health
pub fn heal_quote(player: &Player, shop: &ShopConstants) -> HealQuote {
    let missing = player.missing_health();
    let amount = match shop.heal_cost_per_hp {
        0 => missing,
        per_hp => missing.min(player.gold / per_hp),
    };
    HealQuote {
        amount,
        cost: amount * shop.heal_cost_per_hp,
    }
}

/// Buy as much healing as the player can afford
pub fn buy_healing(player: &mut Player, shop: &ShopConstants) -> Result<HealQuote, ShopError> {
    if !player.is_hurt() {
        return Err(ShopError::NotHurt);
    }
    let quote = heal_quote(player, shop);
    if quote.amount == 0 {
        return Err(ShopError::NotEnoughGold {
            item: "Healing".to_string(),
            price: shop.heal_cost_per_hp,
            gold: player.gold,
        });
    }
    player.spend_gold(quote.cost);
    player.heal(quote.amount);
    tracing::info!("{} paid {} gold to heal {}", player.name, quote.cost, quote.amount);
    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn test_offers_skip_equipped_and_unsold() {
        let catalog = Catalog::builtin().unwrap();
        let player = test_support::player(&catalog);
        let offers = offers(&catalog, &player);

        let names: Vec<&str> = offers.iter().map(|ware| ware.name(&catalog)).collect();
        assert!(names.contains(&"Longbow"));
        assert!(names.contains(&"Plate Armor"));
        // Equipped
        assert!(!names.contains(&"Short Sword"));
        assert!(!names.contains(&"Traveller's Cloak"));
        // Drop-only and creature gear
        assert!(!names.contains(&"Rusty Dagger"));
        assert!(!names.contains(&"Fangs"));
        assert!(!names.contains(&"Goblin Rags"));
    }

    #[test]
    fn test_buy_deducts_and_equips() {
        let catalog = Catalog::builtin().unwrap();
        let mut player = test_support::player(&catalog);
        player.gold = 50;

        let vest = Ware::Armor(catalog.armor_id("Leather Vest").unwrap());
        buy(&mut player, &catalog, vest).unwrap();
        assert_eq!(player.gold, 38);
        assert_eq!(player.armor(), catalog.armor_id("Leather Vest").unwrap());
        assert_eq!(player.speed(), 27);

        assert_eq!(
            buy(&mut player, &catalog, vest),
            Err(ShopError::AlreadyOwned("Leather Vest".to_string()))
        );
    }

    #[test]
    fn test_buy_without_gold() {
        let catalog = Catalog::builtin().unwrap();
        let mut player = test_support::player(&catalog);
        let longbow = Ware::Weapon(catalog.weapon_id("Longbow").unwrap());

        let result = buy(&mut player, &catalog, longbow);
        assert_eq!(
            result,
            Err(ShopError::NotEnoughGold {
                item: "Longbow".to_string(),
                price: 40,
                gold: 5
            })
        );
        assert_eq!(player.gold, 5);
        assert_eq!(player.weapon(), catalog.weapon_id("Short Sword").unwrap());
    }

    #[test]
    fn test_drop_only_gear_not_for_sale() {
        let catalog = Catalog::builtin().unwrap();
        let mut player = test_support::player(&catalog);
        player.gold = 100;
        let dagger = Ware::Weapon(catalog.weapon_id("Rusty Dagger").unwrap());
        assert_eq!(
            buy(&mut player, &catalog, dagger),
            Err(ShopError::NotForSale("Rusty Dagger".to_string()))
        );
    }

    #[test]
    fn test_healing_limited_by_gold() {
        let catalog = Catalog::builtin().unwrap();
        let mut player = test_support::player(&catalog);
        let shop = ShopConstants { heal_cost_per_hp: 2 };
        player.set_health(2);
        player.gold = 5;

        // 8 missing, 5 gold buys 2
        assert_eq!(heal_quote(&player, &shop), HealQuote { amount: 2, cost: 4 });
        let quote = buy_healing(&mut player, &shop).unwrap();
        assert_eq!(quote.amount, 2);
        assert_eq!(player.health(), 4);
        assert_eq!(player.gold, 1);

        assert!(matches!(
            buy_healing(&mut player, &shop),
            Err(ShopError::NotEnoughGold { .. })
        ));
    }

    #[test]
    fn test_healing_when_healthy() {
        let catalog = Catalog::builtin().unwrap();
        let mut player = test_support::player(&catalog);
        let shop = ShopConstants::default();
        assert_eq!(buy_healing(&mut player, &shop), Err(ShopError::NotHurt));
    }
}
