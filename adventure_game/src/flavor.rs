//! Flavor text picked at random

use rand::seq::SliceRandom;
use rand::Rng;

pub const ADJECTIVES_BAD: &[&str] = &["evil", "disgusting", "dirty", "horrible", "awful", "terrible"];

pub const ADJECTIVES_GOOD: &[&str] = &["wonderful", "wondrous", "amazing", "awesome", "great", "fantastic"];

pub const PLACES_SLEEPING: &[&str] = &[
    "in a tavern",
    "in a hostel",
    "on the street",
    "in an alleyway",
    "in a ditch",
    "on a nice bed",
    "on a rooftop overlooking the town",
    "in a cozy place",
    "in an awfully smelly corner",
];

pub const PLACES_FIGHT: &[&str] = &[
    "forests",
    "outlying trade routes",
    "caves",
    "labyrinth",
    "abandoned mineshafts",
    "woodlands",
    "rolling hills",
    "mountains",
    "fiery caves",
];

/// Random entry of a non-empty list
pub fn pick(list: &[&'static str], rng: &mut impl Rng) -> &'static str {
    list.choose(rng).copied().unwrap_or_default()
}

/// `word` with a trailing `s` when `count` is not one
pub fn plural(word: &str, count: u32) -> String {
    let stem = word.strip_suffix('s').unwrap_or(word);
    if count == 1 {
        stem.to_string()
    } else {
        format!("{}s", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pick_from_list() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(PLACES_FIGHT.contains(&pick(PLACES_FIGHT, &mut rng)));
        }
        assert_eq!(pick(&[], &mut rng), "");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural("point", 1), "point");
        assert_eq!(plural("point", 3), "points");
        assert_eq!(plural("levels", 1), "level");
        assert_eq!(plural("gold piece", 0), "gold pieces");
    }
}
