//! Distance - Separation between the player and the opponent
//!
//! Every adjustment re-clamps the distance to at least one meter: the two
//! sides can get close, but never occupy the same spot.

use super::chance::{randint, roll_chance};
use crate::config::CombatConstants;
use rand::Rng;
use std::fmt;

/// Closest the two sides can get, in meters
pub const MIN_DISTANCE: u32 = 1;

/// How hard the opponent closes in when it cannot reach the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosingPace {
    /// Reacting to an attack or approach: 75%-100% of its speed
    Steady,
    /// Chasing after a retreat or failed escape: 50%-100% of its speed
    Pursuing,
    /// The player stood still to heal or wait: 100%-200% of its speed
    Rushing,
}

impl ClosingPace {
    /// Inclusive bounds of the closing roll for an opponent of `speed`
    pub fn bounds(&self, speed: u32) -> (i64, i64) {
        let speed = speed as i64;
        match self {
            ClosingPace::Steady => (speed * 3 / 4, speed),
            ClosingPace::Pursuing => (speed / 2, speed),
            ClosingPace::Rushing => (speed, speed * 2),
        }
    }
}

/// Result of a retreat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retreat {
    /// Meters the opponent covered while the player fell back
    pub opponent_approach: u32,
    /// Whether the player was faster than the opponent's approach
    pub outran: bool,
}

/// Result of an escape attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeAttempt {
    pub escaped: bool,
    /// Success was forced by speed or distance rather than rolled
    pub guaranteed: bool,
}

/// Separation in meters, never below [`MIN_DISTANCE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Distance(u32);

impl Distance {
    /// Create a distance, clamping to the minimum
    pub fn new(meters: i64) -> Self {
        Distance(meters.clamp(MIN_DISTANCE as i64, u32::MAX as i64) as u32)
    }

    /// Uniform starting distance in `[1, max]`
    pub fn random(max: u32, rng: &mut impl Rng) -> Self {
        Distance::new(randint(MIN_DISTANCE as i64, max as i64, rng))
    }

    pub fn meters(&self) -> u32 {
        self.0
    }

    /// Whether a weapon with `weapon_range` reaches across this distance
    pub fn within_range(&self, weapon_range: u32) -> bool {
        weapon_range >= self.0
    }

    fn shift(&mut self, delta: i64) {
        *self = Distance::new(self.0 as i64 + delta);
    }

    /// The player falls back while the opponent covers half to all of its speed
    pub fn retreat(&mut self, player_speed: u32, opponent_speed: u32, rng: &mut impl Rng) -> Retreat {
        let approach = randint((opponent_speed / 2) as i64, opponent_speed as i64, rng);
        self.shift(player_speed as i64 - approach);
        Retreat {
            opponent_approach: approach as u32,
            outran: player_speed as i64 > approach,
        }
    }

    /// The player closes in by their full speed
    pub fn approach(&mut self, player_speed: u32) {
        self.shift(-(player_speed as i64));
    }

    /// Try to break away from the fight
    ///
    /// Escape is forced when the player is more than `escape_speed_margin`
    /// faster than the opponent, or (with `escape_distance_override`) when the
    /// distance already exceeds `player_speed - (opponent_speed + margin)`.
    /// Otherwise it succeeds with `escape_chance` percent. A failed attempt lets the opponent close by a
    /// roll in `[-opponent_speed/2, opponent_speed]`, which may also widen the
    /// gap.
    pub fn attempt_escape(
        &mut self,
        player_speed: u32,
        opponent_speed: u32,
        constants: &CombatConstants,
        rng: &mut impl Rng,
    ) -> EscapeAttempt {
        let player = player_speed as i64;
        let pursuit = opponent_speed as i64 + constants.escape_speed_margin as i64;
        let guaranteed = player > pursuit
            || (constants.escape_distance_override && self.0 as i64 > player - pursuit);

        if guaranteed || roll_chance(constants.escape_chance, rng) {
            return EscapeAttempt {
                escaped: true,
                guaranteed,
            };
        }

        let speed = opponent_speed as i64;
        let closed = randint(-(speed / 2), speed, rng);
        self.shift(-closed);
        EscapeAttempt {
            escaped: false,
            guaranteed: false,
        }
    }

    /// The opponent closes in at the given pace. Returns the rolled amount.
    pub fn opponent_closes(&mut self, opponent_speed: u32, pace: ClosingPace, rng: &mut impl Rng) -> u32 {
        let (low, high) = pace.bounds(opponent_speed);
        let closed = randint(low, high, rng);
        self.shift(-closed);
        closed as u32
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 meter")
        } else {
            write!(f, "{} meters", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_clamps() {
        assert_eq!(Distance::new(-40).meters(), 1);
        assert_eq!(Distance::new(0).meters(), 1);
        assert_eq!(Distance::new(12).meters(), 12);
    }

    #[test]
    fn test_within_range() {
        let distance = Distance::new(5);
        assert!(distance.within_range(10));
        assert!(distance.within_range(5));
        assert!(!distance.within_range(4));
    }

    #[test]
    fn test_random_start_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let d = Distance::random(60, &mut rng).meters();
            assert!((1..=60).contains(&d));
        }
    }

    #[test]
    fn test_approach_never_reaches_zero() {
        let mut distance = Distance::new(20);
        distance.approach(30);
        assert_eq!(distance.meters(), 1);
    }

    #[test]
    fn test_retreat_against_slower_opponent() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut distance = Distance::new(10);
        // Opponent approach is at most 10, player moves 30
        let retreat = distance.retreat(30, 10, &mut rng);
        assert!(retreat.outran);
        assert!((5..=10).contains(&retreat.opponent_approach));
        assert_eq!(distance.meters(), 10 + 30 - retreat.opponent_approach);
    }

    #[test]
    fn test_retreat_against_faster_opponent() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut distance = Distance::new(3);
        // Approach is at least 50, player moves 10
        let retreat = distance.retreat(10, 100, &mut rng);
        assert!(!retreat.outran);
        assert_eq!(distance.meters(), 1);
    }

    #[test]
    fn test_escape_guaranteed_when_much_faster() {
        let constants = CombatConstants {
            escape_chance: 0,
            ..CombatConstants::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let mut distance = Distance::new(10);
            let attempt = distance.attempt_escape(50, 20, &constants, &mut rng);
            assert!(attempt.escaped);
            assert!(attempt.guaranteed);
        }
    }

    #[test]
    fn test_escape_guaranteed_when_far_enough() {
        let constants = CombatConstants {
            escape_chance: 0,
            ..CombatConstants::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        // 30 - (20 + 20) = -10, any distance is beyond that
        let mut distance = Distance::new(1);
        assert!(distance.attempt_escape(30, 20, &constants, &mut rng).escaped);
    }

    #[test]
    fn test_escape_rolls_without_distance_override() {
        let constants = CombatConstants {
            escape_chance: 0,
            escape_distance_override: false,
            ..CombatConstants::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let mut distance = Distance::new(30);
        let attempt = distance.attempt_escape(30, 20, &constants, &mut rng);
        assert!(!attempt.escaped);
        // Closed by a roll in [-10, 20]
        assert!((10..=40).contains(&distance.meters()));

        let certain = CombatConstants {
            escape_chance: 100,
            ..constants
        };
        let attempt = distance.attempt_escape(30, 20, &certain, &mut rng);
        assert!(attempt.escaped);
        assert!(!attempt.guaranteed);
    }

    #[test]
    fn test_closing_paces() {
        assert_eq!(ClosingPace::Steady.bounds(20), (15, 20));
        assert_eq!(ClosingPace::Pursuing.bounds(20), (10, 20));
        assert_eq!(ClosingPace::Rushing.bounds(20), (20, 40));
    }

    #[test]
    fn test_opponent_closes() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut distance = Distance::new(50);
        let closed = distance.opponent_closes(20, ClosingPace::Steady, &mut rng);
        assert!((15..=20).contains(&closed));
        assert_eq!(distance.meters(), 50 - closed);
    }

    #[test]
    fn test_display() {
        assert_eq!(Distance::new(1).to_string(), "1 meter");
        assert_eq!(Distance::new(7).to_string(), "7 meters");
    }

    #[derive(Debug, Clone)]
    enum Step {
        Retreat(u32, u32),
        Approach(u32),
        Escape(u32, u32),
        Close(u32, u8),
    }

    fn step_strategy() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0u32..100, 0u32..100).prop_map(|(p, o)| Step::Retreat(p, o)),
            (0u32..100).prop_map(Step::Approach),
            (0u32..100, 0u32..100).prop_map(|(p, o)| Step::Escape(p, o)),
            (0u32..100, 0u8..3).prop_map(|(o, pace)| Step::Close(o, pace)),
        ]
    }

    proptest! {
        #[test]
        fn prop_distance_never_below_one(
            start in 1u32..=60,
            seed in any::<u64>(),
            steps in proptest::collection::vec(step_strategy(), 0..50),
        ) {
            let constants = CombatConstants::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut distance = Distance::new(start as i64);
            for step in steps {
                match step {
                    Step::Retreat(p, o) => { distance.retreat(p, o, &mut rng); }
                    Step::Approach(p) => distance.approach(p),
                    Step::Escape(p, o) => { distance.attempt_escape(p, o, &constants, &mut rng); }
                    Step::Close(o, pace) => {
                        let pace = match pace {
                            0 => ClosingPace::Steady,
                            1 => ClosingPace::Pursuing,
                            _ => ClosingPace::Rushing,
                        };
                        distance.opponent_closes(o, pace, &mut rng);
                    }
                }
                prop_assert!(distance.meters() >= MIN_DISTANCE);
            }
        }

        #[test]
        fn prop_fast_player_always_escapes(
            opponent in 0u32..200,
            lead in 1u32..100,
            start in 1u32..=60,
            seed in any::<u64>(),
        ) {
            let constants = CombatConstants { escape_chance: 0, ..CombatConstants::default() };
            let mut rng = StdRng::seed_from_u64(seed);
            let mut distance = Distance::new(start as i64);
            let player = opponent + constants.escape_speed_margin + lead;
            prop_assert!(distance.attempt_escape(player, opponent, &constants, &mut rng).escaped);
        }
    }
}
