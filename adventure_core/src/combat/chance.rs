//! Percentage rolls

use rand::Rng;

/// Roll a `chance` percent check
///
/// Always succeeds at 100 or more and always fails at 0. In between, a
/// uniform integer in `[0, 100]` is drawn and the check succeeds when it is
/// at most `chance`.
pub fn roll_chance(chance: u32, rng: &mut impl Rng) -> bool {
    if chance >= 100 {
        return true;
    }
    if chance == 0 {
        return false;
    }
    rng.gen_range(0..=100) <= chance
}

/// Uniform integer in `[low, high]`, tolerating `low > high` by returning `low`
pub(crate) fn randint(low: i64, high: i64, rng: &mut impl Rng) -> i64 {
    if low >= high {
        low
    } else {
        rng.gen_range(low..=high)
    }
}
