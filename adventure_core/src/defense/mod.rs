//! Defense system - Armor mitigation of incoming hits

mod mitigation;

pub use mitigation::{mitigated_damage, resolve_damage, Mitigation};

/// Round away binary floating point noise before ceiling or flooring
///
/// `0.1 * 30.0` evaluates to `3.0000000000000004`; ceiling that directly
/// would charge an extra point.
pub(crate) fn snap(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_removes_noise() {
        assert_eq!(snap(0.1 * 30.0).ceil(), 3.0);
        assert_eq!(snap(30.0 - 0.3 * 30.0).ceil(), 21.0);
        assert_eq!(snap(2.5).ceil(), 3.0);
    }
}
