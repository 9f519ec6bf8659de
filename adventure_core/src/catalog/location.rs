//! Location - Towns the player can start in and travel between

/// A location record from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// Map coordinates
    pub position: (i32, i32),
    /// Offered during character creation
    pub starter: bool,
}

impl Location {
    /// Straight-line distance to another location, rounded to whole leagues
    pub fn distance_to(&self, other: &Location) -> u32 {
        let dx = (self.position.0 - other.position.0) as f64;
        let dy = (self.position.1 - other.position.1) as f64;
        (dx * dx + dy * dy).sqrt().round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn town(name: &str, position: (i32, i32)) -> Location {
        Location {
            name: name.to_string(),
            country: "Valmora".to_string(),
            position,
            starter: true,
        }
    }

    #[test]
    fn test_distance() {
        let a = town("A", (0, 0));
        let b = town("B", (3, 4));
        assert_eq!(a.distance_to(&b), 5);
        assert_eq!(b.distance_to(&a), 5);
        assert_eq!(a.distance_to(&a), 0);
    }
}
