//! Built-in sample directory.
//!
//! Served whenever the configured source cannot be loaded, so the map
//! never comes up empty.

use temple_map_temple_models::{Address, Coordinates, Temple};

/// Returns the built-in sample temples.
#[must_use]
pub fn sample_temples() -> Vec<Temple> {
    vec![Temple::new(
        "1",
        "BAPS Shri Swaminarayan Mandir",
        Address::Formatted("460 Rockbridge Rd NW, Lilburn, GA 30047".to_string()),
        "Georgia",
        Some(Coordinates {
            latitude: 33.8896,
            longitude: -84.143,
        }),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_plottable() {
        let samples = sample_temples();
        assert!(!samples.is_empty());
        assert!(samples.iter().all(Temple::is_plottable));
        assert_eq!(
            samples[0].google_maps_link,
            "https://maps.google.com/?q=33.8896,-84.143"
        );
    }
}
