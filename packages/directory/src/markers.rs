//! Map marker selection.

use serde::Serialize;
use temple_map_temple_models::Temple;

/// Temples that may be drawn on the map. Temples without valid
/// coordinates are left out here but still appear in listings.
#[must_use]
pub fn plottable(temples: &[Temple]) -> Vec<&Temple> {
    temples.iter().filter(|t| t.is_plottable()).collect()
}

/// Marker counts for the "showing N of M" line under the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    /// Temples in the current view.
    pub shown: usize,
    /// Temples in the current view with valid coordinates.
    pub located: usize,
    /// Temples in the whole collection.
    pub total: usize,
}

impl LocationSummary {
    /// Counts `view` against a collection of `total` temples.
    #[must_use]
    pub fn new(view: &[Temple], total: usize) -> Self {
        Self {
            shown: view.len(),
            located: view.iter().filter(|t| t.is_plottable()).count(),
            total,
        }
    }

    /// Number of temples in the view that cannot be plotted.
    #[must_use]
    pub const fn missing(&self) -> usize {
        self.shown - self.located
    }
}

impl std::fmt::Display for LocationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Showing {} of {} temples with valid locations",
            self.located, self.total
        )
    }
}
