//! Free-text and state filtering.

use std::collections::BTreeSet;

use temple_map_temple_models::Temple;

/// State selector value meaning "no state filter".
pub const ALL_STATES: &str = "all";

/// Narrows `temples` to those matching `query` and `state`.
///
/// `query` matches case-insensitively as a substring of the name or the
/// formatted address; only an empty query matches everything. Whitespace
/// in `query` is significant. `state` must equal
/// [`Temple::state`] exactly unless it is empty or [`ALL_STATES`]. Input
/// order is preserved and the input is never modified.
#[must_use]
pub fn filter_temples(temples: &[Temple], query: &str, state: &str) -> Vec<Temple> {
    let needle = query.to_lowercase();
    let any_state = state.is_empty() || state == ALL_STATES;

    temples
        .iter()
        .filter(|t| any_state || t.state == state)
        .filter(|t| needle.is_empty() || matches_text(t, &needle))
        .cloned()
        .collect()
}

fn matches_text(temple: &Temple, needle: &str) -> bool {
    temple.name.to_lowercase().contains(needle)
        || temple.formatted_address().to_lowercase().contains(needle)
}

/// Sorted, de-duplicated state values for the state selector.
#[must_use]
pub fn unique_states(temples: &[Temple]) -> Vec<String> {
    temples
        .iter()
        .map(|t| t.state.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use temple_map_temple_models::{Address, Coordinates, StructuredAddress};

    fn collection() -> Vec<Temple> {
        vec![
            Temple::new(
                "1",
                "BAPS Shri Swaminarayan Mandir",
                Address::Formatted("460 Rockbridge Rd NW, Lilburn, GA 30047".to_string()),
                "Georgia",
                Coordinates::new(33.8896, -84.143).ok(),
            ),
            Temple::new(
                "2",
                "Sri Meenakshi Temple",
                Address::Structured(StructuredAddress {
                    street: Some("17130 McLean Rd".to_string()),
                    city: Some("Pearland".to_string()),
                    state: Some("TX".to_string()),
                    postal_code: Some("77584".to_string()),
                }),
                "Texas",
                None,
            ),
        ]
    }

    #[test]
    fn empty_filters_return_everything_in_order() {
        let temples = collection();
        assert_eq!(filter_temples(&temples, "", ""), temples);
        assert_eq!(filter_temples(&temples, "", ALL_STATES), temples);
        assert!(filter_temples(&temples, "  ", ALL_STATES).is_empty());
    }

    #[test]
    fn query_whitespace_is_significant() {
        let mut temples = collection();
        temples.push(Temple::new(
            "3",
            "Concord Hindu Temple",
            Address::Formatted("1 Main St, Concord, CA 94520".to_string()),
            "California",
            None,
        ));

        let found = filter_temples(&temples, " Rd", "");
        let ids: Vec<&str> = found.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);

        assert_eq!(filter_temples(&temples, "rd", "").len(), 3);
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let found = filter_temples(&collection(), "shri", "");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "BAPS Shri Swaminarayan Mandir");
    }

    #[test]
    fn query_matches_formatted_address() {
        let found = filter_temples(&collection(), "PEARLAND", "");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
    }

    #[test]
    fn state_requires_exact_match() {
        let found = filter_temples(&collection(), "", "Texas");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].state, "Texas");

        assert!(filter_temples(&collection(), "", "texas").is_empty());
        assert!(filter_temples(&collection(), "", "TX").is_empty());
    }

    #[test]
    fn query_and_state_combine() {
        assert!(filter_temples(&collection(), "shri", "Texas").is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        assert!(filter_temples(&collection(), "gurdwara", "").is_empty());
    }

    #[test]
    fn states_are_sorted_and_unique() {
        let mut temples = collection();
        temples.push(temples[0].clone());
        assert_eq!(unique_states(&temples), vec!["Georgia", "Texas"]);
    }
}
