//! Admin edit overlay.
//!
//! The overlay is either [`EditOverlay::Closed`] or editing exactly one
//! temple. [`EditOverlay::save`] and [`EditOverlay::cancel`] always return
//! it to `Closed`, whether or not the save succeeds. Saved edits live only
//! in the in-memory collection.

use temple_map_temple_models::{Coordinates, InvalidCoordinatesError, Temple};

/// Errors from the edit overlay.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// No edit is in progress.
    #[error("No temple is being edited")]
    NotEditing,

    /// The collection has no temple with this id.
    #[error("No temple with id {id}")]
    UnknownTemple {
        /// The requested id.
        id: String,
    },

    /// The edited coordinates are out of range.
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinatesError),
}

/// A working copy of one temple.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    id: String,
    draft: Temple,
}

impl EditSession {
    /// Id of the temple being edited. Saving always writes back to this
    /// id, even if the draft's own `id` was changed.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The working copy.
    #[must_use]
    pub const fn draft(&self) -> &Temple {
        &self.draft
    }
}

/// The edit overlay state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditOverlay {
    /// Nothing is being edited.
    #[default]
    Closed,
    /// One temple is being edited.
    Open(EditSession),
}

impl EditOverlay {
    /// Whether an edit is in progress.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// The current session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&EditSession> {
        match self {
            Self::Open(session) => Some(session),
            Self::Closed => None,
        }
    }

    /// Starts editing the temple with `id`, discarding any unsaved draft.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownTemple`] if `temples` has no such id; the
    /// overlay is left unchanged in that case.
    pub fn open(&mut self, temples: &[Temple], id: &str) -> Result<&mut Temple, EditError> {
        let temple = temples
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EditError::UnknownTemple { id: id.to_string() })?;

        if let Self::Open(previous) = self {
            log::debug!("Discarding unsaved edit of {}", previous.id);
        }

        *self = Self::Open(EditSession {
            id: temple.id.clone(),
            draft: temple.clone(),
        });
        self.draft_mut()
    }

    /// Mutable access to the working copy.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotEditing`] if the overlay is closed.
    pub fn draft_mut(&mut self) -> Result<&mut Temple, EditError> {
        match self {
            Self::Open(session) => Ok(&mut session.draft),
            Self::Closed => Err(EditError::NotEditing),
        }
    }

    /// Sets the draft's coordinates after range-checking them.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotEditing`] if the overlay is closed, or
    /// [`EditError::InvalidCoordinates`] if the pair is out of range.
    pub fn set_coordinates(&mut self, latitude: f64, longitude: f64) -> Result<(), EditError> {
        let draft = self.draft_mut()?;
        draft.coordinates = Some(Coordinates::new(latitude, longitude)?);
        Ok(())
    }

    /// Writes the draft back into `temples` by id and closes the overlay.
    ///
    /// The saved record's Google Maps link is recomputed from its final
    /// address and coordinates. Every other temple is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotEditing`] if the overlay was closed, or
    /// [`EditError::UnknownTemple`] if the temple has since left the
    /// collection. The overlay is closed either way.
    pub fn save<'a>(&mut self, temples: &'a mut [Temple]) -> Result<&'a Temple, EditError> {
        let Self::Open(EditSession { id, mut draft }) = std::mem::take(self) else {
            return Err(EditError::NotEditing);
        };

        let slot = temples
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| EditError::UnknownTemple { id: id.clone() })?;

        draft.id = id;
        draft.refresh_google_maps_link();
        log::info!("Saved edit of temple {} ({})", draft.id, draft.name);
        *slot = draft;
        Ok(slot)
    }

    /// Discards the draft and closes the overlay, returning what was
    /// discarded.
    pub fn cancel(&mut self) -> Option<Temple> {
        match std::mem::take(self) {
            Self::Open(session) => Some(session.draft),
            Self::Closed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temple_map_temple_models::Address;

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
                Address::Formatted("17130 McLean Rd, Pearland, TX 77584".to_string()),
                "Texas",
                None,
            ),
            Temple::new(
                "3",
                "Hindu Temple of Central Ohio",
                Address::Formatted("3903 Sullivant Ave, Columbus, OH 43228".to_string()),
                "Ohio",
                None,
            ),
        ]
    }

    fn serialized(temples: &[Temple]) -> Vec<String> {
        temples
            .iter()
            .map(|t| serde_json::to_string(t).unwrap())
            .collect()
    }

    #[test]
    fn save_recomputes_link_and_leaves_others_untouched() {
        let mut temples = collection();
        let before = serialized(&temples);
        let mut overlay = EditOverlay::default();

        overlay.open(&temples, "2").unwrap();
        overlay.set_coordinates(29.5513, -95.2851).unwrap();
        let saved = overlay.save(&mut temples).unwrap();

        assert_eq!(
            saved.google_maps_link,
            "https://maps.google.com/?q=29.5513,-95.2851"
        );
        assert_eq!(overlay, EditOverlay::Closed);

        let after = serialized(&temples);
        assert_eq!(after[0], before[0]);
        assert_ne!(after[1], before[1]);
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn save_merges_by_original_id() {
        let mut temples = collection();
        let mut overlay = EditOverlay::default();

        let draft = overlay.open(&temples, "3").unwrap();
        draft.name = "Bharatiya Hindu Temple".to_string();
        draft.id = "changed".to_string();
        overlay.save(&mut temples).unwrap();

        assert_eq!(temples.len(), 3);
        assert_eq!(temples[2].id, "3");
        assert_eq!(temples[2].name, "Bharatiya Hindu Temple");
    }

    #[test]
    fn cancel_discards_changes() {
        let temples = collection();
        let mut overlay = EditOverlay::default();

        overlay.open(&temples, "1").unwrap().name = "Changed".to_string();
        let discarded = overlay.cancel().unwrap();

        assert_eq!(discarded.name, "Changed");
        assert!(!overlay.is_open());
        assert_eq!(temples, collection());
    }

    #[test]
    fn closed_overlay_rejects_edits() {
        let mut temples = collection();
        let mut overlay = EditOverlay::default();

        assert!(matches!(overlay.draft_mut(), Err(EditError::NotEditing)));
        assert!(matches!(
            overlay.save(&mut temples),
            Err(EditError::NotEditing)
        ));
        assert!(overlay.cancel().is_none());
    }

    #[test]
    fn open_unknown_id_keeps_state() {
        let temples = collection();
        let mut overlay = EditOverlay::default();
        overlay.open(&temples, "1").unwrap();

        assert!(matches!(
            overlay.open(&temples, "99"),
            Err(EditError::UnknownTemple { .. })
        ));
        assert_eq!(overlay.session().map(EditSession::id), Some("1"));
    }

    #[test]
    fn invalid_coordinates_are_rejected() {
        let temples = collection();
        let mut overlay = EditOverlay::default();
        overlay.open(&temples, "2").unwrap();

        assert!(matches!(
            overlay.set_coordinates(91.0, 0.0),
            Err(EditError::InvalidCoordinates(_))
        ));
        assert!(overlay.session().unwrap().draft().coordinates.is_none());
    }

    #[test]
    fn save_closes_even_when_temple_is_gone() {
        let mut temples = collection();
        let mut overlay = EditOverlay::default();
        overlay.open(&temples, "2").unwrap();
        temples.remove(1);

        assert!(matches!(
            overlay.save(&mut temples),
            Err(EditError::UnknownTemple { .. })
        ));
        assert!(!overlay.is_open());
    }
}
