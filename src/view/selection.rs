use crate::catalog::PassportEvent;

/// The currently selected event, if any.
///
/// This is the single source of truth the camera synchronizer and the
/// presentation shell observe. All mutation goes through [`select`] and
/// [`clear`]; nothing else writes it, which keeps the synchronizer's
/// change detection valid.
///
/// [`select`]: SelectionState::select
/// [`clear`]: SelectionState::clear
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<PassportEvent>,
    generation: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects an event. Re-selecting the current event still counts as a
    /// mutation; suppressing the redundant camera flight is the
    /// synchronizer's job, not this one's.
    pub fn select(&mut self, event: PassportEvent) {
        self.selected = Some(event);
        self.generation += 1;
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected = None;
        self.generation += 1;
    }

    pub fn selected(&self) -> Option<&PassportEvent> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|event| event.id.as_str())
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id() == Some(id)
    }

    /// Monotonic counter bumped on every mutation; lets a caller cheaply
    /// detect that something changed since it last looked.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn event(id: &str) -> PassportEvent {
        PassportEvent {
            id: id.to_string(),
            image_url: format!("https://example.com/{id}.png"),
            location: LatLng::new(13.7386, 100.5133),
            title: None,
            available_from: None,
            available_until: None,
            collect_hint: None,
        }
    }

    #[test]
    fn test_select_and_clear() {
        let mut selection = SelectionState::new();
        assert!(selection.selected().is_none());

        selection.select(event("a"));
        assert_eq!(selection.selected_id(), Some("a"));
        assert!(selection.is_selected("a"));
        assert!(!selection.is_selected("b"));

        selection.clear();
        assert!(selection.selected().is_none());
    }

    #[test]
    fn test_reselection_still_bumps_generation() {
        let mut selection = SelectionState::new();
        selection.select(event("a"));
        let first = selection.generation();

        selection.select(event("a"));
        assert!(selection.generation() > first);
        assert_eq!(selection.selected_id(), Some("a"));
    }
}
