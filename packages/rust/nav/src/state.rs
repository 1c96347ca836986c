//! The navigation interaction model.
//!
//! The decorated markup is static; interaction state lives here as a pure
//! state machine and is re-serialized into `aria-expanded` attributes on
//! demand. Invariant: at most one section entry is expanded at a time.

/// Expansion state for a decorated navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    section_count: usize,
    expanded: Option<usize>,
    menu_expanded: bool,
    scroll_locked: bool,
}

impl NavState {
    /// All-collapsed state for a nav with `section_count` top-level entries.
    pub fn new(section_count: usize) -> Self {
        Self {
            section_count,
            expanded: None,
            menu_expanded: false,
            scroll_locked: false,
        }
    }

    /// Handle a click on the section entry at `index`.
    ///
    /// Mutually exclusive expansion: every entry collapses, then the clicked
    /// one expands — unless it was the expanded one, in which case the click
    /// is a pure collapse toggle. Out-of-range indexes are ignored.
    pub fn click_section(&mut self, index: usize) {
        if index >= self.section_count {
            return;
        }
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Handle a click on the mobile toggle: flips the menu expansion flag
    /// and locks or unlocks page scrolling with it.
    pub fn toggle_menu(&mut self) {
        self.menu_expanded = !self.menu_expanded;
        self.scroll_locked = self.menu_expanded;
    }

    /// Index of the expanded entry, if any.
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    pub fn is_menu_expanded(&self) -> bool {
        self.menu_expanded
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expanded_count(state: &NavState) -> usize {
        usize::from(state.expanded().is_some())
    }

    #[test]
    fn click_expands_only_the_clicked_entry() {
        let mut state = NavState::new(4);
        state.click_section(2);
        assert_eq!(state.expanded(), Some(2));

        state.click_section(0);
        assert_eq!(state.expanded(), Some(0));
        assert_eq!(expanded_count(&state), 1);
    }

    #[test]
    fn clicking_expanded_entry_collapses_it() {
        let mut state = NavState::new(3);
        state.click_section(1);
        state.click_section(1);
        assert_eq!(state.expanded(), None);
    }

    #[test]
    fn at_most_one_expanded_for_any_click_sequence() {
        // exhaustive over a generous sample of click sequences
        let sequences: Vec<Vec<usize>> = vec![
            vec![0],
            vec![0, 1, 2, 3],
            vec![1, 1, 1],
            vec![3, 0, 3, 0, 3],
            vec![2, 2, 1, 0, 0, 2],
            vec![0, 1, 0, 1, 0, 1, 0],
        ];
        for seq in sequences {
            let mut state = NavState::new(4);
            for &i in &seq {
                state.click_section(i);
                assert!(
                    expanded_count(&state) <= 1,
                    "sequence {seq:?} broke mutual exclusivity"
                );
            }
        }
    }

    #[test]
    fn out_of_range_click_ignored() {
        let mut state = NavState::new(2);
        state.click_section(1);
        state.click_section(7);
        assert_eq!(state.expanded(), Some(1));
    }

    #[test]
    fn double_toggle_restores_menu_and_scroll_lock() {
        let mut state = NavState::new(3);
        let before = state.clone();

        state.toggle_menu();
        assert!(state.is_menu_expanded());
        assert!(state.is_scroll_locked());

        state.toggle_menu();
        assert_eq!(state, before);
    }

    #[test]
    fn menu_toggle_independent_of_section_state() {
        let mut state = NavState::new(3);
        state.click_section(2);
        state.toggle_menu();
        assert_eq!(state.expanded(), Some(2));
        assert!(state.is_menu_expanded());
    }
}
