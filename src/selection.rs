//! Two-state selection model for the night list.
//!
//! Transitions are a pure function of the current state and the clicked
//! night, so they can be tested without any panel or DOM.

/// Which night, if any, the content panel is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Night(String),
}

impl Selection {
    /// Next state after a click on `night`.
    ///
    /// Every click lands in `Night(night)`, including a click on the night
    /// already shown. Callers treat that as a full reload.
    pub fn transition(&self, night: &str) -> Selection {
        Selection::Night(night.to_string())
    }

    pub fn night(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Night(n) => Some(n),
        }
    }
}
