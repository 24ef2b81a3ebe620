//! Danger-signal latch.

/// Sticky danger-signal state for one live chat view.
///
/// The latch has exactly one transition, `raise`, and no way back to
/// `Clear`: once the backend asserts a red flag the composer stays
/// blocked for the remainder of the view's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RedFlagLatch {
    /// No danger signal has been observed.
    #[default]
    Clear,
    /// A danger signal was observed; carries the display label.
    Flagged(String),
}

impl RedFlagLatch {
    /// Raises the latch with a display label.
    ///
    /// A latch that is already raised keeps its original label.
    pub fn raise(&mut self, label: String) {
        if matches!(self, RedFlagLatch::Clear) {
            *self = RedFlagLatch::Flagged(label);
        }
    }

    /// True once a danger signal has been latched.
    pub fn is_raised(&self) -> bool {
        matches!(self, RedFlagLatch::Flagged(_))
    }

    /// The latched display label, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            RedFlagLatch::Clear => None,
            RedFlagLatch::Flagged(label) => Some(label.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_is_one_way() {
        let mut latch = RedFlagLatch::default();
        assert!(!latch.is_raised());

        latch.raise("sepsis".to_string());
        assert!(latch.is_raised());
        assert_eq!(latch.label(), Some("sepsis"));
    }

    #[test]
    fn test_first_label_wins() {
        let mut latch = RedFlagLatch::default();
        latch.raise("sepsis".to_string());
        latch.raise("stroke".to_string());
        assert_eq!(latch.label(), Some("sepsis"));
    }
}
