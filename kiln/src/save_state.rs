/// Persistence bookkeeping of a model: whether it was created and what was last saved.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveState<T> {
    already_created: bool,
    saved: Option<T>,
}

impl<T> Default for SaveState<T> {
    fn default() -> Self {
        Self {
            already_created: false,
            saved: None,
        }
    }
}

impl<T: Clone + PartialEq> SaveState<T> {
    pub fn is_already_created(&self) -> bool {
        self.already_created
    }

    pub fn mark_created(&mut self) {
        self.already_created = true;
    }

    pub fn set_saved(&mut self, value: &T) {
        self.saved = Some(value.clone());
    }

    pub fn saved(&self) -> Option<&T> {
        self.saved.as_ref()
    }

    /// False when `current` equals the last saved snapshot.
    pub fn needs_update(&self, current: &T) -> bool {
        self.saved.as_ref() != Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_update() {
        let mut state = SaveState::default();
        assert!(state.needs_update(&1));
        state.set_saved(&1);
        assert!(!state.needs_update(&1));
        assert!(state.needs_update(&2));
    }

    #[test]
    fn test_mark_created() {
        let mut state = SaveState::<u8>::default();
        assert!(!state.is_already_created());
        state.mark_created();
        assert!(state.is_already_created());
    }
}
