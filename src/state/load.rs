//! Loading state shared by the state holders

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::FetchError;

/// Data slot, loading flag and error slot of one fetchable resource
#[derive(Debug, Clone, PartialEq)]
pub struct LoadState<T> {
    pub data: T,
    pub is_loading: bool,
    pub error: Option<FetchError>,
    /// Target of the most recent fetch (database or page id)
    pub current: Option<String>,
}

impl<T: Default> Default for LoadState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            is_loading: false,
            error: None,
            current: None,
        }
    }
}

impl<T: Default> LoadState<T> {
    /// Whether a fetch for `target` is already running
    pub fn is_loading_for(&self, target: &str) -> bool {
        self.is_loading && self.current.as_deref() == Some(target)
    }

    /// A fetch begins: set the flag and forget the previous error
    pub fn start_loading(&mut self, target: &str) {
        self.is_loading = true;
        self.error = None;
        self.current = Some(target.to_string());
    }

    /// A fetch completed; the whole collection is replaced
    pub fn succeed(&mut self, data: T) {
        self.data = data;
        self.error = None;
        self.is_loading = false;
    }

    /// A fetch failed; data is cleared
    pub fn fail(&mut self, error: FetchError) {
        self.data = T::default();
        self.error = Some(error);
        self.is_loading = false;
    }

    /// A fetch was refused before starting; the loading flag is untouched
    pub fn reject(&mut self, error: FetchError) {
        self.data = T::default();
        self.error = Some(error);
    }

    /// Clear data, error and target
    pub fn reset(&mut self) {
        self.data = T::default();
        self.error = None;
        self.current = None;
    }

    /// The error slot as a message
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Lock a state slot; a poisoned lock still holds consistent data
pub(crate) fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the loading flag when dropped
///
/// Held for the duration of a fetch so the flag is reset on every exit
/// path, including when the fetch future is dropped mid-request.
pub(crate) struct LoadingGuard<'a, T> {
    slot: &'a Mutex<LoadState<T>>,
}

impl<'a, T> LoadingGuard<'a, T> {
    pub(crate) fn new(slot: &'a Mutex<LoadState<T>>) -> Self {
        Self { slot }
    }
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        lock(self.slot).is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut state: LoadState<Vec<u32>> = LoadState::default();

        state.start_loading("db");
        assert!(state.is_loading_for("db"));
        assert!(!state.is_loading_for("other"));

        state.succeed(vec![1, 2]);
        assert!(!state.is_loading);
        assert_eq!(state.data, vec![1, 2]);

        state.start_loading("db");
        state.fail(FetchError::Shape("bad".to_string()));
        assert!(state.data.is_empty());
        assert_eq!(state.error_message().as_deref(), Some("bad"));

        state.start_loading("db");
        assert_eq!(state.error, None);

        state.reset();
        assert_eq!(state.current, None);
        assert!(state.is_loading);
    }

    #[test]
    fn test_reject_keeps_loading_flag() {
        let mut state: LoadState<Vec<u32>> = LoadState::default();
        state.data = vec![9];
        state.reject(FetchError::Config("missing".to_string()));
        assert!(state.data.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.error_message().as_deref(), Some("missing"));
    }

    #[test]
    fn test_guard_clears_loading() {
        let slot = Mutex::new(LoadState::<Vec<u32>>::default());
        lock(&slot).start_loading("x");
        {
            let _guard = LoadingGuard::new(&slot);
            assert!(lock(&slot).is_loading);
        }
        assert!(!lock(&slot).is_loading);
    }
}
