use crate::failure::FetchFailure;

/// Error state of one page view.
///
/// Set by the first failure that reaches the boundary and cleared only by a
/// route change. Every reset starts a new generation, so a render begun in an
/// earlier page view can tell that its failure no longer belongs here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryState {
    current_error: Option<FetchFailure>,
    generation: u64,
}

impl BoundaryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_error(&self) -> Option<&FetchFailure> {
        self.current_error.as_ref()
    }

    pub fn is_errored(&self) -> bool {
        self.current_error.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Store `failure` unless a failure is already recorded. Returns the
    /// failure held afterwards.
    pub fn record(&mut self, failure: FetchFailure) -> &FetchFailure {
        self.current_error.get_or_insert(failure)
    }

    /// Clear the state and start a new generation, returning the failure that
    /// was recorded.
    pub fn reset(&mut self) -> Option<FetchFailure> {
        self.generation = self.generation.wrapping_add(1);
        self.current_error.take()
    }
}
