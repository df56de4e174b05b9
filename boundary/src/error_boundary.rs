//! Error boundaries around the rendering of one page view.
//!
//! A boundary wraps the rendering of a subtree (a closure or a future). When
//! the subtree fails with a [`FetchFailure`], the failure is recorded and a
//! fallback is rendered in its place until the route changes. Any other error
//! is handed back to the caller untouched.

use crate::classifier::classify;
use crate::error::{BoundaryError, Result};
use crate::failure::FetchFailure;
use crate::i18n::Translator;
use crate::layout::{EmbedLayout, FallbackLayout, PageLayout};
use crate::router::{Router, Subscription};
use crate::state::BoundaryState;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

/// Conversion of an arbitrary render error into the fetch failure taxonomy.
///
/// Returns the original error when it is not a fetch failure.
pub trait IntoFetchFailure: Sized {
    fn into_fetch_failure(self) -> std::result::Result<FetchFailure, Self>;
}

impl IntoFetchFailure for FetchFailure {
    fn into_fetch_failure(self) -> std::result::Result<FetchFailure, Self> {
        Ok(self)
    }
}

impl IntoFetchFailure for Box<dyn std::error::Error + Send + Sync> {
    fn into_fetch_failure(self) -> std::result::Result<FetchFailure, Self> {
        self.downcast::<FetchFailure>().map(|failure| *failure)
    }
}

impl IntoFetchFailure for Box<dyn std::error::Error> {
    fn into_fetch_failure(self) -> std::result::Result<FetchFailure, Self> {
        self.downcast::<FetchFailure>().map(|failure| *failure)
    }
}

/// Outcome of rendering through a boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<T, F> {
    Content(T),
    Fallback(F),
}

impl<T, F> Rendered<T, F> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn content(self) -> Option<T> {
        match self {
            Self::Content(content) => Some(content),
            Self::Fallback(_) => None,
        }
    }

    pub fn fallback(self) -> Option<F> {
        match self {
            Self::Content(_) => None,
            Self::Fallback(fallback) => Some(fallback),
        }
    }
}

/// Boundary rendering the full error page.
pub type PageBoundary = ErrorBoundary<PageLayout>;

/// Boundary for embedded players, rendering a compact placeholder.
pub type EmbedBoundary = ErrorBoundary<EmbedLayout>;

pub struct ErrorBoundary<L = PageLayout> {
    state: Rc<RefCell<BoundaryState>>,
    layout: L,
    translator: Rc<dyn Translator>,
    _subscription: Subscription,
}

impl ErrorBoundary<PageLayout> {
    pub fn page(router: Option<&Router>, translator: Rc<dyn Translator>) -> Result<Self> {
        Self::mount(router, PageLayout, translator)
    }
}

impl ErrorBoundary<EmbedLayout> {
    pub fn embed(router: Option<&Router>, translator: Rc<dyn Translator>) -> Result<Self> {
        Self::mount(router, EmbedLayout, translator)
    }
}

impl<L: FallbackLayout> ErrorBoundary<L> {
    /// Mount a boundary in the given routing context.
    ///
    /// The boundary clears its error on every route change for as long as it
    /// lives. Mounting without a router is a bug and fails with
    /// [`BoundaryError::MissingRouter`].
    pub fn mount(router: Option<&Router>, layout: L, translator: Rc<dyn Translator>) -> Result<Self> {
        let router = router.ok_or(BoundaryError::MissingRouter)?;

        let state = Rc::new(RefCell::new(BoundaryState::new()));
        let weak = Rc::downgrade(&state);
        let subscription = router.listen(move |change| {
            if let Some(state) = weak.upgrade() {
                if let Some(previous) = state.borrow_mut().reset() {
                    tracing::debug!(to = %change.to, error = %previous, "route changed, clearing boundary error");
                }
            }
        });

        Ok(Self {
            state,
            layout,
            translator,
            _subscription: subscription,
        })
    }

    /// Record `error` if it is a fetch failure, otherwise hand it back.
    pub fn catch<E: IntoFetchFailure>(&self, error: E) -> std::result::Result<(), E> {
        let failure = error.into_fetch_failure()?;
        Self::store(&mut self.state.borrow_mut(), failure);
        Ok(())
    }

    fn store(state: &mut BoundaryState, failure: FetchFailure) -> &FetchFailure {
        if let Some(current) = state.current_error() {
            tracing::debug!(error = %failure, kept = %current, "boundary already holds an error");
        } else {
            tracing::warn!(error = %failure, "error boundary caught fetch failure");
        }
        state.record(failure)
    }

    /// Render `child` through the boundary.
    ///
    /// While an error is recorded, `child` is not called and the fallback is
    /// returned instead.
    pub fn render<T, E, F>(&self, child: F) -> std::result::Result<Rendered<T, L::Output>, E>
    where
        E: IntoFetchFailure,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        if let Some(fallback) = self.fallback() {
            return Ok(Rendered::Fallback(fallback));
        }

        let generation = self.generation();
        match child() {
            Ok(content) => Ok(Rendered::Content(content)),
            Err(error) => self.fail(error, generation),
        }
    }

    /// Like [`render`](Self::render), for a subtree that fetches asynchronously.
    ///
    /// A failure that arrives after the route changed belongs to the previous
    /// page view. It is rendered for this call but not recorded.
    pub async fn render_async<T, E, Fut>(
        &self,
        child: Fut,
    ) -> std::result::Result<Rendered<T, L::Output>, E>
    where
        E: IntoFetchFailure,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(fallback) = self.fallback() {
            return Ok(Rendered::Fallback(fallback));
        }

        let generation = self.generation();
        match child.await {
            Ok(content) => Ok(Rendered::Content(content)),
            Err(error) => self.fail(error, generation),
        }
    }

    fn generation(&self) -> u64 {
        self.state.borrow().generation()
    }

    fn fail<T, E: IntoFetchFailure>(
        &self,
        error: E,
        started_in: u64,
    ) -> std::result::Result<Rendered<T, L::Output>, E> {
        let failure = error.into_fetch_failure()?;
        let mut state = self.state.borrow_mut();

        if state.generation() != started_in {
            tracing::debug!(error = %failure, "dropping failure from a previous page view");
            drop(state);
            return Ok(Rendered::Fallback(self.render_fallback(&failure)));
        }

        // Render what the state holds so every caller in this view sees one error.
        let stored = Self::store(&mut state, failure);
        Ok(Rendered::Fallback(self.render_fallback(stored)))
    }

    fn render_fallback(&self, failure: &FetchFailure) -> L::Output {
        let classification = classify(failure);
        self.layout.render(failure, &classification, self.translator.as_ref())
    }

    /// The fallback for the recorded error, if any.
    pub fn fallback(&self) -> Option<L::Output> {
        let state = self.state.borrow();
        state.current_error().map(|failure| self.render_fallback(failure))
    }

    pub fn current_error(&self) -> Option<FetchFailure> {
        self.state.borrow().current_error().cloned()
    }

    pub fn has_error(&self) -> bool {
        self.state.borrow().is_errored()
    }
}

impl<L> std::fmt::Debug for ErrorBoundary<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorBoundary")
            .field("state", &self.state.borrow())
            .finish_non_exhaustive()
    }
}
