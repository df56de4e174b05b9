//! Error boundaries for the media portal client
//!
//! Fetch failures are classified into a closed taxonomy, mapped to localised
//! messages and rendered as a fallback in place of the page view that failed.
//! Boundaries reset on every navigation.

pub mod classifier;
pub mod draft;
pub mod error;
pub mod error_boundary;
pub mod failure;
pub mod i18n;
pub mod layout;
pub mod router;
pub mod state;

pub use classifier::{classify, kind_to_message, Classification, ClassificationResult, MessageKey};
pub use draft::{BlockDraft, DraftError, RealmBlocks};
pub use error::{BoundaryError, Result};
pub use error_boundary::{EmbedBoundary, ErrorBoundary, IntoFetchFailure, PageBoundary, Rendered};
pub use failure::{ApiError, ErrorKind, FetchFailure};
pub use i18n::{Catalog, Translator};
pub use layout::{EmbedLayout, EmbedPlaceholder, ErrorPage, FallbackLayout, PageLayout};
pub use router::{RouteChange, Router, Subscription};
pub use state::BoundaryState;
