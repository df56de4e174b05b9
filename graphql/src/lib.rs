//! GraphQL access to the media portal API
//!
//! Queries either produce data or a [`boundary::FetchFailure`] that error
//! boundaries know how to present.

pub mod client;
pub mod config;
pub mod error;

pub use client::{parse_response, GraphQlClient, GraphQlRequest};
pub use config::{ConfigLoader, PortalConfig};
pub use error::{GraphQlError, Result};
