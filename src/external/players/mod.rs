//! Client for the remote player service.
//!
//! [`PlayerApi`] is the seam the dashboard talks to; [`PlayerServiceClient`]
//! implements it over HTTP. Every call resolves to a `Result` carrying a
//! [`FetchError`]; transport failures never escape as panics.

mod client;
mod error;
mod provider;
pub mod query;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::PlayerServiceClient;
pub use error::{FetchError, FetchResult};
pub use provider::PlayerApi;
pub use types::{CsvUploadReport, PageResponse};
