//! Endpoint resolution and JSON fetching for the revenue-sharing backend.
//!
//! `revlane-dispatch` turns "show resource X of object Y" into a URL and a
//! JSON document. It knows nothing about rendering; the `revlane` crate
//! wires its results into lanes.
//!
//! # Features
//!
//! - **Endpoint resolution**: [`ResourceKind`] tags mapped to URLs under a
//!   configurable base ([`EndpointResolver`])
//! - **Raw links**: identifier-based lookup of the JSON behind a card
//!   ([`classify_raw`])
//! - **Fetching**: the async [`Fetcher`] trait, with an HTTP implementation
//!   and an in-memory one for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use revlane_dispatch::{EndpointResolver, Fetcher, HttpFetcher, ResourceKind, DEFAULT_TIMEOUT};
//!
//! let resolver = EndpointResolver::new("http://localhost:8580/revenue/")?;
//! let fetcher = HttpFetcher::new(DEFAULT_TIMEOUT)?;
//! let url = resolver.try_resolve(ResourceKind::Bills, Some(subscription_id))?;
//! let bills = fetcher.get_json(&url).await?;
//! ```

mod endpoint;
mod error;
mod fetch;
mod raw;

pub use endpoint::{as_revenue_bill_id, EndpointResolver, ResourceKind, DEFAULT_BASE_URL};
pub use error::{DispatchError, FetchError};
pub use fetch::{Fetcher, HttpFetcher, MemoryFetcher, DEFAULT_TIMEOUT};
pub use raw::{classify_raw, RawTarget};

// Re-exported so implementors of `Fetcher` need no direct dependency.
pub use async_trait::async_trait;
