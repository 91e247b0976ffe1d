//! Upstream GraphQL dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Catalog operation (search / detail)
//!     → types.rs (operation, variables, persisted-query extensions)
//!     → client.rs (URL-encoded GET with identification headers)
//!     → GraphQlResponse<T> (data or errors)
//! ```
//!
//! # Design Decisions
//! - Only the query hash is sent, never the query text
//! - GraphQL `errors` are failures even when `data` is present
//! - Every failure is logged here; callers only map it to a status

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{Operation, PersistedQuery, UpstreamError, UpstreamObject, UpstreamResult};
