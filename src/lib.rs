//! Game Metadata Proxy Library
//!
//! Forwards game search and detail lookups to a persisted-query GraphQL
//! upstream and reshapes the answers into a small JSON contract.

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use catalog::{Catalog, GameDetail, GameSummary};
pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
