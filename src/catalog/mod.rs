//! Game catalog: upstream lookups and result shaping.
//!
//! # Data Flow
//! ```text
//! handler
//!     → service.rs (search_games / get_game_by_slug)
//!     → upstream::UpstreamClient (one persisted query)
//!     → mapper.rs (UpstreamObject → GameSummary / GameDetail)
//! ```

pub mod mapper;
pub mod service;
pub mod types;

pub use mapper::{decode_description, map_game_detail, map_search_results, MappingError};
pub use service::Catalog;
pub use types::{GameDetail, GameSummary};
