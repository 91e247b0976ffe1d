//! Output records returned to callers.

use serde::{Deserialize, Serialize};

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub image: String,
    pub slug: String,
    pub name: String,
    /// First release date of the first region; `null` when unannounced.
    pub release_date: Option<String>,
    pub genres: Vec<String>,
    pub producers: Vec<String>,
    pub publishers: Vec<String>,
}

/// A single game looked up by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDetail {
    #[serde(flatten)]
    pub summary: GameSummary,
    /// Plain text, HTML entities decoded.
    pub short_description: String,
    /// Plain text, HTML entities decoded.
    pub long_description: String,
}
