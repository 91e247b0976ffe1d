//! Upstream GraphQL request and response types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Object type requested from the upstream for every lookup.
pub const GAME_OBJECT_TYPE: &str = "Game";

/// Publication state requested for detail lookups.
pub const PUBLISHED_STATE: &str = "Published";

/// Persisted query protocol version understood by the upstream.
pub const PERSISTED_QUERY_VERSION: u32 = 1;

/// Operations the upstream has persisted queries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Free text search over objects.
    SearchObjectsByName,
    /// Single object lookup by type and slug.
    ObjectSelectByTypeAndSlug,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SearchObjectsByName => "SearchObjectsByName",
            Operation::ObjectSelectByTypeAndSlug => "ObjectSelectByTypeAndSlug",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation together with the hash the upstream registered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedQuery {
    pub operation: Operation,
    pub sha256_hash: String,
}

impl PersistedQuery {
    pub fn new(operation: Operation, sha256_hash: impl Into<String>) -> Self {
        Self {
            operation,
            sha256_hash: sha256_hash.into(),
        }
    }

    /// The `extensions` query parameter payload.
    pub fn extensions(&self) -> Extensions<'_> {
        Extensions {
            persisted_query: PersistedQueryExtension {
                version: PERSISTED_QUERY_VERSION,
                sha256_hash: &self.sha256_hash,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extensions<'a> {
    pub persisted_query: PersistedQueryExtension<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedQueryExtension<'a> {
    pub version: u32,
    pub sha256_hash: &'a str,
}

/// Variables for `SearchObjectsByName`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariables<'a> {
    pub term: &'a str,
    pub count: u32,
    pub object_type: &'a str,
}

/// Variables for `ObjectSelectByTypeAndSlug`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSelectVariables<'a> {
    pub slug: &'a str,
    pub object_type: &'a str,
    pub region: &'a str,
    pub state: &'a str,
}

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub path: Option<serde_json::Value>,
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchObjectsByNameData {
    pub search_objects_by_name: Option<SearchObjects>,
}

#[derive(Debug, Deserialize)]
pub struct SearchObjects {
    pub objects: Option<Vec<UpstreamObject>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSelectData {
    pub object_select_by_type_and_slug: Option<UpstreamObject>,
}

/// Raw game record as returned by the upstream.
///
/// Nothing is guaranteed present; list fields may be absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamObject {
    pub slug: Option<String>,
    pub primary_image: Option<Image>,
    pub metadata: Option<Metadata>,
    pub genres: Option<Vec<Option<NamedRef>>>,
    pub producers: Option<Vec<Option<NamedRef>>>,
    pub publishers: Option<Vec<Option<NamedRef>>>,
    pub object_regions: Option<Vec<ObjectRegion>>,
}

impl UpstreamObject {
    /// URL of the primary image, if the record has a usable one.
    ///
    /// A `primaryImage` whose `url` is null counts as no image: search drops
    /// the record and detail reports it incomplete.
    pub fn image_url(&self) -> Option<&str> {
        self.primary_image.as_ref()?.url.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref()?.names.as_ref()?.name.as_deref()
    }

    pub fn descriptions(&self) -> Option<&Descriptions> {
        self.metadata.as_ref()?.descriptions.as_ref()
    }

    /// First release of the first region.
    pub fn first_release(&self) -> Option<&Release> {
        self.object_regions
            .as_ref()?
            .first()?
            .releases
            .as_ref()?
            .first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Image {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Metadata {
    pub names: Option<Names>,
    pub descriptions: Option<Descriptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Names {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Descriptions {
    pub short: Option<String>,
    pub long: Option<String>,
}

/// Genre, producer or publisher reference.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NamedRef {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ObjectRegion {
    pub releases: Option<Vec<Release>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Release {
    pub date: Option<String>,
}

/// Errors that can occur while talking to the upstream.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP client could not be constructed.
    #[error("Client setup error: {0}")]
    Setup(String),

    /// Network or protocol failure.
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Body was not a GraphQL response of the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Upstream reported GraphQL errors.
    #[error("GraphQL errors: {}", join_messages(.0))]
    GraphQl(Vec<GraphQlError>),
}

fn join_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for upstream operations.
///
/// `Ok(None)` means the upstream answered but carried no data for the lookup.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extensions_shape() {
        let query = PersistedQuery::new(Operation::SearchObjectsByName, "abc");
        let value = serde_json::to_value(query.extensions()).unwrap();
        assert_eq!(value, json!({"persistedQuery": {"version": 1, "sha256Hash": "abc"}}));
    }

    #[test]
    fn test_variables_are_camel_case() {
        let vars = ObjectSelectVariables {
            slug: "zelda",
            object_type: GAME_OBJECT_TYPE,
            region: "ca",
            state: PUBLISHED_STATE,
        };
        assert_eq!(
            serde_json::to_string(&vars).unwrap(),
            r#"{"slug":"zelda","objectType":"Game","region":"ca","state":"Published"}"#
        );
    }

    #[test]
    fn test_tolerates_sparse_object() {
        let object: UpstreamObject = serde_json::from_value(json!({
            "slug": "halo",
            "genres": null,
            "publishers": [null, {"name": "Xbox"}],
            "objectRegions": []
        }))
        .unwrap();

        assert_eq!(object.slug.as_deref(), Some("halo"));
        assert!(object.image_url().is_none());
        assert!(object.name().is_none());
        assert!(object.first_release().is_none());
        assert_eq!(object.publishers.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_first_release_path() {
        let object: UpstreamObject = serde_json::from_value(json!({
            "objectRegions": [
                {"releases": [{"date": "2017-03-03"}, {"date": "2018-01-01"}]},
                {"releases": [{"date": "1999-01-01"}]}
            ]
        }))
        .unwrap();
        assert_eq!(
            object.first_release().and_then(|r| r.date.as_deref()),
            Some("2017-03-03")
        );
    }

    #[test]
    fn test_error_display() {
        let err = UpstreamError::GraphQl(vec![
            GraphQlError { message: "PersistedQueryNotFound".into(), path: None },
            GraphQlError { message: "boom".into(), path: None },
        ]);
        assert_eq!(err.to_string(), "GraphQL errors: PersistedQueryNotFound; boom");
        assert_eq!(UpstreamError::Status(503).to_string(), "Upstream returned status 503");
    }
}
