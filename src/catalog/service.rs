//! Search and detail lookups against the upstream.

use crate::config::{ProxyConfig, QueryConfig};
use crate::upstream::types::{
    ObjectSelectData, ObjectSelectVariables, SearchObjectsByNameData, SearchVariables,
    GAME_OBJECT_TYPE, PUBLISHED_STATE,
};
use crate::upstream::{Operation, UpstreamClient, UpstreamObject, UpstreamResult};

/// Game catalog backed by the upstream GraphQL API.
#[derive(Debug, Clone)]
pub struct Catalog {
    client: UpstreamClient,
    queries: QueryConfig,
    search_count: u32,
    region: String,
}

impl Catalog {
    pub fn new(client: UpstreamClient, config: &ProxyConfig) -> Self {
        Self {
            client,
            queries: config.queries.clone(),
            search_count: config.upstream.search_count,
            region: config.upstream.region.clone(),
        }
    }

    /// Region used for detail lookups.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Search games by name.
    ///
    /// A blank term yields an empty list without calling the upstream.
    /// `Ok(None)` means the upstream returned no object list.
    pub async fn search_games(&self, term: &str) -> UpstreamResult<Option<Vec<UpstreamObject>>> {
        if term.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }

        let query = self.queries.persisted(Operation::SearchObjectsByName);
        let variables = SearchVariables {
            term,
            count: self.search_count,
            object_type: GAME_OBJECT_TYPE,
        };

        let data: Option<SearchObjectsByNameData> = self.client.execute(&query, &variables).await?;

        Ok(data
            .and_then(|d| d.search_objects_by_name)
            .and_then(|s| s.objects))
    }

    /// Look up a single published game by slug.
    pub async fn get_game_by_slug(
        &self,
        slug: &str,
        region: &str,
    ) -> UpstreamResult<Option<UpstreamObject>> {
        let query = self.queries.persisted(Operation::ObjectSelectByTypeAndSlug);
        let variables = ObjectSelectVariables {
            slug,
            object_type: GAME_OBJECT_TYPE,
            region,
            state: PUBLISHED_STATE,
        };

        let data: Option<ObjectSelectData> = self.client.execute(&query, &variables).await?;

        Ok(data.and_then(|d| d.object_select_by_type_and_slug))
    }
}
