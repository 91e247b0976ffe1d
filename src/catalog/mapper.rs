//! Mapping of upstream records into output records.

use thiserror::Error;

use crate::catalog::types::{GameDetail, GameSummary};
use crate::observability::metrics;
use crate::upstream::types::{NamedRef, UpstreamObject};

/// A record that could not be shaped into an output record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("Incomplete game details")]
    MissingPrimaryImage,

    #[error("Missing field `{0}`")]
    MissingField(&'static str),

    #[error("Missing release in first region")]
    MissingRelease,
}

/// Map search hits, dropping records that have no primary image.
///
/// Order of the remaining records is preserved. Any other shape problem
/// fails the whole batch.
pub fn map_search_results(objects: &[UpstreamObject]) -> Result<Vec<GameSummary>, MappingError> {
    let results = objects
        .iter()
        .filter(|object| object.image_url().is_some())
        .map(|object| {
            let slug = object.slug.as_deref().ok_or(MappingError::MissingField("slug"))?;
            summarize(object, slug)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let dropped = objects.len() - results.len();
    if dropped > 0 {
        tracing::debug!(dropped, "Dropped search records without a primary image");
    }
    metrics::record_dropped_records(dropped);

    Ok(results)
}

/// Map a single looked-up record.
///
/// `requested_slug` stands in when the upstream record omits its slug.
pub fn map_game_detail(
    object: &UpstreamObject,
    requested_slug: &str,
) -> Result<GameDetail, MappingError> {
    let summary = summarize(object, object.slug.as_deref().unwrap_or(requested_slug))?;
    let descriptions = object.descriptions();

    Ok(GameDetail {
        summary,
        short_description: decode_description(
            descriptions.and_then(|d| d.short.as_deref()).unwrap_or_default(),
        ),
        long_description: decode_description(
            descriptions.and_then(|d| d.long.as_deref()).unwrap_or_default(),
        ),
    })
}

/// Decode HTML entities (`&amp;`, `&#39;`, `&eacute;`, ...) to plain text.
pub fn decode_description(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

fn summarize(object: &UpstreamObject, slug: &str) -> Result<GameSummary, MappingError> {
    let image = object.image_url().ok_or(MappingError::MissingPrimaryImage)?;
    let name = object
        .name()
        .ok_or(MappingError::MissingField("metadata.names.name"))?;
    let release = object.first_release().ok_or(MappingError::MissingRelease)?;

    Ok(GameSummary {
        image: image.to_string(),
        slug: slug.to_string(),
        name: name.to_string(),
        release_date: release.date.clone(),
        genres: names(object.genres.as_deref()),
        producers: names(object.producers.as_deref()),
        publishers: names(object.publishers.as_deref()),
    })
}

fn names(refs: Option<&[Option<NamedRef>]>) -> Vec<String> {
    refs.unwrap_or_default()
        .iter()
        .flatten()
        .filter_map(|r| r.name.clone())
        .collect()
}
