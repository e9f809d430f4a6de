use anyhow::Context;

use crate::models::Movie;

const SEED_JSON: &str = include_str!("../../data/movies.json");

/// Parses the embedded startup dataset. Every seed record is expected to
/// satisfy the movie schema; a malformed dataset is a build defect, not a
/// runtime condition, so the process refuses to start on it.
pub fn load() -> anyhow::Result<Vec<Movie>> {
    serde_json::from_str(SEED_JSON)
        .context("Failed to parse embedded seed dataset (data/movies.json)")
}
