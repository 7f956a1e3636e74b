//! Client for the AlwaysBeRunning tournament results service.

use crate::error::Result;
use crate::http::{client, get_json, records};
use crate::{ResultsQuery, ResultsSource};
use async_trait::async_trait;
use metagame_model::{Entry, Event};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_RESULTS_URL: &str = "https://alwaysberunning.net/api";

/// HTTP client for published tournament results and their entrants.
#[derive(Debug, Clone)]
pub struct AlwaysBeRunning {
    client: Client,
    base_url: String,
}
impl AlwaysBeRunning {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ResultsSource for AlwaysBeRunning {
    #[tracing::instrument(level = "debug", skip(self), fields(offset = query.offset, limit = query.limit))]
    async fn results(&self, query: &ResultsQuery) -> Result<Vec<Event>> {
        let url = format!("{}/tournaments/results", self.base_url);
        let body = get_json(&self.client, &url, &query.to_params()).await?;
        records(body, "events")
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn entries(&self, event_id: u64) -> Result<Vec<Entry>> {
        let url = format!("{}/entries", self.base_url);
        let body = get_json(&self.client, &url, &[("id", event_id.to_string())]).await?;
        records(body, "entries")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = AlwaysBeRunning::new("https://alwaysberunning.net/api/", None).unwrap();
        assert_eq!(client.base_url, DEFAULT_RESULTS_URL);
    }

    #[test]
    fn test_results_page_decodes() {
        let body = serde_json::json!([
            {"id": 1, "title": "GNK", "date": "2024.04.01.", "format": "standard"},
            {"id": 2, "title": "Broken", "date": "yesterday"},
            {"id": "3", "title": "Store Champs", "date": null, "format": "startup"}
        ]);
        let events: Vec<Event> = records(body, "events").unwrap();
        assert_eq!(events.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
    }
}
