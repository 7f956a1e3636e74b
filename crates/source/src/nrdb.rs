//! Client for the NetrunnerDB public card and decklist API.

use crate::DeckSource;
use crate::error::{ErrorKind, Result};
use crate::http::{client, get_json};
use async_trait::async_trait;
use metagame_model::{Card, DeckId, DecklistRecord};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_DECKS_URL: &str = "https://netrunnerdb.com/api/2.0/public";

/// Every response is wrapped as `{"success": bool, "total": n, "data": [...]}`.
#[derive(Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    data: Vec<Value>,
}

#[derive(Deserialize)]
struct RemoteDecklist {
    id: u64,
    #[serde(default)]
    uuid: String,
    name: String,
    #[serde(default)]
    cards: BTreeMap<String, u32>,
}
impl From<RemoteDecklist> for DecklistRecord {
    fn from(remote: RemoteDecklist) -> Self {
        DecklistRecord::new(DeckId(remote.id), remote.uuid, remote.name, remote.cards)
    }
}

/// Pull the single record out of an enveloped response.
fn unwrap_envelope<T: DeserializeOwned>(body: Value, what: &str) -> Result<T> {
    let envelope: Envelope =
        serde_json::from_value(body).map_err(|e| ErrorKind::InvalidPayload(format!("{what}: {e}")))?;
    if !envelope.success {
        exn::bail!(ErrorKind::InvalidPayload(format!("{what}: service reported failure")));
    }
    let Some(first) = envelope.data.into_iter().next() else {
        tracing::debug!(what, total = ?envelope.total, "Empty envelope");
        exn::bail!(ErrorKind::NotFound(what.to_string()));
    };
    Ok(serde_json::from_value(first).map_err(|e| ErrorKind::InvalidPayload(format!("{what}: {e}")))?)
}

/// HTTP client for published decklists and card data.
#[derive(Debug, Clone)]
pub struct NetrunnerDb {
    client: Client,
    base_url: String,
}
impl NetrunnerDb {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DeckSource for NetrunnerDb {
    #[tracing::instrument(level = "debug", skip(self), fields(%id))]
    async fn decklist(&self, id: DeckId) -> Result<DecklistRecord> {
        let url = format!("{}/decklist/{id}", self.base_url);
        let body = get_json(&self.client, &url, &[]).await?;
        let remote: RemoteDecklist = unwrap_envelope(body, &format!("decklist {id}"))?;
        if remote.id != id.0 {
            exn::bail!(ErrorKind::InvalidPayload(format!("asked for decklist {id}, got {}", remote.id)));
        }
        Ok(remote.into())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn card(&self, code: &str) -> Result<Card> {
        let url = format!("{}/card/{code}", self.base_url);
        let body = get_json(&self.client, &url, &[]).await?;
        unwrap_envelope(body, &format!("card {code}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decklist_envelope() {
        let body = json!({
            "success": true,
            "total": 1,
            "version_number": "2.0",
            "data": [{
                "id": 79610,
                "uuid": "4493cfda-8cc3-4498-bff7-d249e039b681",
                "name": "Tithe Tax",
                "date_creation": "2024-05-01T10:00:00+00:00",
                "cards": {"30077": 3, "33001": 1, "33002": 0}
            }]
        });
        let record: DecklistRecord = unwrap_envelope::<RemoteDecklist>(body, "decklist 79610").unwrap().into();
        assert_eq!(record.id, DeckId(79610));
        assert_eq!(record.cards.len(), 2);
        assert_eq!(record.url, "https://netrunnerdb.com/en/decklist/4493cfda-8cc3-4498-bff7-d249e039b681");
    }

    #[test]
    fn test_card_envelope() {
        let body = json!({
            "success": true,
            "data": [{"code": "30077", "title": "Hedge Fund", "faction_code": "neutral-corp", "side_code": "corp"}]
        });
        let card: Card = unwrap_envelope(body, "card 30077").unwrap();
        assert_eq!(card.title, "Hedge Fund");
    }

    #[test]
    fn test_failed_envelope() {
        let err = unwrap_envelope::<Card>(json!({"success": false, "data": []}), "card x").unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPayload(_)));
    }

    #[test]
    fn test_empty_envelope() {
        let err = unwrap_envelope::<Card>(json!({"success": true, "total": 0, "data": []}), "card x").unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_malformed_record() {
        let err = unwrap_envelope::<Card>(json!({"success": true, "data": [{"code": 1}]}), "card 1").unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPayload(_)));
    }
}
