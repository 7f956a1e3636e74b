//! Plumbing shared by both HTTP clients.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub(crate) fn client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().or_raise(|| ErrorKind::Client)
}

/// `GET` a URL and decode the body as untyped JSON.
///
/// Decoding into concrete records happens afterwards, one record at a time,
/// so a single bad record can be skipped instead of failing the response.
pub(crate) async fn get_json(client: &Client, url: &str, query: &[(&'static str, String)]) -> Result<Value> {
    tracing::debug!(url, ?query, "GET");
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| ErrorKind::Network(e.to_string()))?;
    match response.status() {
        StatusCode::NOT_FOUND => exn::bail!(ErrorKind::NotFound(url.to_string())),
        status if !status.is_success() => exn::bail!(ErrorKind::Status(status.as_u16())),
        _ => {},
    }
    Ok(response.json::<Value>().await.map_err(|e| match e.is_decode() {
        true => ErrorKind::InvalidPayload(format!("{url}: {e}")),
        false => ErrorKind::Network(e.to_string()),
    })?)
}

/// Decode a JSON array of records, skipping (and logging) the ones that
/// don't validate.
pub(crate) fn records<T: DeserializeOwned>(value: Value, what: &'static str) -> Result<Vec<T>> {
    let Value::Array(items) = value else {
        exn::bail!(ErrorKind::InvalidPayload(format!("expected an array of {what}")));
    };
    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::warn!(what, index, %error, "Skipping invalid record");
                None
            },
        })
        .collect();
    if records.len() < total {
        tracing::debug!(what, kept = records.len(), total, "Dropped invalid records");
    }
    Ok(records)
}
