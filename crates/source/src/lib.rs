//! Remote data sources.
//!
//! The pipeline only ever sees the two traits defined here: one for
//! tournament results and entrants, one for decklists and cards. The HTTP
//! clients implement them against the public services; the in-memory
//! `MockSource` (feature `mock`) implements both for tests.

mod abr;
pub mod error;
mod http;
#[cfg(feature = "mock")]
mod mock;
mod nrdb;
mod query;

pub use crate::abr::{AlwaysBeRunning, DEFAULT_RESULTS_URL};
pub use crate::error::{Error, ErrorKind, Result};
#[cfg(feature = "mock")]
pub use crate::mock::MockSource;
pub use crate::nrdb::{DEFAULT_DECKS_URL, NetrunnerDb};
pub use crate::query::{MAX_PAGE_SIZE, ResultsQuery};
use async_trait::async_trait;
use metagame_model::{Card, DeckId, DecklistRecord, Entry, Event};
use std::sync::Arc;

/// Published tournament results.
#[async_trait]
pub trait ResultsSource: Send + Sync {
    /// One page of events. A page shorter than `query.limit` is the last.
    async fn results(&self, query: &ResultsQuery) -> Result<Vec<Event>>;

    /// Every entrant of one event.
    async fn entries(&self, event_id: u64) -> Result<Vec<Entry>>;
}

/// Published decklists and the cards they reference.
#[async_trait]
pub trait DeckSource: Send + Sync {
    async fn decklist(&self, id: DeckId) -> Result<DecklistRecord>;

    async fn card(&self, code: &str) -> Result<Card>;
}

pub type ResultsHandle = Arc<dyn ResultsSource>;
pub type DeckHandle = Arc<dyn DeckSource>;
