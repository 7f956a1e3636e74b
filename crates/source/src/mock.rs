//! In-memory sources for testing.

use crate::error::{ErrorKind, Result};
use crate::{DeckSource, ResultsQuery, ResultsSource};
use async_trait::async_trait;
use metagame_model::{Card, DeckId, DecklistRecord, Entry, Event};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory implementation of both source traits.
///
/// Pages are served from the configured event list in order, so pagination
/// behaves exactly like the real service. Every call is counted, and
/// individual pages, events, decklists or cards can be made to fail.
///
/// # Examples
///
/// ```
/// use metagame_model::{DeckId, DecklistRecord};
/// use metagame_source::{DeckSource, MockSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = MockSource::default()
///     .with_decklist(DecklistRecord::new(DeckId(1), "uuid", "Deck", []))
///     .failing_decklist(DeckId(2));
/// assert!(source.decklist(DeckId(1)).await.is_ok());
/// assert!(source.decklist(DeckId(2)).await.is_err());
/// assert_eq!(source.decklist_calls(), 2);
/// # }
/// ```
#[derive(Default)]
pub struct MockSource {
    events: Vec<Event>,
    entries: HashMap<u64, Vec<Entry>>,
    decklists: HashMap<DeckId, DecklistRecord>,
    cards: HashMap<String, Card>,
    failing_pages: HashSet<usize>,
    failing_entries: HashSet<u64>,
    failing_decklists: HashSet<DeckId>,
    failing_cards: HashSet<String>,
    results_calls: AtomicUsize,
    entries_calls: AtomicUsize,
    decklist_calls: AtomicUsize,
    card_calls: AtomicUsize,
    queries: Mutex<Vec<ResultsQuery>>,
}

impl MockSource {
    pub fn with_event(mut self, event: Event, entries: Vec<Entry>) -> Self {
        self.entries.insert(event.id, entries);
        self.events.push(event);
        self
    }

    pub fn with_decklist(mut self, record: DecklistRecord) -> Self {
        self.decklists.insert(record.id, record);
        self
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.insert(card.code.clone(), card);
        self
    }

    /// Fail the results page starting at `offset`.
    pub fn failing_page(mut self, offset: usize) -> Self {
        self.failing_pages.insert(offset);
        self
    }

    pub fn failing_entries(mut self, event_id: u64) -> Self {
        self.failing_entries.insert(event_id);
        self
    }

    pub fn failing_decklist(mut self, id: DeckId) -> Self {
        self.failing_decklists.insert(id);
        self
    }

    pub fn failing_card(mut self, code: impl Into<String>) -> Self {
        self.failing_cards.insert(code.into());
        self
    }

    pub fn results_calls(&self) -> usize {
        self.results_calls.load(Ordering::SeqCst)
    }

    pub fn entries_calls(&self) -> usize {
        self.entries_calls.load(Ordering::SeqCst)
    }

    pub fn decklist_calls(&self) -> usize {
        self.decklist_calls.load(Ordering::SeqCst)
    }

    pub fn card_calls(&self) -> usize {
        self.card_calls.load(Ordering::SeqCst)
    }

    /// Every results query received, in order.
    pub fn queries(&self) -> Vec<ResultsQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ResultsSource for MockSource {
    async fn results(&self, query: &ResultsQuery) -> Result<Vec<Event>> {
        self.results_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(*query);
        }
        if self.failing_pages.contains(&query.offset) {
            exn::bail!(ErrorKind::Status(503));
        }
        Ok(self.events.iter().skip(query.offset).take(query.limit).cloned().collect())
    }

    async fn entries(&self, event_id: u64) -> Result<Vec<Entry>> {
        self.entries_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_entries.contains(&event_id) {
            exn::bail!(ErrorKind::Network("connection reset".to_string()));
        }
        match self.entries.get(&event_id) {
            Some(entries) => Ok(entries.clone()),
            None => exn::bail!(ErrorKind::NotFound(format!("entries for event {event_id}"))),
        }
    }
}

#[async_trait]
impl DeckSource for MockSource {
    async fn decklist(&self, id: DeckId) -> Result<DecklistRecord> {
        self.decklist_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_decklists.contains(&id) {
            exn::bail!(ErrorKind::Network("connection reset".to_string()));
        }
        match self.decklists.get(&id) {
            Some(record) => Ok(record.clone()),
            None => exn::bail!(ErrorKind::NotFound(format!("decklist {id}"))),
        }
    }

    async fn card(&self, code: &str) -> Result<Card> {
        self.card_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_cards.contains(code) {
            exn::bail!(ErrorKind::Network("connection reset".to_string()));
        }
        match self.cards.get(code) {
            Some(card) => Ok(card.clone()),
            None => exn::bail!(ErrorKind::NotFound(format!("card {code}"))),
        }
    }
}
