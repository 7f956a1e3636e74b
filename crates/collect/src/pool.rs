use crate::error::{ErrorKind, Result};
use crate::events::{EventFilter, collect_events};
use crate::resolve::{DecklistPair, Resolution, decklists_from_event, resolve_deck_ids};
use exn::ResultExt;
use metagame_cache::{Cache, CacheReader, TournamentRecord};
use metagame_model::Event;
use metagame_source::{DeckHandle, ResultsHandle, ResultsQuery};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Everything one worker learned about one tournament.
#[derive(Debug)]
pub struct TournamentResult {
    pub event: Event,
    /// Merged placement record, ready to be written back.
    pub record: TournamentRecord,
    pub resolution: Resolution,
}

/// Resolve the top decklists of a single tournament.
///
/// Works only from its arguments and the read-only cache view; nothing is
/// written. Fails only if the event's entrants can't be fetched.
#[tracing::instrument(level = "debug", skip_all, fields(event = event.id))]
pub async fn process_event(
    event: Event,
    snapshot: Option<TournamentRecord>,
    cache: CacheReader,
    results: ResultsHandle,
    decks: DeckHandle,
    top_fraction: f64,
) -> Result<TournamentResult> {
    let entries = event.entries_with(|id| results.entries(id)).await.or_raise(|| ErrorKind::Source)?;
    let record = resolve_deck_ids(&event, entries, snapshot);
    let resolution = decklists_from_event(top_fraction, entries.len(), &record, &cache, decks.as_ref()).await;
    tracing::debug!(
        entrants = entries.len(),
        placements = record.placements(),
        selected = resolution.pairs.len(),
        fetched = resolution.fetched.len(),
        "Resolved tournament"
    );
    Ok(TournamentResult {
        event,
        record,
        resolution,
    })
}

/// Drives collection across many tournaments.
///
/// Tournaments are processed concurrently by at most `workers` tasks. Workers
/// only read the cache; every write happens here, one result at a time, as
/// results come back.
pub struct Collector {
    results: ResultsHandle,
    decks: DeckHandle,
    cache: Cache,
    workers: usize,
    top_fraction: f64,
}
impl Collector {
    pub fn new(results: ResultsHandle, decks: DeckHandle, cache: Cache) -> Self {
        Self {
            results,
            decks,
            cache,
            workers: 1,
            top_fraction: 1.0,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Share of each tournament's placements to collect, `0.0..=1.0`.
    pub fn with_top_fraction(mut self, top_fraction: f64) -> Self {
        self.top_fraction = top_fraction;
        self
    }

    /// Every published event passing `filter`.
    pub async fn events(&self, query: &ResultsQuery, filter: &EventFilter) -> Vec<Event> {
        let events = collect_events(self.results.as_ref(), query).await;
        let total = events.len();
        let events = filter.apply(events);
        tracing::info!(total, matching = events.len(), format = %filter.format, "Collected events");
        events
    }

    /// Top decklists of every event, as (corp, runner) pairs.
    ///
    /// An event whose entrants can't be fetched is logged and contributes
    /// nothing. Pairs come back in completion order.
    #[tracing::instrument(level = "debug", skip_all, fields(events = events.len(), workers = self.workers))]
    pub async fn decklists(&self, events: Vec<Event>) -> Vec<DecklistPair> {
        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();
        for event in events {
            let snapshot = match self.cache.get::<TournamentRecord>(&event.id).await {
                Ok(snapshot) => snapshot,
                Err(error) => {
                    tracing::warn!(event = event.id, %error, "Cannot read cached tournament, starting fresh");
                    None
                },
            };
            let permits = permits.clone();
            let (cache, results, decks) = (self.cache.reader(), self.results.clone(), self.decks.clone());
            let top_fraction = self.top_fraction;
            let (id, title) = (event.id, event.title.clone());
            tasks.spawn(async move {
                let result = match permits.acquire_owned().await {
                    Ok(_permit) => process_event(event, snapshot, cache, results, decks, top_fraction).await,
                    Err(_) => Err(ErrorKind::Worker("worker pool closed".to_string()).into()),
                };
                (id, title, result)
            });
        }

        let mut pairs = Vec::new();
        let (mut completed, mut skipped, mut uncached) = (0usize, 0usize, 0usize);
        while let Some(joined) = tasks.join_next().await {
            let result = match joined {
                Ok((_, _, Ok(result))) => result,
                Ok((id, title, Err(error))) => {
                    tracing::warn!(event = id, %title, %error, "Failed to collect tournament, skipping");
                    skipped += 1;
                    continue;
                },
                Err(error) => {
                    tracing::error!(%error, "Tournament worker did not finish");
                    skipped += 1;
                    continue;
                },
            };
            uncached += self.store(&result).await;
            completed += 1;
            pairs.extend(result.resolution.pairs);
        }
        tracing::info!(completed, skipped, uncached, pairs = pairs.len(), "Collected decklists");
        pairs
    }

    /// Write one tournament's results back. Each record is written on its
    /// own, so a failed write never keeps the others out of the cache.
    async fn store(&self, result: &TournamentResult) -> usize {
        let mut failed = 0usize;
        if let Err(error) = self.cache.put(&result.record).await {
            tracing::warn!(event = result.event.id, %error, "Failed to cache tournament");
            failed += 1;
        }
        for record in &result.resolution.fetched {
            if let Err(error) = self.cache.put(record).await {
                tracing::warn!(deck = %record.id, %error, "Failed to cache decklist");
                failed += 1;
            }
        }
        failed
    }
}
