use metagame_cache::{CacheReader, DeckPair, TournamentRecord};
use metagame_model::{DeckId, DecklistRecord, Entry, Event, Side};
use metagame_source::DeckSource;
use std::collections::HashMap;

/// Corp and runner decklists submitted for one placement.
pub type DecklistPair = (Option<DecklistRecord>, Option<DecklistRecord>);

fn observed_deck(entry: &Entry, side: Side) -> Option<DeckId> {
    let url = entry.deck_url(side)?;
    match DeckId::from_url(url) {
        Ok(id) => Some(id),
        Err(error) => {
            tracing::warn!(entrant = %entry, %side, %error, "Skipping deck with malformed URL");
            None
        },
    }
}

/// Placement to deck ID mapping of an event, merged into what is already
/// cached for it.
///
/// Only entrants with a swiss placement contribute. A deck URL that can't be
/// parsed leaves that side unresolved; it never erases an ID already on
/// record.
pub fn resolve_deck_ids(event: &Event, entries: &[Entry], existing: Option<TournamentRecord>) -> TournamentRecord {
    let mut record = existing.unwrap_or_else(|| TournamentRecord::new(event.id, event.title.clone()));
    if record.name.is_empty() {
        record.name = event.title.clone();
    }
    let observed: Vec<(u32, DeckPair)> = entries
        .iter()
        .filter_map(|entry| {
            let placement = entry.placement()?;
            Some((placement, (observed_deck(entry, Side::Corp), observed_deck(entry, Side::Runner))))
        })
        .collect();
    record.merge(observed);
    record
}

/// Placements making up the top `fraction` of `entrants`.
///
/// Both ends are inclusive: ten entrants at `0.3` gives placements 1, 2 and
/// 3. The fraction is clamped to `0.0..=1.0`.
pub fn top_placements(entrants: usize, fraction: f64) -> std::ops::RangeInclusive<u32> {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let cutoff = (entrants as f64 * fraction).floor() as u32;
    1..=cutoff
}

/// Decklists selected from one tournament.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// One pair per selected placement, in placement order.
    pub pairs: Vec<DecklistPair>,
    /// Records that came from the remote source rather than the cache, and
    /// have not been written back yet.
    pub fetched: Vec<DecklistRecord>,
}

struct DeckResolver<'a> {
    cache: &'a CacheReader,
    source: &'a dyn DeckSource,
    seen: HashMap<DeckId, Option<DecklistRecord>>,
    fetched: Vec<DecklistRecord>,
}
impl DeckResolver<'_> {
    async fn resolve(&mut self, id: DeckId) -> Option<DecklistRecord> {
        if let Some(known) = self.seen.get(&id) {
            return known.clone();
        }
        let resolved = self.lookup(id).await;
        self.seen.insert(id, resolved.clone());
        resolved
    }

    async fn lookup(&mut self, id: DeckId) -> Option<DecklistRecord> {
        match self.cache.get::<DecklistRecord>(&id).await {
            Ok(Some(record)) => return Some(record),
            Ok(None) => {},
            Err(error) => tracing::warn!(deck = %id, %error, "Cache read failed, fetching instead"),
        }
        match self.source.decklist(id).await {
            Ok(record) => {
                tracing::debug!(deck = %id, name = %record.name, "Fetched decklist");
                self.fetched.push(record.clone());
                Some(record)
            },
            Err(error) => {
                tracing::warn!(deck = %id, %error, "Failed to fetch decklist, skipping");
                None
            },
        }
    }
}

/// Decklists of the top `top_fraction` of a tournament.
///
/// The cutoff counts every one of the event's `entrants`, placed or not, while
/// only placements on `record` can be selected. Each deck is looked up in the cache and fetched remotely on a miss. A deck
/// that can't be resolved is logged and left out of its pair; the rest of
/// the tournament is unaffected.
#[tracing::instrument(level = "debug", skip_all, fields(tournament = record.id, entrants = entrants))]
pub async fn decklists_from_event(
    top_fraction: f64,
    entrants: usize,
    record: &TournamentRecord,
    cache: &CacheReader,
    source: &dyn DeckSource,
) -> Resolution {
    let mut resolver = DeckResolver {
        cache,
        source,
        seen: HashMap::new(),
        fetched: Vec::new(),
    };
    let mut pairs = Vec::new();
    for placement in top_placements(entrants, top_fraction) {
        let (corp, runner) = match record.decks.get(&placement) {
            Some(pair) => *pair,
            None => continue,
        };
        let corp = match corp {
            Some(id) => resolver.resolve(id).await,
            None => None,
        };
        let runner = match runner {
            Some(id) => resolver.resolve(id).await,
            None => None,
        };
        pairs.push((corp, runner));
    }
    Resolution {
        pairs,
        fetched: resolver.fetched,
    }
}
