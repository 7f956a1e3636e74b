use futures::StreamExt;
use metagame_cache::Cache;
use metagame_model::{Card, DecklistRecord};
use metagame_source::DeckHandle;
use std::collections::{BTreeSet, HashMap};

const DEFAULT_CONCURRENCY: usize = 8;

/// Card codes referenced by any of `decks`, without duplicates.
pub fn card_codes<'a>(decks: impl IntoIterator<Item = &'a DecklistRecord>) -> BTreeSet<&'a str> {
    decks.into_iter().flat_map(|deck| deck.cards.keys().map(String::as_str)).collect()
}

/// Resolves card codes to cards, cache first.
pub struct CardCatalog {
    cache: Cache,
    source: DeckHandle,
    concurrency: usize,
}
impl CardCatalog {
    pub fn new(cache: Cache, source: DeckHandle) -> Self {
        Self {
            cache,
            source,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Maximum number of card requests in flight.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Look up every code. Cards missing from the cache are fetched and
    /// written back. A card that can't be resolved is logged and left out of
    /// the returned map.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn resolve<'a>(&self, codes: impl IntoIterator<Item = &'a str>) -> HashMap<String, Card> {
        let codes: BTreeSet<&str> = codes.into_iter().collect();
        let mut catalog = HashMap::with_capacity(codes.len());
        let mut missing = Vec::new();
        for code in codes {
            match self.cache.get::<Card>(code).await {
                Ok(Some(card)) => {
                    catalog.insert(card.code.clone(), card);
                },
                Ok(None) => missing.push(code),
                Err(error) => {
                    tracing::warn!(code, %error, "Cache read failed, fetching instead");
                    missing.push(code);
                },
            }
        }
        let cached = catalog.len();

        let source = &self.source;
        let fetched: Vec<_> = futures::stream::iter(missing)
            .map(|code| async move { (code, source.card(code).await) })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;
        let mut failed = 0usize;
        for (code, result) in fetched {
            match result {
                Ok(card) => {
                    if let Err(error) = self.cache.put(&card).await {
                        tracing::warn!(code, %error, "Failed to cache card");
                    }
                    catalog.insert(card.code.clone(), card);
                },
                Err(error) => {
                    tracing::warn!(code, %error, "Failed to fetch card, skipping");
                    failed += 1;
                },
            }
        }
        tracing::info!(cards = catalog.len(), cached, failed, "Resolved card catalog");
        catalog
    }
}
