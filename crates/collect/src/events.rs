use metagame_model::Event;
use metagame_source::{ResultsQuery, ResultsSource};
use std::collections::HashSet;
use time::Date;
use time::macros::date;

/// Date assumed for events published without one.
pub const UNDATED: Date = date!(2000 - 01 - 01);

/// Every event published by `source`, one page of `base.limit` at a time.
///
/// Pages are requested from offset 0 until one comes back shorter than the
/// page size. A page that fails to load ends the walk early with whatever has
/// been gathered so far. Events are deduplicated by ID, keeping the first
/// copy seen.
#[tracing::instrument(level = "debug", skip_all, fields(page_size = base.limit))]
pub async fn collect_events(source: &dyn ResultsSource, base: &ResultsQuery) -> Vec<Event> {
    let mut seen = HashSet::new();
    let mut events = Vec::new();
    if base.limit == 0 {
        return events;
    }
    let mut offset = base.offset;
    loop {
        let page = match source.results(&base.at(offset)).await {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!(offset, %error, "Failed to fetch results page, stopping pagination");
                break;
            },
        };
        let count = page.len();
        tracing::debug!(offset, count, "Fetched results page");
        events.extend(page.into_iter().filter(|event| seen.insert(event.id)));
        if count < base.limit {
            break;
        }
        offset += base.limit;
    }
    events
}

/// Which events are worth collecting decks from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub format: String,
    /// Inclusive
    pub start: Date,
    /// Inclusive
    pub end: Date,
}
impl EventFilter {
    pub fn new(format: impl Into<String>, start: Date, end: Date) -> Self {
        Self {
            format: format.into(),
            start,
            end,
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        let date = event.date.unwrap_or(UNDATED);
        event.format.as_deref() == Some(self.format.as_str()) && (self.start..=self.end).contains(&date)
    }

    pub fn apply(&self, events: Vec<Event>) -> Vec<Event> {
        events.into_iter().filter(|event| self.matches(event)).collect()
    }
}
