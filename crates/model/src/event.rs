use crate::Entry;
use crate::consts::EVENT_DATE_FORMAT;
use crate::de::{non_empty, opt_bool_lenient, opt_u32_lenient, u64_lenient};
use crate::error::ErrorKind;
use serde::Deserialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::future::Future;
use std::hash::{Hash, Hasher};
use time::Date;
use tokio::sync::OnceCell;

/// Wire shape of an event as published by the tournament service.
#[derive(Deserialize)]
struct RawEvent {
    #[serde(deserialize_with = "u64_lenient")]
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default, deserialize_with = "non_empty")]
    date: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    format: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    cardpool: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    r#type: Option<String>,
    #[serde(default, deserialize_with = "opt_bool_lenient")]
    concluded: Option<bool>,
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    registration_count: Option<u32>,
    #[serde(default, deserialize_with = "opt_bool_lenient")]
    approved: Option<bool>,
    #[serde(default, deserialize_with = "non_empty")]
    url: Option<String>,
}

/// A tournament.
///
/// Identity is the event ID. The entrant list is not part of the published
/// event record; it is fetched on first request and then kept for as long as
/// this value lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawEvent")]
pub struct Event {
    pub id: u64,
    pub title: String,
    pub date: Option<Date>,
    pub format: Option<String>,
    pub cardpool: Option<String>,
    pub tournament_type: Option<String>,
    pub concluded: Option<bool>,
    pub registration_count: Option<u32>,
    pub approved: Option<bool>,
    pub url: Option<String>,
    entries: OnceCell<Vec<Entry>>,
}
impl Event {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            date: None,
            format: None,
            cardpool: None,
            tournament_type: None,
            concluded: None,
            registration_count: None,
            approved: None,
            url: None,
            entries: OnceCell::new(),
        }
    }

    /// Entrants of this event, fetched with `fetch` the first time and
    /// memoized afterwards. A failed fetch is not memoized.
    pub async fn entries_with<F, Fut, E>(&self, fetch: F) -> Result<&[Entry], E>
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = Result<Vec<Entry>, E>>,
    {
        let entries = self.entries.get_or_try_init(|| fetch(self.id)).await?;
        Ok(entries.as_slice())
    }
}
impl TryFrom<RawEvent> for Event {
    type Error = ErrorKind;
    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let date = match raw.date {
            Some(value) => match Date::parse(value.trim(), EVENT_DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => return Err(ErrorKind::ParseError { field: "date", value }),
            },
            None => None,
        };
        Ok(Self {
            id: raw.id,
            title: raw.title,
            date,
            format: raw.format,
            cardpool: raw.cardpool,
            tournament_type: raw.r#type,
            concluded: raw.concluded,
            registration_count: raw.registration_count,
            approved: raw.approved,
            url: raw.url,
            entries: OnceCell::new(),
        })
    }
}
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Event {}
impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.title, self.id)
    }
}
