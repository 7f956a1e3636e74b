use crate::Card;
use crate::consts::{DECK_ID_REGEX, DECKLIST_PAGE_BASE};
use crate::error::{Error, ErrorKind, Result};
use exn::OptionExt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Numeric ID of a published decklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(pub u64);
impl DeckId {
    /// Extract the decklist ID from a deck URL.
    ///
    /// The URL must contain a `decklist/<digits>` segment; anything else
    /// (including UUID-style links) is rejected.
    ///
    /// ```
    /// use metagame_model::DeckId;
    /// let id = DeckId::from_url("https://netrunnerdb.com/en/decklist/79610/hello-world").unwrap();
    /// assert_eq!(id, DeckId(79610));
    /// assert!(DeckId::from_url("https://netrunnerdb.com/en/deck/view/123").is_err());
    /// ```
    pub fn from_url(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        let digits = DECK_ID_REGEX
            .captures(url)
            .and_then(|captures| captures.get(1))
            .ok_or_raise(|| ErrorKind::MalformedDeckUrl(url.to_string()))?;
        match digits.as_str().parse::<u64>() {
            Ok(id) => Ok(Self(id)),
            // Only reachable for IDs that overflow a u64.
            Err(_) => exn::bail!(ErrorKind::MalformedDeckUrl(url.to_string())),
        }
    }
}
impl FromStr for DeckId {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().parse::<u64>() {
            Ok(id) => Ok(Self(id)),
            Err(_) => Self::from_url(s),
        }
    }
}
impl Display for DeckId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A decklist as stored in the cache: cards are referenced by code only.
///
/// This is the shape both the remote decklist service and the local cache
/// agree on. It is turned into a [`Decklist`] by [hydrating](Decklist::hydrate)
/// it against a card catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecklistRecord {
    pub id: DeckId,
    #[serde(default)]
    pub uuid: String,
    pub name: String,
    /// Card code to (positive) quantity
    pub cards: BTreeMap<String, u32>,
    pub url: String,
}
impl DecklistRecord {
    /// Build a record from remote data, dropping zero-quantity entries and
    /// deriving the canonical deck URL.
    pub fn new(
        id: DeckId,
        uuid: impl Into<String>,
        name: impl Into<String>,
        cards: impl IntoIterator<Item = (String, u32)>,
    ) -> Self {
        let uuid = uuid.into();
        let url = match uuid.is_empty() {
            true => format!("{DECKLIST_PAGE_BASE}/{id}"),
            false => format!("{DECKLIST_PAGE_BASE}/{uuid}"),
        };
        Self {
            id,
            uuid,
            name: name.into(),
            cards: cards.into_iter().filter(|(_, quantity)| *quantity > 0).collect(),
            url,
        }
    }
}

/// A fully resolved decklist.
///
/// Identity is the decklist ID: equality, hashing and ordering ignore every
/// other field, so two fetches of the same decklist are interchangeable.
#[derive(Debug, Clone)]
pub struct Decklist {
    pub id: DeckId,
    pub uuid: String,
    pub name: String,
    /// Card to (positive) quantity
    pub cards: BTreeMap<Card, u32>,
    pub url: String,
}
impl Decklist {
    /// Resolve a [`DecklistRecord`]'s card codes against a catalog.
    ///
    /// Codes missing from the catalog are dropped (with a warning) rather
    /// than failing the whole deck.
    pub fn hydrate(record: DecklistRecord, catalog: &HashMap<String, Card>) -> Self {
        let mut cards = BTreeMap::new();
        for (code, quantity) in record.cards {
            match catalog.get(&code) {
                Some(card) => {
                    cards.insert(card.clone(), quantity);
                },
                None => tracing::warn!(deck = %record.id, code, "Card missing from catalog, skipping"),
            }
        }
        Self {
            id: record.id,
            uuid: record.uuid,
            name: record.name,
            cards,
            url: record.url,
        }
    }

    /// Convert back into the code-keyed cache representation.
    pub fn to_record(&self) -> DecklistRecord {
        DecklistRecord {
            id: self.id,
            uuid: self.uuid.clone(),
            name: self.name.clone(),
            cards: self.cards.iter().map(|(card, quantity)| (card.code.clone(), *quantity)).collect(),
            url: self.url.clone(),
        }
    }
}
impl PartialEq for Decklist {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Decklist {}
impl Hash for Decklist {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
impl Ord for Decklist {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
impl PartialOrd for Decklist {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Display for Decklist {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.name, self.id)
    }
}
