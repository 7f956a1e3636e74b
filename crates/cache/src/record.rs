use crate::TournamentRecord;
use metagame_model::{Card, DeckId, DecklistRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::path::PathBuf;

/// A value that can be persisted in the cache.
///
/// `KIND` names the collection (and directory) the record lives in; `id()`
/// is its key within that collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const KIND: &'static str;
    type Id: Display + ?Sized;

    fn id(&self) -> &Self::Id;

    /// Storage path of the record with the given ID.
    fn path(id: &Self::Id) -> PathBuf {
        PathBuf::from(format!("{}/{id}.json", Self::KIND))
    }
}

impl Record for TournamentRecord {
    const KIND: &'static str = "tournaments";
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}

impl Record for DecklistRecord {
    const KIND: &'static str = "decklists";
    type Id = DeckId;

    fn id(&self) -> &DeckId {
        &self.id
    }
}

impl Record for Card {
    const KIND: &'static str = "cards";
    type Id = str;

    fn id(&self) -> &str {
        &self.code
    }
}
