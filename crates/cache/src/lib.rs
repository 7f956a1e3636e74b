//! Local record cache.
//!
//! Every record fetched from a remote service is written here once, keyed by
//! its stable ID, and reused on every later run. Cached records never expire.
//!
//! # Layout
//! One JSON file per record, grouped by kind under the cache root:
//! - `tournaments/<event id>.json`: placement to deck ID mapping
//! - `decklists/<deck id>.json`: code-keyed decklist
//! - `cards/<card code>.json`: card metadata
//!
//! There is no schema version; field names are part of the on-disk format.

pub mod error;
mod record;
mod repo;
mod tournament;

pub use crate::record::Record;
pub use crate::repo::{Cache, CacheReader};
pub use crate::tournament::{DeckPair, TournamentRecord};
