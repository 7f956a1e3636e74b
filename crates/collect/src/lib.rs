//! Decklist collection and report assembly.
//!
//! A run walks every published event, keeps those in the requested format and
//! date range, and hands each one to a worker that resolves the decks of its
//! top placements (cache first, remote on a miss). Workers only ever read the
//! cache; the [`Collector`] writes their results back one at a time. The
//! collected decks are then split by side, hydrated against the
//! [`CardCatalog`], clustered and summarized into a [`Report`].

mod catalog;
pub mod error;
mod events;
mod pool;
mod report;
mod resolve;

pub use crate::catalog::{CardCatalog, card_codes};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::events::{EventFilter, UNDATED, collect_events};
pub use crate::pool::{Collector, TournamentResult, process_event};
pub use crate::report::{ClusterSummary, Report, build_report, split_sides, summarize};
pub use crate::resolve::{DecklistPair, Resolution, decklists_from_event, resolve_deck_ids, top_placements};
