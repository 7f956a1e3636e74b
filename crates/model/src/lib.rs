//! Entity model shared by every stage of the metagame pipeline.
//!
//! Records arriving from remote services are validated once, at
//! deserialization, into the typed values in this crate. Identity rules live
//! here too: cards are keyed by code, decklists by ID, events by ID, and
//! entrants by the two-tier key described on [`Entry::identity`].

mod card;
mod consts;
mod de;
mod decklist;
mod entry;
pub mod error;
mod event;
mod side;

pub use crate::card::Card;
pub use crate::consts::{CARD_PAGE_BASE, DECKLIST_PAGE_BASE};
pub use crate::decklist::{DeckId, Decklist, DecklistRecord};
pub use crate::entry::{EntrantIdentity, Entry};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::event::Event;
pub use crate::side::Side;
