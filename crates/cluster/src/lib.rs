//! Archetype detection.
//!
//! Decklists are turned into dense bag-of-cards vectors over a shared
//! [`CardIndex`], grouped with DBSCAN, and each resulting group is summarized
//! by its most played cards.

mod dbscan;
pub mod error;
mod index;
mod summary;

pub use crate::dbscan::{ClusterParams, Label, cluster, dbscan};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::index::{CardIndex, build_index};
pub use crate::summary::{DEFAULT_TOP_CARDS, most_common};
