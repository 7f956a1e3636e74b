use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// The two sides of the game. Every deck belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Corp,
    Runner,
}
impl Side {
    pub const ALL: [Side; 2] = [Side::Corp, Side::Runner];
}
impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Corp => write!(f, "Corp"),
            Self::Runner => write!(f, "Runner"),
        }
    }
}
