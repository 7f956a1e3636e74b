use regex::Regex;
use std::sync::LazyLock;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// The numeric ID must fill the whole segment, otherwise a UUID that happens
// to start with digits would be mistaken for an ID.
regex!(DECK_ID_REGEX, r"decklist/(\d+)(?:$|[/?#])");

/// Event dates are published as `YYYY.MM.DD.` (note the trailing dot).
pub(crate) const EVENT_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year].[month].[day].");

pub const DECKLIST_PAGE_BASE: &str = "https://netrunnerdb.com/en/decklist";
pub const CARD_PAGE_BASE: &str = "https://netrunnerdb.com/en/card";
