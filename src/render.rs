use metagame_collect::{ClusterSummary, Report};
use metagame_model::Side;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Markdown rendering of a [`Report`].
///
/// One `##` section per side, one `###` section per cluster listing its
/// decks, followed by the cluster's most common cards.
pub struct Markdown<'a>(pub &'a Report);

impl Display for Markdown<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let empty = BTreeMap::new();
        for (i, side) in Side::ALL.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "## {side}")?;
            for (id, summary) in self.0.get(side).unwrap_or(&empty) {
                write_cluster(f, *id, summary)?;
            }
        }
        Ok(())
    }
}

fn write_cluster(f: &mut Formatter<'_>, id: usize, summary: &ClusterSummary) -> FmtResult {
    writeln!(f, "\n### {id}\n")?;
    for deck in &summary.decks {
        writeln!(f, "* [{}]({})", deck.name, deck.url)?;
    }
    writeln!(f, "\n#### Most Common Cards\n")?;
    for (card, quantity) in &summary.top_cards {
        writeln!(f, "* [{}]({}) ({quantity} copies)", card.title, card.page_url())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use metagame_model::{Card, DeckId, Decklist, DecklistRecord};
    use std::collections::HashMap;

    fn card(code: &str, title: &str) -> Card {
        Card {
            code: code.to_string(),
            title: title.to_string(),
            stripped_title: None,
            faction_code: "neutral-corp".to_string(),
            side_code: "corp".to_string(),
            type_code: None,
            cost: None,
            deck_limit: None,
            keywords: None,
            text: None,
        }
    }

    #[test]
    fn test_markdown() {
        let hedge_fund = card("30077", "Hedge Fund");
        let catalog = HashMap::from([(hedge_fund.code.clone(), hedge_fund.clone())]);
        let deck = Decklist::hydrate(
            DecklistRecord::new(DeckId(79610), "4493cfda", "Tithe Tax", [("30077".to_string(), 3)]),
            &catalog,
        );
        let summary = ClusterSummary {
            decks: vec![deck],
            top_cards: vec![(hedge_fund, 3)],
        };
        let report: Report = BTreeMap::from([
            (Side::Corp, BTreeMap::from([(0, summary)])),
            (Side::Runner, BTreeMap::new()),
        ]);
        let expected = "\
## Corp

### 0

* [Tithe Tax](https://netrunnerdb.com/en/decklist/4493cfda)

#### Most Common Cards

* [Hedge Fund](https://netrunnerdb.com/en/card/30077) (3 copies)

## Runner
";
        assert_eq!(Markdown(&report).to_string(), expected);
    }

    #[test]
    fn test_empty_report_still_has_both_sides() {
        assert_eq!(Markdown(&Report::new()).to_string(), "## Corp\n\n## Runner\n");
    }
}
