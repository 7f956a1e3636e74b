use crate::resolve::DecklistPair;
use metagame_cluster::{ClusterParams, cluster, most_common};
use metagame_model::{Card, DeckId, Decklist, DecklistRecord, Side};
use std::collections::{BTreeMap, HashMap};

/// One archetype: its decks and the cards they play most.
#[derive(Debug, Clone)]
pub struct ClusterSummary {
    pub decks: Vec<Decklist>,
    pub top_cards: Vec<(Card, u32)>,
}

/// Archetypes of each side, keyed by cluster ID.
pub type Report = BTreeMap<Side, BTreeMap<usize, ClusterSummary>>;

/// Split (corp, runner) pairs into one deduplicated list per side, ordered by
/// deck ID.
pub fn split_sides(
    pairs: impl IntoIterator<Item = DecklistPair>,
) -> (Vec<DecklistRecord>, Vec<DecklistRecord>) {
    let mut corp: BTreeMap<DeckId, DecklistRecord> = BTreeMap::new();
    let mut runner: BTreeMap<DeckId, DecklistRecord> = BTreeMap::new();
    for (c, r) in pairs {
        if let Some(deck) = c {
            corp.entry(deck.id).or_insert(deck);
        }
        if let Some(deck) = r {
            runner.entry(deck.id).or_insert(deck);
        }
    }
    (corp.into_values().collect(), runner.into_values().collect())
}

/// Cluster one side's decks and summarize every cluster.
#[tracing::instrument(level = "debug", skip_all, fields(decks = decks.len()))]
pub fn summarize(decks: &[Decklist], params: &ClusterParams, top_cards: usize) -> BTreeMap<usize, ClusterSummary> {
    cluster(decks, params.eps(), params.min_samples())
        .into_iter()
        .map(|(id, decks)| {
            let top_cards = most_common(&decks, top_cards);
            (id, ClusterSummary { decks, top_cards })
        })
        .collect()
}

/// Hydrate both sides against the card catalog, then cluster and summarize
/// each. Both sides are always present, possibly with no clusters.
pub fn build_report(
    corp: Vec<DecklistRecord>,
    runner: Vec<DecklistRecord>,
    catalog: &HashMap<String, Card>,
    params: &ClusterParams,
    top_cards: usize,
) -> Report {
    [(Side::Corp, corp), (Side::Runner, runner)]
        .into_iter()
        .map(|(side, records)| {
            let decks: Vec<Decklist> = records.into_iter().map(|record| Decklist::hydrate(record, catalog)).collect();
            let clusters = summarize(&decks, params, top_cards);
            let clustered: usize = clusters.values().map(|summary| summary.decks.len()).sum();
            tracing::info!(
                %side,
                decks = decks.len(),
                clusters = clusters.len(),
                noise = decks.len() - clustered,
                "Clustered decks"
            );
            (side, clusters)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::tests::decklist;

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

    fn catalog() -> HashMap<String, Card> {
        [("A", "Hedge Fund"), ("B", "IPO"), ("C", "Tithe"), ("X", "Sure Gamble"), ("Y", "Dirty Laundry")]
            .into_iter()
            .map(|(code, title)| (code.to_string(), card(code, title)))
            .collect()
    }

    fn ids(decks: &[DecklistRecord]) -> Vec<u64> {
        decks.iter().map(|d| d.id.0).collect()
    }

    #[test]
    fn test_split_sides_deduplicates() {
        let pairs = vec![
            (Some(decklist(3, &[])), Some(decklist(10, &[]))),
            (Some(decklist(1, &[])), None),
            (None, Some(decklist(11, &[]))),
            (Some(decklist(3, &[])), Some(decklist(10, &[]))),
            (None, None),
        ];
        let (corp, runner) = split_sides(pairs);
        assert_eq!(ids(&corp), vec![1, 3]);
        assert_eq!(ids(&runner), vec![10, 11]);
    }

    #[test]
    fn test_build_report() {
        let corp = vec![
            decklist(1, &[("A", 3)]),
            decklist(2, &[("Y", 3), ("X", 3)]),
            decklist(3, &[("A", 3), ("B", 1)]),
            decklist(4, &[("A", 3), ("C", 1)]),
            decklist(5, &[("X", 10)]),
        ];
        let params = ClusterParams::new(2.0, 3).unwrap();
        let report = build_report(corp, vec![], &catalog(), &params, 2);
        assert_eq!(report.len(), 2);
        assert!(report[&Side::Runner].is_empty());

        let clusters = &report[&Side::Corp];
        assert_eq!(clusters.len(), 1);
        let summary = &clusters[&0];
        let deck_ids: Vec<u64> = summary.decks.iter().map(|d| d.id.0).collect();
        assert_eq!(deck_ids, vec![1, 3, 4]);
        let top: Vec<(&str, u32)> = summary.top_cards.iter().map(|(c, q)| (c.code.as_str(), *q)).collect();
        assert_eq!(top, vec![("A", 9), ("B", 1)]);
    }

    #[test]
    fn test_cards_missing_from_catalog_are_ignored() {
        let corp = vec![
            decklist(1, &[("A", 3), ("Z", 3)]),
            decklist(2, &[("A", 3)]),
            decklist(3, &[("A", 3), ("Z", 1)]),
        ];
        let params = ClusterParams::new(0.5, 3).unwrap();
        let report = build_report(corp, vec![], &catalog(), &params, 10);
        // Without "Z" all three decks are identical.
        assert_eq!(report[&Side::Corp][&0].decks.len(), 3);
    }
}
