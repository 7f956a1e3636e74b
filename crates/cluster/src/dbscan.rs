use crate::CardIndex;
use crate::error::{ErrorKind, Result};
use metagame_model::Decklist;
use std::collections::{BTreeMap, VecDeque};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Cluster assignment of a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Cluster(usize),
    Noise,
}
impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Cluster(id) => write!(f, "{id}"),
            Self::Noise => write!(f, "noise"),
        }
    }
}

/// Validated DBSCAN parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    eps: f64,
    min_samples: usize,
}
impl ClusterParams {
    pub fn new(eps: f64, min_samples: usize) -> Result<Self> {
        if !eps.is_finite() || eps <= 0.0 {
            exn::bail!(ErrorKind::InvalidEps(eps.to_string()));
        }
        if min_samples == 0 {
            exn::bail!(ErrorKind::InvalidMinSamples);
        }
        Ok(Self { eps, min_samples })
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }
}

fn squared_distance(a: &[u32], b: &[u32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum()
}

/// Label every point with DBSCAN.
///
/// Distance is Euclidean and the `eps` radius is inclusive. A point is a core
/// point when its neighbourhood, itself included, holds at least
/// `min_samples` points. Clusters are numbered from 0 in the order their
/// first core point appears in `points`, so the same input always produces
/// the same labels.
///
/// Every point gets exactly one label. With fewer points than `min_samples`
/// nothing can be a core point and everything is [`Label::Noise`].
pub fn dbscan(points: &[Vec<u32>], eps: f64, min_samples: usize) -> Vec<Label> {
    let min_samples = min_samples.max(1);
    let radius = eps * eps;
    let neighbourhoods: Vec<Vec<usize>> = points
        .iter()
        .map(|p| (0..points.len()).filter(|&j| squared_distance(p, &points[j]) <= radius).collect())
        .collect();

    let mut labels: Vec<Option<Label>> = vec![None; points.len()];
    let mut next_cluster = 0;
    for point in 0..points.len() {
        if labels[point].is_some() {
            continue;
        }
        if neighbourhoods[point].len() < min_samples {
            // May still be claimed as a border point by a later cluster.
            labels[point] = Some(Label::Noise);
            continue;
        }
        let cluster = Label::Cluster(next_cluster);
        next_cluster += 1;
        labels[point] = Some(cluster);
        let mut queue: VecDeque<usize> = neighbourhoods[point].iter().copied().collect();
        while let Some(candidate) = queue.pop_front() {
            match labels[candidate] {
                Some(Label::Noise) => labels[candidate] = Some(cluster),
                Some(Label::Cluster(_)) => continue,
                None => {
                    labels[candidate] = Some(cluster);
                    if neighbourhoods[candidate].len() >= min_samples {
                        queue.extend(neighbourhoods[candidate].iter().copied());
                    }
                },
            }
        }
    }
    labels.into_iter().map(|label| label.unwrap_or(Label::Noise)).collect()
}

/// Group decklists into archetype clusters.
///
/// Noise decks appear in no cluster. Within a cluster decks keep their input
/// order. Empty input, or fewer decks than `min_samples`, gives an empty map.
#[tracing::instrument(level = "debug", skip(decks), fields(decks = decks.len()))]
pub fn cluster(decks: &[Decklist], eps: f64, min_samples: usize) -> BTreeMap<usize, Vec<Decklist>> {
    let index = CardIndex::build(decks);
    let vectors: Vec<Vec<u32>> = decks.iter().map(|deck| index.vectorize(deck)).collect();
    let labels = dbscan(&vectors, eps, min_samples);

    let mut clusters: BTreeMap<usize, Vec<Decklist>> = BTreeMap::new();
    let mut noise = 0;
    for (deck, label) in decks.iter().zip(labels) {
        match label {
            Label::Cluster(id) => clusters.entry(id).or_default().push(deck.clone()),
            Label::Noise => noise += 1,
        }
    }
    tracing::debug!(dimensions = index.len(), clusters = clusters.len(), noise, "Clustered decklists");
    clusters
}
