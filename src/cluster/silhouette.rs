use super::kmeans::euclidean;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Silhouette {
    Score(f64),
    /// k = 1, k = n, or fewer than two populated clusters.
    NotApplicable,
}

impl Silhouette {
    pub fn score(self) -> Option<f64> {
        match self {
            Silhouette::Score(s) => Some(s),
            Silhouette::NotApplicable => None,
        }
    }

    pub fn is_applicable(self) -> bool {
        matches!(self, Silhouette::Score(_))
    }
}

/// Mean silhouette coefficient over all points (Euclidean distance).
///
/// Points alone in their cluster score 0.
pub fn silhouette_score(points: &[Vec<f64>], labels: &[usize], k: usize) -> Silhouette {
    let n = points.len();
    if k <= 1 || k >= n || labels.len() != n {
        return Silhouette::NotApplicable;
    }

    let mut sizes = vec![0usize; k];
    for &l in labels {
        sizes[l] += 1;
    }
    if sizes.iter().filter(|&&s| s > 0).count() < 2 {
        return Silhouette::NotApplicable;
    }

    let per_point: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|i| {
            let own = labels[i];
            if sizes[own] <= 1 {
                return 0.0;
            }

            let mut sums = vec![0.0; k];
            for j in 0..n {
                if i != j {
                    sums[labels[j]] += euclidean(&points[i], &points[j]);
                }
            }

            let a = sums[own] / (sizes[own] - 1) as f64;
            let b = (0..k)
                .filter(|&c| c != own && sizes[c] > 0)
                .map(|c| sums[c] / sizes[c] as f64)
                .fold(f64::INFINITY, f64::min);

            let denom = a.max(b);
            if denom > 0.0 {
                (b - a) / denom
            } else {
                0.0
            }
        })
        .collect();

    // Sequential sum keeps the result independent of thread scheduling.
    Silhouette::Score(per_point.iter().sum::<f64>() / n as f64)
}
