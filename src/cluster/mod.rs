pub mod kmeans;
pub mod silhouette;

pub use self::silhouette::{silhouette_score, Silhouette};

use crate::config::ClusterParams;
use crate::error::{SetPieceError, SpResult};
use crate::events::Outcome;
use crate::scaler::ScaledMatrix;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterStats {
    pub id: usize,
    pub size: usize,
    /// Fraction of members that produced a goal (0 for an empty cluster).
    pub success_rate: f64,
    pub shot_rate: f64,
    /// Fraction of members that produced a goal or a shot.
    pub threat_rate: f64,
    /// Centroid in scaled space.
    pub centroid: Vec<f64>,
}

impl ClusterStats {
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult {
    pub k: usize,
    pub labels: Vec<usize>,
    pub silhouette: Silhouette,
    pub clusters: Vec<ClusterStats>,
    pub inertia: f64,
    pub iterations: usize,
}

impl ClusterResult {
    pub fn total_members(&self) -> usize {
        self.clusters.iter().map(|c| c.size).sum()
    }
}

pub struct ClusterEngine {
    params: ClusterParams,
}

impl ClusterEngine {
    pub fn new(params: ClusterParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    fn validate(&self, scaled: &ScaledMatrix, outcomes: &[Outcome]) -> SpResult<()> {
        self.params.validate()?;
        let n = scaled.len();
        if self.params.clusters > n {
            return Err(SetPieceError::Config(format!(
                "cluster count {} exceeds sample size {}",
                self.params.clusters, n
            )));
        }
        if outcomes.len() != n {
            return Err(SetPieceError::Validation(format!(
                "{} outcomes supplied for {} rows",
                outcomes.len(),
                n
            )));
        }
        let width = scaled.width();
        if scaled.rows.iter().any(|r| r.len() != width) {
            return Err(SetPieceError::Validation(
                "scaled rows have inconsistent widths".to_string(),
            ));
        }
        Ok(())
    }

    /// Partitions `scaled` into k groups and describes each one.
    ///
    /// `outcomes[i]` belongs to `scaled.rows[i]`. Cluster ids are numbered by first
    /// appearance in the input, so row 0 is always in cluster 0; clusters that end
    /// up empty take the highest ids.
    pub fn cluster(&self, scaled: &ScaledMatrix, outcomes: &[Outcome]) -> SpResult<ClusterResult> {
        self.validate(scaled, outcomes)?;
        let k = self.params.clusters;
        let points = &scaled.rows;

        let fit = kmeans::fit(points, k, &self.params);
        let (labels, native_centroids) = canonicalize(&fit.labels, fit.centroids, k);

        let silhouette = silhouette_score(points, &labels, k);
        if !silhouette.is_applicable() {
            warn!("Silhouette score not applicable (k={}, n={})", k, points.len());
        }

        let clusters = describe_clusters(points, &labels, outcomes, native_centroids);
        for c in clusters.iter().filter(|c| c.is_empty()) {
            warn!("Cluster {} has no members", c.id);
        }

        info!(
            "🧩 Formed {} clusters over {} set pieces (inertia {:.3}, {} iterations)",
            k,
            points.len(),
            fit.inertia,
            fit.iterations
        );

        Ok(ClusterResult {
            k,
            labels,
            silhouette,
            clusters,
            inertia: fit.inertia,
            iterations: fit.iterations,
        })
    }
}

/// Renumbers clusters in order of first appearance; unused ids follow in their old order.
fn canonicalize(
    labels: &[usize],
    centroids: Vec<Vec<f64>>,
    k: usize,
) -> (Vec<usize>, Vec<Vec<f64>>) {
    let mut order = Vec::with_capacity(k);
    let mut seen = vec![false; k];
    for &l in labels {
        if !seen[l] {
            seen[l] = true;
            order.push(l);
        }
    }
    order.extend((0..k).filter(|&l| !seen[l]));

    let mut remap = vec![0; k];
    for (new_id, &old_id) in order.iter().enumerate() {
        remap[old_id] = new_id;
    }

    let labels = labels.iter().map(|&l| remap[l]).collect();
    let mut slots: Vec<Option<Vec<f64>>> = centroids.into_iter().map(Some).collect();
    let centroids = order
        .iter()
        .map(|&old| slots[old].take().unwrap_or_default())
        .collect();

    (labels, centroids)
}

fn describe_clusters(
    points: &[Vec<f64>],
    labels: &[usize],
    outcomes: &[Outcome],
    native_centroids: Vec<Vec<f64>>,
) -> Vec<ClusterStats> {
    native_centroids
        .into_iter()
        .enumerate()
        .map(|(id, native)| {
            let members: Vec<usize> = labels
                .iter()
                .enumerate()
                .filter(|&(_, &l)| l == id)
                .map(|(i, _)| i)
                .collect();
            let size = members.len();

            if size == 0 {
                return ClusterStats {
                    id,
                    size,
                    success_rate: 0.0,
                    shot_rate: 0.0,
                    threat_rate: 0.0,
                    centroid: native,
                };
            }

            let rate = |pred: fn(Outcome) -> bool| {
                members.iter().filter(|&&i| pred(outcomes[i])).count() as f64 / size as f64
            };

            let mut centroid = vec![0.0; native.len()];
            for &i in &members {
                for (c, &v) in centroid.iter_mut().zip(&points[i]) {
                    *c += v;
                }
            }
            for c in &mut centroid {
                *c /= size as f64;
            }

            ClusterStats {
                id,
                size,
                success_rate: rate(Outcome::is_goal),
                shot_rate: rate(Outcome::is_shot),
                threat_rate: rate(Outcome::is_threat),
                centroid,
            }
        })
        .collect()
}
