use crate::config::ClusterParams;
use rayon::prelude::*;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct KMeansFit {
    pub centroids: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
    pub inertia: f64,
    pub iterations: usize,
}

#[inline(always)]
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[inline(always)]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Closest centroid; ties go to the lowest index.
#[inline]
fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (idx, c) in centroids.iter().enumerate() {
        let d = squared_distance(point, c);
        if d < best.1 {
            best = (idx, d);
        }
    }
    best
}

fn assign(points: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    points
        .par_iter()
        .map(|p| nearest(p, centroids).0)
        .collect()
}

/// Moves each centroid to the mean of its members. Clusters with no members keep their centroid.
fn update_centroids(points: &[Vec<f64>], labels: &[usize], centroids: &mut [Vec<f64>]) {
    let dims = centroids.first().map_or(0, |c| c.len());
    let mut sums = vec![vec![0.0; dims]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for (p, &l) in points.iter().zip(labels) {
        counts[l] += 1;
        for (s, &v) in sums[l].iter_mut().zip(p) {
            *s += v;
        }
    }

    for ((centroid, sum), &count) in centroids.iter_mut().zip(sums).zip(&counts) {
        if count > 0 {
            *centroid = sum.into_iter().map(|s| s / count as f64).collect();
        }
    }
}

/// k-means++ seeding: each new centre is drawn with probability proportional to D².
fn kmeans_plus_plus(points: &[Vec<f64>], k: usize, rng: &mut fastrand::Rng) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.usize(..n)].clone());

    let mut min_dist: Vec<f64> = points
        .iter()
        .map(|p| squared_distance(p, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = min_dist.iter().sum();
        let chosen = if total > 0.0 {
            let target = rng.f64() * total;
            let mut acc = 0.0;
            let mut pick = None;
            for (idx, &d) in min_dist.iter().enumerate() {
                if d <= 0.0 {
                    continue;
                }
                acc += d;
                pick = Some(idx);
                if acc > target {
                    break;
                }
            }
            pick.unwrap_or(0)
        } else {
            // Every point coincides with a chosen centre.
            rng.usize(..n)
        };

        let centre = points[chosen].clone();
        for (d, p) in min_dist.iter_mut().zip(points) {
            let nd = squared_distance(p, &centre);
            if nd < *d {
                *d = nd;
            }
        }
        centroids.push(centre);
    }

    centroids
}

fn inertia(points: &[Vec<f64>], labels: &[usize], centroids: &[Vec<f64>]) -> f64 {
    points
        .iter()
        .zip(labels)
        .map(|(p, &l)| squared_distance(p, &centroids[l]))
        .sum()
}

fn fit_single(points: &[Vec<f64>], k: usize, max_iterations: usize, seed: u64) -> KMeansFit {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut centroids = kmeans_plus_plus(points, k, &mut rng);
    let mut labels = assign(points, &centroids);
    let mut iterations = 0;

    while iterations < max_iterations {
        iterations += 1;
        update_centroids(points, &labels, &mut centroids);
        let next = assign(points, &centroids);
        if next == labels {
            break;
        }
        labels = next;
    }

    let inertia = inertia(points, &labels, &centroids);
    KMeansFit {
        centroids,
        labels,
        inertia,
        iterations,
    }
}

/// Lloyd's algorithm with `n_init` seeded restarts; the lowest inertia wins (earliest on ties).
///
/// Callers guarantee `1 <= k <= points.len()`.
pub fn fit(points: &[Vec<f64>], k: usize, params: &ClusterParams) -> KMeansFit {
    let mut best: Option<KMeansFit> = None;

    for run in 0..params.n_init {
        let seed = params.seed.wrapping_add(run as u64);
        let result = fit_single(points, k, params.max_iterations, seed);
        debug!(
            "k-means run {} (seed {}): inertia {:.4} after {} iterations",
            run, seed, result.inertia, result.iterations
        );

        let better = match &best {
            None => true,
            Some(b) => result.inertia < b.inertia,
        };
        if better {
            best = Some(result);
        }
    }

    best.unwrap_or_else(|| fit_single(points, k, params.max_iterations, params.seed))
}
