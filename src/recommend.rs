use crate::cluster::ClusterStats;
use crate::error::{SetPieceError, SpResult};
use crate::scaler::FittedScaler;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub best_cluster: usize,
    pub success_rate: f64,
    pub shot_rate: f64,
    pub target_x: f64,
    pub target_y: f64,
    /// Full centroid mapped back to raw feature space.
    pub raw_centroid: Vec<f64>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Recommended(Recommendation),
    NoRecommendation,
}

impl RecommendationOutcome {
    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            RecommendationOutcome::Recommended(r) => Some(r),
            RecommendationOutcome::NoRecommendation => None,
        }
    }
}

pub fn describe_target(x: f64, y: f64, success_rate: f64) -> String {
    format!(
        "Target the area around (x={:.1}, y={:.1}) which has a {:.1}% success rate",
        x,
        y,
        success_rate * 100.0
    )
}

/// Picks the populated cluster with the highest success rate (lowest id on ties)
/// and maps its centroid back to pitch coordinates.
pub fn recommend(clusters: &[ClusterStats], scaler: &FittedScaler) -> SpResult<RecommendationOutcome> {
    let mut best: Option<&ClusterStats> = None;
    for c in clusters.iter().filter(|c| !c.is_empty()) {
        match best {
            Some(b) if c.success_rate > b.success_rate => best = Some(c),
            Some(b) if c.success_rate == b.success_rate && c.id < b.id => best = Some(c),
            None => best = Some(c),
            _ => {}
        }
    }

    let Some(best) = best else {
        warn!("No populated clusters; nothing to recommend");
        return Ok(RecommendationOutcome::NoRecommendation);
    };

    let raw_centroid = scaler.inverse_transform_point(&best.centroid)?;
    let (target_x, target_y) = match raw_centroid.as_slice() {
        [x, y, ..] => (*x, *y),
        _ => {
            return Err(SetPieceError::Validation(
                "centroid has no x/y columns".to_string(),
            ))
        }
    };
    let description = describe_target(target_x, target_y, best.success_rate);

    info!("🎯 Cluster {}: {}", best.id, description);

    Ok(RecommendationOutcome::Recommended(Recommendation {
        best_cluster: best.id,
        success_rate: best.success_rate,
        shot_rate: best.shot_rate,
        target_x,
        target_y,
        raw_centroid,
        description,
    }))
}
