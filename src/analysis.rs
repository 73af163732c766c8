use crate::cluster::{ClusterEngine, ClusterResult, ClusterStats, Silhouette};
use crate::config::AnalysisConfig;
use crate::error::SpResult;
use crate::events::{Event, EventSource, PlayTypeFilter};
use crate::features::{extract_features, FeatureSchema};
use crate::recommend::{recommend, RecommendationOutcome};
use crate::scaler::{FittedScaler, StandardScaler};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Everything one analysis run produced, as plain serializable data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_events: usize,
    /// Fraction of all events that ended in a goal.
    pub overall_success_rate: f64,
    /// Fraction of all events that ended in a goal or a shot.
    pub overall_threat_rate: f64,
    pub schema: FeatureSchema,
    pub feature_columns: Vec<String>,
    pub k: usize,
    pub scaler: Option<FittedScaler>,
    pub clustering: Option<ClusterResult>,
    pub recommendation: RecommendationOutcome,
}

impl AnalysisReport {
    pub fn silhouette(&self) -> Option<Silhouette> {
        self.clustering.as_ref().map(|c| c.silhouette)
    }

    pub fn clusters(&self) -> &[ClusterStats] {
        match &self.clustering {
            Some(c) => &c.clusters,
            None => &[],
        }
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> SpResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("💾 Report written to {}", path.display());
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> SpResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Feature extraction → scaling → clustering → recommendation, for one batch of events.
///
/// Every call fits fresh; nothing carries over between runs.
pub struct SetPieceAnalyzer {
    config: AnalysisConfig,
}

impl SetPieceAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn play_type_filter(&self) -> SpResult<PlayTypeFilter> {
        Ok(PlayTypeFilter::new(self.config.extraction.get_play_types()?))
    }

    pub fn analyze_source<S: EventSource + ?Sized>(&self, source: &mut S) -> SpResult<AnalysisReport> {
        let events = source.fetch()?;
        info!("📥 Received {} set pieces", events.len());
        self.analyze(&events)
    }

    pub fn analyze(&self, events: &[Event]) -> SpResult<AnalysisReport> {
        self.config.cluster.validate()?;
        let schema = self.config.extraction.schema;
        let k = self.config.cluster.clusters;

        let matrix = extract_features(events, schema)?;
        let total = matrix.len();
        let (overall_success_rate, overall_threat_rate) = if total > 0 {
            let goals = matrix.outcomes.iter().filter(|o| o.is_goal()).count();
            let threats = matrix.outcomes.iter().filter(|o| o.is_threat()).count();
            (goals as f64 / total as f64, threats as f64 / total as f64)
        } else {
            (0.0, 0.0)
        };

        let feature_columns = matrix.column_names().iter().map(|s| s.to_string()).collect();

        if matrix.is_empty() {
            warn!("No set pieces to analyze");
            return Ok(AnalysisReport {
                total_events: 0,
                overall_success_rate,
                overall_threat_rate,
                schema,
                feature_columns,
                k,
                scaler: None,
                clustering: None,
                recommendation: RecommendationOutcome::NoRecommendation,
            });
        }

        let (scaler, scaled) = StandardScaler::fit_transform(&matrix)?;
        let engine = ClusterEngine::new(self.config.cluster.clone());
        let clustering = engine.cluster(&scaled, &matrix.outcomes)?;
        let recommendation = recommend(&clustering.clusters, &scaler)?;

        Ok(AnalysisReport {
            total_events: total,
            overall_success_rate,
            overall_threat_rate,
            schema,
            feature_columns,
            k,
            scaler: Some(scaler),
            clustering: Some(clustering),
            recommendation,
        })
    }
}
