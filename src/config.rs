use crate::error::{SetPieceError, SpResult};
use crate::events::PlayType;
use crate::features::FeatureSchema;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    #[command(flatten)]
    pub cluster: ClusterParams,
    #[command(flatten)]
    pub extraction: ExtractionParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClusterParams {
    /// Number of clusters (k)
    #[arg(long, default_value_t = 5)]
    pub clusters: usize,
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    #[arg(long, default_value_t = 300)]
    pub max_iterations: usize,
    /// Independent k-means++ restarts; the lowest inertia run wins
    #[arg(long, default_value_t = 10)]
    pub n_init: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            clusters: 5,
            seed: 42,
            max_iterations: 300,
            n_init: 10,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionParams {
    #[arg(long, value_enum, default_value_t = FeatureSchema::Target)]
    pub schema: FeatureSchema,
    #[arg(long, default_value = "corner,free_kick,penalty")]
    pub play_types: String,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            schema: FeatureSchema::Target,
            play_types: "corner,free_kick,penalty".to_string(),
        }
    }
}

impl ClusterParams {
    pub fn with_clusters(mut self, k: usize) -> Self {
        self.clusters = k;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the parameters that do not depend on the sample size.
    pub fn validate(&self) -> SpResult<()> {
        if self.clusters == 0 {
            return Err(SetPieceError::Config(
                "cluster count must be at least 1".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(SetPieceError::Config(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.n_init == 0 {
            return Err(SetPieceError::Config(
                "n_init must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl ExtractionParams {
    pub fn get_play_types(&self) -> SpResult<Vec<PlayType>> {
        let mut out = Vec::new();
        for part in self.play_types.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let pt = PlayType::from_str(part).map_err(|_| {
                SetPieceError::Config(format!("Unknown play type '{}' in --play-types", part))
            })?;
            if !out.contains(&pt) {
                out.push(pt);
            }
        }
        if out.is_empty() {
            return Err(SetPieceError::Config(
                "--play-types must name at least one play type".to_string(),
            ));
        }
        Ok(out)
    }
}

impl AnalysisConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SpResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlays only the flags the user typed explicitly, so file values survive clap defaults.
    pub fn merge_from_cli(&mut self, cli: &AnalysisConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident, $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(cluster, clusters, "clusters");
        update_if_present!(cluster, seed, "seed");
        update_if_present!(cluster, max_iterations, "max_iterations");
        update_if_present!(cluster, n_init, "n_init");

        update_if_present!(extraction, schema, "schema");
        update_if_present!(extraction, play_types, "play_types");
    }
}
