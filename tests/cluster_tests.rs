mod common;

use common::{approx, EventBuilder};
use rstest::rstest;
use setpiece::cluster::{ClusterEngine, Silhouette};
use setpiece::config::ClusterParams;
use setpiece::error::SetPieceError;
use setpiece::events::Outcome;
use setpiece::features::{extract_features, FeatureSchema};
use setpiece::scaler::{ScaledMatrix, StandardScaler};

fn scaled_two_zones(schema: FeatureSchema) -> (ScaledMatrix, Vec<Outcome>) {
    let events = common::two_zone_corners();
    let matrix = extract_features(&events, schema).unwrap();
    let (_, scaled) = StandardScaler::fit_transform(&matrix).unwrap();
    (scaled, matrix.outcomes)
}

#[rstest]
#[case(FeatureSchema::Target)]
#[case(FeatureSchema::EndLocation)]
fn test_two_zones_split_cleanly(#[case] schema: FeatureSchema) {
    let (scaled, outcomes) = scaled_two_zones(schema);
    let engine = ClusterEngine::new(ClusterParams::default().with_clusters(2));
    assert_eq!(engine.params().clusters, 2);
    let result = engine.cluster(&scaled, &outcomes).unwrap();

    assert_eq!(&result.labels[..10], &[0; 10]);
    assert_eq!(&result.labels[10..], &[1; 10]);

    assert_eq!(result.clusters[0].size, 10);
    assert_eq!(result.clusters[1].size, 10);
    assert!(approx(result.clusters[0].success_rate, 0.8, 1e-12));
    assert!(approx(result.clusters[1].success_rate, 0.0, 1e-12));
    assert_eq!(result.clusters[0].shot_rate, 0.0);

    let score = result.silhouette.score().expect("two populated clusters");
    assert!(score > 0.5, "well separated zones should score high, got {}", score);
}

#[test]
fn test_same_seed_same_result() {
    let (scaled, outcomes) = scaled_two_zones(FeatureSchema::Target);
    let params = ClusterParams::default().with_clusters(3).with_seed(7);

    let a = ClusterEngine::new(params.clone())
        .cluster(&scaled, &outcomes)
        .unwrap();
    let b = ClusterEngine::new(params).cluster(&scaled, &outcomes).unwrap();

    assert_eq!(a, b);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(20)]
fn test_stats_partition_rows(#[case] k: usize) {
    let (scaled, outcomes) = scaled_two_zones(FeatureSchema::Target);
    let result = ClusterEngine::new(ClusterParams::default().with_clusters(k))
        .cluster(&scaled, &outcomes)
        .unwrap();

    assert_eq!(result.clusters.len(), k);
    assert_eq!(result.total_members(), scaled.len());
    assert!(result.labels.iter().all(|&l| l < k));
    for c in &result.clusters {
        let members = result.labels.iter().filter(|&&l| l == c.id).count();
        assert_eq!(members, c.size);
    }
}

#[rstest]
#[case(0)]
#[case(21)]
fn test_invalid_cluster_count(#[case] k: usize) {
    let (scaled, outcomes) = scaled_two_zones(FeatureSchema::Target);
    let result = ClusterEngine::new(ClusterParams::default().with_clusters(k)).cluster(&scaled, &outcomes);
    assert!(matches!(result, Err(SetPieceError::Config(_))));
}

#[test]
fn test_zero_iterations_is_config_error() {
    let (scaled, outcomes) = scaled_two_zones(FeatureSchema::Target);
    let params = ClusterParams {
        max_iterations: 0,
        ..ClusterParams::default().with_clusters(2)
    };
    let result = ClusterEngine::new(params).cluster(&scaled, &outcomes);
    assert!(matches!(result, Err(SetPieceError::Config(_))));
}

#[test]
fn test_outcome_count_must_match_rows() {
    let (scaled, outcomes) = scaled_two_zones(FeatureSchema::Target);
    let result = ClusterEngine::new(ClusterParams::default().with_clusters(2))
        .cluster(&scaled, &outcomes[..5]);
    assert!(matches!(result, Err(SetPieceError::Validation(_))));
}

#[rstest]
#[case(Outcome::Goal, 1.0)]
#[case(Outcome::Other, 0.0)]
fn test_single_event_single_cluster(#[case] outcome: Outcome, #[case] rate: f64) {
    let events = vec![EventBuilder::corner().end(100.0, 40.0).outcome(outcome).build()];
    let matrix = extract_features(&events, FeatureSchema::Target).unwrap();
    let (_, scaled) = StandardScaler::fit_transform(&matrix).unwrap();

    let result = ClusterEngine::new(ClusterParams::default().with_clusters(1))
        .cluster(&scaled, &matrix.outcomes)
        .unwrap();

    assert_eq!(result.silhouette, Silhouette::NotApplicable);
    assert_eq!(result.labels, vec![0]);
    assert_eq!(result.clusters[0].size, 1);
    assert_eq!(result.clusters[0].success_rate, rate);
}

#[test]
fn test_k_equal_to_n_is_not_applicable() {
    let (scaled, outcomes) = scaled_two_zones(FeatureSchema::EndLocation);
    let result = ClusterEngine::new(ClusterParams::default().with_clusters(scaled.len()))
        .cluster(&scaled, &outcomes)
        .unwrap();
    assert_eq!(result.silhouette, Silhouette::NotApplicable);
}

#[test]
fn test_identical_points_leave_empty_cluster() {
    let events: Vec<_> = (0..4)
        .map(|_| EventBuilder::corner().end(50.0, 50.0).build())
        .collect();
    let matrix = extract_features(&events, FeatureSchema::EndLocation).unwrap();
    let (_, scaled) = StandardScaler::fit_transform(&matrix).unwrap();

    let result = ClusterEngine::new(ClusterParams::default().with_clusters(2))
        .cluster(&scaled, &matrix.outcomes)
        .unwrap();

    assert_eq!(result.clusters[0].size, 4);
    assert!(result.clusters[1].is_empty());
    assert_eq!(result.clusters[1].success_rate, 0.0);
    assert_eq!(result.silhouette, Silhouette::NotApplicable);
}

#[test]
fn test_centroid_is_member_mean() {
    let (scaled, outcomes) = scaled_two_zones(FeatureSchema::EndLocation);
    let result = ClusterEngine::new(ClusterParams::default().with_clusters(2))
        .cluster(&scaled, &outcomes)
        .unwrap();

    for c in &result.clusters {
        for dim in 0..scaled.width() {
            let mean = scaled
                .rows
                .iter()
                .zip(&result.labels)
                .filter(|&(_, &l)| l == c.id)
                .map(|(r, _)| r[dim])
                .sum::<f64>()
                / c.size as f64;
            assert!(approx(c.centroid[dim], mean, 1e-12));
        }
    }
}
