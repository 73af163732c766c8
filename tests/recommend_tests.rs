mod common;

use common::approx;
use setpiece::cluster::ClusterStats;
use setpiece::error::SetPieceError;
use setpiece::recommend::{describe_target, recommend, RecommendationOutcome};
use setpiece::scaler::StandardScaler;

fn stats(id: usize, size: usize, success_rate: f64, centroid: Vec<f64>) -> ClusterStats {
    ClusterStats {
        id,
        size,
        success_rate,
        shot_rate: 0.0,
        threat_rate: success_rate,
        centroid,
    }
}

#[test]
fn test_description_format() {
    assert_eq!(
        describe_target(100.0, 40.0, 0.8),
        "Target the area around (x=100.0, y=40.0) which has a 80.0% success rate"
    );
    assert_eq!(
        describe_target(12.34, 0.04, 1.0 / 3.0),
        "Target the area around (x=12.3, y=0.0) which has a 33.3% success rate"
    );
}

#[test]
fn test_highest_rate_wins() {
    // means (5, 10), scales (5, 10)
    let scaler = StandardScaler::fit_rows(&[vec![0.0, 0.0], vec![10.0, 20.0]]).unwrap();
    let clusters = vec![
        stats(0, 4, 0.25, vec![-1.0, -1.0]),
        stats(1, 6, 0.5, vec![1.0, 1.0]),
    ];

    let outcome = recommend(&clusters, &scaler).unwrap();
    let r = outcome.recommendation().expect("populated clusters");
    assert_eq!(r.best_cluster, 1);
    assert!(approx(r.target_x, 10.0, 1e-12));
    assert!(approx(r.target_y, 20.0, 1e-12));
    assert_eq!(r.raw_centroid.len(), 2);
    assert_eq!(
        r.description,
        "Target the area around (x=10.0, y=20.0) which has a 50.0% success rate"
    );
}

#[test]
fn test_tie_goes_to_lowest_id() {
    let scaler = StandardScaler::fit_rows(&[vec![0.0, 0.0], vec![10.0, 20.0]]).unwrap();
    let clusters = vec![
        stats(1, 2, 0.5, vec![1.0, 1.0]),
        stats(0, 3, 0.5, vec![0.0, 0.0]),
    ];

    let r = recommend(&clusters, &scaler).unwrap();
    let r = r.recommendation().unwrap();
    assert_eq!(r.best_cluster, 0);
    assert!(approx(r.target_x, 5.0, 1e-12));
    assert!(approx(r.target_y, 10.0, 1e-12));
}

#[test]
fn test_empty_clusters_are_ignored() {
    let scaler = StandardScaler::fit_rows(&[vec![0.0, 0.0], vec![10.0, 20.0]]).unwrap();
    let clusters = vec![
        stats(0, 5, 0.1, vec![0.0, 0.0]),
        stats(1, 0, 1.0, vec![1.0, 1.0]),
    ];

    let r = recommend(&clusters, &scaler).unwrap();
    assert_eq!(r.recommendation().unwrap().best_cluster, 0);
}

#[test]
fn test_no_populated_cluster() {
    let scaler = StandardScaler::fit_rows(&[vec![0.0, 0.0], vec![10.0, 20.0]]).unwrap();
    let clusters = vec![stats(0, 0, 0.0, vec![0.0, 0.0])];

    assert_eq!(
        recommend(&clusters, &scaler).unwrap(),
        RecommendationOutcome::NoRecommendation
    );
    assert_eq!(
        recommend(&[], &scaler).unwrap(),
        RecommendationOutcome::NoRecommendation
    );
}

#[test]
fn test_centroid_without_xy_is_rejected() {
    let scaler = StandardScaler::fit_rows(&[vec![1.0], vec![3.0]]).unwrap();
    let clusters = vec![stats(0, 2, 0.5, vec![0.0])];
    assert!(matches!(
        recommend(&clusters, &scaler),
        Err(SetPieceError::Validation(_))
    ));
}
