use proptest::prelude::*;
use setpiece::cluster::{silhouette_score, ClusterEngine, Silhouette};
use setpiece::config::ClusterParams;
use setpiece::events::Outcome;
use setpiece::scaler::{ScaledMatrix, StandardScaler};

// --- STRATEGIES ---

prop_compose! {
    fn arb_rows(width: usize)(
        rows in proptest::collection::vec(
            proptest::collection::vec(-1000.0..1000.0f64, width),
            1..30,
        )
    ) -> Vec<Vec<f64>> {
        rows
    }
}

prop_compose! {
    fn arb_outcome()(i in 0u8..4) -> Outcome {
        match i {
            0 => Outcome::Goal,
            1 => Outcome::Shot,
            2 => Outcome::CompletedPass,
            _ => Outcome::Other,
        }
    }
}

/// Points, their outcomes, and a valid k for them.
prop_compose! {
    fn arb_clustering_input()(
        points in proptest::collection::vec(
            proptest::collection::vec(-100.0..100.0f64, 2),
            2..40,
        ),
        k_seed in any::<usize>(),
        seed in any::<u64>(),
    )(
        outcomes in proptest::collection::vec(arb_outcome(), points.len()),
        k in Just(1 + k_seed % points.len()),
        points in Just(points),
        seed in Just(seed),
    ) -> (Vec<Vec<f64>>, Vec<Outcome>, usize, u64) {
        (points, outcomes, k, seed)
    }
}

fn quick_params(k: usize, seed: u64) -> ClusterParams {
    ClusterParams {
        clusters: k,
        seed,
        max_iterations: 100,
        n_init: 2,
    }
}

proptest! {
    #[test]
    fn prop_scaler_round_trip(rows in arb_rows(3)) {
        let fitted = StandardScaler::fit_rows(&rows).unwrap();
        for row in &rows {
            let z = fitted.transform_point(row).unwrap();
            let back = fitted.inverse_transform_point(&z).unwrap();
            for (a, b) in row.iter().zip(&back) {
                prop_assert!((a - b).abs() <= 1e-6 * a.abs().max(1.0), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn prop_scaled_columns_are_centered(rows in arb_rows(4)) {
        let fitted = StandardScaler::fit_rows(&rows).unwrap();
        let scaled = fitted.transform(&rows).unwrap();
        let n = rows.len() as f64;
        for col in 0..4 {
            let mean = scaled.rows.iter().map(|r| r[col]).sum::<f64>() / n;
            prop_assert!(mean.abs() < 1e-6, "column {} mean {}", col, mean);
            prop_assert!(scaled.rows.iter().all(|r| r[col].is_finite()));
        }
    }

    #[test]
    fn prop_clusters_partition_input((points, outcomes, k, seed) in arb_clustering_input()) {
        let scaled = ScaledMatrix { rows: points };
        let result = ClusterEngine::new(quick_params(k, seed))
            .cluster(&scaled, &outcomes)
            .unwrap();

        prop_assert_eq!(result.clusters.len(), k);
        prop_assert_eq!(result.labels.len(), scaled.len());
        prop_assert_eq!(result.total_members(), scaled.len());
        prop_assert_eq!(result.labels[0], 0);
        for c in &result.clusters {
            prop_assert!((0.0..=1.0).contains(&c.success_rate));
            prop_assert!(c.success_rate <= c.threat_rate + 1e-12);
            if c.is_empty() {
                prop_assert_eq!(c.success_rate, 0.0);
            }
        }
    }

    #[test]
    fn prop_same_seed_is_reproducible((points, outcomes, k, seed) in arb_clustering_input()) {
        let scaled = ScaledMatrix { rows: points };
        let a = ClusterEngine::new(quick_params(k, seed)).cluster(&scaled, &outcomes).unwrap();
        let b = ClusterEngine::new(quick_params(k, seed)).cluster(&scaled, &outcomes).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_silhouette_is_bounded((points, _outcomes, k, seed) in arb_clustering_input()) {
        let scaled = ScaledMatrix { rows: points };
        let outcomes = vec![Outcome::Other; scaled.len()];
        let result = ClusterEngine::new(quick_params(k, seed)).cluster(&scaled, &outcomes).unwrap();

        match silhouette_score(&scaled.rows, &result.labels, k) {
            Silhouette::Score(s) => prop_assert!((-1.0..=1.0).contains(&s), "score {}", s),
            Silhouette::NotApplicable => prop_assert!(k <= 1 || k >= scaled.len() || result.clusters.iter().filter(|c| !c.is_empty()).count() < 2),
        }
    }
}
