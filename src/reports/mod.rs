use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use setpiece::analysis::AnalysisReport;
use setpiece::cluster::Silhouette;
use setpiece::recommend::RecommendationOutcome;
use setpiece::events::PlayType;
use setpiece::summary::SetPieceSummary;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

fn play_type_heading(play_type: PlayType) -> &'static str {
    match play_type {
        PlayType::Corner => "Corners",
        PlayType::FreeKick => "Free Kicks",
        PlayType::Penalty => "Penalties",
    }
}

fn pct(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

pub fn print_overview(report: &AnalysisReport) {
    let silhouette = match report.silhouette() {
        Some(Silhouette::Score(s)) => format!("{:.3}", s),
        Some(Silhouette::NotApplicable) => "n/a".to_string(),
        None => "-".to_string(),
    };

    println!("\n=== ⚽ SET PIECE ANALYSIS ===");
    println!("Events: {}", report.total_events);
    println!("Features: {}", report.feature_columns.join(", "));
    println!("Goal rate: {}", pct(report.overall_success_rate));
    println!("Goal-or-shot rate: {}", pct(report.overall_threat_rate));
    println!("Silhouette: {}", silhouette);
}

pub fn print_cluster_report(report: &AnalysisReport) {
    let clusters = report.clusters();
    if clusters.is_empty() {
        return;
    }

    // Centroids are shown in pitch coordinates when a fit is available.
    let raw_xy = |centroid: &[f64]| -> String {
        report
            .scaler
            .as_ref()
            .and_then(|s| s.inverse_transform_point(centroid).ok())
            .map(|p| format!("({:.1}, {:.1})", p[0], p[1]))
            .unwrap_or_else(|| "-".to_string())
    };

    let best = report.recommendation.recommendation().map(|r| r.best_cluster);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Cluster").add_attribute(Attribute::Bold),
        Cell::new("Size"),
        Cell::new("Goal %").fg(Color::Green),
        Cell::new("Shot %"),
        Cell::new("Threat %"),
        Cell::new("Centre (x, y)").fg(Color::Cyan),
    ]);

    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for c in clusters {
        let name = if Some(c.id) == best {
            Cell::new(format!("{} ★", c.id))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(c.id).add_attribute(Attribute::Bold)
        };

        table.add_row(vec![
            name,
            Cell::new(c.size),
            Cell::new(pct(c.success_rate)).fg(Color::Green),
            Cell::new(pct(c.shot_rate)),
            Cell::new(pct(c.threat_rate)),
            Cell::new(raw_xy(&c.centroid)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_recommendation(outcome: &RecommendationOutcome) {
    match outcome {
        RecommendationOutcome::Recommended(r) => {
            println!("\n=== 🎯 RECOMMENDATION ===");
            println!("Best cluster: {}", r.best_cluster);
            println!("Recommendation: {}", r.description);
        }
        RecommendationOutcome::NoRecommendation => {
            println!("\n=== 🎯 RECOMMENDATION ===");
            println!("Recommendation: none (no populated clusters)");
        }
    }
}

pub fn print_match_summaries(per_match: &BTreeMap<Option<u64>, SetPieceSummary>, overall: &SetPieceSummary) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("Match").add_attribute(Attribute::Bold),
        Cell::new("Total"),
    ];
    header.extend(PlayType::iter().map(|pt| Cell::new(play_type_heading(pt))));
    header.extend([
        Cell::new("Goals").fg(Color::Green),
        Cell::new("Shots"),
        Cell::new("Success %").fg(Color::Cyan),
    ]);
    let columns = header.len();
    table.add_row(header);

    for i in 1..columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let row = |label: Cell, s: &SetPieceSummary| -> Vec<Cell> {
        let mut cells = vec![label, Cell::new(s.total_set_pieces)];
        cells.extend(PlayType::iter().map(|pt| Cell::new(s.count(pt))));
        cells.extend([
            Cell::new(s.goals).fg(Color::Green),
            Cell::new(s.shots),
            Cell::new(pct(s.success_rate)).fg(Color::Cyan),
        ]);
        cells
    };

    for (id, s) in per_match {
        let label = match id {
            Some(id) => id.to_string(),
            None => "unknown".to_string(),
        };
        table.add_row(row(Cell::new(label), s));
    }
    table.add_row(row(
        Cell::new("ALL").add_attribute(Attribute::Bold),
        overall,
    ));

    println!("\n{}", table);
}
