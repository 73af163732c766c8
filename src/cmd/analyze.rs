use super::{open_source, InputFormat};
use crate::reports;
use clap::Args;
use setpiece::analysis::SetPieceAnalyzer;
use setpiece::config::AnalysisConfig;
use setpiece::error::SpResult;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub config: AnalysisConfig,

    /// Write the full report as JSON
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(
    args: AnalyzeArgs,
    config: AnalysisConfig,
    events_path: &str,
    format: InputFormat,
) -> SpResult<()> {
    let analyzer = SetPieceAnalyzer::new(config);
    let filter = analyzer.play_type_filter()?;
    let mut source = open_source(events_path, format, filter);

    let report = analyzer.analyze_source(source.as_mut())?;

    reports::print_overview(&report);
    reports::print_cluster_report(&report);
    reports::print_recommendation(&report.recommendation);

    if let Some(path) = args.output {
        report.write_json(path)?;
    }
    Ok(())
}
