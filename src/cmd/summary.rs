use super::{open_source, InputFormat};
use crate::reports;
use clap::Args;
use setpiece::config::ExtractionParams;
use setpiece::error::SpResult;
use setpiece::events::{EventSource, PlayTypeFilter};
use setpiece::summary::{summarize_by_match, SetPieceSummary};

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[arg(long, default_value = "corner,free_kick,penalty")]
    pub play_types: String,
}

pub fn run(args: SummaryArgs, events_path: &str, format: InputFormat) -> SpResult<()> {
    let params = ExtractionParams {
        play_types: args.play_types,
        ..Default::default()
    };
    let filter = PlayTypeFilter::new(params.get_play_types()?);
    let mut source = open_source(events_path, format, filter);
    let events = source.fetch()?;

    let per_match = summarize_by_match(&events);
    let overall = SetPieceSummary::from_events(&events);
    reports::print_match_summaries(&per_match, &overall);
    Ok(())
}
