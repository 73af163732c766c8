pub mod analyze;
pub mod summary;

use clap::ValueEnum;
use setpiece::events::{CsvFileSource, EventSource, JsonFileSource, PlayTypeFilter};
use std::path::Path;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Pick by file extension (.csv is CSV, anything else JSON)
    Auto,
    Json,
    Csv,
}

pub fn open_source(path: &str, format: InputFormat, filter: PlayTypeFilter) -> Box<dyn EventSource> {
    let is_csv = match format {
        InputFormat::Csv => true,
        InputFormat::Json => false,
        InputFormat::Auto => Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv")),
    };

    if is_csv {
        Box::new(CsvFileSource::new(path, filter))
    } else {
        Box::new(JsonFileSource::new(path, filter))
    }
}
