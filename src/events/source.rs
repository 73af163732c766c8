use super::{parse_play_type, Event, Location, Outcome, PlayType, RawEvent};
use crate::error::{SetPieceError, SpResult};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Anything that can hand the pipeline a batch of set-piece events.
///
/// Acquisition failures are returned as-is; the analysis never retries.
pub trait EventSource {
    fn fetch(&mut self) -> SpResult<Vec<Event>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayTypeFilter {
    allowed: Vec<PlayType>,
}

impl PlayTypeFilter {
    pub fn new(allowed: Vec<PlayType>) -> Self {
        Self { allowed }
    }

    pub fn corners_only() -> Self {
        Self::new(vec![PlayType::Corner])
    }

    #[inline]
    pub fn accepts(&self, play_type: PlayType) -> bool {
        self.allowed.contains(&play_type)
    }
}

impl Default for PlayTypeFilter {
    fn default() -> Self {
        Self::new(vec![PlayType::Corner, PlayType::FreeKick, PlayType::Penalty])
    }
}

/// Parses a JSON array of provider event records, keeping set pieces that pass `filter`.
pub fn parse_events_json<R: Read>(reader: R, filter: &PlayTypeFilter) -> SpResult<Vec<Event>> {
    let records: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
    let total = records.len();
    let mut events = Vec::new();

    for (idx, value) in records.into_iter().enumerate() {
        if !value.is_object() {
            return Err(SetPieceError::Validation(format!(
                "record {}: expected an object",
                idx
            )));
        }
        let raw: RawEvent = serde_json::from_value(value)
            .map_err(|e| SetPieceError::Validation(format!("record {}: {}", idx, e)))?;
        let event = raw
            .into_event()
            .map_err(|e| e.at(format_args!("record {}", idx)))?;

        if let Some(event) = event {
            if filter.accepts(event.play_type) {
                events.push(event);
            }
        }
    }

    debug!("Kept {} set pieces out of {} records", events.len(), total);
    Ok(events)
}

pub struct JsonFileSource {
    path: PathBuf,
    filter: PlayTypeFilter,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P, filter: PlayTypeFilter) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            filter,
        }
    }
}

impl EventSource for JsonFileSource {
    fn fetch(&mut self) -> SpResult<Vec<Event>> {
        info!("📂 Loading events from {}", self.path.display());
        let file = File::open(&self.path)?;
        parse_events_json(BufReader::new(file), &self.filter)
    }
}

/// Flat CSV row: `play_type,x,y,end_x,end_y,outcome,minute,player,team,match_id`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    play_type: String,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    end_x: Option<f64>,
    #[serde(default)]
    end_y: Option<f64>,
    #[serde(default)]
    outcome: Option<String>,
    #[serde(default)]
    minute: Option<u32>,
    #[serde(default)]
    player: Option<String>,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    match_id: Option<u64>,
}

fn pair(x: Option<f64>, y: Option<f64>) -> Option<Location> {
    match (x, y) {
        (Some(x), Some(y)) => Some(Location::new(x, y)),
        _ => None,
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub fn parse_events_csv<R: Read>(reader: R, filter: &PlayTypeFilter) -> SpResult<Vec<Event>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut events = Vec::new();
    let mut skipped = 0;

    for (idx, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        if row.play_type.is_empty() {
            return Err(SetPieceError::Validation(format!(
                "row {}: missing play_type",
                idx + 1
            )));
        }
        let Some(play_type) = parse_play_type(&row.play_type) else {
            skipped += 1;
            continue;
        };
        if !filter.accepts(play_type) {
            continue;
        }

        let outcome = match non_empty(row.outcome) {
            Some(s) => Outcome::from_str(&s).map_err(|_| {
                SetPieceError::Validation(format!("row {}: unknown outcome '{}'", idx + 1, s))
            })?,
            None => Outcome::Other,
        };

        events.push(Event {
            play_type,
            location: pair(row.x, row.y),
            end_location: pair(row.end_x, row.end_y),
            outcome,
            minute: row.minute.unwrap_or(0),
            player: non_empty(row.player),
            team: non_empty(row.team),
            match_id: row.match_id,
        });
    }

    if skipped > 0 {
        debug!("Skipped {} rows with a non set-piece play type", skipped);
    }
    Ok(events)
}

pub struct CsvFileSource {
    path: PathBuf,
    filter: PlayTypeFilter,
}

impl CsvFileSource {
    pub fn new<P: AsRef<Path>>(path: P, filter: PlayTypeFilter) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            filter,
        }
    }
}

impl EventSource for CsvFileSource {
    fn fetch(&mut self) -> SpResult<Vec<Event>> {
        info!("📂 Loading events from {}", self.path.display());
        let file = File::open(&self.path)?;
        parse_events_csv(file, &self.filter)
    }
}

/// Events already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    events: Vec<Event>,
    filter: PlayTypeFilter,
}

impl MemorySource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            filter: PlayTypeFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: PlayTypeFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl EventSource for MemorySource {
    fn fetch(&mut self) -> SpResult<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|e| self.filter.accepts(e.play_type))
            .cloned()
            .collect())
    }
}
