pub mod source;

use crate::error::{SetPieceError, SpResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

pub use self::source::{CsvFileSource, EventSource, JsonFileSource, MemorySource, PlayTypeFilter};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    #[strum(to_string = "corner", serialize = "corner kick", serialize = "corner_kick")]
    Corner,
    #[strum(to_string = "free_kick", serialize = "free kick", serialize = "freekick")]
    FreeKick,
    #[strum(to_string = "penalty", serialize = "penalty kick")]
    Penalty,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Goal,
    Shot,
    CompletedPass,
    #[default]
    Other,
}

impl Outcome {
    #[inline]
    pub fn is_goal(self) -> bool {
        self == Outcome::Goal
    }

    #[inline]
    pub fn is_shot(self) -> bool {
        self == Outcome::Shot
    }

    /// Goal or shot: the play produced an attempt on goal.
    #[inline]
    pub fn is_threat(self) -> bool {
        matches!(self, Outcome::Goal | Outcome::Shot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub const ORIGIN: Location = Location { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single set-piece play, already classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub play_type: PlayType,
    pub location: Option<Location>,
    pub end_location: Option<Location>,
    pub outcome: Outcome,
    #[serde(default)]
    pub minute: u32,
    #[serde(default)]
    pub player: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub match_id: Option<u64>,
}

impl Event {
    pub fn new(play_type: PlayType, outcome: Outcome) -> Self {
        Self {
            play_type,
            location: None,
            end_location: None,
            outcome,
            minute: 0,
            player: None,
            team: None,
            match_id: None,
        }
    }

    pub fn with_location(mut self, x: f64, y: f64) -> Self {
        self.location = Some(Location::new(x, y));
        self
    }

    pub fn with_end_location(mut self, x: f64, y: f64) -> Self {
        self.end_location = Some(Location::new(x, y));
        self
    }

    pub fn with_match(mut self, match_id: u64) -> Self {
        self.match_id = Some(match_id);
        self
    }

    /// Where the delivery was aimed: end location, then start location, then the origin.
    pub fn target(&self) -> Location {
        self.end_location
            .or(self.location)
            .unwrap_or(Location::ORIGIN)
    }
}

// --- Provider record shape ---

/// Either `"Corner"` or `{ "id": 61, "name": "Corner" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NameRef {
    Plain(String),
    Named { name: String },
}

impl NameRef {
    pub fn name(&self) -> &str {
        match self {
            NameRef::Plain(s) => s,
            NameRef::Named { name } => name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDetail {
    #[serde(default)]
    pub outcome: Option<NameRef>,
    #[serde(default, rename = "type")]
    pub kind: Option<NameRef>,
    #[serde(default)]
    pub end_location: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(default, rename = "type")]
    pub kind: Option<NameRef>,
    #[serde(default)]
    pub location: Option<Vec<f64>>,
    #[serde(default)]
    pub end_location: Option<Vec<f64>>,
    #[serde(default)]
    pub shot: Option<RawDetail>,
    #[serde(default)]
    pub pass: Option<RawDetail>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub minute: Option<u32>,
    #[serde(default)]
    pub player: Option<NameRef>,
    #[serde(default)]
    pub team: Option<NameRef>,
    #[serde(default)]
    pub match_id: Option<u64>,
}

/// Outcome precedence: goal shot, any shot, completed pass, anything else.
pub fn classify_outcome(shot: Option<&RawDetail>, pass: Option<&RawDetail>) -> Outcome {
    if let Some(shot) = shot {
        let is_goal = shot
            .outcome
            .as_ref()
            .is_some_and(|o| o.name().eq_ignore_ascii_case("goal"));
        return if is_goal { Outcome::Goal } else { Outcome::Shot };
    }
    if let Some(pass) = pass {
        let complete = pass
            .outcome
            .as_ref()
            .is_some_and(|o| o.name().eq_ignore_ascii_case("complete"));
        if complete {
            return Outcome::CompletedPass;
        }
    }
    Outcome::Other
}

pub fn parse_play_type(name: &str) -> Option<PlayType> {
    PlayType::from_str(name.trim()).ok()
}

fn parse_point(field: &str, raw: Option<&Vec<f64>>) -> SpResult<Option<Location>> {
    let Some(coords) = raw else {
        return Ok(None);
    };
    if coords.len() < 2 {
        return Err(SetPieceError::Validation(format!(
            "'{}' needs at least 2 coordinates, got {}",
            field,
            coords.len()
        )));
    }
    let (x, y) = (coords[0], coords[1]);
    if !x.is_finite() || !y.is_finite() {
        return Err(SetPieceError::Validation(format!(
            "'{}' has non-finite coordinates",
            field
        )));
    }
    Ok(Some(Location::new(x, y)))
}

impl RawEvent {
    /// The set-piece type, read either from the event type itself or from the
    /// pass/shot sub-type the provider uses for restarts.
    pub fn set_piece_type(&self) -> SpResult<Option<PlayType>> {
        let kind = self.kind.as_ref().ok_or_else(|| {
            SetPieceError::Validation("event is missing required key 'type'".to_string())
        })?;

        if let Some(pt) = parse_play_type(kind.name()) {
            return Ok(Some(pt));
        }

        let sub_type = self
            .pass
            .as_ref()
            .and_then(|p| p.kind.as_ref())
            .or_else(|| self.shot.as_ref().and_then(|s| s.kind.as_ref()));

        Ok(sub_type.and_then(|t| parse_play_type(t.name())))
    }

    /// Converts a provider record into an [`Event`]; `Ok(None)` for non-set-piece events.
    pub fn into_event(self) -> SpResult<Option<Event>> {
        let Some(play_type) = self.set_piece_type()? else {
            return Ok(None);
        };

        let location = parse_point("location", self.location.as_ref())?;

        let end_raw = self
            .end_location
            .as_ref()
            .or_else(|| self.pass.as_ref().and_then(|p| p.end_location.as_ref()))
            .or_else(|| self.shot.as_ref().and_then(|s| s.end_location.as_ref()));
        let end_location = parse_point("end_location", end_raw)?;

        let mut outcome = classify_outcome(self.shot.as_ref(), self.pass.as_ref());
        if self.shot.is_none() && self.pass.is_none() {
            if let Some(flat) = &self.outcome {
                outcome = Outcome::from_str(flat.trim()).map_err(|_| {
                    SetPieceError::Validation(format!("unknown outcome '{}'", flat))
                })?;
            }
        }

        Ok(Some(Event {
            play_type,
            location,
            end_location,
            outcome,
            minute: self.minute.unwrap_or(0),
            player: self.player.map(|p| p.name().to_string()),
            team: self.team.map(|t| t.name().to_string()),
            match_id: self.match_id,
        }))
    }
}
