//! Event → numeric feature rows.
//!
//! The column order of a schema is fixed for a run. Outcome flags always travel
//! alongside the rows in [`FeatureMatrix::outcomes`], so cluster statistics never
//! have to know which column (if any) holds the goal flag.

use crate::error::{SetPieceError, SpResult};
use crate::events::{Event, Location, Outcome, PlayType};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureSchema {
    /// x, y, goal, shot, corner, free_kick
    #[default]
    Target,
    /// x, y only
    EndLocation,
}

impl FeatureSchema {
    pub fn column_names(self) -> &'static [&'static str] {
        match self {
            FeatureSchema::Target => &["x", "y", "goal", "shot", "corner", "free_kick"],
            FeatureSchema::EndLocation => &["x", "y"],
        }
    }

    pub fn width(self) -> usize {
        self.column_names().len()
    }

    /// The point this schema reads from an event. `Target` falls back from end to
    /// start location; `EndLocation` reads the end location only. Both default to the origin.
    pub fn location_of(self, event: &Event) -> Location {
        match self {
            FeatureSchema::Target => event.target(),
            FeatureSchema::EndLocation => event.end_location.unwrap_or(Location::ORIGIN),
        }
    }
}

/// Named view of one feature row (the richest schema).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    pub x: f64,
    pub y: f64,
    pub goal: bool,
    pub shot: bool,
    pub corner: bool,
    pub free_kick: bool,
}

impl FeatureVector {
    pub fn from_event(event: &Event, schema: FeatureSchema) -> SpResult<Self> {
        let target = schema.location_of(event);
        if !target.x.is_finite() || !target.y.is_finite() {
            return Err(SetPieceError::Validation(format!(
                "non-finite target location ({}, {})",
                target.x, target.y
            )));
        }
        Ok(Self {
            x: target.x,
            y: target.y,
            goal: event.outcome.is_goal(),
            shot: event.outcome.is_shot(),
            corner: event.play_type == PlayType::Corner,
            free_kick: event.play_type == PlayType::FreeKick,
        })
    }

    pub fn to_row(&self, schema: FeatureSchema) -> Vec<f64> {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        match schema {
            FeatureSchema::Target => vec![
                self.x,
                self.y,
                flag(self.goal),
                flag(self.shot),
                flag(self.corner),
                flag(self.free_kick),
            ],
            FeatureSchema::EndLocation => vec![self.x, self.y],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    pub schema: FeatureSchema,
    pub rows: Vec<Vec<f64>>,
    pub outcomes: Vec<Outcome>,
}

impl FeatureMatrix {
    pub fn empty(schema: FeatureSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.schema.width()
    }

    pub fn column_names(&self) -> &'static [&'static str] {
        self.schema.column_names()
    }

    pub fn column(&self, idx: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |r| r[idx])
    }
}

/// One row per event, in input order.
pub fn extract_features(events: &[Event], schema: FeatureSchema) -> SpResult<FeatureMatrix> {
    let mut matrix = FeatureMatrix::empty(schema);
    matrix.rows.reserve(events.len());
    matrix.outcomes.reserve(events.len());

    for (idx, event) in events.iter().enumerate() {
        let fv = FeatureVector::from_event(event, schema)
            .map_err(|e| e.at(format_args!("event {}", idx)))?;
        matrix.rows.push(fv.to_row(schema));
        matrix.outcomes.push(event.outcome);
    }

    Ok(matrix)
}
