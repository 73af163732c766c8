#![allow(dead_code)]

use setpiece::events::{Event, Outcome, PlayType};

/// Small deterministic offsets that sum to zero, so group means are exact.
pub const JITTER: [f64; 10] = [-0.5, 0.5, -0.4, 0.4, -0.3, 0.3, -0.2, 0.2, -0.1, 0.1];

/// Builder for synthetic events.
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn corner() -> Self {
        Self {
            event: Event::new(PlayType::Corner, Outcome::Other).with_location(120.0, 0.1),
        }
    }

    pub fn free_kick() -> Self {
        Self {
            event: Event::new(PlayType::FreeKick, Outcome::Other).with_location(80.0, 30.0),
        }
    }

    pub fn penalty() -> Self {
        Self {
            event: Event::new(PlayType::Penalty, Outcome::Other).with_location(108.0, 40.0),
        }
    }

    pub fn outcome(mut self, outcome: Outcome) -> Self {
        self.event.outcome = outcome;
        self
    }

    pub fn end(mut self, x: f64, y: f64) -> Self {
        self.event = self.event.with_end_location(x, y);
        self
    }

    pub fn no_location(mut self) -> Self {
        self.event.location = None;
        self.event.end_location = None;
        self
    }

    pub fn in_match(mut self, id: u64) -> Self {
        self.event = self.event.with_match(id);
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}

/// 10 corners around (100, 40) with 8 goals, then 10 around (20, 20) with none.
pub fn two_zone_corners() -> Vec<Event> {
    let mut events = Vec::new();
    for (i, j) in JITTER.iter().enumerate() {
        let outcome = if i < 8 { Outcome::Goal } else { Outcome::Other };
        events.push(
            EventBuilder::corner()
                .end(100.0 + j, 40.0 - j)
                .outcome(outcome)
                .in_match(1)
                .build(),
        );
    }
    for j in JITTER {
        events.push(
            EventBuilder::corner()
                .end(20.0 + j, 20.0 + j)
                .outcome(Outcome::Other)
                .in_match(2)
                .build(),
        );
    }
    events
}

pub fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}
