//! # Debug Trace
//!
//! Records every decision point of a simulation (inputs, roll, threshold,
//! outcome) so a developer can answer "why did this happen?".
//!
//! The trace is purely observational. A [`Tracer`] is threaded through every
//! resolution step; when disabled it holds no buffer and entry builders are
//! never run, so the simulated result is identical either way.
//!
//! ## Usage
//! ```rust,ignore
//! let mut tracer = Tracer::new(debug);
//! tracer.record(|| {
//!     TraceEntry::new(TraceStage::Disruption, "Home attack")
//!         .input("base", 0.31)
//!         .roll(0.12)
//!         .threshold(0.31)
//!         .outcome("disrupted")
//! });
//! let trace = tracer.finish();
//! ```

use serde::{Deserialize, Serialize};

use crate::models::events::SetPiece;
use crate::models::team::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStage {
    Roster,
    Strength,
    Collision,
    Aggregation,
    Allocation,
    /// Minute and set-piece category of each chance
    Schedule,
    Disruption,
    /// Shooter chooses to shoot from distance
    LongShot,
    Assist,
    Shot,
    /// Narrative save / off-target coin-flip on non-goals
    Save,
}

/// Named numeric input of a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceValue {
    pub name: String,
    pub value: f64,
}

/// Single decision record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub stage: TraceStage,
    /// What the decision is about (player, team, chance)
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamSide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_piece: Option<SetPiece>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub inputs: Vec<TraceValue>,
    /// RNG draw compared against `threshold`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    pub outcome: String,
}

impl TraceEntry {
    pub fn new(stage: TraceStage, subject: impl Into<String>) -> Self {
        Self {
            stage,
            subject: subject.into(),
            team: None,
            minute: None,
            set_piece: None,
            inputs: Vec::new(),
            roll: None,
            threshold: None,
            outcome: String::new(),
        }
    }

    pub fn team(mut self, side: TeamSide) -> Self {
        self.team = Some(side);
        self
    }

    pub fn minute(mut self, minute: u8) -> Self {
        self.minute = Some(minute);
        self
    }

    pub fn set_piece(mut self, set_piece: SetPiece) -> Self {
        self.set_piece = Some(set_piece);
        self
    }

    pub fn input(mut self, name: &str, value: f64) -> Self {
        self.inputs.push(TraceValue { name: name.to_string(), value });
        self
    }

    pub fn roll(mut self, roll: f64) -> Self {
        self.roll = Some(roll);
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = outcome.into();
        self
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.inputs.iter().find(|v| v.name == name).map(|v| v.value)
    }
}

/// Complete trace attached to a debug result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugTrace {
    pub entries: Vec<TraceEntry>,
}

impl DebugTrace {
    pub fn stage(&self, stage: TraceStage) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter().filter(move |e| e.stage == stage)
    }

    /// One line per entry, for terminal inspection
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let minute = entry.minute.map(|m| format!("{:>2}'", m)).unwrap_or_else(|| "   ".into());
            let team = entry.team.map(|t| t.to_string()).unwrap_or_default();
            let inputs: Vec<String> =
                entry.inputs.iter().map(|v| format!("{}={:.3}", v.name, v.value)).collect();
            out.push_str(&format!(
                "{} {:<11} {:<4} {} [{}]",
                minute,
                format!("{:?}", entry.stage),
                team,
                entry.subject,
                inputs.join(", ")
            ));
            if let Some(set_piece) = entry.set_piece {
                out.push_str(&format!(" ({:?})", set_piece));
            }
            if let (Some(roll), Some(threshold)) = (entry.roll, entry.threshold) {
                out.push_str(&format!(" roll {:.3} < {:.3}", roll, threshold));
            }
            out.push_str(&format!(" -> {}\n", entry.outcome));
        }
        out
    }
}

/// Capability handed to every resolution step.
#[derive(Debug, Default)]
pub struct Tracer {
    trace: Option<DebugTrace>,
}

impl Tracer {
    pub fn new(enabled: bool) -> Self {
        Self { trace: enabled.then(DebugTrace::default) }
    }

    pub fn disabled() -> Self {
        Self { trace: None }
    }

    /// Append an entry. The builder only runs when tracing is enabled.
    pub fn record(&mut self, build: impl FnOnce() -> TraceEntry) {
        if let Some(trace) = self.trace.as_mut() {
            trace.entries.push(build());
        }
    }

    pub fn finish(self) -> Option<DebugTrace> {
        self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_tracer_skips_builder() {
        let mut tracer = Tracer::new(false);
        let mut called = false;
        tracer.record(|| {
            called = true;
            TraceEntry::new(TraceStage::Shot, "x")
        });
        assert!(!called);
        assert!(tracer.finish().is_none());
    }

    #[test]
    fn test_enabled_tracer_collects_entries() {
        let mut tracer = Tracer::new(true);
        tracer.record(|| {
            TraceEntry::new(TraceStage::Disruption, "Home attack")
                .team(TeamSide::Home)
                .minute(12)
                .input("base", 0.31)
                .roll(0.12)
                .threshold(0.31)
                .outcome("disrupted")
        });
        let trace = tracer.finish().unwrap();
        assert_eq!(trace.entries.len(), 1);
        let entry = &trace.entries[0];
        assert_eq!(entry.value("base"), Some(0.31));
        assert_eq!(entry.value("missing"), None);
        assert_eq!(trace.stage(TraceStage::Disruption).count(), 1);
        assert_eq!(trace.stage(TraceStage::Shot).count(), 0);

        let summary = trace.summary();
        assert!(summary.contains("12'"));
        assert!(summary.contains("base=0.310"));
        assert!(summary.contains("-> disrupted"));
    }
}
