//! Study and trial snapshot types.
//!
//! These are the already-decoded data structures handed to the dashboard
//! components by the data-fetch collaborator. The crate owns no wire
//! protocol; snapshots arrive whole and are replaced whole on refresh.

use crate::datagrid::{CellValue, GridRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optimization direction of one objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyDirection {
    /// Smaller objective values are better.
    Minimize,
    /// Larger objective values are better.
    Maximize,
}

/// Lifecycle state of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialState {
    /// The trial is currently evaluating.
    Running,
    /// The trial finished and reported its objective values.
    Complete,
    /// The trial was stopped early by a pruner.
    Pruned,
    /// The trial raised an error.
    Fail,
    /// The trial is queued but has not started.
    Waiting,
}

impl TrialState {
    /// Display name, also used as the filter identity in the trial table.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialState::Running => "Running",
            TrialState::Complete => "Complete",
            TrialState::Pruned => "Pruned",
            TrialState::Fail => "Fail",
            TrialState::Waiting => "Waiting",
        }
    }
}

/// One sampled parameter of a trial, with its external string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialParam {
    /// Parameter name.
    pub name: String,
    /// External (human-readable) value representation.
    pub value: String,
}

/// One user- or system-defined attribute attached to a trial or study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value, stringified by the producer.
    pub value: String,
}

/// An intermediate objective value reported at a training step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntermediateValue {
    /// Step at which the value was reported.
    pub step: i64,
    /// The reported value.
    pub value: f64,
}

/// One trial of a study.
///
/// All optional fields model data that is legitimately absent for waiting
/// or running trials; absence is a normal display case, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    /// Globally unique trial identity; the trial table's row key.
    pub trial_id: i64,
    /// Per-study sequential number.
    pub number: i64,
    /// Lifecycle state.
    pub state: TrialState,
    /// Objective values, one per study direction. Absent until the trial
    /// reports; individual entries may be missing for partial reports.
    #[serde(default)]
    pub values: Option<Vec<f64>>,
    /// When the trial started, if it has.
    #[serde(default)]
    pub datetime_start: Option<DateTime<Utc>>,
    /// When the trial completed, if it has.
    #[serde(default)]
    pub datetime_complete: Option<DateTime<Utc>>,
    /// Sampled parameters.
    #[serde(default)]
    pub params: Vec<TrialParam>,
    /// Intermediate values keyed by step.
    #[serde(default)]
    pub intermediate_values: Vec<IntermediateValue>,
    /// User attributes.
    #[serde(default)]
    pub user_attrs: Vec<Attribute>,
    /// System attributes.
    #[serde(default)]
    pub system_attrs: Vec<Attribute>,
}

impl Trial {
    /// The objective value at the given index, if reported.
    pub fn value(&self, objective: usize) -> Option<f64> {
        self.values.as_ref().and_then(|v| v.get(objective)).copied()
    }

    /// Wall-clock duration in milliseconds, `None` until both timestamps
    /// are present.
    pub fn duration_millis(&self) -> Option<i64> {
        match (self.datetime_start, self.datetime_complete) {
            (Some(start), Some(complete)) => Some((complete - start).num_milliseconds()),
            _ => None,
        }
    }

    /// All parameters joined into one human-readable summary string.
    pub fn params_summary(&self) -> String {
        self.params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A full study snapshot as delivered by the data-fetch collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyDetail {
    /// Study identity.
    pub id: i64,
    /// Study name.
    pub name: String,
    /// Objective directions; the length decides single- vs multi-objective
    /// column derivation.
    pub directions: Vec<StudyDirection>,
    /// Trials in source order.
    pub trials: Vec<Trial>,
    /// Free-form study note, shown on the note page.
    #[serde(default)]
    pub note: Option<String>,
}

impl StudyDetail {
    /// Whether the study optimizes a single objective.
    pub fn is_single_objective(&self) -> bool {
        self.directions.len() == 1
    }
}

impl GridRow for Trial {
    fn key(&self) -> String {
        self.trial_id.to_string()
    }

    fn field(&self, name: &str) -> Option<CellValue> {
        match name {
            "trial_id" => Some(CellValue::Int(self.trial_id)),
            "number" => Some(CellValue::Int(self.number)),
            "state" => Some(CellValue::from(self.state.as_str())),
            _ => None,
        }
    }
}

impl GridRow for TrialParam {
    fn key(&self) -> String {
        self.name.clone()
    }

    fn field(&self, name: &str) -> Option<CellValue> {
        match name {
            "name" => Some(CellValue::from(self.name.clone())),
            "value" => Some(CellValue::from(self.value.clone())),
            _ => None,
        }
    }
}

impl GridRow for Attribute {
    fn key(&self) -> String {
        self.key.clone()
    }

    fn field(&self, name: &str) -> Option<CellValue> {
        match name {
            "key" => Some(CellValue::from(self.key.clone())),
            "value" => Some(CellValue::from(self.value.clone())),
            _ => None,
        }
    }
}

impl GridRow for IntermediateValue {
    fn key(&self) -> String {
        self.step.to_string()
    }

    fn field(&self, name: &str) -> Option<CellValue> {
        match name {
            "step" => Some(CellValue::Int(self.step)),
            "value" => Some(CellValue::Float(self.value)),
            _ => None,
        }
    }
}
