//! Skills and preferences record (step 3)

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::record::StepRecord;
use crate::core::step::Step;

/// Fewest skills a new hire must select
pub const MIN_SKILLS: usize = 3;

/// Most years of experience accepted per skill
pub const MAX_EXPERIENCE_YEARS: f64 = 20.0;

/// Remote preference above which manager approval is asked for
pub const MANAGER_APPROVAL_THRESHOLD: u8 = 50;

/// Longest accepted free-text note
pub const MAX_NOTES_CHARS: usize = 500;

/// Step 3: skills and working preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    pub primary_skills: Vec<String>,

    /// Years of experience keyed by skill
    #[serde(default)]
    pub skill_experience: BTreeMap<String, f64>,

    /// Preferred start of the working day, `HH:MM`
    pub working_hours_start: String,

    /// Preferred end of the working day, `HH:MM`
    pub working_hours_end: String,

    /// Percentage of remote work, 0-100 in steps of 10
    #[serde(deserialize_with = "whole_percent")]
    pub remote_work_preference: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_approved: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_notes: Option<String>,
}

impl Skills {
    /// Whether the remote preference asks for a manager's approval
    pub fn needs_manager_approval(&self) -> bool {
        self.remote_work_preference > MANAGER_APPROVAL_THRESHOLD
    }

    /// Display status of the manager approval
    pub fn approval_status(&self) -> &'static str {
        if !self.needs_manager_approval() {
            "Not required"
        } else if self.manager_approved == Some(true) {
            "Approved"
        } else {
            "Pending"
        }
    }
}

impl StepRecord for Skills {
    const STEP: Step = Step::Skills;
}

/// Read a percentage written as an integer or as a whole float such as `60.0`
fn whole_percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&value) {
        Ok(value as u8)
    } else {
        Err(serde::de::Error::custom(format!(
            "expected a whole percentage, found {}",
            value
        )))
    }
}

/// Selected skills whose experience is absent or not positive
///
/// Computed from the current selection alone, so deselecting a skill drops
/// its pending error.
pub fn missing_experience(
    selected: &[String],
    experience: &BTreeMap<String, f64>,
) -> BTreeSet<String> {
    selected
        .iter()
        .filter(|skill| experience.get(*skill).map_or(true, |years| *years <= 0.0))
        .cloned()
        .collect()
}

/// Format years of experience as shown next to a skill
pub fn format_years(years: f64) -> String {
    let unit = if years == 1.0 { "yr" } else { "yrs" };
    format!("{} {}", format_number(years), unit)
}

/// Render a number without a trailing `.0` for whole values
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
