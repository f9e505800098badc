//! Step record trait - common interface for the per-step records

use serde::{de::DeserializeOwned, Serialize};

use crate::core::step::Step;
use crate::entities::PartialSubmission;

/// A record collected by one wizard step
pub trait StepRecord: Serialize + DeserializeOwned {
    /// The step that collects this record
    const STEP: Step;
}

/// Merge a validated step's JSON values into the aggregate
///
/// The values must already have passed validation; a record that does not
/// deserialize is returned as an error and the aggregate is left untouched.
pub fn merge_step(
    aggregate: &mut PartialSubmission,
    step: Step,
    values: serde_json::Value,
) -> serde_json::Result<()> {
    match step {
        Step::PersonalInfo => aggregate.personal_info = Some(serde_json::from_value(values)?),
        Step::JobDetails => aggregate.job_details = Some(serde_json::from_value(values)?),
        Step::Skills => aggregate.skills = Some(serde_json::from_value(values)?),
        Step::EmergencyContact => {
            aggregate.emergency_contact = Some(serde_json::from_value(values)?)
        }
        Step::Review => aggregate.review = Some(serde_json::from_value(values)?),
    }
    Ok(())
}
