//! Wizard step identity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The five onboarding steps, in the order the wizard walks them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    /// Name, contact details, date of birth, picture
    PersonalInfo,
    /// Department, position, manager, contract terms
    JobDetails,
    /// Skills, working hours, remote preference
    Skills,
    /// Primary emergency contact and guardian
    EmergencyContact,
    /// Final confirmation
    Review,
}

impl Step {
    /// Number of steps in the wizard
    pub const COUNT: usize = 5;

    /// Get all steps in wizard order
    pub fn all() -> &'static [Step] {
        &[
            Step::PersonalInfo,
            Step::JobDetails,
            Step::Skills,
            Step::EmergencyContact,
            Step::Review,
        ]
    }

    /// 1-based position of the step
    pub fn number(&self) -> usize {
        match self {
            Step::PersonalInfo => 1,
            Step::JobDetails => 2,
            Step::Skills => 3,
            Step::EmergencyContact => 4,
            Step::Review => 5,
        }
    }

    /// Look up a step by its 1-based position
    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::all().get(i).copied())
    }

    /// Key of the step's record in the aggregate submission
    pub fn key(&self) -> &'static str {
        match self {
            Step::PersonalInfo => "personalInfo",
            Step::JobDetails => "jobDetails",
            Step::Skills => "skills",
            Step::EmergencyContact => "emergencyContact",
            Step::Review => "review",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::PersonalInfo => "Personal Info",
            Step::JobDetails => "Job Details",
            Step::Skills => "Skills & Preferences",
            Step::EmergencyContact => "Emergency Contact",
            Step::Review => "Review & Submit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Step::PersonalInfo => "Basic information about you",
            Step::JobDetails => "Position and role information",
            Step::Skills => "Your skills and work preferences",
            Step::EmergencyContact => "Emergency contact information",
            Step::Review => "Review and confirm your information",
        }
    }

    /// The following step, if any
    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding step, if any
    pub fn prev(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[derive(Debug, Error)]
#[error("Unknown step '{0}'. Use 1-5 or one of: personalInfo, jobDetails, skills, emergencyContact, review")]
pub struct StepParseError(String);

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<usize>() {
            return Self::from_number(n).ok_or_else(|| StepParseError(s.to_string()));
        }
        let wanted = s.to_lowercase().replace(['-', '_', ' '], "");
        Self::all()
            .iter()
            .find(|step| step.key().to_lowercase() == wanted)
            .copied()
            .ok_or_else(|| StepParseError(s.to_string()))
    }
}
