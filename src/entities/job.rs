//! Job details record (step 2)

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::record::StepRecord;
use crate::core::step::Step;

/// How far ahead a start date may be scheduled
pub const START_WINDOW_DAYS: u64 = 90;

/// Department the new hire joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Marketing,
    Sales,
    #[serde(rename = "HR")]
    Hr,
    Finance,
}

impl Department {
    pub fn all() -> &'static [Department] {
        &[
            Department::Engineering,
            Department::Marketing,
            Department::Sales,
            Department::Hr,
            Department::Finance,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Marketing => "Marketing",
            Department::Sales => "Sales",
            Department::Hr => "HR",
            Department::Finance => "Finance",
        }
    }

    /// HR and Finance cannot start on their weekend (Friday or Saturday)
    pub fn restricts_weekend_start(&self) -> bool {
        matches!(self, Department::Hr | Department::Finance)
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::all()
            .iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown department: {}", s))
    }
}

/// Employment type, which decides how the salary expectation is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
}

impl JobType {
    pub fn all() -> &'static [JobType] {
        &[JobType::FullTime, JobType::PartTime, JobType::Contract]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
        }
    }

    /// Contracts are paid hourly, everything else annually
    pub fn is_hourly(&self) -> bool {
        matches!(self, JobType::Contract)
    }

    /// Inclusive salary bounds (annual salary or hourly rate)
    pub fn salary_bounds(&self) -> (f64, f64) {
        if self.is_hourly() {
            (50.0, 150.0)
        } else {
            (30_000.0, 200_000.0)
        }
    }

    /// Whether an amount sits inside [`Self::salary_bounds`]
    pub fn salary_in_bounds(&self, amount: f64) -> bool {
        let (min, max) = self.salary_bounds();
        amount >= min && amount <= max
    }

    /// Message shown when the salary falls outside [`Self::salary_bounds`]
    pub fn salary_bounds_message(&self) -> &'static str {
        if self.is_hourly() {
            "Hourly rate must be between $50 and $150"
        } else {
            "Annual salary must be between $30,000 and $200,000"
        }
    }

    /// Prompt label for the salary field
    pub fn salary_label(&self) -> &'static str {
        if self.is_hourly() {
            "Hourly Rate ($50 - $150)"
        } else {
            "Annual Salary ($30,000 - $200,000)"
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Step 2: the position being filled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub department: Department,

    pub position_title: String,

    pub manager_id: String,

    pub job_type: JobType,

    pub start_date: NaiveDate,

    pub salary_expectation: f64,
}

impl StepRecord for JobDetails {
    const STEP: Step = Step::JobDetails;
}

/// Friday and Saturday count as the weekend for start dates
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
}

/// Latest allowed start date when onboarding on `today`
pub fn latest_start_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(START_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Whether `date` lies within [today, today + 90 days]
pub fn start_date_in_window(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today && date <= latest_start_date(today)
}
