//! The aggregate onboarding submission

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::step::Step;
use crate::entities::{EmergencyContact, JobDetails, PersonalInfo, Review, Skills};

/// A complete onboarding submission, merged from the five step records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub personal_info: PersonalInfo,
    pub job_details: JobDetails,
    pub skills: Skills,
    pub emergency_contact: EmergencyContact,
    pub review: Review,
}

impl Submission {
    /// Age of the submitter on the given day
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        self.personal_info.age_on(today)
    }

    /// The JSON value of one step's record
    pub fn record_value(&self, step: Step) -> serde_json::Result<serde_json::Value> {
        match step {
            Step::PersonalInfo => serde_json::to_value(&self.personal_info),
            Step::JobDetails => serde_json::to_value(&self.job_details),
            Step::Skills => serde_json::to_value(&self.skills),
            Step::EmergencyContact => serde_json::to_value(&self.emergency_contact),
            Step::Review => serde_json::to_value(self.review),
        }
    }
}

/// Records submitted so far while the wizard is in progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_details: Option<JobDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Skills>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
}

impl PartialSubmission {
    /// Age from the already-submitted personal info, if any
    pub fn submitter_age(&self, today: NaiveDate) -> Option<i32> {
        self.personal_info.as_ref().map(|p| p.age_on(today))
    }

    /// Turn into a complete submission, or report the first missing step
    pub fn complete(self) -> Result<Submission, Step> {
        Ok(Submission {
            personal_info: self.personal_info.ok_or(Step::PersonalInfo)?,
            job_details: self.job_details.ok_or(Step::JobDetails)?,
            skills: self.skills.ok_or(Step::Skills)?,
            emergency_contact: self.emergency_contact.ok_or(Step::EmergencyContact)?,
            review: self.review.ok_or(Step::Review)?,
        })
    }
}

impl From<Submission> for PartialSubmission {
    fn from(s: Submission) -> Self {
        Self {
            personal_info: Some(s.personal_info),
            job_details: Some(s.job_details),
            skills: Some(s.skills),
            emergency_contact: Some(s.emergency_contact),
            review: Some(s.review),
        }
    }
}

#[cfg(test)]
impl Submission {
    /// A complete, valid submission for a 30 year old engineer
    pub(crate) fn sample(today: NaiveDate) -> Self {
        use crate::entities::{Department, JobType};
        use chrono::{Days, Months};
        use std::collections::BTreeMap;

        Submission {
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone_number: "15551234567".to_string(),
                date_of_birth: today.checked_sub_months(Months::new(30 * 12)).unwrap(),
                profile_picture: None,
            },
            job_details: JobDetails {
                department: Department::Engineering,
                position_title: "Software Engineer".to_string(),
                manager_id: "eng-001".to_string(),
                job_type: JobType::FullTime,
                start_date: today.checked_add_days(Days::new(14)).unwrap(),
                salary_expectation: 95000.0,
            },
            skills: Skills {
                primary_skills: vec!["Rust".to_string(), "SQL".to_string(), "Docker".to_string()],
                skill_experience: BTreeMap::from([
                    ("Rust".to_string(), 4.0),
                    ("SQL".to_string(), 1.0),
                    ("Docker".to_string(), 2.5),
                ]),
                working_hours_start: "09:00".to_string(),
                working_hours_end: "17:30".to_string(),
                remote_work_preference: 40,
                manager_approved: None,
                extra_notes: None,
            },
            emergency_contact: EmergencyContact {
                contact_name: "Grace Hopper".to_string(),
                relationship: "Friend".to_string(),
                contact_phone: "15559876543".to_string(),
                guardian_name: None,
                guardian_phone: None,
            },
            review: Review {
                confirmation_checked: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_partial_reports_first_missing_step() {
        let partial = PartialSubmission::default();
        assert_eq!(partial.complete().unwrap_err(), Step::PersonalInfo);
    }

    #[test]
    fn test_partial_serializes_only_present_records() {
        let partial = PartialSubmission {
            review: Some(Review {
                confirmation_checked: true,
            }),
            ..Default::default()
        };
        let json = serde_json::to_string(&partial).unwrap();
        assert_eq!(json, r#"{"review":{"confirmationChecked":true}}"#);
    }
}
