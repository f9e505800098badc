//! Read-only summary of a submission
//!
//! The summary is a projection into labelled sections with every derived
//! value (formatted dates, ages, salaries, manager names) already rendered
//! as text, so the terminal, JSON, YAML and Markdown outputs agree.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::core::directory::Directory;
use crate::entities::skills::{format_number, format_years};
use crate::entities::{JobType, Submission};

/// Shown for optional text the submitter left empty
pub const NOT_PROVIDED: &str = "Not provided";

/// One labelled value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryField {
    pub label: String,
    pub value: String,
}

/// A titled group of fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySection {
    pub title: String,
    pub fields: Vec<SummaryField>,
}

impl SummarySection {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            fields: Vec::new(),
        }
    }

    fn field(mut self, label: &str, value: impl Into<String>) -> Self {
        self.fields.push(SummaryField {
            label: label.to_string(),
            value: value.into(),
        });
        self
    }

    /// Value of a field by label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// The rendered summary of one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub sections: Vec<SummarySection>,
}

impl Summary {
    /// Project a submission, resolving managers against `directory` and ages
    /// against `today`
    pub fn build(submission: &Submission, directory: &Directory, today: NaiveDate) -> Self {
        let personal = &submission.personal_info;
        let job = &submission.job_details;
        let skills = &submission.skills;
        let contact = &submission.emergency_contact;

        let mut sections = Vec::new();

        sections.push(
            SummarySection::new("Personal Information")
                .field("Full Name", or_not_provided(&personal.full_name))
                .field("Email", or_not_provided(&personal.email))
                .field("Phone Number", or_not_provided(&personal.phone_number))
                .field(
                    "Date of Birth",
                    format!(
                        "{} (Age: {})",
                        format_date(personal.date_of_birth),
                        personal.age_on(today)
                    ),
                )
                .field(
                    "Profile Picture",
                    personal
                        .profile_picture
                        .as_ref()
                        .map(|p| p.file_name.clone())
                        .unwrap_or_else(|| NOT_PROVIDED.to_string()),
                ),
        );

        sections.push(
            SummarySection::new("Job Details")
                .field("Department", job.department.as_str())
                .field("Position Title", or_not_provided(&job.position_title))
                .field("Job Type", job.job_type.as_str())
                .field("Start Date", format_date(job.start_date))
                .field(
                    "Salary Expectation",
                    format_salary(job.salary_expectation, job.job_type),
                )
                .field("Manager", directory.manager_name(&job.manager_id)),
        );

        let skill_list = skills
            .primary_skills
            .iter()
            .map(|skill| match skills.skill_experience.get(skill) {
                Some(years) if *years > 0.0 => format!("{} ({})", skill, format_years(*years)),
                _ => skill.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut preferences = SummarySection::new("Skills & Preferences")
            .field("Primary Skills", or_not_provided(&skill_list))
            .field(
                "Working Hours",
                format!("{} - {}", skills.working_hours_start, skills.working_hours_end),
            )
            .field(
                "Remote Work",
                format!("{}% remote", skills.remote_work_preference),
            )
            .field("Manager Approval", skills.approval_status());
        if let Some(notes) = skills.extra_notes.as_deref().filter(|n| !n.trim().is_empty()) {
            preferences = preferences.field("Additional Notes", notes);
        }
        sections.push(preferences);

        sections.push(
            SummarySection::new("Emergency Contact")
                .field("Contact Name", or_not_provided(&contact.contact_name))
                .field("Relationship", or_not_provided(&contact.relationship))
                .field("Phone Number", or_not_provided(&contact.contact_phone)),
        );

        if let Some(guardian) = contact.guardian_name() {
            sections.push(
                SummarySection::new("Guardian Contact")
                    .field("Guardian Name", guardian)
                    .field(
                        "Guardian Phone",
                        contact.guardian_phone().unwrap_or(NOT_PROVIDED),
                    ),
            );
        }

        Self { sections }
    }

    pub fn section(&self, title: &str) -> Option<&SummarySection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

fn or_not_provided(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        value.to_string()
    }
}

/// `October 19th, 2026`
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        date.format("%B"),
        ordinal(date.day()),
        date.year()
    )
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

/// `$75/hour` for contracts, `$95,000/year` otherwise
///
/// Hourly rates are printed as entered, without grouping.
pub fn format_salary(amount: f64, job_type: JobType) -> String {
    if job_type.is_hourly() {
        format!("${}/hour", format_number(amount))
    } else {
        format!("${}/year", group_thousands(amount))
    }
}

/// Insert thousands separators into the whole part of a number
fn group_thousands(value: f64) -> String {
    let text = format_number(value);
    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w.to_string(), Some(f.to_string())),
        None => (text, None),
    };
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(d) => ("-", d.to_string()),
        None => ("", whole),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
