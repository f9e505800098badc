//! Cross-field rules applied after the structural schema
//!
//! These are the checks a JSON Schema cannot express: computed age, bounds
//! that depend on another field, weekday restrictions, references into the
//! manager directory, and the guardian requirement carried over from the
//! personal info step.
//!
//! Each rule reads only the fields it needs, so the rules can still run over
//! the readable fields of values that do not form a complete record.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::core::directory::Directory;
use crate::core::record::StepRecord;
use crate::core::step::Step;
use crate::entities::emergency::guardian_required;
use crate::entities::job::{is_weekend, start_date_in_window};
use crate::entities::personal::{age_on, name_word_count, MINIMUM_AGE};
use crate::entities::skills::{
    missing_experience, MANAGER_APPROVAL_THRESHOLD, MAX_NOTES_CHARS, MIN_SKILLS,
};
use crate::entities::{
    Department, EmergencyContact, JobDetails, JobType, PersonalInfo, ProfilePicture, Review,
    Skills,
};
use crate::schema::validator::{Findings, ValidationContext};

/// Minimum length of any phone number
pub const MIN_PHONE_CHARS: usize = 9;

/// Parse a step's values and run its rules
///
/// Fails only when the values do not form a typed record; the structural
/// schema reports the reason in that case and [`apply_to_fields`] covers
/// what is still readable.
pub fn apply(
    step: Step,
    values: &JsonValue,
    ctx: &ValidationContext<'_>,
) -> serde_json::Result<Findings> {
    Ok(match step {
        Step::PersonalInfo => personal_info(&parse(values)?, ctx),
        Step::JobDetails => job_details(&parse(values)?, ctx),
        Step::Skills => skills(&parse(values)?, ctx),
        Step::EmergencyContact => emergency_contact(&parse(values)?, ctx),
        Step::Review => review(&parse(values)?),
    })
}

fn parse<T: StepRecord>(values: &JsonValue) -> serde_json::Result<T> {
    serde_json::from_value(values.clone()).map_err(|e| {
        tracing::trace!(step = T::STEP.key(), error = %e, "values do not form a record");
        e
    })
}

/// Run every rule whose fields can be read on their own
///
/// A rule is skipped when one of its fields is absent or of the wrong type.
pub fn apply_to_fields(step: Step, values: &JsonValue, ctx: &ValidationContext<'_>) -> Findings {
    let fields = Fields(values);
    let mut findings = Findings::default();

    match step {
        Step::PersonalInfo => {
            if let Some(name) = fields.get::<String>("fullName") {
                check_full_name(&mut findings, &name);
            }
            if let Some(birth) = fields.get::<NaiveDate>("dateOfBirth") {
                check_age(&mut findings, birth, ctx.today);
            }
            if let Some(picture) = fields.get::<ProfilePicture>("profilePicture") {
                check_picture(&mut findings, &picture);
            }
        }
        Step::JobDetails => {
            let department = fields.get::<Department>("department");
            if let Some(start) = fields.get::<NaiveDate>("startDate") {
                check_start_date(&mut findings, start, department, ctx.today);
            }
            if let (Some(job_type), Some(salary)) = (
                fields.get::<JobType>("jobType"),
                fields.get::<f64>("salaryExpectation"),
            ) {
                check_salary(&mut findings, job_type, salary);
            }
            if let Some(manager_id) = fields.get::<String>("managerId") {
                check_manager(&mut findings, &manager_id, department, ctx.directory);
            }
        }
        Step::Skills => {
            let selected = fields.get::<Vec<String>>("primarySkills");
            if let Some(selected) = &selected {
                check_skill_count(&mut findings, selected);
            }
            if let (Some(selected), Some(experience)) = (
                &selected,
                fields.get::<BTreeMap<String, f64>>("skillExperience"),
            ) {
                check_experience(&mut findings, selected, &experience);
            }
            if let (Some(start), Some(end)) = (
                fields.get::<String>("workingHoursStart"),
                fields.get::<String>("workingHoursEnd"),
            ) {
                check_working_hours(&mut findings, &start, &end);
            }
            if let Some(preference) = fields.get::<f64>("remoteWorkPreference") {
                check_remote_approval(&mut findings, preference, fields.get("managerApproved"));
            }
            if let Some(notes) = fields.get::<String>("extraNotes") {
                check_notes(&mut findings, &notes);
            }
        }
        Step::EmergencyContact => {
            let name = fields.get::<String>("guardianName");
            let phone = fields.get::<String>("guardianPhone");
            check_guardian(
                &mut findings,
                ctx.submitter_age,
                non_blank(name.as_deref()),
                non_blank(phone.as_deref()),
            );
        }
        Step::Review => {
            if let Some(confirmed) = fields.get::<bool>("confirmationChecked") {
                check_confirmation(&mut findings, confirmed);
            }
        }
    }

    findings
}

/// Typed access to single fields of a step's raw values
struct Fields<'a>(&'a JsonValue);

impl Fields<'_> {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.0.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Name, age and picture checks
pub fn personal_info(record: &PersonalInfo, ctx: &ValidationContext<'_>) -> Findings {
    let mut findings = Findings::default();
    check_full_name(&mut findings, &record.full_name);
    check_age(&mut findings, record.date_of_birth, ctx.today);
    if let Some(picture) = &record.profile_picture {
        check_picture(&mut findings, picture);
    }
    findings
}

/// Start date window, weekend restriction, salary bounds, manager department
pub fn job_details(record: &JobDetails, ctx: &ValidationContext<'_>) -> Findings {
    let mut findings = Findings::default();
    check_start_date(&mut findings, record.start_date, Some(record.department), ctx.today);
    check_salary(&mut findings, record.job_type, record.salary_expectation);
    check_manager(&mut findings, &record.manager_id, Some(record.department), ctx.directory);
    findings
}

/// Skill count and experience, working hours order, remote approval
pub fn skills(record: &Skills, _ctx: &ValidationContext<'_>) -> Findings {
    let mut findings = Findings::default();
    check_skill_count(&mut findings, &record.primary_skills);
    check_experience(&mut findings, &record.primary_skills, &record.skill_experience);
    check_working_hours(&mut findings, &record.working_hours_start, &record.working_hours_end);
    check_remote_approval(
        &mut findings,
        f64::from(record.remote_work_preference),
        record.manager_approved,
    );
    if let Some(notes) = &record.extra_notes {
        check_notes(&mut findings, notes);
    }
    findings
}

/// Guardian details for submitters under 21
pub fn emergency_contact(record: &EmergencyContact, ctx: &ValidationContext<'_>) -> Findings {
    let mut findings = Findings::default();
    check_guardian(
        &mut findings,
        ctx.submitter_age,
        record.guardian_name(),
        record.guardian_phone(),
    );
    findings
}

/// The final confirmation gate
pub fn review(record: &Review) -> Findings {
    let mut findings = Findings::default();
    check_confirmation(&mut findings, record.confirmation_checked);
    findings
}

fn check_full_name(findings: &mut Findings, name: &str) {
    if name_word_count(name) < 2 {
        findings.error("fullName", "Full name must have at least 2 words");
    }
}

fn check_age(findings: &mut Findings, birth: NaiveDate, today: NaiveDate) {
    if age_on(birth, today) < MINIMUM_AGE {
        findings.error("dateOfBirth", "Must be at least 18 years old");
    }
}

fn check_picture(findings: &mut Findings, picture: &ProfilePicture) {
    if picture.is_too_large() {
        findings.error("profilePicture", "Profile picture must be less than 2MB");
    }
    if !picture.has_accepted_type() {
        findings.error("profilePicture", "Profile picture must be JPG or PNG");
    }
}

fn check_start_date(
    findings: &mut Findings,
    start: NaiveDate,
    department: Option<Department>,
    today: NaiveDate,
) {
    if !start_date_in_window(start, today) {
        findings.error(
            "startDate",
            "Start date must be between today and 90 days in the future",
        );
    }

    if department.is_some_and(|d| d.restricts_weekend_start()) && is_weekend(start) {
        findings.error(
            "startDate",
            "HR and Finance employees cannot start on weekends",
        );
    }
}

fn check_salary(findings: &mut Findings, job_type: JobType, amount: f64) {
    if !job_type.salary_in_bounds(amount) {
        findings.error("salaryExpectation", job_type.salary_bounds_message());
    }
}

/// The manager must exist, and when the department is known, work in it
fn check_manager(
    findings: &mut Findings,
    manager_id: &str,
    department: Option<Department>,
    directory: &Directory,
) {
    if manager_id.is_empty() {
        return;
    }
    match directory.manager(manager_id) {
        None => findings.error(
            "managerId",
            format!("Manager '{}' was not found in the directory", manager_id),
        ),
        Some(manager) => {
            if let Some(dept) = department.filter(|d| *d != manager.department) {
                findings.error(
                    "managerId",
                    format!("{} does not manage the {} department", manager.name, dept),
                );
            }
        }
    }
}

fn check_skill_count(findings: &mut Findings, selected: &[String]) {
    if selected.len() < MIN_SKILLS {
        findings.error("primarySkills", "Please select at least 3 skills");
    }
}

fn check_experience(findings: &mut Findings, selected: &[String], experience: &BTreeMap<String, f64>) {
    for skill in missing_experience(selected, experience) {
        findings.error(
            format!("skillExperience.{}", skill),
            format!("Please provide years of experience for {}", skill),
        );
    }
}

fn check_working_hours(findings: &mut Findings, start: &str, end: &str) {
    // `HH:MM` compares correctly as text
    if !start.is_empty() && !end.is_empty() && start >= end {
        findings.error("workingHoursEnd", "End time must be after start time");
    }
}

fn check_remote_approval(findings: &mut Findings, preference: f64, approved: Option<bool>) {
    if preference > f64::from(MANAGER_APPROVAL_THRESHOLD) && approved != Some(true) {
        findings.warn(
            "managerApproved",
            "More than 50% remote work needs manager approval",
        );
    }
}

fn check_notes(findings: &mut Findings, notes: &str) {
    if notes.chars().count() > MAX_NOTES_CHARS {
        findings.error("extraNotes", "Extra notes must be less than 500 characters");
    }
}

fn check_guardian(
    findings: &mut Findings,
    submitter_age: Option<i32>,
    name: Option<&str>,
    phone: Option<&str>,
) {
    if !guardian_required(submitter_age) {
        return;
    }
    if name.is_none() {
        findings.error(
            "guardianName",
            "Guardian name is required for applicants under 21",
        );
    }
    match phone {
        None => findings.error(
            "guardianPhone",
            "Guardian phone number is required for applicants under 21",
        ),
        Some(phone) if phone.chars().count() < MIN_PHONE_CHARS => {
            findings.error("guardianPhone", "Guardian phone number is too short")
        }
        Some(_) => {}
    }
}

fn check_confirmation(findings: &mut Findings, confirmed: bool) {
    if !confirmed {
        findings.error(
            "confirmationChecked",
            "You must confirm all information is correct",
        );
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::directory::Directory;
    use crate::schema::validator::Validator;
    use chrono::{Days, NaiveDate};
    use serde_json::json;
    use std::collections::BTreeSet;

    fn today() -> NaiveDate {
        // A Monday
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn years_ago(years: u32, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_months(chrono::Months::new(years * 12))
            .unwrap()
    }

    fn directory() -> Directory {
        Directory::embedded().unwrap()
    }

    fn ctx(directory: &Directory, submitter_age: Option<i32>) -> ValidationContext<'_> {
        ValidationContext {
            today: today(),
            directory,
            submitter_age,
        }
    }

    fn personal(dob: NaiveDate) -> JsonValue {
        json!({
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "phoneNumber": "15551234567",
            "dateOfBirth": dob.format("%Y-%m-%d").to_string()
        })
    }

    fn job(department: &str, manager: &str, job_type: &str, start: NaiveDate, salary: f64) -> JsonValue {
        json!({
            "department": department,
            "positionTitle": "Analyst",
            "managerId": manager,
            "jobType": job_type,
            "startDate": start.format("%Y-%m-%d").to_string(),
            "salaryExpectation": salary
        })
    }

    fn next_weekday(from: NaiveDate, weekday: chrono::Weekday) -> NaiveDate {
        use chrono::Datelike;
        let mut date = from;
        while date.weekday() != weekday {
            date = date.checked_add_days(Days::new(1)).unwrap();
        }
        date
    }

    #[test]
    fn test_age_boundary() {
        let directory = directory();
        let validator = Validator::default();

        let just_18 = years_ago(18, today());
        assert!(validator
            .validate(Step::PersonalInfo, &personal(just_18), &ctx(&directory, None))
            .is_ok());

        let day_short = just_18.checked_add_days(Days::new(1)).unwrap();
        let err = validator
            .validate(Step::PersonalInfo, &personal(day_short), &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(err.messages_for("dateOfBirth"), vec!["Must be at least 18 years old"]);
    }

    #[test]
    fn test_single_word_name() {
        let directory = directory();
        let validator = Validator::default();
        let mut values = personal(years_ago(30, today()));
        values["fullName"] = json!("Ada");
        let err = validator
            .validate(Step::PersonalInfo, &values, &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(err.fields(), BTreeSet::from(["fullName"]));
    }

    #[test]
    fn test_invalid_email() {
        let directory = directory();
        let validator = Validator::default();
        let mut values = personal(years_ago(30, today()));
        values["email"] = json!("ada.example.com");
        let err = validator
            .validate(Step::PersonalInfo, &values, &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(err.messages_for("email"), vec!["Please enter a valid email address"]);
    }

    #[test]
    fn test_profile_picture_limits() {
        let directory = directory();
        let validator = Validator::default();
        let mut values = personal(years_ago(30, today()));
        values["profilePicture"] = json!({
            "fileName": "me.gif",
            "size": 3 * 1024 * 1024,
            "mimeType": "image/gif"
        });
        let err = validator
            .validate(Step::PersonalInfo, &values, &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(
            err.messages_for("profilePicture"),
            vec![
                "Profile picture must be less than 2MB",
                "Profile picture must be JPG or PNG"
            ]
        );

        values["profilePicture"] = json!({
            "fileName": "me.png",
            "size": 2 * 1024 * 1024,
            "mimeType": "image/png"
        });
        assert!(validator
            .validate(Step::PersonalInfo, &values, &ctx(&directory, None))
            .is_ok());
    }

    #[test]
    fn test_contract_rate_bounds() {
        let directory = directory();
        let validator = Validator::default();
        let start = next_weekday(today(), chrono::Weekday::Tue);

        for (rate, ok) in [(49.0, false), (50.0, true), (150.0, true), (151.0, false)] {
            let values = job("Engineering", "eng-001", "Contract", start, rate);
            let result = validator.validate(Step::JobDetails, &values, &ctx(&directory, None));
            assert_eq!(result.is_ok(), ok, "rate {}", rate);
            if let Err(err) = result {
                assert_eq!(
                    err.messages_for("salaryExpectation"),
                    vec!["Hourly rate must be between $50 and $150"]
                );
            }
        }
    }

    #[test]
    fn test_annual_salary_bounds() {
        let directory = directory();
        let validator = Validator::default();
        let start = next_weekday(today(), chrono::Weekday::Tue);

        let values = job("Sales", "sal-001", "Part-time", start, 29_999.0);
        let err = validator
            .validate(Step::JobDetails, &values, &ctx(&directory, None))
            .unwrap_err();
        assert!(err.has_error_on("salaryExpectation"));

        let values = job("Sales", "sal-001", "Full-time", start, 200_000.0);
        assert!(validator
            .validate(Step::JobDetails, &values, &ctx(&directory, None))
            .is_ok());
    }

    #[test]
    fn test_hr_cannot_start_friday_or_saturday() {
        let directory = directory();
        let validator = Validator::default();

        for weekday in [chrono::Weekday::Fri, chrono::Weekday::Sat] {
            let start = next_weekday(today(), weekday);
            let values = job("HR", "hr-001", "Full-time", start, 60_000.0);
            let err = validator
                .validate(Step::JobDetails, &values, &ctx(&directory, None))
                .unwrap_err();
            assert_eq!(
                err.messages_for("startDate"),
                vec!["HR and Finance employees cannot start on weekends"]
            );
        }

        let sunday = next_weekday(today(), chrono::Weekday::Sun);
        let values = job("Finance", "fin-001", "Full-time", sunday, 60_000.0);
        assert!(validator
            .validate(Step::JobDetails, &values, &ctx(&directory, None))
            .is_ok());

        let friday = next_weekday(today(), chrono::Weekday::Fri);
        let values = job("Engineering", "eng-001", "Full-time", friday, 60_000.0);
        assert!(validator
            .validate(Step::JobDetails, &values, &ctx(&directory, None))
            .is_ok());
    }

    #[test]
    fn test_start_date_window() {
        let directory = directory();
        let validator = Validator::default();

        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        let values = job("Engineering", "eng-001", "Full-time", yesterday, 90_000.0);
        let err = validator
            .validate(Step::JobDetails, &values, &ctx(&directory, None))
            .unwrap_err();
        assert!(err.has_error_on("startDate"));

        let last_day = today().checked_add_days(Days::new(90)).unwrap();
        let values = job("Engineering", "eng-001", "Full-time", last_day, 90_000.0);
        let result = validator.validate(Step::JobDetails, &values, &ctx(&directory, None));
        assert!(result.is_ok(), "{:?}", result.err());
    }

    #[test]
    fn test_manager_must_match_department() {
        let directory = directory();
        let validator = Validator::default();
        let start = next_weekday(today(), chrono::Weekday::Mon);

        let values = job("Marketing", "eng-001", "Full-time", start, 70_000.0);
        let err = validator
            .validate(Step::JobDetails, &values, &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(
            err.messages_for("managerId"),
            vec!["Sarah Chen does not manage the Marketing department"]
        );

        let values = job("Marketing", "nobody", "Full-time", start, 70_000.0);
        let err = validator
            .validate(Step::JobDetails, &values, &ctx(&directory, None))
            .unwrap_err();
        assert!(err.has_error_on("managerId"));
    }

    fn skills_values(selected: &[&str], experience: JsonValue) -> JsonValue {
        json!({
            "primarySkills": selected,
            "skillExperience": experience,
            "workingHoursStart": "09:00",
            "workingHoursEnd": "17:00",
            "remoteWorkPreference": 20
        })
    }

    #[test]
    fn test_two_skills_fail_minimum() {
        let directory = directory();
        let validator = Validator::default();
        let values = skills_values(&["A", "B"], json!({"A": 5, "B": 5}));
        let err = validator
            .validate(Step::Skills, &values, &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(err.messages_for("primarySkills"), vec!["Please select at least 3 skills"]);
    }

    #[test]
    fn test_zero_experience_is_reported_per_skill() {
        let directory = directory();
        let validator = Validator::default();
        let values = skills_values(&["A", "B", "C"], json!({"A": 2, "B": 0, "C": 3}));
        let err = validator
            .validate(Step::Skills, &values, &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(err.fields(), BTreeSet::from(["skillExperience.B"]));
    }

    #[test]
    fn test_experience_over_twenty_years() {
        let directory = directory();
        let validator = Validator::default();
        let values = skills_values(&["A", "B", "C"], json!({"A": 21, "B": 1, "C": 3}));
        let err = validator
            .validate(Step::Skills, &values, &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(
            err.messages_for("skillExperience.A"),
            vec!["Years of experience must be between 0 and 20"]
        );
    }

    #[test]
    fn test_working_hours_order() {
        let directory = directory();
        let validator = Validator::default();
        let mut values = skills_values(&["A", "B", "C"], json!({"A": 1, "B": 1, "C": 1}));
        values["workingHoursStart"] = json!("17:00");
        values["workingHoursEnd"] = json!("09:00");
        let err = validator
            .validate(Step::Skills, &values, &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(err.messages_for("workingHoursEnd"), vec!["End time must be after start time"]);

        values["workingHoursEnd"] = json!("17:00");
        assert!(validator
            .validate(Step::Skills, &values, &ctx(&directory, None))
            .is_err());
    }

    #[test]
    fn test_remote_preference_approval_is_a_warning() {
        let directory = directory();
        let validator = Validator::default();
        let mut values = skills_values(&["A", "B", "C"], json!({"A": 1, "B": 1, "C": 1}));
        values["remoteWorkPreference"] = json!(60);

        let result = validator
            .validate(Step::Skills, &values, &ctx(&directory, None))
            .unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].field, "managerApproved");

        values["managerApproved"] = json!(true);
        let result = validator
            .validate(Step::Skills, &values, &ctx(&directory, None))
            .unwrap();
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_remote_preference_written_as_float() {
        let directory = directory();
        let validator = Validator::default();
        let mut values = skills_values(&["A", "B", "C"], json!({"A": 1, "B": 1, "C": 1}));
        values["remoteWorkPreference"] = json!(60.0);

        let result = validator
            .validate(Step::Skills, &values, &ctx(&directory, None))
            .unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].field, "managerApproved");
    }

    #[test]
    fn test_missing_field_keeps_personal_rules() {
        let directory = directory();
        let validator = Validator::default();
        let values = json!({
            "fullName": "Ada",
            "phoneNumber": "15551234567",
            "dateOfBirth": "2015-01-01"
        });
        let err = validator
            .validate(Step::PersonalInfo, &values, &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(
            err.fields(),
            BTreeSet::from(["email", "fullName", "dateOfBirth"])
        );
        assert_eq!(err.messages_for("dateOfBirth"), vec!["Must be at least 18 years old"]);
    }

    #[test]
    fn test_missing_salary_keeps_job_rules() {
        let directory = directory();
        let validator = Validator::default();
        let friday = next_weekday(today(), chrono::Weekday::Fri);
        let mut values = job("HR", "eng-001", "Full-time", friday, 0.0);
        values.as_object_mut().unwrap().remove("salaryExpectation");

        let err = validator
            .validate(Step::JobDetails, &values, &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(
            err.fields(),
            BTreeSet::from(["salaryExpectation", "startDate", "managerId"])
        );
        assert_eq!(
            err.messages_for("startDate"),
            vec!["HR and Finance employees cannot start on weekends"]
        );
        assert_eq!(
            err.messages_for("managerId"),
            vec!["Sarah Chen does not manage the HR department"]
        );
    }

    #[test]
    fn test_rules_run_on_readable_fields() {
        let directory = directory();
        let values = json!({ "jobType": "Contract", "salaryExpectation": 200, "managerId": "nobody" });
        let findings = apply_to_fields(Step::JobDetails, &values, &ctx(&directory, None));
        let fields: Vec<&str> = findings.errors.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["salaryExpectation", "managerId"]);
    }

    #[test]
    fn test_remote_preference_step_of_ten() {
        let directory = directory();
        let validator = Validator::default();
        let mut values = skills_values(&["A", "B", "C"], json!({"A": 1, "B": 1, "C": 1}));
        values["remoteWorkPreference"] = json!(55);
        let err = validator
            .validate(Step::Skills, &values, &ctx(&directory, None))
            .unwrap_err();
        assert!(err.has_error_on("remoteWorkPreference"));
    }

    #[test]
    fn test_extra_notes_limit() {
        let directory = directory();
        let validator = Validator::default();
        let mut values = skills_values(&["A", "B", "C"], json!({"A": 1, "B": 1, "C": 1}));
        values["extraNotes"] = json!("x".repeat(500));
        assert!(validator
            .validate(Step::Skills, &values, &ctx(&directory, None))
            .is_ok());

        values["extraNotes"] = json!("x".repeat(501));
        let err = validator
            .validate(Step::Skills, &values, &ctx(&directory, None))
            .unwrap_err();
        assert_eq!(
            err.messages_for("extraNotes"),
            vec!["Extra notes must be less than 500 characters"]
        );
    }

    fn contact() -> JsonValue {
        json!({
            "contactName": "Grace Hopper",
            "relationship": "Parent",
            "contactPhone": "15551234567"
        })
    }

    #[test]
    fn test_guardian_required_under_21() {
        let directory = directory();
        let validator = Validator::default();

        let err = validator
            .validate(Step::EmergencyContact, &contact(), &ctx(&directory, Some(20)))
            .unwrap_err();
        assert_eq!(err.fields(), BTreeSet::from(["guardianName", "guardianPhone"]));

        assert!(validator
            .validate(Step::EmergencyContact, &contact(), &ctx(&directory, Some(21)))
            .is_ok());
    }

    #[test]
    fn test_guardian_details_accepted() {
        let directory = directory();
        let validator = Validator::default();
        let mut values = contact();
        values["guardianName"] = json!("Alan Turing");
        values["guardianPhone"] = json!("15559876543");
        assert!(validator
            .validate(Step::EmergencyContact, &values, &ctx(&directory, Some(19)))
            .is_ok());

        values["guardianPhone"] = json!("555");
        let err = validator
            .validate(Step::EmergencyContact, &values, &ctx(&directory, Some(19)))
            .unwrap_err();
        assert_eq!(err.fields(), BTreeSet::from(["guardianPhone"]));
    }

    #[test]
    fn test_confirmation_must_be_true() {
        let directory = directory();
        let validator = Validator::default();
        let err = validator
            .validate(
                Step::Review,
                &json!({"confirmationChecked": false}),
                &ctx(&directory, None),
            )
            .unwrap_err();
        assert_eq!(
            err.messages_for("confirmationChecked"),
            vec!["You must confirm all information is correct"]
        );
        assert!(validator
            .validate(
                Step::Review,
                &json!({"confirmationChecked": true}),
                &ctx(&directory, None)
            )
            .is_ok());
    }
}
