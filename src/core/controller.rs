//! Wizard controller - step navigation and per-step form state
//!
//! The controller owns everything the wizard knows while it runs: the active
//! step, which steps have been validated, the raw values of every step form,
//! and the typed records merged so far. Front ends (the interactive prompter,
//! the answers-file runner) only feed values in and call the navigation
//! operations.

use chrono::NaiveDate;
use miette::Diagnostic;
use serde_json::{Map, Value as JsonValue};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use url::Url;

use crate::core::directory::Directory;
use crate::core::handoff::{self, HandoffError};
use crate::core::record::merge_step;
use crate::core::step::Step;
use crate::entities::skills::missing_experience;
use crate::entities::{PartialSubmission, Submission};
use crate::schema::validator::{ValidationContext, ValidationError, ValidationIssue, Validator};

/// Errors raised by wizard operations
#[derive(Debug, Error, Diagnostic)]
pub enum WizardError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("Submission is only possible from the review step (currently on {current})")]
    #[diagnostic(code(onboard::wizard::wrong_step))]
    WrongStep { current: Step },

    #[error("Please confirm all information is correct before submitting")]
    #[diagnostic(code(onboard::wizard::unconfirmed))]
    Unconfirmed,

    #[error("The {0} step has not been completed")]
    #[diagnostic(code(onboard::wizard::incomplete))]
    Incomplete(Step),

    #[error("Could not read {step} values: {source}")]
    #[diagnostic(code(onboard::wizard::record))]
    Record {
        step: Step,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(onboard::wizard::handoff))]
    Handoff(#[from] HandoffError),
}

/// Validation state of one step form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    /// Not validated yet; edits are not checked
    #[default]
    Pristine,
    /// Last validation failed with these issues
    Invalid(Vec<ValidationIssue>),
    /// Last validation passed
    Valid,
}

/// Raw values and validation state of one step
#[derive(Debug, Clone, Default)]
pub struct StepForm {
    values: Map<String, JsonValue>,
    state: FormState,
}

impl StepForm {
    pub fn values(&self) -> &Map<String, JsonValue> {
        &self.values
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.values.get(field)
    }
}

/// Outcome of a successful `next_step`
#[derive(Debug, Clone)]
pub struct StepAdvance {
    /// The step that was validated
    pub completed: Step,
    /// The step now active (unchanged after the last step)
    pub current: Step,
    /// Non-blocking findings, such as pending manager approval
    pub warnings: Vec<ValidationIssue>,
}

/// Drives the five onboarding steps
pub struct WizardController {
    validator: Validator,
    directory: Directory,
    today: NaiveDate,
    base_url: Url,
    current: Step,
    completed: BTreeSet<Step>,
    forms: BTreeMap<Step, StepForm>,
    submission: PartialSubmission,
}

impl WizardController {
    pub fn new(validator: Validator, directory: Directory, today: NaiveDate, base_url: Url) -> Self {
        Self {
            validator,
            directory,
            today,
            base_url,
            current: Step::PersonalInfo,
            completed: BTreeSet::new(),
            forms: Step::all().iter().map(|s| (*s, StepForm::default())).collect(),
            submission: PartialSubmission::default(),
        }
    }

    pub fn current_step(&self) -> Step {
        self.current
    }

    pub fn completed_steps(&self) -> &BTreeSet<Step> {
        &self.completed
    }

    pub fn is_completed(&self, step: Step) -> bool {
        self.completed.contains(&step)
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Schema document driving the prompts of a step
    pub fn schema(&self, step: Step) -> Option<&JsonValue> {
        self.validator.schema(step)
    }

    /// Records merged so far
    pub fn submission(&self) -> &PartialSubmission {
        &self.submission
    }

    pub fn form(&self, step: Step) -> &StepForm {
        // Every step gets a form in `new`
        &self.forms[&step]
    }

    fn form_mut(&mut self, step: Step) -> &mut StepForm {
        self.forms.entry(step).or_default()
    }

    /// Share of completed steps, 0-100
    pub fn progress_percent(&self) -> u8 {
        let percent = self.completed.len() as f64 / Step::COUNT as f64 * 100.0;
        percent.round() as u8
    }

    /// Age from the submitted personal info, used by the guardian rule
    pub fn submitter_age(&self) -> Option<i32> {
        self.submission.submitter_age(self.today)
    }

    fn context(&self) -> ValidationContext<'_> {
        ValidationContext {
            today: self.today,
            directory: &self.directory,
            submitter_age: self.submitter_age(),
        }
    }

    /// Jump to step `n` (1-based)
    ///
    /// Only completed steps and the first incomplete one are reachable; any
    /// other target leaves the wizard where it is.
    pub fn go_to_step(&mut self, n: usize) -> bool {
        let reachable = n >= 1 && n <= self.completed.len() + 1;
        match Step::from_number(n).filter(|_| reachable) {
            Some(step) => {
                tracing::debug!(from = self.current.number(), to = n, "jump to step");
                self.current = step;
                true
            }
            None => {
                tracing::debug!(
                    target_step = n,
                    completed = self.completed.len(),
                    "jump refused"
                );
                false
            }
        }
    }

    /// Validate the active step, merge its record and move forward
    pub fn next_step(&mut self) -> Result<StepAdvance, WizardError> {
        let step = self.current;
        let warnings = self.commit(step)?;

        if let Some(next) = step.next() {
            self.current = next;
        }
        tracing::info!(
            step = step.key(),
            progress = self.progress_percent(),
            "step completed"
        );

        Ok(StepAdvance {
            completed: step,
            current: self.current,
            warnings,
        })
    }

    /// Move back one step; completion is kept
    pub fn prev_step(&mut self) -> bool {
        match self.current.prev() {
            Some(prev) => {
                tracing::debug!(from = self.current.number(), to = prev.number(), "step back");
                self.current = prev;
                true
            }
            None => false,
        }
    }

    /// Validate, merge and mark one step completed
    fn commit(&mut self, step: Step) -> Result<Vec<ValidationIssue>, WizardError> {
        let values = JsonValue::Object(self.form(step).values.clone());

        let ctx = self.context();
        let outcome = self.validator.validate(step, &values, &ctx);
        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                tracing::info!(
                    step = step.key(),
                    errors = err.violation_count(),
                    "step rejected"
                );
                self.form_mut(step).state = FormState::Invalid(err.issues());
                return Err(err.into());
            }
        };

        merge_step(&mut self.submission, step, values)
            .map_err(|source| WizardError::Record { step, source })?;
        self.form_mut(step).state = FormState::Valid;
        self.completed.insert(step);

        for warning in &result.warnings {
            tracing::warn!(step = step.key(), field = %warning.field, "{}", warning.message);
        }
        Ok(result.warnings)
    }

    /// Set one field of the active step
    ///
    /// `Null` clears the field. Once the form has been validated, every edit
    /// re-validates it.
    pub fn set_field(&mut self, field: &str, value: JsonValue) -> &FormState {
        let step = self.current;
        let form = self.form_mut(step);
        if value.is_null() {
            form.values.remove(field);
        } else {
            form.values.insert(field.to_string(), value);
        }
        self.revalidate(step)
    }

    /// Replace every value of the active step at once
    pub fn set_values(&mut self, values: Map<String, JsonValue>) -> &FormState {
        let step = self.current;
        self.form_mut(step).values = values;
        self.revalidate(step)
    }

    fn revalidate(&mut self, step: Step) -> &FormState {
        if self.form(step).state != FormState::Pristine {
            let values = JsonValue::Object(self.form(step).values.clone());
            let state = match self.validator.validate(step, &values, &self.context()) {
                Ok(_) => FormState::Valid,
                Err(err) => FormState::Invalid(err.issues()),
            };
            self.form_mut(step).state = state;
        }
        &self.form(step).state
    }

    /// Select or deselect a skill on the skills form, returning whether it is
    /// now selected
    pub fn toggle_skill(&mut self, skill: &str) -> bool {
        let form = self.form_mut(Step::Skills);
        let mut selected = string_list(form.values.get("primarySkills"));
        let now_selected = match selected.iter().position(|s| s == skill) {
            Some(index) => {
                selected.remove(index);
                false
            }
            None => {
                selected.push(skill.to_string());
                true
            }
        };
        form.values.insert(
            "primarySkills".to_string(),
            JsonValue::Array(selected.into_iter().map(JsonValue::String).collect()),
        );
        self.revalidate(Step::Skills);
        now_selected
    }

    /// Record years of experience for one skill on the skills form
    pub fn set_skill_experience(&mut self, skill: &str, years: f64) {
        let form = self.form_mut(Step::Skills);
        let entry = form
            .values
            .entry("skillExperience")
            .or_insert_with(|| JsonValue::Object(Map::new()));
        if !entry.is_object() {
            *entry = JsonValue::Object(Map::new());
        }
        if let Some(map) = entry.as_object_mut() {
            map.insert(skill.to_string(), JsonValue::from(years));
        }
        self.revalidate(Step::Skills);
    }

    /// Selected skills still lacking a positive experience value
    pub fn experience_errors(&self) -> BTreeSet<String> {
        let form = self.form(Step::Skills);
        let selected = string_list(form.values.get("primarySkills"));
        let experience = form
            .values
            .get("skillExperience")
            .and_then(|v| v.as_object())
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_f64().map(|years| (k.clone(), years)))
                    .collect()
            })
            .unwrap_or_default();
        missing_experience(&selected, &experience)
    }

    /// Finish the wizard from the review step and build the hand-off link
    pub fn submit(&mut self) -> Result<Url, WizardError> {
        if self.current != Step::Review {
            return Err(WizardError::WrongStep {
                current: self.current,
            });
        }
        let confirmed = self
            .form(Step::Review)
            .get("confirmationChecked")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if !confirmed {
            return Err(WizardError::Unconfirmed);
        }

        self.commit(Step::Review)?;
        let submission: Submission = self
            .submission
            .clone()
            .complete()
            .map_err(WizardError::Incomplete)?;

        let link = handoff::encode(&self.base_url, &submission)?;
        tracing::info!("onboarding submitted");
        Ok(link)
    }
}

fn string_list(value: Option<&JsonValue>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn controller() -> WizardController {
        WizardController::new(
            Validator::default(),
            Directory::embedded().unwrap(),
            today(),
            Url::parse("http://localhost:3000/").unwrap(),
        )
    }

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn fill(wizard: &mut WizardController, submission: &Submission) {
        let step = wizard.current_step();
        let values = submission.record_value(step).unwrap();
        wizard.set_values(object(values));
    }

    fn complete_through(wizard: &mut WizardController, submission: &Submission, last: Step) {
        for step in Step::all().iter().take(last.number()) {
            assert_eq!(wizard.current_step(), *step);
            fill(wizard, submission);
            wizard.next_step().unwrap();
        }
    }

    #[test]
    fn test_forward_skip_is_noop() {
        let mut wizard = controller();
        assert!(!wizard.go_to_step(3));
        assert_eq!(wizard.current_step(), Step::PersonalInfo);
        assert!(!wizard.go_to_step(0));
        assert!(!wizard.go_to_step(6));
        assert!(wizard.go_to_step(1));
    }

    #[test]
    fn test_back_navigation_keeps_completion() {
        let mut wizard = controller();
        let submission = Submission::sample(today());
        complete_through(&mut wizard, &submission, Step::JobDetails);

        assert_eq!(wizard.current_step(), Step::Skills);
        assert_eq!(wizard.progress_percent(), 40);

        assert!(wizard.prev_step());
        assert!(wizard.prev_step());
        assert!(!wizard.prev_step());
        assert_eq!(wizard.current_step(), Step::PersonalInfo);
        assert!(wizard.is_completed(Step::JobDetails));

        // Completed steps plus the next one stay reachable
        assert!(wizard.go_to_step(3));
        assert!(!wizard.go_to_step(4));
        assert_eq!(wizard.current_step(), Step::Skills);
    }

    #[test]
    fn test_invalid_step_does_not_advance() {
        let mut wizard = controller();
        wizard.set_field("fullName", json!("Ada"));

        let err = wizard.next_step().unwrap_err();
        assert!(matches!(err, WizardError::Validation(_)));
        assert_eq!(wizard.current_step(), Step::PersonalInfo);
        assert!(wizard.completed_steps().is_empty());
        assert!(matches!(
            wizard.form(Step::PersonalInfo).state(),
            FormState::Invalid(_)
        ));
    }

    #[test]
    fn test_edits_revalidate_after_first_attempt() {
        let mut wizard = controller();
        let submission = Submission::sample(today());

        // Untouched forms are not checked while typing
        assert_eq!(wizard.set_field("fullName", json!("Ada")), &FormState::Pristine);

        fill(&mut wizard, &submission);
        wizard.set_field("fullName", json!("Ada"));
        assert!(wizard.next_step().is_err());

        let state = wizard.set_field("fullName", json!("Ada Lovelace"));
        assert_eq!(state, &FormState::Valid);
        wizard.next_step().unwrap();
        assert_eq!(wizard.current_step(), Step::JobDetails);
    }

    #[test]
    fn test_reactive_experience_errors() {
        let mut wizard = controller();
        let submission = Submission::sample(today());
        complete_through(&mut wizard, &submission, Step::JobDetails);

        for skill in ["A", "B", "C"] {
            assert!(wizard.toggle_skill(skill));
        }
        wizard.set_skill_experience("A", 2.0);
        wizard.set_skill_experience("B", 0.0);
        wizard.set_skill_experience("C", 3.0);
        assert_eq!(wizard.experience_errors(), BTreeSet::from(["B".to_string()]));

        assert!(!wizard.toggle_skill("B"));
        assert!(wizard.experience_errors().is_empty());
    }

    #[test]
    fn test_guardian_uses_submitted_age() {
        let mut wizard = controller();
        let mut submission = Submission::sample(today());
        submission.personal_info.date_of_birth = NaiveDate::from_ymd_opt(2006, 1, 1).unwrap();
        complete_through(&mut wizard, &submission, Step::Skills);

        assert_eq!(wizard.submitter_age(), Some(20));
        fill(&mut wizard, &submission);
        let err = wizard.next_step().unwrap_err();
        match err {
            WizardError::Validation(e) => {
                assert!(e.has_error_on("guardianName"));
                assert!(e.has_error_on("guardianPhone"));
            }
            other => panic!("unexpected error: {}", other),
        }

        wizard.set_field("guardianName", json!("Alan Turing"));
        wizard.set_field("guardianPhone", json!("15550001111"));
        wizard.next_step().unwrap();
        assert_eq!(wizard.current_step(), Step::Review);
    }

    #[test]
    fn test_remote_approval_is_a_warning() {
        let mut wizard = controller();
        let mut submission = Submission::sample(today());
        submission.skills.remote_work_preference = 70;
        complete_through(&mut wizard, &submission, Step::JobDetails);

        fill(&mut wizard, &submission);
        let advance = wizard.next_step().unwrap();
        assert_eq!(advance.completed, Step::Skills);
        assert_eq!(advance.warnings.len(), 1);
        assert_eq!(advance.warnings[0].field, "managerApproved");
    }

    #[test]
    fn test_no_cascade_when_earlier_step_changes() {
        let mut wizard = controller();
        let submission = Submission::sample(today());
        complete_through(&mut wizard, &submission, Step::Skills);

        assert!(wizard.go_to_step(2));
        wizard.set_field("department", json!("Marketing"));
        assert!(matches!(wizard.form(Step::JobDetails).state(), FormState::Invalid(_)));
        assert!(wizard.is_completed(Step::Skills));
        assert_eq!(wizard.form(Step::Skills).state(), &FormState::Valid);
    }

    #[test]
    fn test_submit_requires_review_and_confirmation() {
        let mut wizard = controller();
        let submission = Submission::sample(today());

        assert!(matches!(wizard.submit(), Err(WizardError::WrongStep { .. })));

        complete_through(&mut wizard, &submission, Step::EmergencyContact);
        assert_eq!(wizard.current_step(), Step::Review);
        assert!(matches!(wizard.submit(), Err(WizardError::Unconfirmed)));

        wizard.set_field("confirmationChecked", json!(true));
        let link = wizard.submit().unwrap();
        assert_eq!(wizard.progress_percent(), 100);

        let decoded = handoff::decode(link.as_str()).unwrap();
        assert_eq!(decoded, submission);
    }
}
