//! Schema-driven interactive prompts for one wizard step
//!
//! The prompter reads a step's JSON Schema and asks for each property in
//! turn. Plain types map onto dialoguer widgets; the `x-kind`, `x-options`
//! and `x-shown-when` keywords select the special widgets (dates, pickers
//! fed from the directory, per-skill experience) and hide conditional fields.

use chrono::NaiveDate;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};
use serde_json::{Map, Value};
use std::path::Path;

use crate::core::controller::WizardController;
use crate::core::step::Step;
use crate::entities::emergency::guardian_required;
use crate::entities::personal::ProfilePicture;
use crate::entities::skills::{format_number, MANAGER_APPROVAL_THRESHOLD};
use crate::entities::{Department, JobType};
use crate::schema::validator::DATE_FORMAT;

/// Prompts for the values of one step
pub struct StepPrompter {
    theme: ColorfulTheme,
}

/// Field information extracted from schema
#[derive(Debug)]
struct FieldInfo {
    name: String,
    title: String,
    description: Option<String>,
    field_type: FieldType,
    required: bool,
    shown_when: Option<String>,
}

#[derive(Debug, PartialEq)]
enum FieldType {
    String { max_length: Option<u64> },
    Enum { values: Vec<String> },
    Options { source: String },
    Integer { minimum: i64, maximum: i64, step: i64 },
    Number,
    Boolean,
    Confirmation,
    Date,
    File,
    Experience,
    StringList,
}

impl StepPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Ask for every visible field of `step`, starting from the values
    /// already in the form
    pub fn prompt_step(&self, wizard: &WizardController, step: Step) -> Result<Map<String, Value>> {
        let schema = wizard
            .schema(step)
            .ok_or_else(|| miette::miette!("No schema found for step: {}", step.key()))?;

        let mut values = wizard.form(step).values().clone();
        for field in extract_fields(schema) {
            if !self.is_shown(&field, wizard, &values) {
                values.remove(&field.name);
                continue;
            }

            let current = values.get(&field.name).cloned();
            match self.prompt_field(&field, current.as_ref(), wizard, &values)? {
                Some(value) => {
                    values.insert(field.name, value);
                }
                None => {
                    values.remove(&field.name);
                }
            }
        }

        Ok(values)
    }

    fn is_shown(&self, field: &FieldInfo, wizard: &WizardController, values: &Map<String, Value>) -> bool {
        match field.shown_when.as_deref() {
            Some("remoteAboveThreshold") => values
                .get("remoteWorkPreference")
                .and_then(|v| v.as_u64())
                .is_some_and(|p| p > u64::from(MANAGER_APPROVAL_THRESHOLD)),
            Some("underGuardianAge") => guardian_required(wizard.submitter_age()),
            _ => true,
        }
    }

    /// Prompt the user for a field value
    fn prompt_field(
        &self,
        field: &FieldInfo,
        current: Option<&Value>,
        wizard: &WizardController,
        values: &Map<String, Value>,
    ) -> Result<Option<Value>> {
        let prompt = format_prompt(field);

        match &field.field_type {
            FieldType::Enum { values: options } => {
                let selected = current.and_then(|c| c.as_str());
                self.select(&prompt, options, options, selected)
            }

            FieldType::Options { source } => self.prompt_options(&prompt, source, current, wizard, values),

            FieldType::String { .. } => {
                let initial = current.and_then(|c| c.as_str()).unwrap_or("");
                let value = self.input_text(&prompt, initial, !field.required)?;
                Ok((!value.is_empty()).then(|| Value::String(value)))
            }

            FieldType::Date => {
                let initial = current.and_then(|c| c.as_str()).unwrap_or("");
                let value: String = Input::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .with_initial_text(initial)
                    .validate_with(|input: &String| -> std::result::Result<(), String> {
                        NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
                            .map(|_| ())
                            .map_err(|_| "Please enter a valid date (YYYY-MM-DD)".to_string())
                    })
                    .interact_text()
                    .into_diagnostic()?;
                Ok(Some(Value::String(value.trim().to_string())))
            }

            FieldType::File => {
                let initial = current
                    .and_then(|c| c.get("fileName"))
                    .and_then(|n| n.as_str())
                    .unwrap_or("");
                let value: String = Input::with_theme(&self.theme)
                    .with_prompt(format!("{} (path, empty to skip)", prompt))
                    .with_initial_text(initial)
                    .allow_empty(true)
                    .validate_with(|input: &String| -> std::result::Result<(), String> {
                        if input.trim().is_empty() || Path::new(input.trim()).is_file() {
                            Ok(())
                        } else {
                            Err("No such file".to_string())
                        }
                    })
                    .interact_text()
                    .into_diagnostic()?;

                if value.trim().is_empty() {
                    return Ok(None);
                }
                // An unchanged entry keeps the metadata read earlier
                if value == initial {
                    return Ok(current.cloned());
                }
                let picture = ProfilePicture::from_path(Path::new(value.trim())).into_diagnostic()?;
                Ok(Some(serde_json::to_value(picture).into_diagnostic()?))
            }

            FieldType::Integer { minimum, maximum, step } => {
                let choices: Vec<i64> = (*minimum..=*maximum).step_by((*step).max(1) as usize).collect();
                let labels: Vec<String> = choices.iter().map(|c| format!("{}%", c)).collect();
                let default_idx = current
                    .and_then(|c| c.as_i64())
                    .and_then(|c| choices.iter().position(|v| *v == c))
                    .unwrap_or(0);
                let selection = Select::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .items(&labels)
                    .default(default_idx)
                    .interact()
                    .into_diagnostic()?;
                Ok(Some(Value::from(choices[selection])))
            }

            FieldType::Number => {
                let prompt = match values
                    .get("jobType")
                    .and_then(|v| v.as_str())
                    .and_then(|t| serde_json::from_value::<JobType>(Value::String(t.to_string())).ok())
                {
                    Some(job_type) => format!("{} ({})", prompt, job_type.salary_label()),
                    None => prompt,
                };
                let initial = current.and_then(|c| c.as_f64()).map(format_number).unwrap_or_default();
                let value = self.input_number(&prompt, &initial)?;
                Ok(Some(Value::from(value)))
            }

            FieldType::Boolean => {
                let value = Confirm::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .default(current.and_then(|c| c.as_bool()).unwrap_or(false))
                    .interact()
                    .into_diagnostic()?;
                Ok(Some(Value::Bool(value)))
            }

            FieldType::Confirmation => {
                let value = Confirm::with_theme(&self.theme)
                    .with_prompt(&field.title)
                    .default(false)
                    .interact()
                    .into_diagnostic()?;
                Ok(Some(Value::Bool(value)))
            }

            FieldType::Experience => {
                let selected: Vec<String> = values
                    .get("primarySkills")
                    .and_then(|v| v.as_array())
                    .map(|items| items.iter().filter_map(|i| i.as_str().map(String::from)).collect())
                    .unwrap_or_default();
                let existing = current.and_then(|c| c.as_object());

                let mut experience = existing.cloned().unwrap_or_default();
                for skill in &selected {
                    let initial = existing
                        .and_then(|e| e.get(skill))
                        .and_then(|v| v.as_f64())
                        .map(format_number)
                        .unwrap_or_default();
                    let years = self.input_number(&format!("Years of experience with {}", skill), &initial)?;
                    experience.insert(skill.clone(), Value::from(years));
                }
                Ok(Some(Value::Object(experience)))
            }

            FieldType::StringList => {
                let initial = current
                    .and_then(|c| c.as_array())
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|i| i.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                let value = self.input_text(&format!("{} (comma-separated)", prompt), &initial, true)?;
                let items: Vec<Value> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect();
                Ok(Some(Value::Array(items)))
            }
        }
    }

    /// Pickers fed from the reference data
    fn prompt_options(
        &self,
        prompt: &str,
        source: &str,
        current: Option<&Value>,
        wizard: &WizardController,
        values: &Map<String, Value>,
    ) -> Result<Option<Value>> {
        let directory = wizard.directory();
        match source {
            "managers" => {
                let department = values
                    .get("department")
                    .and_then(|d| d.as_str())
                    .and_then(|d| d.parse::<Department>().ok());
                let managers: Vec<_> = match department {
                    Some(dept) => directory.managers_in(dept).collect(),
                    None => directory.managers().iter().collect(),
                };
                if managers.is_empty() {
                    println!("  {} No managers listed for this department", style("!").yellow());
                    return Ok(None);
                }
                let ids: Vec<String> = managers.iter().map(|m| m.id.clone()).collect();
                let labels: Vec<String> = managers.iter().map(|m| m.name.clone()).collect();
                self.select(prompt, &labels, &ids, current.and_then(|c| c.as_str()))
            }

            "skills" => {
                let department = wizard
                    .form(Step::JobDetails)
                    .get("department")
                    .and_then(|d| d.as_str())
                    .and_then(|d| d.parse::<Department>().ok());
                let mut offered: Vec<String> = department
                    .map(|d| directory.skills_for(d).to_vec())
                    .unwrap_or_default();
                let selected: Vec<String> = current
                    .and_then(|c| c.as_array())
                    .map(|items| items.iter().filter_map(|i| i.as_str().map(String::from)).collect())
                    .unwrap_or_default();
                for skill in &selected {
                    if !offered.contains(skill) {
                        offered.push(skill.clone());
                    }
                }
                if offered.is_empty() {
                    return self.prompt_field(
                        &FieldInfo {
                            name: "primarySkills".to_string(),
                            title: prompt.to_string(),
                            description: None,
                            field_type: FieldType::StringList,
                            required: true,
                            shown_when: None,
                        },
                        current,
                        wizard,
                        values,
                    );
                }

                let defaults: Vec<bool> = offered.iter().map(|s| selected.contains(s)).collect();
                let chosen = MultiSelect::with_theme(&self.theme)
                    .with_prompt(format!("{} (space to toggle)", prompt))
                    .items(&offered)
                    .defaults(&defaults)
                    .interact()
                    .into_diagnostic()?;
                Ok(Some(Value::Array(
                    chosen.into_iter().map(|i| Value::String(offered[i].clone())).collect(),
                )))
            }

            "relationships" => {
                let options = directory.relationships();
                self.select(prompt, options, options, current.and_then(|c| c.as_str()))
            }

            other => Err(miette::miette!("Unknown option source '{}'", other)),
        }
    }

    /// Pick one of `labels`, storing the matching entry of `values`
    fn select(
        &self,
        prompt: &str,
        labels: &[String],
        values: &[String],
        current: Option<&str>,
    ) -> Result<Option<Value>> {
        let default_idx = current
            .and_then(|c| values.iter().position(|v| v == c))
            .unwrap_or(0);
        let selection = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(labels)
            .default(default_idx)
            .interact()
            .into_diagnostic()?;
        Ok(Some(Value::String(values[selection].clone())))
    }

    fn input_text(&self, prompt: &str, initial: &str, allow_empty: bool) -> Result<String> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(allow_empty)
            .interact_text()
            .into_diagnostic()?;
        Ok(value.trim().to_string())
    }

    fn input_number(&self, prompt: &str, initial: &str) -> Result<f64> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                input
                    .trim()
                    .parse::<f64>()
                    .map(|_| ())
                    .map_err(|_| "Please enter a number".to_string())
            })
            .interact_text()
            .into_diagnostic()?;
        value.trim().parse().into_diagnostic()
    }
}

impl Default for StepPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract field information from a step schema
///
/// Required fields come first in the order the schema lists them, then the
/// optional ones.
fn extract_fields(schema: &Value) -> Vec<FieldInfo> {
    let Some(props) = schema.get("properties").and_then(|p| p.as_object()) else {
        return Vec::new();
    };
    let required: Vec<&str> = schema
        .get("required")
        .and_then(|r| r.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();

    let mut fields: Vec<FieldInfo> = required
        .iter()
        .filter_map(|name| props.get(*name).map(|prop| parse_field(name, prop, true)))
        .collect();

    let mut optional: Vec<FieldInfo> = props
        .iter()
        .filter(|(name, _)| !required.contains(&name.as_str()))
        .map(|(name, prop)| parse_field(name, prop, false))
        .collect();
    // Conditional fields go ahead of the free-form optional ones
    optional.sort_by_key(|f| f.shown_when.is_none());
    fields.extend(optional);

    fields
}

/// Parse a single field from its schema
fn parse_field(name: &str, schema: &Value, required: bool) -> FieldInfo {
    let title = schema
        .get("title")
        .and_then(|t| t.as_str())
        .unwrap_or(name)
        .to_string();
    let description = schema.get("description").and_then(|d| d.as_str()).map(String::from);
    let shown_when = schema.get("x-shown-when").and_then(|s| s.as_str()).map(String::from);

    let field_type = if schema.get("const") == Some(&Value::Bool(true)) {
        FieldType::Confirmation
    } else if let Some(source) = schema.get("x-options").and_then(|o| o.as_str()) {
        FieldType::Options {
            source: source.to_string(),
        }
    } else if let Some(enum_values) = schema.get("enum").and_then(|e| e.as_array()) {
        FieldType::Enum {
            values: enum_values
                .iter()
                .filter_map(|v| v.as_str())
                .map(String::from)
                .collect(),
        }
    } else {
        match schema.get("x-kind").and_then(|k| k.as_str()) {
            Some("date") => FieldType::Date,
            Some("file") => FieldType::File,
            Some("experience") => FieldType::Experience,
            _ => match schema.get("type").and_then(|t| t.as_str()) {
                Some("integer") => FieldType::Integer {
                    minimum: schema.get("minimum").and_then(|v| v.as_i64()).unwrap_or(0),
                    maximum: schema.get("maximum").and_then(|v| v.as_i64()).unwrap_or(100),
                    step: schema.get("multipleOf").and_then(|v| v.as_i64()).unwrap_or(1),
                },
                Some("number") => FieldType::Number,
                Some("boolean") => FieldType::Boolean,
                Some("array") => FieldType::StringList,
                _ => FieldType::String {
                    max_length: schema.get("maxLength").and_then(|v| v.as_u64()),
                },
            },
        }
    };

    FieldInfo {
        name: name.to_string(),
        title,
        description,
        field_type,
        required,
        shown_when,
    }
}

/// Format the prompt for a field
fn format_prompt(field: &FieldInfo) -> String {
    let mut prompt = field.title.clone();
    if let FieldType::String {
        max_length: Some(max),
    } = field.field_type
    {
        prompt = format!("{} (max {} characters)", prompt, max);
    }
    match &field.description {
        Some(desc) => {
            let short_desc = if desc.chars().count() > 50 {
                format!("{}...", desc.chars().take(47).collect::<String>())
            } else {
                desc.clone()
            };
            format!("{} ({})", prompt, style(short_desc).dim())
        }
        None => prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::registry::SchemaRegistry;

    fn fields_for(step: Step) -> Vec<FieldInfo> {
        let registry = SchemaRegistry::default();
        let schema: Value = serde_json::from_str(registry.get(step).unwrap()).unwrap();
        extract_fields(&schema)
    }

    #[test]
    fn test_required_fields_keep_schema_order() {
        let names: Vec<_> = fields_for(Step::JobDetails).into_iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "department",
                "positionTitle",
                "managerId",
                "jobType",
                "startDate",
                "salaryExpectation"
            ]
        );
    }

    #[test]
    fn test_special_kinds() {
        let fields = fields_for(Step::Skills);
        let kind = |name: &str| &fields.iter().find(|f| f.name == name).unwrap().field_type;

        assert_eq!(
            kind("primarySkills"),
            &FieldType::Options {
                source: "skills".to_string()
            }
        );
        assert_eq!(kind("skillExperience"), &FieldType::Experience);
        assert_eq!(
            kind("remoteWorkPreference"),
            &FieldType::Integer {
                minimum: 0,
                maximum: 100,
                step: 10
            }
        );
        assert_eq!(kind("managerApproved"), &FieldType::Boolean);
    }

    #[test]
    fn test_conditional_fields_come_first_among_optional() {
        let names: Vec<_> = fields_for(Step::Skills).into_iter().map(|f| f.name).collect();
        assert_eq!(&names[5..], &["managerApproved", "extraNotes"]);
    }

    #[test]
    fn test_confirmation_field() {
        let fields = fields_for(Step::Review);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_type, FieldType::Confirmation);
        assert!(fields[0].required);
    }
}
