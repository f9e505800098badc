//! Step validation with detailed error reporting
//!
//! Each step is checked in two layers. The embedded JSON Schema covers
//! required fields, enums, lengths, bounds and formats; the rules in
//! [`crate::schema::rules`] then check the typed record against the fields of
//! other steps and the reference data.

use chrono::NaiveDate;
use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

use crate::core::directory::Directory;
use crate::core::step::Step;
use crate::schema::registry::SchemaRegistry;
use crate::schema::rules;

/// Date format used by every date field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation error with source location information
#[derive(Debug, Error, Diagnostic)]
#[error("{step} validation failed: {summary}")]
#[diagnostic(
    code(onboard::schema::validation_error),
    help("Please fix the errors in the form before proceeding.")
)]
pub struct ValidationError {
    step: Step,

    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<FieldViolation>,
}

/// A single failing field
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct FieldViolation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    field: String,
    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl ValidationError {
    pub fn new(step: Step, values: &JsonValue, issues: Vec<ValidationIssue>) -> Self {
        let source = serde_json::to_string_pretty(values).unwrap_or_else(|_| values.to_string());
        let count = issues.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        let violations = issues
            .into_iter()
            .map(|issue| FieldViolation {
                span: find_field_span(&source, &issue.field),
                hint: if issue.field.is_empty() {
                    "form".to_string()
                } else {
                    issue.field.clone()
                },
                field: issue.field,
                message: issue.message,
                help: issue.help,
            })
            .collect();
        Self {
            step,
            summary,
            src: NamedSource::new(step.key(), source),
            violations,
        }
    }

    /// Get the number of violations
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Names of the failing fields
    pub fn fields(&self) -> BTreeSet<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn has_error_on(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Messages reported for one field
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.message.as_str())
            .collect()
    }

    /// Plain issues, for callers that keep them as form state
    pub fn issues(&self) -> Vec<ValidationIssue> {
        self.violations
            .iter()
            .map(|v| ValidationIssue {
                field: v.field.clone(),
                message: v.message.clone(),
                help: v.help.clone(),
            })
            .collect()
    }
}

/// Outcome of checking a step: every error and warning found
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning) on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            help: None,
        }
    }
}

/// What the rules need to know beyond the step's own values
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The day validation runs on
    pub today: NaiveDate,

    /// Reference data for manager lookups
    pub directory: &'a Directory,

    /// Age from the already-submitted personal info, if known
    pub submitter_age: Option<i32>,
}

/// Errors and warnings found for one step, before they are packaged
#[derive(Debug, Clone, Default)]
pub struct Findings {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl Findings {
    pub fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue::new(field, message));
    }

    pub fn warn(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::new(field, message));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

struct CompiledSchema {
    validator: JsonValidator,
    document: JsonValue,
}

/// Step validator with compiled schemas
pub struct Validator {
    /// Compiled JSON schemas by step
    compiled: HashMap<Step, CompiledSchema>,
}

impl Validator {
    /// Create a new validator with schemas from the registry
    pub fn new(registry: &SchemaRegistry) -> Self {
        let mut compiled = HashMap::new();

        for step in Step::all() {
            let Some(schema_str) = registry.get(*step) else {
                continue;
            };
            match serde_json::from_str::<JsonValue>(schema_str) {
                Ok(document) => match validator_for(&document) {
                    Ok(validator) => {
                        compiled.insert(*step, CompiledSchema { validator, document });
                    }
                    Err(e) => tracing::error!(step = step.key(), error = %e, "schema failed to compile"),
                },
                Err(e) => tracing::error!(step = step.key(), error = %e, "schema is not valid JSON"),
            }
        }

        Self { compiled }
    }

    /// The schema document of a step, used to drive prompting
    pub fn schema(&self, step: Step) -> Option<&JsonValue> {
        self.compiled.get(&step).map(|c| &c.document)
    }

    /// Collect every error and warning for a step's values
    pub fn check(&self, step: Step, values: &JsonValue, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut findings = Findings::default();

        if let Some(compiled) = self.compiled.get(&step) {
            findings.errors.extend(
                compiled
                    .validator
                    .iter_errors(values)
                    .map(|e| error_to_issue(&compiled.document, &e)),
            );
            findings
                .errors
                .extend(date_issues(&compiled.document, values, &findings.errors));
        }

        match rules::apply(step, values, ctx) {
            Ok(rule_findings) => merge_rule_findings(&mut findings, rule_findings),
            Err(e) => {
                merge_rule_findings(&mut findings, rules::apply_to_fields(step, values, ctx));
                if !findings.has_errors() {
                    findings.error("", format!("Could not read {} values: {}", step, e));
                }
            }
        }

        ValidationResult {
            valid: !findings.has_errors(),
            errors: findings.errors,
            warnings: findings.warnings,
        }
    }

    /// Validate a step's values, returning warnings on success
    pub fn validate(
        &self,
        step: Step,
        values: &JsonValue,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, ValidationError> {
        let result = self.check(step, values, ctx);
        if !result.valid {
            tracing::debug!(
                step = step.key(),
                errors = result.errors.len(),
                "step failed validation"
            );
            return Err(ValidationError::new(step, values, result.errors));
        }
        Ok(result)
    }
}

/// Add rule findings, except errors on fields already failing their schema
fn merge_rule_findings(findings: &mut Findings, rule_findings: Findings) {
    let failing: BTreeSet<String> = findings.errors.iter().map(|i| i.field.clone()).collect();
    findings.errors.extend(
        rule_findings
            .errors
            .into_iter()
            .filter(|i| !failing.contains(&i.field)),
    );
    findings.warnings.extend(rule_findings.warnings);
}

impl Default for Validator {
    fn default() -> Self {
        let registry = SchemaRegistry::default();
        Self::new(&registry)
    }
}

/// Convert a JSON Schema validation error to our issue format
fn error_to_issue(schema: &JsonValue, error: &JsonSchemaError) -> ValidationIssue {
    let field = error_field(error);
    let message = schema_message(schema, error).unwrap_or_else(|| format_schema_error(error, &field));
    ValidationIssue {
        field,
        message,
        help: generate_help_message(error),
    }
}

/// Dotted field path an error belongs to
fn error_field(error: &JsonSchemaError) -> String {
    let base = path_to_field(error.instance_path.as_str());
    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { property } => {
            let prop = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            join_field(&base, &prop)
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            match unexpected.first() {
                Some(name) => join_field(&base, name),
                None => base,
            }
        }
        _ => base,
    }
}

/// "/skillExperience/Rust" -> "skillExperience.Rust"
fn path_to_field(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

fn join_field(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", base, name)
    }
}

/// Look up the `errorMessage` (or `title`, for missing fields) the schema
/// carries next to the failing keyword
fn schema_message(schema: &JsonValue, error: &JsonSchemaError) -> Option<String> {
    let schema_path = error.schema_path.as_str();
    let parent = schema_path
        .rsplit_once('/')
        .map(|(parent, _keyword)| parent)
        .unwrap_or("");

    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { property } => {
            let prop = property.as_str()?;
            let prop_schema = schema.pointer(&format!("{}/properties/{}", parent, prop))?;
            let title = prop_schema.get("title").and_then(|t| t.as_str())?;
            Some(format!("{} is required", title))
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { .. } => None,
        _ => schema
            .pointer(parent)
            .and_then(|s| s.get("errorMessage"))
            .and_then(|m| m.as_str())
            .map(String::from),
    }
}

/// Format a JSON Schema error into a user-friendly message
fn format_schema_error(error: &JsonSchemaError, field: &str) -> String {
    let path = if field.is_empty() {
        "form".to_string()
    } else {
        format!("'{}'", field)
    };

    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { .. } => {
            format!("Missing required field: {}", path)
        }
        jsonschema::error::ValidationErrorKind::Type { kind } => {
            format!("Wrong type at {}: expected {:?}", path, kind)
        }
        jsonschema::error::ValidationErrorKind::Enum { options } => {
            format!("Invalid value at {}: must be one of: {}", path, format_enum_options(options))
        }
        jsonschema::error::ValidationErrorKind::Pattern { pattern } => {
            format!("Value at {} doesn't match pattern: {}", path, pattern)
        }
        jsonschema::error::ValidationErrorKind::MinLength { limit } => {
            format!("Value at {} is too short: minimum {} characters", path, limit)
        }
        jsonschema::error::ValidationErrorKind::MaxLength { limit } => {
            format!("Value at {} is too long: maximum {} characters", path, limit)
        }
        jsonschema::error::ValidationErrorKind::Minimum { limit } => {
            format!("Value at {} is too small: minimum {}", path, limit)
        }
        jsonschema::error::ValidationErrorKind::Maximum { limit } => {
            format!("Value at {} is too large: maximum {}", path, limit)
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            format!("Unknown field(s): {}", unexpected.join(", "))
        }
        _ => format!("Validation error at {}: {}", path, error),
    }
}

/// Format enum options as a string
fn format_enum_options(options: &JsonValue) -> String {
    if let Some(arr) = options.as_array() {
        arr.iter()
            .map(|v| v.as_str().map(|s| s.to_string()).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        options.to_string()
    }
}

/// Generate a help message with suggestions for fixing the error
fn generate_help_message(error: &JsonSchemaError) -> Option<String> {
    match &error.kind {
        jsonschema::error::ValidationErrorKind::Enum { options } => {
            Some(format!("Valid values: {}", format_enum_options(options)))
        }
        jsonschema::error::ValidationErrorKind::Pattern { pattern } => {
            if pattern.contains("[0-9]{4}-") {
                Some("Dates are written YYYY-MM-DD, e.g. 1990-04-23".to_string())
            } else if pattern.contains("[0-5][0-9]") {
                Some("Times are written HH:MM in 24-hour format, e.g. 09:30".to_string())
            } else {
                None
            }
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            if unexpected.len() == 1 {
                Some(format!("Remove the '{}' field or check spelling", unexpected[0]))
            } else {
                Some("Remove unknown fields or check spelling".to_string())
            }
        }
        _ => None,
    }
}

/// Reject date fields that match the `YYYY-MM-DD` shape but name no real day
fn date_issues(
    schema: &JsonValue,
    values: &JsonValue,
    already: &[ValidationIssue],
) -> Vec<ValidationIssue> {
    let Some(props) = schema.get("properties").and_then(|p| p.as_object()) else {
        return Vec::new();
    };

    props
        .iter()
        .filter(|(_, prop)| prop.get("x-kind").and_then(|k| k.as_str()) == Some("date"))
        .filter(|(name, _)| !already.iter().any(|i| &i.field == *name))
        .filter_map(|(name, prop)| {
            let raw = values.get(name)?.as_str()?;
            if NaiveDate::parse_from_str(raw, DATE_FORMAT).is_ok() {
                return None;
            }
            let message = prop
                .get("errorMessage")
                .and_then(|m| m.as_str())
                .unwrap_or("Please enter a valid date (YYYY-MM-DD)");
            Some(ValidationIssue::new(name.clone(), message))
        })
        .collect()
}

/// Find the span of a field inside the pretty-printed step JSON
fn find_field_span(content: &str, field: &str) -> SourceSpan {
    let key = field.rsplit('.').next().unwrap_or(field);
    if !key.is_empty() {
        if let Some(span) = find_key_span(content, key) {
            return span;
        }
    }

    // Fallback - highlight first line
    let len = content.find('\n').unwrap_or(content.len()).max(1);
    (0, len).into()
}

/// Find the span of a `"key": value` line
fn find_key_span(content: &str, key: &str) -> Option<SourceSpan> {
    let search_pattern = format!("\"{}\":", key);

    let mut offset = 0;
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(&search_pattern) {
            let key_start = offset + (line.len() - trimmed.len());
            let key_len = trimmed.trim_end_matches(',').len();
            return Some((key_start, key_len).into());
        }
        offset += line.len() + 1; // +1 for newline
    }
    None
}
