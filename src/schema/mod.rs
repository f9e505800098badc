//! Schema system - step validation, prompting and summary templates

pub mod registry;
pub mod rules;
pub mod template;
pub mod validator;
pub mod wizard;

pub use registry::SchemaRegistry;
pub use template::{TemplateError, TemplateGenerator};
pub use validator::{ValidationContext, ValidationError, ValidationIssue, ValidationResult, Validator};
pub use wizard::StepPrompter;
