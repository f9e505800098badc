//! Registry of the embedded step schemas

use rust_embed::Embed;
use std::collections::HashMap;

use crate::core::step::Step;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// JSON Schema documents, one per wizard step
pub struct SchemaRegistry {
    schemas: HashMap<Step, String>,
}

impl SchemaRegistry {
    /// File name of the schema for a step
    pub fn file_name(step: Step) -> &'static str {
        match step {
            Step::PersonalInfo => "personal-info.schema.json",
            Step::JobDetails => "job-details.schema.json",
            Step::Skills => "skills.schema.json",
            Step::EmergencyContact => "emergency-contact.schema.json",
            Step::Review => "review.schema.json",
        }
    }

    /// Raw schema text for a step
    pub fn get(&self, step: Step) -> Option<&str> {
        self.schemas.get(&step).map(String::as_str)
    }

    pub fn has_schema(&self, step: Step) -> bool {
        self.schemas.contains_key(&step)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        let mut schemas = HashMap::new();
        for step in Step::all() {
            if let Some(file) = EmbeddedSchemas::get(Self::file_name(*step)) {
                schemas.insert(*step, String::from_utf8_lossy(&file.data).into_owned());
            }
        }
        Self { schemas }
    }
}
