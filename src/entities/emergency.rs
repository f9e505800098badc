//! Emergency contact record (step 4)

use serde::{Deserialize, Serialize};

use crate::core::record::StepRecord;
use crate::core::step::Step;

/// Submitters younger than this must name a guardian
pub const GUARDIAN_AGE_THRESHOLD: i32 = 21;

/// Step 4: who to call in an emergency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub contact_name: String,

    pub relationship: String,

    pub contact_phone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_phone: Option<String>,
}

impl EmergencyContact {
    /// Guardian name, treating blank input as absent
    pub fn guardian_name(&self) -> Option<&str> {
        non_blank(self.guardian_name.as_deref())
    }

    /// Guardian phone, treating blank input as absent
    pub fn guardian_phone(&self) -> Option<&str> {
        non_blank(self.guardian_phone.as_deref())
    }
}

impl StepRecord for EmergencyContact {
    const STEP: Step = Step::EmergencyContact;
}

/// Whether guardian details are required for a submitter of the given age
///
/// An unknown age never requires a guardian.
pub fn guardian_required(submitter_age: Option<i32>) -> bool {
    submitter_age.is_some_and(|age| age < GUARDIAN_AGE_THRESHOLD)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guardian_required_boundary() {
        assert!(guardian_required(Some(18)));
        assert!(guardian_required(Some(20)));
        assert!(!guardian_required(Some(21)));
        assert!(!guardian_required(None));
    }

    #[test]
    fn test_blank_guardian_is_absent() {
        let contact = EmergencyContact {
            contact_name: "Grace Hopper".to_string(),
            relationship: "Parent".to_string(),
            contact_phone: "15551234567".to_string(),
            guardian_name: Some("  ".to_string()),
            guardian_phone: None,
        };
        assert_eq!(contact.guardian_name(), None);
        assert_eq!(contact.guardian_phone(), None);
    }
}
