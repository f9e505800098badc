//! Review record (step 5)

use serde::{Deserialize, Serialize};

use crate::core::record::StepRecord;
use crate::core::step::Step;

/// Step 5: the submitter confirms everything is accurate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub confirmation_checked: bool,
}

impl StepRecord for Review {
    const STEP: Step = Step::Review;
}
