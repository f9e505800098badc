//! Core module - wizard state, reference data and the hand-off

pub mod config;
pub mod controller;
pub mod directory;
pub mod handoff;
pub mod logging;
pub mod record;
pub mod step;
pub mod summary;

pub use config::Config;
pub use controller::{FormState, StepAdvance, StepForm, WizardController, WizardError};
pub use directory::{Directory, DirectoryError, Manager};
pub use handoff::HandoffError;
pub use record::StepRecord;
pub use step::Step;
pub use summary::Summary;
