//! Onboarding record types
//!
//! One record per wizard step, plus the aggregate they merge into:
//!
//! - [`PersonalInfo`] - name, contact details, date of birth, picture
//! - [`JobDetails`] - department, position, manager, job type, salary
//! - [`Skills`] - skills with experience, working hours, remote preference
//! - [`EmergencyContact`] - emergency contact and, for under-21s, a guardian
//! - [`Review`] - the final confirmation
//! - [`Submission`] - all five, as handed to the summary view

pub mod emergency;
pub mod job;
pub mod personal;
pub mod review;
pub mod skills;
pub mod submission;

pub use emergency::EmergencyContact;
pub use job::{Department, JobDetails, JobType};
pub use personal::{PersonalInfo, ProfilePicture};
pub use review::Review;
pub use skills::Skills;
pub use submission::{PartialSubmission, Submission};
