//! Onboard: employee onboarding wizard
//!
//! Walks a new hire through five validated steps (personal info, job
//! details, skills, emergency contact, review) and hands the finished
//! submission to a read-only summary view as a link.

pub mod cli;
pub mod core;
pub mod entities;
pub mod schema;
