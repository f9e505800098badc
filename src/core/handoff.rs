//! Submission hand-off link
//!
//! The finished submission travels to the summary view as URL-encoded JSON in
//! the `data` query parameter of `<base>/employee-info`. The link is neither
//! versioned nor signed, and nothing bounds its length.

use thiserror::Error;
use url::Url;

use crate::entities::Submission;

/// Path of the summary view, relative to the configured base URL
pub const SUMMARY_PATH: &str = "employee-info";

/// Query parameter carrying the serialized submission
pub const DATA_PARAM: &str = "data";

/// Shown by the summary view in place of a missing or unreadable payload
pub const NO_DATA_MESSAGE: &str = "No employee data found.";

/// Errors building or reading a hand-off link
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("Invalid hand-off link: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Hand-off link has no 'data' parameter")]
    NoData,

    #[error("Hand-off data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Build the summary link for a submission
pub fn encode(base: &Url, submission: &Submission) -> Result<Url, HandoffError> {
    let payload = serde_json::to_string(submission)?;
    let mut link = base.join(SUMMARY_PATH)?;
    link.query_pairs_mut().clear().append_pair(DATA_PARAM, &payload);
    tracing::debug!(bytes = link.as_str().len(), "built hand-off link");
    Ok(link)
}

/// Read the submission back out of a summary link
pub fn decode(link: &str) -> Result<Submission, HandoffError> {
    let url = Url::parse(link.trim())?;
    let payload = url
        .query_pairs()
        .find(|(key, _)| key == DATA_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or(HandoffError::NoData)?;
    Ok(serde_json::from_str(&payload)?)
}
