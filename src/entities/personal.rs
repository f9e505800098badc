//! Personal info record (step 1)

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::record::StepRecord;
use crate::core::step::Step;

/// Youngest age allowed to onboard
pub const MINIMUM_AGE: i32 = 18;

/// Upper bound on the profile picture size (2 MiB)
pub const MAX_PICTURE_BYTES: u64 = 2 * 1024 * 1024;

/// Accepted profile picture types
pub const PICTURE_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Metadata of an uploaded profile picture
///
/// Only the metadata travels with the submission; the image bytes are never read
/// beyond what the filesystem reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePicture {
    pub file_name: String,
    pub size: u64,
    pub mime_type: String,
}

impl ProfilePicture {
    /// Inspect a picture on disk
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self {
            mime_type: mime_type_for(path).to_string(),
            file_name,
            size: metadata.len(),
        })
    }

    pub fn is_too_large(&self) -> bool {
        self.size > MAX_PICTURE_BYTES
    }

    pub fn has_accepted_type(&self) -> bool {
        PICTURE_TYPES.contains(&self.mime_type.as_str())
    }
}

/// Guess a MIME type from the file extension
fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Step 1: who is being onboarded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,

    pub email: String,

    pub phone_number: String,

    pub date_of_birth: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<ProfilePicture>,
}

impl PersonalInfo {
    /// Age in whole years on the given day
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.date_of_birth, today)
    }
}

impl StepRecord for PersonalInfo {
    const STEP: Step = Step::PersonalInfo;
}

/// Whole years between `birth` and `today`
///
/// One year is subtracted when today's month/day comes before the birth
/// month/day, so a Feb 29 birthday only counts on Mar 1 in common years.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age - 1
    } else {
        age
    }
}

/// Count the words of a full name the way the form does: trim, then split on
/// single spaces
pub fn name_word_count(name: &str) -> usize {
    name.trim().split(' ').count()
}
