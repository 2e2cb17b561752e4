use std::path::PathBuf;

use serde::Serialize;
use validator::Validate;

use crate::shared::constants::{MAX_CREW_SIZE_U64, MAX_PHOTOS_U64};
use crate::shared::validation::{validate_log_date, DATE_REGEX};

/// One employee's name-and-hours pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrewEntry {
    #[serde(rename = "name")]
    pub employee_name: String,
    /// Free text; not checked for being numeric
    pub hours: String,
}

impl CrewEntry {
    pub fn new(employee_name: impl Into<String>) -> Self {
        Self {
            employee_name: employee_name.into(),
            hours: String::new(),
        }
    }
}

/// Handle to a locally selected image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoRef {
    /// Plain filesystem path or `file://` URI
    pub uri: String,
}

impl PhotoRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// Resolve the handle to a local path, percent-decoding `file://` URIs
    pub fn local_path(&self) -> PathBuf {
        match self.uri.strip_prefix("file://") {
            Some(rest) => match urlencoding::decode(rest) {
                Ok(decoded) => PathBuf::from(decoded.into_owned()),
                Err(_) => PathBuf::from(rest),
            },
            None => PathBuf::from(&self.uri),
        }
    }
}

/// Immutable copy of the in-progress log, taken at submission time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    #[validate(length(min = 1, message = "Foreman name is required"))]
    pub foreman: String,

    #[validate(
        regex(path = *DATE_REGEX, message = "Date must be MM/DD/YYYY"),
        custom(function = validate_log_date, message = "Date is not a calendar day")
    )]
    pub date: String,

    #[validate(length(max = MAX_CREW_SIZE_U64, message = "At most 10 employees"))]
    pub crew: Vec<CrewEntry>,

    pub task_description: String,

    #[validate(length(max = MAX_PHOTOS_U64, message = "At most 10 photos"))]
    pub photos: Vec<PhotoRef>,
}

impl LogRecord {
    /// Crew serialized as `[{"name": .., "hours": ..}]` in crew order
    pub fn employees_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.crew)
    }
}
