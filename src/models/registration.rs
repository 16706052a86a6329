use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use super::require_positive_id;
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub student_id: i64,
    pub event_id: i64,
    pub attended: bool,
}

/// Query string of `POST /register`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RegistrationParams {
    pub student_id: i64,
    pub event_id: i64,
}

impl RegistrationParams {
    pub fn validate(&self) -> Result<(), AppError> {
        require_positive_id("student_id", self.student_id)?;
        require_positive_id("event_id", self.event_id)
    }
}

fn default_attended() -> bool {
    true
}

/// Accepts `true`/`false` as well as `1`/`0`.
fn attendance_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(de::Error::custom(format!(
            "invalid attended flag `{}`, expected true, false, 1 or 0",
            other
        ))),
    }
}

/// Query string of `PATCH /attendance`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AttendanceParams {
    pub student_id: i64,
    pub event_id: i64,
    #[serde(default = "default_attended", deserialize_with = "attendance_flag")]
    pub attended: bool,
}

impl AttendanceParams {
    pub fn validate(&self) -> Result<(), AppError> {
        require_positive_id("student_id", self.student_id)?;
        require_positive_id("event_id", self.event_id)
    }
}

/// Optional `event_id` narrowing of the registration and feedback listings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ParticipationFilter {
    pub event_id: Option<i64>,
}

/// Outcome of an attendance update. `marked` is false when no registration
/// exists for the pair, in which case nothing was written.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceUpdate {
    pub student_id: i64,
    pub event_id: i64,
    pub attended: bool,
    pub marked: bool,
}
