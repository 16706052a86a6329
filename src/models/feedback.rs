use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::require_positive_id;
use crate::utils::error::AppError;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub student_id: i64,
    pub event_id: i64,
    pub rating: i64,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitFeedback {
    pub student_id: i64,
    pub event_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub comments: Option<String>,
}

impl SubmitFeedback {
    pub fn validate(&self) -> Result<(), AppError> {
        require_positive_id("student_id", self.student_id)?;
        require_positive_id("event_id", self.event_id)?;
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(AppError::ValidationError(format!(
                "'rating' must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, self.rating
            )));
        }
        Ok(())
    }
}
