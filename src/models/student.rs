use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::require_text;
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub name: String,
    pub email: String,
}

impl CreateStudent {
    /// Uniqueness of the email is left to the `students.email` constraint.
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;

        let email = self.email.trim();
        let well_formed = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
            None => false,
        };
        if !well_formed {
            return Err(AppError::ValidationError(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        Ok(())
    }
}
