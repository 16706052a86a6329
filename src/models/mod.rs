use crate::utils::error::AppError;

pub mod event;
pub mod feedback;
pub mod registration;
pub mod report;
pub mod student;

pub use event::{CreateEvent, Event, EventAssignment, EventFilter, UpdateEvent};
pub use feedback::{Feedback, SubmitFeedback};
pub use registration::{
    AttendanceParams, AttendanceUpdate, ParticipationFilter, Registration, RegistrationParams,
};
pub use report::{
    AttendanceReport, EventTypeReport, FeedbackReport, RegistrationReport, TopStudent,
};
pub use student::{CreateStudent, Student};

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!("'{}' is required", field)));
    }
    Ok(())
}

pub(crate) fn require_positive_id(field: &str, value: i64) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::ValidationError(format!(
            "'{}' must be a positive integer",
            field
        )));
    }
    Ok(())
}
