use axum::extract::State;
use axum::Json;

use crate::models::{
    AttendanceReport, EventTypeReport, FeedbackReport, RegistrationReport, TopStudent,
};
use crate::utils::error::AppError;
use crate::AppState;

/// # GET /reports/registrations
pub async fn registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<RegistrationReport>>, AppError> {
    Ok(Json(state.db.registrations_per_event().await?))
}

/// # GET /reports/attendance
///
/// Events nobody registered for are omitted.
pub async fn attendance(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceReport>>, AppError> {
    Ok(Json(state.db.attendance_per_event().await?))
}

/// # GET /reports/feedback
pub async fn feedback(State(state): State<AppState>) -> Result<Json<Vec<FeedbackReport>>, AppError> {
    Ok(Json(state.db.feedback_per_event().await?))
}

/// # GET /reports/top_students
pub async fn top_students(State(state): State<AppState>) -> Result<Json<Vec<TopStudent>>, AppError> {
    Ok(Json(state.db.top_students().await?))
}

/// # GET /reports/event_type
pub async fn event_type(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventTypeReport>>, AppError> {
    Ok(Json(state.db.registrations_per_event_type().await?))
}
