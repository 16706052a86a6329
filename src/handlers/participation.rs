use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::models::{
    AttendanceParams, AttendanceUpdate, Feedback, ParticipationFilter, Registration,
    RegistrationParams, SubmitFeedback,
};
use crate::utils::error::AppError;
use crate::utils::extract::{JsonBody, QueryParams};
use crate::AppState;

/// Registration and feedback both need the referenced rows to exist.
async fn ensure_participants(state: &AppState, student_id: i64, event_id: i64) -> Result<(), AppError> {
    if !state.db.student_exists(student_id).await? {
        return Err(AppError::NotFound(format!(
            "Student with id '{}' was not found",
            student_id
        )));
    }
    if !state.db.event_exists(event_id).await? {
        return Err(AppError::NotFound(format!(
            "Event with id '{}' was not found",
            event_id
        )));
    }
    Ok(())
}

/// # POST /register?student_id=&event_id=
///
/// Registering again for the same event changes nothing and still succeeds;
/// either way the stored registration comes back.
pub async fn register(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<RegistrationParams>,
) -> Result<Json<Registration>, AppError> {
    params.validate()?;
    ensure_participants(&state, params.student_id, params.event_id).await?;

    let inserted = state.db.register(params.student_id, params.event_id).await?;
    let registration = state
        .db
        .find_registration(params.student_id, params.event_id)
        .await?
        .ok_or_else(|| AppError::InternalServerError("Registration missing after insert".to_string()))?;

    info!(
        student_id = params.student_id,
        event_id = params.event_id,
        inserted,
        "Registration recorded"
    );
    Ok(Json(registration))
}

/// # PATCH /attendance?student_id=&event_id=[&attended=]
///
/// Unknown pairs are not an error: nothing is written and `marked` comes back
/// false.
pub async fn mark_attendance(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<AttendanceParams>,
) -> Result<Json<AttendanceUpdate>, AppError> {
    params.validate()?;

    let marked = state
        .db
        .mark_attendance(params.student_id, params.event_id, params.attended)
        .await?;

    if marked {
        info!(
            student_id = params.student_id,
            event_id = params.event_id,
            attended = params.attended,
            "Attendance marked"
        );
    } else {
        info!(
            student_id = params.student_id,
            event_id = params.event_id,
            "Attendance update matched no registration"
        );
    }

    let outcome = AttendanceUpdate {
        student_id: params.student_id,
        event_id: params.event_id,
        attended: params.attended,
        marked,
    };
    Ok(Json(outcome))
}

/// # POST /feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SubmitFeedback>,
) -> Result<Json<SubmitFeedback>, AppError> {
    input.validate()?;
    ensure_participants(&state, input.student_id, input.event_id).await?;

    state.db.upsert_feedback(&input).await?;

    info!(
        student_id = input.student_id,
        event_id = input.event_id,
        rating = input.rating,
        "Feedback stored"
    );
    Ok(Json(input))
}

/// # GET /registrations[?event_id=]
pub async fn list_registrations(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<ParticipationFilter>,
) -> Result<Json<Vec<Registration>>, AppError> {
    Ok(Json(state.db.list_registrations(filter.event_id).await?))
}

/// # GET /feedback[?event_id=]
pub async fn list_feedback(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<ParticipationFilter>,
) -> Result<Json<Vec<Feedback>>, AppError> {
    Ok(Json(state.db.list_feedback(filter.event_id).await?))
}
