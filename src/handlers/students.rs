use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::models::{CreateStudent, Student};
use crate::utils::error::AppError;
use crate::utils::extract::{JsonBody, PathParam};
use crate::AppState;

/// # GET /students
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.db.list_students().await?;
    Ok(Json(students))
}

/// # POST /students
///
/// A duplicate email surfaces as a constraint violation.
pub async fn create_student(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateStudent>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    input.validate()?;

    let id = state.db.insert_student(&input).await?;
    let student = state.db.find_student(id).await?.ok_or_else(|| {
        AppError::InternalServerError(format!("Student {} vanished after insert", id))
    })?;

    info!(student_id = id, "Student created");
    Ok((StatusCode::CREATED, Json(student)))
}

/// # GET /students/:id
pub async fn get_student(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Student>, AppError> {
    let student = state
        .db
        .find_student(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student with id '{}' was not found", id)))?;
    Ok(Json(student))
}
