use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::models::{CreateEvent, Event, EventFilter, UpdateEvent};
use crate::utils::error::AppError;
use crate::utils::extract::{JsonBody, PathParam, QueryParams};
use crate::utils::response::{message, MessageBody};
use crate::AppState;

fn event_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Event with id '{}' was not found", id))
}

/// # GET /events
pub async fn list_events(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<EventFilter>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = state.db.list_events(&filter).await?;
    Ok(Json(events))
}

/// # POST /events
pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateEvent>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    input.validate()?;

    let id = state.db.insert_event(&input).await?;
    let event = state
        .db
        .find_event(id)
        .await?
        .ok_or_else(|| AppError::InternalServerError(format!("Event {} vanished after insert", id)))?;

    info!(event_id = id, name = %event.name, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// # GET /events/:id
pub async fn get_event(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Event>, AppError> {
    let event = state.db.find_event(id).await?.ok_or_else(|| event_not_found(id))?;
    Ok(Json(event))
}

/// # PUT /events/:id
///
/// Only the fields present in the body are written. An empty body leaves the
/// row as it is and still answers with the current record.
pub async fn update_event(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(changes): JsonBody<UpdateEvent>,
) -> Result<Json<Event>, AppError> {
    changes.validate()?;

    if !state.db.event_exists(id).await? {
        return Err(event_not_found(id));
    }

    let updated = state.db.update_event(id, &changes).await?;
    let event = state.db.find_event(id).await?.ok_or_else(|| event_not_found(id))?;

    info!(event_id = id, fields = changes.assignments().len(), rows = updated, "Event updated");
    Ok(Json(event))
}

/// # DELETE /events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<MessageBody>, AppError> {
    if !state.db.delete_event(id).await? {
        return Err(event_not_found(id));
    }

    info!(event_id = id, "Event deleted");
    Ok(message("Event deleted successfully"))
}
