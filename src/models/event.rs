use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::require_text;
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub event_type: Option<String>,
    pub college_id: Option<i64>,
}

/// Body of `POST /events`. A missing `location` or `description` is stored
/// as an empty string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEvent {
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub college_id: Option<i64>,
}

impl CreateEvent {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name)?;
        require_text("date", &self.date)
    }
}

/// Body of `PUT /events/{id}`. A `None` field is left untouched; there is no
/// way to clear a column through this type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub college_id: Option<i64>,
}

/// One `column = value` pair of an event UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub enum EventAssignment<'a> {
    Name(&'a str),
    Date(&'a str),
    Location(&'a str),
    Description(&'a str),
    EventType(&'a str),
    CollegeId(i64),
}

impl EventAssignment<'_> {
    pub fn column(&self) -> &'static str {
        match self {
            EventAssignment::Name(_) => "name",
            EventAssignment::Date(_) => "date",
            EventAssignment::Location(_) => "location",
            EventAssignment::Description(_) => "description",
            EventAssignment::EventType(_) => "type",
            EventAssignment::CollegeId(_) => "college_id",
        }
    }
}

impl UpdateEvent {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(date) = &self.date {
            require_text("date", date)?;
        }
        Ok(())
    }

    /// Assignments for the supplied fields, in column order.
    pub fn assignments(&self) -> Vec<EventAssignment<'_>> {
        let mut out = Vec::new();
        if let Some(v) = &self.name {
            out.push(EventAssignment::Name(v));
        }
        if let Some(v) = &self.date {
            out.push(EventAssignment::Date(v));
        }
        if let Some(v) = &self.location {
            out.push(EventAssignment::Location(v));
        }
        if let Some(v) = &self.description {
            out.push(EventAssignment::Description(v));
        }
        if let Some(v) = &self.event_type {
            out.push(EventAssignment::EventType(v));
        }
        if let Some(v) = self.college_id {
            out.push(EventAssignment::CollegeId(v));
        }
        out
    }
}

/// Query string of `GET /events`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub college_id: Option<i64>,
    pub event_type: Option<String>,
}
