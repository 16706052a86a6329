use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RegistrationReport {
    pub event_id: i64,
    pub event_name: String,
    pub total_registrations: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AttendanceReport {
    pub event_id: i64,
    pub event_name: String,
    pub total_registrations: i64,
    pub attended: i64,
    pub attendance_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct FeedbackReport {
    pub event_id: i64,
    pub event_name: String,
    pub avg_feedback: f64,
    pub feedback_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TopStudent {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub events_registered: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct EventTypeReport {
    pub event_type: Option<String>,
    pub total_events: i64,
    pub total_registrations: i64,
}
