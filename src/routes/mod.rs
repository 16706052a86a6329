use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, with_security_headers, Config};
use crate::handlers::{events, health_check, participation, reports, root, students};
use crate::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route("/students/:id", get(students::get_student))
        .route("/register", post(participation::register))
        .route("/registrations", get(participation::list_registrations))
        .route("/attendance", patch(participation::mark_attendance))
        .route(
            "/feedback",
            get(participation::list_feedback).post(participation::submit_feedback),
        )
        .route("/reports/registrations", get(reports::registrations))
        .route("/reports/attendance", get(reports::attendance))
        .route("/reports/feedback", get(reports::feedback))
        .route("/reports/top_students", get(reports::top_students))
        .route("/reports/event_type", get(reports::event_type))
}

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let router = api_routes().with_state(state);

    with_security_headers(router, config.production)
        .layer(create_cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
}
