use sqlx::{QueryBuilder, Sqlite};

use super::Database;
use crate::models::{CreateEvent, Event, EventAssignment, EventFilter, UpdateEvent};

const EVENT_COLUMNS: &str = "id, name, date, location, description, type, college_id";

impl Database {
    pub async fn list_events(&self, filter: &EventFilter) -> sqlx::Result<Vec<Event>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM events WHERE 1 = 1", EVENT_COLUMNS));
        if let Some(college_id) = filter.college_id {
            query.push(" AND college_id = ").push_bind(college_id);
        }
        if let Some(event_type) = &filter.event_type {
            query.push(" AND type = ").push_bind(event_type.clone());
        }
        query.push(" ORDER BY date, id");

        query.build_query_as::<Event>().fetch_all(&self.pool).await
    }

    pub async fn find_event(&self, id: i64) -> sqlx::Result<Option<Event>> {
        sqlx::query_as::<_, Event>(&format!("SELECT {} FROM events WHERE id = ?", EVENT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn event_exists(&self, id: i64) -> sqlx::Result<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM events WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    /// Returns the id assigned to the new row.
    pub async fn insert_event(&self, event: &CreateEvent) -> sqlx::Result<i64> {
        let result = sqlx::query(
            "INSERT INTO events (name, date, location, description, type, college_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(event.name.trim())
        .bind(&event.date)
        .bind(event.location.as_deref().unwrap_or(""))
        .bind(event.description.as_deref().unwrap_or(""))
        .bind(&event.event_type)
        .bind(event.college_id)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Writes the supplied fields of `changes` to event `id` and returns the
    /// number of rows touched. An empty change set issues no statement.
    pub async fn update_event(&self, id: i64, changes: &UpdateEvent) -> sqlx::Result<u64> {
        let assignments = changes.assignments();
        if assignments.is_empty() {
            return Ok(0);
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE events SET ");
        let mut set = query.separated(", ");
        for assignment in &assignments {
            set.push(format!("{} = ", assignment.column()));
            match assignment {
                EventAssignment::Name(v) => set.push_bind_unseparated(v.trim().to_string()),
                EventAssignment::Date(v)
                | EventAssignment::Location(v)
                | EventAssignment::Description(v)
                | EventAssignment::EventType(v) => set.push_bind_unseparated(v.to_string()),
                EventAssignment::CollegeId(v) => set.push_bind_unseparated(*v),
            };
        }
        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Deletes the event; its registrations and feedback go with it through
    /// the cascading foreign keys.
    pub async fn delete_event(&self, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
