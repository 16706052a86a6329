use sqlx::{QueryBuilder, Sqlite};

use super::Database;
use crate::models::{Feedback, Registration, SubmitFeedback};

impl Database {
    /// Registers the student for the event. A repeated registration is
    /// ignored; returns whether a new row was written.
    pub async fn register(&self, student_id: i64, event_id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO registrations (student_id, event_id, attended) VALUES (?, ?, 0)",
        )
        .bind(student_id)
        .bind(event_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Sets the attended flag of an existing registration. Returns false,
    /// without writing anything, when the student is not registered.
    pub async fn mark_attendance(
        &self,
        student_id: i64,
        event_id: i64,
        attended: bool,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "UPDATE registrations SET attended = ? WHERE student_id = ? AND event_id = ?",
        )
        .bind(attended)
        .bind(student_id)
        .bind(event_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_registration(
        &self,
        student_id: i64,
        event_id: i64,
    ) -> sqlx::Result<Option<Registration>> {
        sqlx::query_as::<_, Registration>(
            "SELECT student_id, event_id, attended FROM registrations \
             WHERE student_id = ? AND event_id = ?",
        )
        .bind(student_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_registrations(&self, event_id: Option<i64>) -> sqlx::Result<Vec<Registration>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT student_id, event_id, attended FROM registrations");
        if let Some(event_id) = event_id {
            query.push(" WHERE event_id = ").push_bind(event_id);
        }
        query.push(" ORDER BY event_id, student_id");
        query.build_query_as::<Registration>().fetch_all(&self.pool).await
    }

    /// Stores the feedback, replacing any earlier feedback for the pair.
    pub async fn upsert_feedback(&self, feedback: &SubmitFeedback) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO feedback (student_id, event_id, rating, comments) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(feedback.student_id)
        .bind(feedback.event_id)
        .bind(feedback.rating)
        .bind(&feedback.comments)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_feedback(&self, event_id: Option<i64>) -> sqlx::Result<Vec<Feedback>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT student_id, event_id, rating, comments FROM feedback");
        if let Some(event_id) = event_id {
            query.push(" WHERE event_id = ").push_bind(event_id);
        }
        query.push(" ORDER BY event_id, student_id");
        query.build_query_as::<Feedback>().fetch_all(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use sqlx::error::ErrorKind;

    use crate::db::test_support;
    use crate::models::SubmitFeedback;

    fn feedback(student_id: i64, event_id: i64, rating: i64, comments: &str) -> SubmitFeedback {
        SubmitFeedback {
            student_id,
            event_id,
            rating,
            comments: Some(comments.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_twice_keeps_one_row() {
        let db = test_support::database().await;
        let student = test_support::student(&db, "Asha").await;
        let event = test_support::event(&db, "Hackathon").await;

        assert!(db.register(student.id, event.id).await.unwrap());
        assert!(!db.register(student.id, event.id).await.unwrap());

        let rows = db.list_registrations(Some(event.id)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].attended);
    }

    #[tokio::test]
    async fn test_register_unknown_event_violates_foreign_key() {
        let db = test_support::database().await;
        let student = test_support::student(&db, "Asha").await;

        let err = db.register(student.id, 404).await.unwrap_err();
        match err {
            sqlx::Error::Database(db_err) => {
                assert!(matches!(db_err.kind(), ErrorKind::ForeignKeyViolation))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mark_attendance() {
        let db = test_support::database().await;
        let student = test_support::student(&db, "Asha").await;
        let event = test_support::event(&db, "Hackathon").await;
        db.register(student.id, event.id).await.unwrap();

        assert!(db.mark_attendance(student.id, event.id, true).await.unwrap());
        let row = db.find_registration(student.id, event.id).await.unwrap().unwrap();
        assert!(row.attended);

        assert!(db.mark_attendance(student.id, event.id, false).await.unwrap());
        let row = db.find_registration(student.id, event.id).await.unwrap().unwrap();
        assert!(!row.attended);
    }

    #[tokio::test]
    async fn test_mark_attendance_for_unknown_pair_is_silent() {
        let db = test_support::database().await;

        assert!(!db.mark_attendance(99, 99, true).await.unwrap());
        assert!(db.find_registration(99, 99).await.unwrap().is_none());
        assert!(db.list_registrations(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_feedback_last_write_wins() {
        let db = test_support::database().await;
        let student = test_support::student(&db, "Asha").await;
        let event = test_support::event(&db, "Hackathon").await;

        db.upsert_feedback(&feedback(student.id, event.id, 2, "meh")).await.unwrap();
        db.upsert_feedback(&feedback(student.id, event.id, 5, "great"))
            .await
            .unwrap();

        let rows = db.list_feedback(Some(event.id)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rating, 5);
        assert_eq!(rows[0].comments.as_deref(), Some("great"));
    }

    #[tokio::test]
    async fn test_rating_check_constraint() {
        let db = test_support::database().await;
        let student = test_support::student(&db, "Asha").await;
        let event = test_support::event(&db, "Hackathon").await;

        let err = db
            .upsert_feedback(&feedback(student.id, event.id, 9, "off the charts"))
            .await
            .unwrap_err();
        match err {
            sqlx::Error::Database(db_err) => {
                assert!(matches!(db_err.kind(), ErrorKind::CheckViolation))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_event_cascades() {
        let db = test_support::database().await;
        let student = test_support::student(&db, "Asha").await;
        let event = test_support::event(&db, "Hackathon").await;
        let other = test_support::event(&db, "Seminar").await;

        db.register(student.id, event.id).await.unwrap();
        db.register(student.id, other.id).await.unwrap();
        db.upsert_feedback(&feedback(student.id, event.id, 4, "good")).await.unwrap();

        assert!(db.delete_event(event.id).await.unwrap());

        assert!(db.list_registrations(Some(event.id)).await.unwrap().is_empty());
        assert!(db.list_feedback(Some(event.id)).await.unwrap().is_empty());
        assert_eq!(db.list_registrations(None).await.unwrap().len(), 1);
        assert!(db.find_student(student.id).await.unwrap().is_some());
    }
}
