use super::Database;
use crate::models::{
    AttendanceReport, EventTypeReport, FeedbackReport, RegistrationReport, TopStudent,
};

pub const TOP_STUDENTS_LIMIT: i64 = 3;

impl Database {
    /// Registration count per event, including events nobody signed up for.
    pub async fn registrations_per_event(&self) -> sqlx::Result<Vec<RegistrationReport>> {
        sqlx::query_as::<_, RegistrationReport>(
            r#"
            SELECT e.id AS event_id,
                   e.name AS event_name,
                   COUNT(r.student_id) AS total_registrations
            FROM events e
            LEFT JOIN registrations r ON r.event_id = e.id
            GROUP BY e.id, e.name
            ORDER BY total_registrations DESC, e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Attendance percentage per event. Events without registrations have no
    /// defined percentage and are left out.
    pub async fn attendance_per_event(&self) -> sqlx::Result<Vec<AttendanceReport>> {
        sqlx::query_as::<_, AttendanceReport>(
            r#"
            SELECT e.id AS event_id,
                   e.name AS event_name,
                   COUNT(*) AS total_registrations,
                   SUM(r.attended) AS attended,
                   ROUND(SUM(r.attended) * 100.0 / COUNT(*), 2) AS attendance_percentage
            FROM events e
            JOIN registrations r ON r.event_id = e.id
            GROUP BY e.id, e.name
            ORDER BY attendance_percentage DESC, e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn feedback_per_event(&self) -> sqlx::Result<Vec<FeedbackReport>> {
        sqlx::query_as::<_, FeedbackReport>(
            r#"
            SELECT e.id AS event_id,
                   e.name AS event_name,
                   ROUND(AVG(f.rating), 2) AS avg_feedback,
                   COUNT(*) AS feedback_count
            FROM events e
            JOIN feedback f ON f.event_id = e.id
            GROUP BY e.id, e.name
            ORDER BY avg_feedback DESC, e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Most active students by number of distinct events registered for.
    /// Ties go to the lower student id.
    pub async fn top_students(&self) -> sqlx::Result<Vec<TopStudent>> {
        sqlx::query_as::<_, TopStudent>(
            r#"
            SELECT s.id AS student_id,
                   s.name AS name,
                   s.email AS email,
                   COUNT(DISTINCT r.event_id) AS events_registered
            FROM students s
            JOIN registrations r ON r.student_id = s.id
            GROUP BY s.id, s.name, s.email
            ORDER BY events_registered DESC, s.id
            LIMIT ?
            "#,
        )
        .bind(TOP_STUDENTS_LIMIT)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn registrations_per_event_type(&self) -> sqlx::Result<Vec<EventTypeReport>> {
        sqlx::query_as::<_, EventTypeReport>(
            r#"
            SELECT e.type AS event_type,
                   COUNT(DISTINCT e.id) AS total_events,
                   COUNT(r.student_id) AS total_registrations
            FROM events e
            LEFT JOIN registrations r ON r.event_id = e.id
            GROUP BY e.type
            ORDER BY total_registrations DESC, e.type
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::db::test_support;
    use crate::models::{SubmitFeedback, UpdateEvent};

    #[tokio::test]
    async fn test_reports_on_empty_database() {
        let db = test_support::database().await;
        assert!(db.registrations_per_event().await.unwrap().is_empty());
        assert!(db.attendance_per_event().await.unwrap().is_empty());
        assert!(db.feedback_per_event().await.unwrap().is_empty());
        assert!(db.top_students().await.unwrap().is_empty());
        assert!(db.registrations_per_event_type().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_registration_counts_include_empty_events() {
        let db = test_support::database().await;
        let busy = test_support::event(&db, "Busy").await;
        let quiet = test_support::event(&db, "Quiet").await;
        let a = test_support::student(&db, "A").await;
        let b = test_support::student(&db, "B").await;
        db.register(a.id, busy.id).await.unwrap();
        db.register(b.id, busy.id).await.unwrap();

        let report = db.registrations_per_event().await.unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].event_id, busy.id);
        assert_eq!(report[0].total_registrations, 2);
        assert_eq!(report[1].event_id, quiet.id);
        assert_eq!(report[1].total_registrations, 0);
    }

    #[tokio::test]
    async fn test_attendance_percentage() {
        let db = test_support::database().await;
        let event = test_support::event(&db, "Hackathon").await;
        test_support::event(&db, "Nobody Came").await;
        let a = test_support::student(&db, "A").await;
        let b = test_support::student(&db, "B").await;
        db.register(a.id, event.id).await.unwrap();
        db.register(b.id, event.id).await.unwrap();
        db.mark_attendance(a.id, event.id, true).await.unwrap();

        let report = db.attendance_per_event().await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].event_id, event.id);
        assert_eq!(report[0].total_registrations, 2);
        assert_eq!(report[0].attended, 1);
        assert_eq!(report[0].attendance_percentage, 50.0);
    }

    #[tokio::test]
    async fn test_attendance_percentage_rounds_to_two_places() {
        let db = test_support::database().await;
        let event = test_support::event(&db, "Lecture").await;
        for name in ["A", "B", "C"] {
            let student = test_support::student(&db, name).await;
            db.register(student.id, event.id).await.unwrap();
            if name == "A" {
                db.mark_attendance(student.id, event.id, true).await.unwrap();
            }
        }

        let report = db.attendance_per_event().await.unwrap();
        assert_eq!(report[0].attendance_percentage, 33.33);
    }

    #[tokio::test]
    async fn test_average_feedback() {
        let db = test_support::database().await;
        let event = test_support::event(&db, "Hackathon").await;
        for (name, rating) in [("A", 5), ("B", 4), ("C", 4)] {
            let student = test_support::student(&db, name).await;
            let feedback = SubmitFeedback {
                student_id: student.id,
                event_id: event.id,
                rating,
                comments: None,
            };
            db.upsert_feedback(&feedback).await.unwrap();
        }

        let report = db.feedback_per_event().await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].avg_feedback, 4.33);
        assert_eq!(report[0].feedback_count, 3);
    }

    #[tokio::test]
    async fn test_top_students_order_and_limit() {
        let db = test_support::database().await;
        let mut events = Vec::new();
        for name in ["E1", "E2", "E3"] {
            events.push(test_support::event(&db, name).await);
        }
        let one = test_support::student(&db, "One").await;
        let three = test_support::student(&db, "Three").await;
        let two = test_support::student(&db, "Two").await;
        let also_one = test_support::student(&db, "AlsoOne").await;

        for event in &events {
            db.register(three.id, event.id).await.unwrap();
        }
        for event in &events[..2] {
            db.register(two.id, event.id).await.unwrap();
        }
        db.register(one.id, events[0].id).await.unwrap();
        db.register(also_one.id, events[1].id).await.unwrap();

        let report = db.top_students().await.unwrap();
        let ranked: Vec<(i64, i64)> = report
            .iter()
            .map(|s| (s.student_id, s.events_registered))
            .collect();
        assert_eq!(ranked, vec![(three.id, 3), (two.id, 2), (one.id, 1)]);
    }

    #[tokio::test]
    async fn test_registrations_per_event_type() {
        let db = test_support::database().await;
        let workshop = test_support::event(&db, "Workshop").await;
        let talk = test_support::event(&db, "Talk").await;
        let untyped = test_support::event(&db, "Untyped").await;
        let changes = UpdateEvent {
            event_type: Some("seminar".to_string()),
            ..Default::default()
        };
        db.update_event(talk.id, &changes).await.unwrap();
        sqlx::query("UPDATE events SET type = NULL WHERE id = ?")
            .bind(untyped.id)
            .execute(db.pool())
            .await
            .unwrap();

        let student = test_support::student(&db, "A").await;
        db.register(student.id, workshop.id).await.unwrap();
        db.register(student.id, talk.id).await.unwrap();
        let other = test_support::student(&db, "B").await;
        db.register(other.id, workshop.id).await.unwrap();

        let report = db.registrations_per_event_type().await.unwrap();
        let rows: Vec<(Option<&str>, i64, i64)> = report
            .iter()
            .map(|r| (r.event_type.as_deref(), r.total_events, r.total_registrations))
            .collect();
        assert_eq!(
            rows,
            vec![
                (Some("workshop"), 1, 2),
                (Some("seminar"), 1, 1),
                (None, 1, 0)
            ]
        );
    }
}
