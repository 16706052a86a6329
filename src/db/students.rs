use super::Database;
use crate::models::{CreateStudent, Student};

impl Database {
    pub async fn list_students(&self) -> sqlx::Result<Vec<Student>> {
        sqlx::query_as::<_, Student>("SELECT id, name, email FROM students ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_student(&self, id: i64) -> sqlx::Result<Option<Student>> {
        sqlx::query_as::<_, Student>("SELECT id, name, email FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn student_exists(&self, id: i64) -> sqlx::Result<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    /// Fails with a unique violation when the email is already taken.
    pub async fn insert_student(&self, student: &CreateStudent) -> sqlx::Result<i64> {
        let result = sqlx::query("INSERT INTO students (name, email) VALUES (?, ?)")
            .bind(student.name.trim())
            .bind(student.email.trim())
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }
}
