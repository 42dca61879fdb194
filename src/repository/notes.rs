//! Notes repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::note::{CreateNote, Note, UpdateNote},
};

#[derive(Clone)]
pub struct NotesRepository {
    pool: Pool<Postgres>,
}

impl NotesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get note by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Note> {
        sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Note with id {} not found", id)))
    }

    /// List notes on a book, newest first
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE book_id = $1 ORDER BY created_at DESC",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    /// List notes attached to a meeting
    pub async fn list_for_meeting(&self, meeting_id: i32) -> AppResult<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE meeting_id = $1 ORDER BY created_at",
        )
        .bind(meeting_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    /// Create a note authored by the given user
    pub async fn create(&self, user_id: i32, data: &CreateNote) -> AppResult<Note> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (user_id, book_id, meeting_id, text)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(data.book_id)
        .bind(data.meeting_id)
        .bind(&data.text)
        .fetch_one(&self.pool)
        .await?;

        Ok(note)
    }

    /// Update a note's text or meeting attachment
    pub async fn update(&self, id: i32, data: &UpdateNote) -> AppResult<Note> {
        if data.text.is_none() && data.meeting_id.is_none() {
            return self.get_by_id(id).await;
        }

        let mut sets = Vec::new();
        let mut idx = 1;

        if data.text.is_some() {
            sets.push(format!("text = ${}", idx));
            idx += 1;
        }
        if data.meeting_id.is_some() {
            sets.push(format!("meeting_id = ${}", idx));
        }

        let query = format!(
            "UPDATE notes SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Note>(&query);
        if let Some(ref text) = data.text {
            builder = builder.bind(text);
        }
        if let Some(meeting_id) = data.meeting_id {
            builder = builder.bind(meeting_id);
        }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Note with id {} not found", id)))
    }

    /// Delete a note
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Note with id {} not found", id)));
        }
        Ok(())
    }
}
