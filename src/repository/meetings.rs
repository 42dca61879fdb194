//! Meetings repository

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::meeting::{CreateMeeting, Meeting, UpdateMeeting},
};

#[derive(Clone)]
pub struct MeetingsRepository {
    pool: Pool<Postgres>,
}

impl MeetingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a club's meetings, soonest first
    pub async fn list_for_club(&self, club_id: i32) -> AppResult<Vec<Meeting>> {
        let meetings = sqlx::query_as::<_, Meeting>(
            "SELECT * FROM meetings WHERE club_id = $1 ORDER BY date",
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(meetings)
    }

    /// Get meeting by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Meeting> {
        sqlx::query_as::<_, Meeting>("SELECT * FROM meetings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Meeting with id {} not found", id)))
    }

    /// Create a meeting
    pub async fn create(&self, club_id: i32, data: &CreateMeeting) -> AppResult<Meeting> {
        let date = NaiveDate::parse_from_str(&data.date, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid date, expected YYYY-MM-DD".to_string()))?;

        let meeting = sqlx::query_as::<_, Meeting>(
            "INSERT INTO meetings (club_id, date, topic) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(club_id)
        .bind(date)
        .bind(&data.topic)
        .fetch_one(&self.pool)
        .await?;

        Ok(meeting)
    }

    /// Update a meeting
    pub async fn update(&self, id: i32, data: &UpdateMeeting) -> AppResult<Meeting> {
        if data.date.is_none() && data.topic.is_none() {
            return self.get_by_id(id).await;
        }

        let date = match data.date.as_deref() {
            Some(s) => Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                AppError::Validation("Invalid date, expected YYYY-MM-DD".to_string())
            })?),
            None => None,
        };

        let mut sets = Vec::new();
        let mut idx = 1;

        if date.is_some() {
            sets.push(format!("date = ${}", idx));
            idx += 1;
        }
        if data.topic.is_some() {
            sets.push(format!("topic = ${}", idx));
        }

        let query = format!(
            "UPDATE meetings SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Meeting>(&query);
        if let Some(d) = date {
            builder = builder.bind(d);
        }
        if let Some(ref topic) = data.topic {
            builder = builder.bind(topic);
        }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Meeting with id {} not found", id)))
    }

    /// Delete a meeting. Notes attached to it survive with meeting_id
    /// set to NULL by the foreign-key rule.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Meeting with id {} not found", id)));
        }
        Ok(())
    }
}
