//! Discussion note model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Discussion note a user left on a book, optionally tied to a meeting.
///
/// Deleting the meeting keeps the note and nulls `meeting_id`; deleting
/// the user or the book deletes the note.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Note {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub meeting_id: Option<i32>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Create note request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNote {
    pub book_id: i32,
    /// Meeting to attach the note to; the author must be a member of
    /// that meeting's club
    pub meeting_id: Option<i32>,
    pub text: String,
}

/// Update note request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNote {
    pub text: Option<String>,
    pub meeting_id: Option<i32>,
}
