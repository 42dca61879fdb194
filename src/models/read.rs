//! Read model: a book assigned to a club's queue with progress flags

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Read record mapping a club to a book.
///
/// At most one Read per club has `current` set; the toggle logic clears
/// any other current read in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Read {
    pub club_id: i32,
    pub book_id: i32,
    pub current: bool,
    pub complete: bool,
}

/// Read with the joined book display fields, for club views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReadDetails {
    pub club_id: i32,
    pub book_id: i32,
    pub title: String,
    pub author: String,
    pub image: Option<String>,
    pub current: bool,
    pub complete: bool,
}

/// Add a book to a club's queue
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddRead {
    pub book_id: i32,
}
