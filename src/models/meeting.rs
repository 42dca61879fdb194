//! Meeting model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Meeting record, belongs to exactly one club
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Meeting {
    pub id: i32,
    pub club_id: i32,
    pub date: NaiveDate,
    pub topic: String,
}

/// Create meeting request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMeeting {
    /// Meeting date (YYYY-MM-DD)
    pub date: String,
    pub topic: String,
}

/// Update meeting request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMeeting {
    /// Meeting date (YYYY-MM-DD)
    pub date: Option<String>,
    pub topic: Option<String>,
}
