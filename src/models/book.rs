//! Book catalog and favorite models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Book catalog entry, shared across clubs
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Cover image URL
    pub image: Option<String>,
    pub num_pages: i32,
    /// Free-form date text as returned by the catalog service
    pub publish_date: String,
}

/// Book query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// New book row, produced by the catalog import flow
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub image: Option<String>,
    pub num_pages: i32,
    pub publish_date: String,
}

/// Catalog import candidate, staged in the session store between the
/// lookup and confirm steps.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookCandidate {
    /// Open Library edition identifier the lookup started from
    pub olid: String,
    /// ISBN resolved by the first lookup
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub image: Option<String>,
    pub num_pages: i32,
    pub publish_date: String,
}

impl From<BookCandidate> for CreateBook {
    fn from(c: BookCandidate) -> Self {
        CreateBook {
            title: c.title,
            author: c.author,
            image: c.image,
            num_pages: c.num_pages,
            publish_date: c.publish_date,
        }
    }
}
