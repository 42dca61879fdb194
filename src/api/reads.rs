//! Club reading-queue endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::read::{AddRead, Read, ReadDetails},
};

use super::CurrentUser;

/// List a club's reads, current first
#[utoipa::path(
    get,
    path = "/clubs/{id}/reads",
    tag = "reads",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID")
    ),
    responses(
        (status = 200, description = "Club reads", body = [ReadDetails]),
        (status = 404, description = "Club not found")
    )
)]
pub async fn list_reads(
    State(state): State<crate::AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<ReadDetails>>> {
    let reads = state.services.reads.list(id).await?;
    Ok(Json(reads))
}

/// Assign a book to the club's queue (members only)
#[utoipa::path(
    post,
    path = "/clubs/{id}/reads",
    tag = "reads",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID")
    ),
    request_body = AddRead,
    responses(
        (status = 201, description = "Book added to the queue", body = Read),
        (status = 403, description = "Not a member"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book already in the queue")
    )
)]
pub async fn add_read(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AddRead>,
) -> AppResult<(StatusCode, Json<Read>)> {
    let read = state
        .services
        .reads
        .add(current.user.id, id, data.book_id)
        .await?;
    Ok((StatusCode::CREATED, Json(read)))
}

/// Remove a book from the club's queue (members only)
#[utoipa::path(
    delete,
    path = "/clubs/{id}/reads/{book_id}",
    tag = "reads",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID"),
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book removed from the queue"),
        (status = 403, description = "Not a member"),
        (status = 404, description = "Book not in the queue")
    )
)]
pub async fn remove_read(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path((id, book_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    state
        .services
        .reads
        .remove(current.user.id, id, book_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle whether a book is the club's current read.
///
/// Setting a book current clears any other current read in the club, so
/// at most one read per club stays current.
#[utoipa::path(
    post,
    path = "/clubs/{id}/reads/{book_id}/current",
    tag = "reads",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID"),
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Current flag toggled", body = Read),
        (status = 403, description = "Not a member"),
        (status = 404, description = "Book not in the queue")
    )
)]
pub async fn toggle_current(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path((id, book_id)): Path<(i32, i32)>,
) -> AppResult<Json<Read>> {
    let read = state
        .services
        .reads
        .toggle_current(current.user.id, id, book_id)
        .await?;
    Ok(Json(read))
}

/// Toggle whether a book is complete. Completing a read also clears its
/// current flag.
#[utoipa::path(
    post,
    path = "/clubs/{id}/reads/{book_id}/complete",
    tag = "reads",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID"),
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Complete flag toggled", body = Read),
        (status = 403, description = "Not a member"),
        (status = 404, description = "Book not in the queue")
    )
)]
pub async fn toggle_complete(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path((id, book_id)): Path<(i32, i32)>,
) -> AppResult<Json<Read>> {
    let read = state
        .services
        .reads
        .toggle_complete(current.user.id, id, book_id)
        .await?;
    Ok(Json(read))
}
