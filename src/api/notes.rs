//! Discussion note endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::note::{CreateNote, Note, UpdateNote},
};

use super::CurrentUser;

/// List notes on a book
#[utoipa::path(
    get,
    path = "/books/{id}/notes",
    tag = "notes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Notes on the book", body = [Note]),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_book_notes(
    State(state): State<crate::AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Note>>> {
    let notes = state.services.notes.list_for_book(id).await?;
    Ok(Json(notes))
}

/// List notes attached to a meeting
#[utoipa::path(
    get,
    path = "/meetings/{id}/notes",
    tag = "notes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Meeting ID")
    ),
    responses(
        (status = 200, description = "Notes for the meeting", body = [Note]),
        (status = 404, description = "Meeting not found")
    )
)]
pub async fn list_meeting_notes(
    State(state): State<crate::AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Note>>> {
    let notes = state.services.notes.list_for_meeting(id).await?;
    Ok(Json(notes))
}

/// Author a note on a book, optionally attached to a meeting
#[utoipa::path(
    post,
    path = "/notes",
    tag = "notes",
    security(("bearer_auth" = [])),
    request_body = CreateNote,
    responses(
        (status = 201, description = "Note created", body = Note),
        (status = 403, description = "Not a member of the meeting's club"),
        (status = 404, description = "Book or meeting not found")
    )
)]
pub async fn create_note(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Json(data): Json<CreateNote>,
) -> AppResult<(StatusCode, Json<Note>)> {
    let note = state.services.notes.create(current.user.id, data).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Edit a note (author only)
#[utoipa::path(
    put,
    path = "/notes/{id}",
    tag = "notes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Note ID")
    ),
    request_body = UpdateNote,
    responses(
        (status = 200, description = "Note updated", body = Note),
        (status = 403, description = "Only the author can edit a note"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn update_note(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateNote>,
) -> AppResult<Json<Note>> {
    let note = state.services.notes.update(current.user.id, id, data).await?;
    Ok(Json(note))
}

/// Delete a note (author only)
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    tag = "notes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 403, description = "Only the author can delete a note"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn delete_note(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.notes.delete(current.user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
