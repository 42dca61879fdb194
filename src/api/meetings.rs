//! Meeting endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::meeting::{CreateMeeting, Meeting, UpdateMeeting},
};

use super::CurrentUser;

/// List a club's meetings
#[utoipa::path(
    get,
    path = "/clubs/{id}/meetings",
    tag = "meetings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID")
    ),
    responses(
        (status = 200, description = "Club meetings", body = [Meeting]),
        (status = 404, description = "Club not found")
    )
)]
pub async fn list_meetings(
    State(state): State<crate::AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Meeting>>> {
    let meetings = state.services.meetings.list_for_club(id).await?;
    Ok(Json(meetings))
}

/// Schedule a meeting (members only)
#[utoipa::path(
    post,
    path = "/clubs/{id}/meetings",
    tag = "meetings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID")
    ),
    request_body = CreateMeeting,
    responses(
        (status = 201, description = "Meeting scheduled", body = Meeting),
        (status = 400, description = "Invalid date"),
        (status = 403, description = "Not a member")
    )
)]
pub async fn create_meeting(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<CreateMeeting>,
) -> AppResult<(StatusCode, Json<Meeting>)> {
    let meeting = state
        .services
        .meetings
        .create(current.user.id, id, data)
        .await?;
    Ok((StatusCode::CREATED, Json(meeting)))
}

/// Get meeting by ID
#[utoipa::path(
    get,
    path = "/meetings/{id}",
    tag = "meetings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Meeting ID")
    ),
    responses(
        (status = 200, description = "Meeting details", body = Meeting),
        (status = 404, description = "Meeting not found")
    )
)]
pub async fn get_meeting(
    State(state): State<crate::AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Meeting>> {
    let meeting = state.services.meetings.get_by_id(id).await?;
    Ok(Json(meeting))
}

/// Update a meeting (members of its club only)
#[utoipa::path(
    put,
    path = "/meetings/{id}",
    tag = "meetings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Meeting ID")
    ),
    request_body = UpdateMeeting,
    responses(
        (status = 200, description = "Meeting updated", body = Meeting),
        (status = 403, description = "Not a member"),
        (status = 404, description = "Meeting not found")
    )
)]
pub async fn update_meeting(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMeeting>,
) -> AppResult<Json<Meeting>> {
    let meeting = state
        .services
        .meetings
        .update(current.user.id, id, data)
        .await?;
    Ok(Json(meeting))
}

/// Cancel a meeting (members of its club only). Notes attached to it
/// survive with their meeting link cleared.
#[utoipa::path(
    delete,
    path = "/meetings/{id}",
    tag = "meetings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Meeting ID")
    ),
    responses(
        (status = 204, description = "Meeting deleted"),
        (status = 403, description = "Not a member"),
        (status = 404, description = "Meeting not found")
    )
)]
pub async fn delete_meeting(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.meetings.delete(current.user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
