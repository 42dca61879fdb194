//! Club and membership endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::club::{Club, ClubDetails, ClubQuery, ClubShort, CreateClub, Membership},
};

use super::{books::PaginatedResponse, CurrentUser};

/// List clubs with search and pagination
#[utoipa::path(
    get,
    path = "/clubs",
    tag = "clubs",
    security(("bearer_auth" = [])),
    params(
        ("name" = Option<String>, Query, description = "Search by name"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of clubs", body = PaginatedResponse<ClubShort>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_clubs(
    State(state): State<crate::AppState>,
    _current: CurrentUser,
    Query(query): Query<ClubQuery>,
) -> AppResult<Json<PaginatedResponse<ClubShort>>> {
    let (clubs, total) = state.services.clubs.list_clubs(&query).await?;

    Ok(Json(PaginatedResponse {
        items: clubs,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Create a club. The creator joins immediately and becomes admin.
#[utoipa::path(
    post,
    path = "/clubs",
    tag = "clubs",
    security(("bearer_auth" = [])),
    request_body = CreateClub,
    responses(
        (status = 201, description = "Club created", body = Club),
        (status = 409, description = "Club name already taken")
    )
)]
pub async fn create_club(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Json(data): Json<CreateClub>,
) -> AppResult<(StatusCode, Json<Club>)> {
    data.validate()?;

    let club = state.services.clubs.create_club(current.user.id, data).await?;
    Ok((StatusCode::CREATED, Json(club)))
}

/// Get a club with its members, reads and meetings
#[utoipa::path(
    get,
    path = "/clubs/{id}",
    tag = "clubs",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID")
    ),
    responses(
        (status = 200, description = "Club details", body = ClubDetails),
        (status = 404, description = "Club not found")
    )
)]
pub async fn get_club(
    State(state): State<crate::AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ClubDetails>> {
    let club = state.services.clubs.get_club(id).await?;
    Ok(Json(club))
}

/// Delete a club (admin only). Memberships, reads and meetings cascade.
#[utoipa::path(
    delete,
    path = "/clubs/{id}",
    tag = "clubs",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID")
    ),
    responses(
        (status = 204, description = "Club deleted"),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Club not found")
    )
)]
pub async fn delete_club(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.clubs.delete_club(current.user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Join a club. The first joiner of an empty club becomes admin.
#[utoipa::path(
    post,
    path = "/clubs/{id}/join",
    tag = "clubs",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID")
    ),
    responses(
        (status = 201, description = "Joined", body = Membership),
        (status = 404, description = "Club not found"),
        (status = 409, description = "Already a member")
    )
)]
pub async fn join_club(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<(StatusCode, Json<Membership>)> {
    let membership = state.services.clubs.join(current.user.id, id).await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

/// Leave a club
#[utoipa::path(
    post,
    path = "/clubs/{id}/leave",
    tag = "clubs",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID")
    ),
    responses(
        (status = 204, description = "Left the club"),
        (status = 403, description = "Not a member")
    )
)]
pub async fn leave_club(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.clubs.leave(current.user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a member's moderator role (admin only)
#[utoipa::path(
    post,
    path = "/clubs/{id}/members/{user_id}/moderator",
    tag = "clubs",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Club ID"),
        ("user_id" = i32, Path, description = "Target member's user ID")
    ),
    responses(
        (status = 200, description = "Role toggled", body = Membership),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn toggle_moderator(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path((id, user_id)): Path<(i32, i32)>,
) -> AppResult<Json<Membership>> {
    let membership = state
        .services
        .clubs
        .toggle_moderator(current.user.id, id, user_id)
        .await?;
    Ok(Json(membership))
}
