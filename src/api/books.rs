//! Book catalog endpoints: listing, favorites, and the import flow

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::book::{Book, BookCandidate, BookQuery, CreateBook},
};

use super::CurrentUser;

/// Paginated list response
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// List books with search and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("title" = Option<String>, Query, description = "Search by title"),
        ("author" = Option<String>, Query, description = "Search by author"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of books", body = PaginatedResponse<Book>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    _current: CurrentUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<PaginatedResponse<Book>>> {
    let (books, total) = state.services.books.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items: books,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Add a book to the catalog by hand, without going through the
/// Open Library import flow
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    _current: CurrentUser,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.create(data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Favorite toggle response
#[derive(Serialize, ToSchema)]
pub struct FavoriteResponse {
    pub book_id: i32,
    /// Resulting state: true when the book is now a favorite
    pub favorite: bool,
}

/// Toggle the current user's favorite on a book
#[utoipa::path(
    post,
    path = "/books/{id}/favorite",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Favorite toggled", body = FavoriteResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn toggle_favorite(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<FavoriteResponse>> {
    let favorite = state
        .services
        .books
        .toggle_favorite(current.user.id, id)
        .await?;

    Ok(Json(FavoriteResponse {
        book_id: id,
        favorite,
    }))
}

/// Lookup query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LookupQuery {
    /// Open Library edition identifier (e.g. OL7353617M)
    pub olid: String,
}

/// Look an edition up in Open Library and stage it for import.
///
/// The candidate is held in the caller's session until the confirm step
/// or until it expires.
#[utoipa::path(
    get,
    path = "/books/lookup",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("olid" = String, Query, description = "Open Library edition identifier")
    ),
    responses(
        (status = 200, description = "Staged import candidate", body = BookCandidate),
        (status = 502, description = "Lookup failed or edition has no ISBN")
    )
)]
pub async fn lookup_book(
    State(state): State<crate::AppState>,
    current: CurrentUser,
    Query(query): Query<LookupQuery>,
) -> AppResult<Json<BookCandidate>> {
    let candidate = state
        .services
        .books
        .lookup(&current.token, &query.olid)
        .await?;

    Ok(Json(candidate))
}

/// Confirm the staged import, inserting the book into the catalog
#[utoipa::path(
    post,
    path = "/books/import",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Book imported", body = Book),
        (status = 400, description = "No staged import for this session"),
        (status = 409, description = "A book with this title already exists")
    )
)]
pub async fn import_book(
    State(state): State<crate::AppState>,
    current: CurrentUser,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.confirm_import(&current.token).await?;
    Ok((StatusCode::CREATED, Json(book)))
}
