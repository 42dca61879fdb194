//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, clubs, health, meetings, notes, reads, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BookTalk API",
        version = "0.1.0",
        description = "Book Club Social Application REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        // Users
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::get_favorites,
        // Clubs
        clubs::list_clubs,
        clubs::create_club,
        clubs::get_club,
        clubs::delete_club,
        clubs::join_club,
        clubs::leave_club,
        clubs::toggle_moderator,
        // Reads
        reads::list_reads,
        reads::add_read,
        reads::remove_read,
        reads::toggle_current,
        reads::toggle_complete,
        // Meetings
        meetings::list_meetings,
        meetings::create_meeting,
        meetings::get_meeting,
        meetings::update_meeting,
        meetings::delete_meeting,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::toggle_favorite,
        books::lookup_book,
        books::import_book,
        // Notes
        notes::list_book_notes,
        notes::list_meeting_notes,
        notes::create_note,
        notes::update_note,
        notes::delete_note,
    ),
    components(
        schemas(
            // Auth
            auth::LoginResponse,
            crate::models::user::Credentials,
            crate::models::user::RegisterUser,
            // Users
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::UserQuery,
            crate::models::user::UpdateUser,
            // Clubs
            crate::models::club::Club,
            crate::models::club::ClubShort,
            crate::models::club::ClubDetails,
            crate::models::club::ClubQuery,
            crate::models::club::ClubRole,
            crate::models::club::CreateClub,
            crate::models::club::Membership,
            crate::models::club::MemberInfo,
            // Reads
            crate::models::read::Read,
            crate::models::read::ReadDetails,
            crate::models::read::AddRead,
            // Meetings
            crate::models::meeting::Meeting,
            crate::models::meeting::CreateMeeting,
            crate::models::meeting::UpdateMeeting,
            // Books
            crate::models::book::Book,
            crate::models::book::BookQuery,
            crate::models::book::BookCandidate,
            crate::models::book::CreateBook,
            books::FavoriteResponse,
            books::LookupQuery,
            // Notes
            crate::models::note::Note,
            crate::models::note::CreateNote,
            crate::models::note::UpdateNote,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management"),
        (name = "clubs", description = "Clubs and memberships"),
        (name = "reads", description = "Club reading queues"),
        (name = "meetings", description = "Club meetings"),
        (name = "books", description = "Book catalog and imports"),
        (name = "notes", description = "Discussion notes")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
