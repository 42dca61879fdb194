//! API handlers for BookTalk REST endpoints

pub mod auth;
pub mod books;
pub mod clubs;
pub mod health;
pub mod meetings;
pub mod notes;
pub mod openapi;
pub mod reads;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::user::User, AppState};

/// Extractor for the current user, resolved from the session token.
///
/// The opaque token travels as a Bearer value; the session store maps
/// it to a user id and the user row is loaded for the request. Handlers
/// receive the resolved identity explicitly instead of reading ambient
/// state. A request without a valid token is anonymous and rejected on
/// routes that take this extractor.
pub struct CurrentUser {
    pub user: User,
    /// Raw session token, needed for logout and import staging
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication("Invalid authorization header format".to_string()));
        }

        let token = auth_header[7..].to_string();

        let user = state.services.auth.resolve_session(&token).await?;

        Ok(CurrentUser { user, token })
    }
}
