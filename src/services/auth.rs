//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
    models::user::{RegisterUser, UpdateUser, User, UserQuery, UserShort},
    repository::Repository,
    services::redis::RedisService,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: SessionConfig,
    redis: RedisService,
}

impl AuthService {
    pub fn new(repository: Repository, config: SessionConfig, redis: RedisService) -> Self {
        Self {
            repository,
            config,
            redis,
        }
    }

    /// Register a new user with a salted argon2 password hash. A taken
    /// username comes back as a recoverable Conflict.
    pub async fn register(&self, data: RegisterUser) -> AppResult<User> {
        let hash = hash_password(&data.password)?;
        self.repository.users.create(&data, &hash).await
    }

    /// Validate credentials and return the user. An unknown username and
    /// a wrong password are indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !verify_password(&user.password, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        Ok(user)
    }

    /// Authenticate and open a server-side session; returns the session
    /// token and the user.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self.authenticate(username, password).await?;

        let ttl = self.config.ttl_hours * 3600;
        let token = self.redis.create_session(user.id, ttl).await?;

        Ok((token, user))
    }

    /// Destroy the session bound to the token
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.redis.destroy_session(token).await
    }

    /// Resolve the current user for a session token
    pub async fn resolve_session(&self, token: &str) -> AppResult<User> {
        let user_id = self
            .redis
            .session_user(token)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid or expired session".to_string()))?;

        self.repository.users.get_by_id(user_id).await
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Search users
    pub async fn search_users(&self, query: &UserQuery) -> AppResult<(Vec<UserShort>, i64)> {
        self.repository.users.search(query).await
    }

    /// Update a user's own profile. Changing the password requires the
    /// current one to verify.
    pub async fn update_profile(&self, acting: &User, id: i32, data: UpdateUser) -> AppResult<User> {
        if acting.id != id {
            return Err(AppError::Authorization(
                "You can only edit your own profile".to_string(),
            ));
        }

        let password = match data.new_password {
            Some(ref new_password) => {
                let current = data.current_password.as_deref().ok_or_else(|| {
                    AppError::Validation(
                        "Current password is required to change password".to_string(),
                    )
                })?;
                if !verify_password(&acting.password, current)? {
                    return Err(AppError::Authentication(
                        "Current password is incorrect".to_string(),
                    ));
                }
                Some(hash_password(new_password)?)
            }
            None => None,
        };

        self.repository.users.update(id, &data, password).await
    }

    /// Delete a user's own account and end the session. Memberships,
    /// notes and favorites cascade away with the row.
    pub async fn delete_account(&self, acting: &User, id: i32, token: &str) -> AppResult<()> {
        if acting.id != id {
            return Err(AppError::Authorization(
                "You can only delete your own account".to_string(),
            ));
        }

        self.repository.users.delete(id).await?;
        self.redis.destroy_session(token).await
    }
}

/// Hash a password with a fresh random salt
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored argon2 hash
fn verify_password(stored_hash: &str, password: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("superstar").unwrap();
        assert_ne!(hash, "superstar");
        assert!(verify_password(&hash, "superstar").unwrap());
        assert!(!verify_password(&hash, "wrong").unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("daisy").unwrap();
        let b = hash_password("daisy").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_is_an_error() {
        assert!(verify_password("not-a-hash", "anything").is_err());
    }
}
