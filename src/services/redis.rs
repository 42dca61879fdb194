//! Redis service for login sessions and staged catalog imports

use rand::RngCore;
use redis::{AsyncCommands, Client};

use crate::{
    error::{AppError, AppResult},
    models::book::BookCandidate,
};

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    /// Create a new Redis service
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    /// Check that Redis answers
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.get_connection().await?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis ping failed: {}", e)))?;

        Ok(())
    }

    /// Open a login session for a user and return the opaque token
    pub async fn create_session(&self, user_id: i32, expiration_seconds: u64) -> AppResult<String> {
        let mut conn = self.get_connection().await?;

        let token = generate_token();
        let key = format!("session:{}", token);
        conn.set_ex::<_, _, ()>(&key, user_id, expiration_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store session in Redis: {}", e)))?;

        Ok(token)
    }

    /// Resolve a session token to the user id it was bound to
    pub async fn session_user(&self, token: &str) -> AppResult<Option<i32>> {
        let mut conn = self.get_connection().await?;

        let key = format!("session:{}", token);
        let user_id: Option<i32> = conn
            .get(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get session from Redis: {}", e)))?;

        Ok(user_id)
    }

    /// Destroy a session (logout)
    pub async fn destroy_session(&self, token: &str) -> AppResult<()> {
        let mut conn = self.get_connection().await?;

        let key = format!("session:{}", token);
        let _: () = conn
            .del(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete session from Redis: {}", e)))?;

        Ok(())
    }

    /// Stage a catalog import candidate under the session, with expiration
    pub async fn stage_import(
        &self,
        token: &str,
        candidate: &BookCandidate,
        expiration_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.get_connection().await?;

        let payload = serde_json::to_string(candidate)
            .map_err(|e| AppError::Internal(format!("Failed to serialize import candidate: {}", e)))?;

        let key = format!("import:{}", token);
        conn.set_ex::<_, _, ()>(&key, payload, expiration_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to stage import in Redis: {}", e)))?;

        Ok(())
    }

    /// Take the staged import candidate for the session, consuming it
    pub async fn take_staged_import(&self, token: &str) -> AppResult<Option<BookCandidate>> {
        let mut conn = self.get_connection().await?;

        let key = format!("import:{}", token);
        let payload: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get staged import from Redis: {}", e)))?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        // One-shot: the confirm step consumes the staged candidate
        let _: () = conn
            .del(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete staged import from Redis: {}", e)))?;

        let candidate = serde_json::from_str(&payload)
            .map_err(|e| AppError::Internal(format!("Failed to parse staged import: {}", e)))?;

        Ok(Some(candidate))
    }

    /// Get a Redis connection (for advanced operations)
    async fn get_connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }
}

/// Random 256-bit session token, hex encoded
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
