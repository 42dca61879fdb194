//! Business logic services

pub mod auth;
pub mod books;
pub mod clubs;
pub mod meetings;
pub mod notes;
pub mod openlibrary;
pub mod reads;
pub mod redis;

use crate::{
    config::{CatalogConfig, SessionConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub clubs: clubs::ClubsService,
    pub reads: reads::ReadsService,
    pub books: books::BooksService,
    pub meetings: meetings::MeetingsService,
    pub notes: notes::NotesService,
    pub redis: redis::RedisService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        session_config: SessionConfig,
        catalog_config: CatalogConfig,
        redis_service: redis::RedisService,
    ) -> Self {
        let clubs = clubs::ClubsService::new(repository.clone());
        let catalog = openlibrary::OpenLibraryService::new(&catalog_config);

        Self {
            auth: auth::AuthService::new(
                repository.clone(),
                session_config.clone(),
                redis_service.clone(),
            ),
            reads: reads::ReadsService::new(repository.clone(), clubs.clone()),
            books: books::BooksService::new(
                repository.clone(),
                redis_service.clone(),
                catalog,
                session_config,
            ),
            meetings: meetings::MeetingsService::new(repository.clone(), clubs.clone()),
            notes: notes::NotesService::new(repository.clone(), clubs.clone()),
            clubs,
            redis: redis_service,
            repository,
        }
    }

    /// Probe the backing stores; the readiness endpoint gates on this.
    pub async fn ready(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.repository.pool).await?;
        self.redis.ping().await
    }
}
