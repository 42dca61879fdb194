//! Book catalog service: listing, favorites, and the two-step import flow

use unicode_normalization::UnicodeNormalization;

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
    models::book::{Book, BookCandidate, BookQuery, CreateBook},
    repository::Repository,
    services::{openlibrary::OpenLibraryService, redis::RedisService},
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    redis: RedisService,
    catalog: OpenLibraryService,
    config: SessionConfig,
}

impl BooksService {
    pub fn new(
        repository: Repository,
        redis: RedisService,
        catalog: OpenLibraryService,
        config: SessionConfig,
    ) -> Self {
        Self {
            repository,
            redis,
            catalog,
            config,
        }
    }

    /// Search books
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books.search(query).await
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Add a book directly, bypassing the import flow
    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        self.repository.books.create(&data).await
    }

    /// Toggle the user's favorite on a book; returns the resulting state
    pub async fn toggle_favorite(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.books.toggle_favorite(user_id, book_id).await
    }

    /// List a user's favorite books
    pub async fn favorites(&self, user_id: i32) -> AppResult<Vec<Book>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.books.favorites(user_id).await
    }

    /// Step one of the import flow: look the edition up in Open Library
    /// and stage the candidate under the caller's session.
    pub async fn lookup(&self, session_token: &str, olid: &str) -> AppResult<BookCandidate> {
        let candidate = self.catalog.fetch_by_olid(olid).await?;

        let ttl = self.config.import_ttl_minutes * 60;
        self.redis
            .stage_import(session_token, &candidate, ttl)
            .await?;

        Ok(candidate)
    }

    /// Step two of the import flow: consume the staged candidate and
    /// insert the book. Duplicate detection compares title text only.
    pub async fn confirm_import(&self, session_token: &str) -> AppResult<Book> {
        let candidate = self
            .redis
            .take_staged_import(session_token)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("No staged import for this session; run a lookup first".to_string())
            })?;

        let title_key = normalize_title(&candidate.title);
        if self.repository.books.title_exists(&title_key).await? {
            return Err(AppError::Conflict(format!(
                "A book titled \"{}\" already exists",
                candidate.title
            )));
        }

        self.repository.books.create(&candidate.into()).await
    }
}

/// Normalize a title for duplicate comparison: NFKC, lowercased,
/// whitespace collapsed. Still title-text only, so distinct editions of
/// the same title collide and retitled reprints slip through.
fn normalize_title(title: &str) -> String {
    title
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_case_and_whitespace() {
        assert_eq!(normalize_title("The  Silent\tPatient "), "the silent patient");
        assert_eq!(normalize_title("THE SILENT PATIENT"), "the silent patient");
    }

    #[test]
    fn normalize_applies_compatibility_forms() {
        // fullwidth letters fold down to ASCII under NFKC
        assert_eq!(normalize_title("Ｔｈｅ Ｈｏｂｂｉｔ"), "the hobbit");
    }

    #[test]
    fn distinct_titles_stay_distinct() {
        assert_ne!(
            normalize_title("The Fellowship of the Ring"),
            normalize_title("The Two Towers")
        );
    }
}
