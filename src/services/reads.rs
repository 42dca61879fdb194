//! Reading-state service: a club's shared reading queue

use crate::{
    error::AppResult,
    models::read::{Read, ReadDetails},
    repository::Repository,
    services::clubs::ClubsService,
};

#[derive(Clone)]
pub struct ReadsService {
    repository: Repository,
    clubs: ClubsService,
}

impl ReadsService {
    pub fn new(repository: Repository, clubs: ClubsService) -> Self {
        Self { repository, clubs }
    }

    /// List a club's reads
    pub async fn list(&self, club_id: i32) -> AppResult<Vec<ReadDetails>> {
        self.repository.clubs.get_by_id(club_id).await?;
        self.repository.reads.list_for_club(club_id).await
    }

    /// Assign a book to the club's queue (members only)
    pub async fn add(&self, user_id: i32, club_id: i32, book_id: i32) -> AppResult<Read> {
        self.clubs.require_member(user_id, club_id).await?;
        self.repository.books.get_by_id(book_id).await?;
        self.repository.reads.add(club_id, book_id).await
    }

    /// Remove a book from the club's queue (members only)
    pub async fn remove(&self, user_id: i32, club_id: i32, book_id: i32) -> AppResult<()> {
        self.clubs.require_member(user_id, club_id).await?;
        self.repository.reads.remove(club_id, book_id).await
    }

    /// Toggle whether a book is the club's current read (members only).
    /// At most one read per club stays current.
    pub async fn toggle_current(&self, user_id: i32, club_id: i32, book_id: i32) -> AppResult<Read> {
        self.clubs.require_member(user_id, club_id).await?;
        self.repository.reads.toggle_current(club_id, book_id).await
    }

    /// Toggle whether a book is complete (members only). Completing a
    /// read also clears its current flag.
    pub async fn toggle_complete(
        &self,
        user_id: i32,
        club_id: i32,
        book_id: i32,
    ) -> AppResult<Read> {
        self.clubs.require_member(user_id, club_id).await?;
        self.repository.reads.toggle_complete(club_id, book_id).await
    }
}
