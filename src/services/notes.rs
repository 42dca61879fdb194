//! Discussion note service

use crate::{
    error::{AppError, AppResult},
    models::note::{CreateNote, Note, UpdateNote},
    repository::Repository,
    services::clubs::ClubsService,
};

#[derive(Clone)]
pub struct NotesService {
    repository: Repository,
    clubs: ClubsService,
}

impl NotesService {
    pub fn new(repository: Repository, clubs: ClubsService) -> Self {
        Self { repository, clubs }
    }

    /// List notes on a book
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<Note>> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.notes.list_for_book(book_id).await
    }

    /// List notes attached to a meeting
    pub async fn list_for_meeting(&self, meeting_id: i32) -> AppResult<Vec<Note>> {
        self.repository.meetings.get_by_id(meeting_id).await?;
        self.repository.notes.list_for_meeting(meeting_id).await
    }

    /// Author a note on a book. Attaching it to a meeting requires
    /// membership in that meeting's club.
    pub async fn create(&self, user_id: i32, data: CreateNote) -> AppResult<Note> {
        self.repository.books.get_by_id(data.book_id).await?;

        if let Some(meeting_id) = data.meeting_id {
            let meeting = self.repository.meetings.get_by_id(meeting_id).await?;
            self.clubs.require_member(user_id, meeting.club_id).await?;
        }

        self.repository.notes.create(user_id, &data).await
    }

    /// Edit a note (author only)
    pub async fn update(&self, user_id: i32, id: i32, data: UpdateNote) -> AppResult<Note> {
        let note = self.repository.notes.get_by_id(id).await?;
        if note.user_id != user_id {
            return Err(AppError::Authorization(
                "Only the author can edit a note".to_string(),
            ));
        }

        if let Some(meeting_id) = data.meeting_id {
            let meeting = self.repository.meetings.get_by_id(meeting_id).await?;
            self.clubs.require_member(user_id, meeting.club_id).await?;
        }

        self.repository.notes.update(id, &data).await
    }

    /// Delete a note (author only)
    pub async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        let note = self.repository.notes.get_by_id(id).await?;
        if note.user_id != user_id {
            return Err(AppError::Authorization(
                "Only the author can delete a note".to_string(),
            ));
        }

        self.repository.notes.delete(id).await
    }
}
