//! Meeting management service

use crate::{
    error::AppResult,
    models::meeting::{CreateMeeting, Meeting, UpdateMeeting},
    repository::Repository,
    services::clubs::ClubsService,
};

#[derive(Clone)]
pub struct MeetingsService {
    repository: Repository,
    clubs: ClubsService,
}

impl MeetingsService {
    pub fn new(repository: Repository, clubs: ClubsService) -> Self {
        Self { repository, clubs }
    }

    /// List a club's meetings
    pub async fn list_for_club(&self, club_id: i32) -> AppResult<Vec<Meeting>> {
        self.repository.clubs.get_by_id(club_id).await?;
        self.repository.meetings.list_for_club(club_id).await
    }

    /// Get meeting by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Meeting> {
        self.repository.meetings.get_by_id(id).await
    }

    /// Schedule a meeting (members only)
    pub async fn create(
        &self,
        user_id: i32,
        club_id: i32,
        data: CreateMeeting,
    ) -> AppResult<Meeting> {
        self.clubs.require_member(user_id, club_id).await?;
        self.repository.meetings.create(club_id, &data).await
    }

    /// Update a meeting (members of its club only)
    pub async fn update(&self, user_id: i32, id: i32, data: UpdateMeeting) -> AppResult<Meeting> {
        let meeting = self.repository.meetings.get_by_id(id).await?;
        self.clubs.require_member(user_id, meeting.club_id).await?;
        self.repository.meetings.update(id, &data).await
    }

    /// Delete a meeting (members of its club only). Attached notes
    /// survive with their meeting link cleared.
    pub async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        let meeting = self.repository.meetings.get_by_id(id).await?;
        self.clubs.require_member(user_id, meeting.club_id).await?;
        self.repository.meetings.delete(id).await
    }
}
