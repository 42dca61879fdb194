//! Club and membership management service
//!
//! Owns the membership/role transitions and the capability checks that
//! every mutating club-scoped operation goes through.

use crate::{
    error::{AppError, AppResult},
    models::club::{Club, ClubDetails, ClubQuery, ClubRole, ClubShort, CreateClub, Membership},
    repository::Repository,
};

#[derive(Clone)]
pub struct ClubsService {
    repository: Repository,
}

impl ClubsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Capability check: the user must hold a membership in the club.
    pub async fn require_member(&self, user_id: i32, club_id: i32) -> AppResult<Membership> {
        self.repository
            .clubs
            .membership(user_id, club_id)
            .await?
            .ok_or_else(|| AppError::Authorization("Not a member of this club".to_string()))
    }

    /// Capability check: the user must be the club's admin.
    pub async fn require_admin(&self, user_id: i32, club_id: i32) -> AppResult<Membership> {
        let membership = self.require_member(user_id, club_id).await?;
        if membership.role() < ClubRole::Admin {
            return Err(AppError::Authorization(
                "Administrator privileges required".to_string(),
            ));
        }
        Ok(membership)
    }

    /// List clubs
    pub async fn list_clubs(&self, query: &ClubQuery) -> AppResult<(Vec<ClubShort>, i64)> {
        self.repository.clubs.search(query).await
    }

    /// Full club view: members, reading queue, meetings
    pub async fn get_club(&self, id: i32) -> AppResult<ClubDetails> {
        let club = self.repository.clubs.get_by_id(id).await?;
        let members = self.repository.clubs.members(id).await?;
        let reads = self.repository.reads.list_for_club(id).await?;
        let meetings = self.repository.meetings.list_for_club(id).await?;

        Ok(ClubDetails {
            id: club.id,
            name: club.name,
            members,
            reads,
            meetings,
        })
    }

    /// Create a club and join the creator, who becomes admin by being
    /// the first member. A duplicate name is a recoverable Conflict.
    pub async fn create_club(&self, creator_id: i32, data: CreateClub) -> AppResult<Club> {
        let club = self.repository.clubs.create(&data.name).await?;
        self.repository.clubs.join(creator_id, club.id).await?;
        Ok(club)
    }

    /// Join a club. The first joiner of an empty club becomes admin.
    pub async fn join(&self, user_id: i32, club_id: i32) -> AppResult<Membership> {
        self.repository.clubs.get_by_id(club_id).await?;
        self.repository.clubs.join(user_id, club_id).await
    }

    /// Leave a club. Applies to any role; an admin leaving is not
    /// treated specially and may leave the club without an admin.
    pub async fn leave(&self, user_id: i32, club_id: i32) -> AppResult<()> {
        self.require_member(user_id, club_id).await?;
        self.repository.clubs.delete_membership(user_id, club_id).await
    }

    /// Toggle the moderator flag on a member (admin only). The admin's
    /// own membership is not a valid target.
    pub async fn toggle_moderator(
        &self,
        acting_id: i32,
        club_id: i32,
        target_user_id: i32,
    ) -> AppResult<Membership> {
        self.require_admin(acting_id, club_id).await?;

        let target = self
            .repository
            .clubs
            .membership(target_user_id, club_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))?;

        if target.admin {
            return Err(AppError::Validation(
                "Cannot change the admin's role".to_string(),
            ));
        }

        self.repository
            .clubs
            .set_moderator(target_user_id, club_id, !target.moderator)
            .await
    }

    /// Delete a club (admin only). Memberships, reads and meetings go
    /// with it through the foreign-key cascade rules.
    pub async fn delete_club(&self, acting_id: i32, club_id: i32) -> AppResult<()> {
        self.require_admin(acting_id, club_id).await?;
        self.repository.clubs.delete(club_id).await
    }
}
