//! Club and membership models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::meeting::Meeting;
use super::read::ReadDetails;

/// Club record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Club {
    pub id: i32,
    pub name: String,
}

/// Role of a user within one club, derived from the membership flags.
///
/// Ordering matters: `Member < Moderator < Admin` is what capability
/// checks compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClubRole {
    Member,
    Moderator,
    Admin,
}

impl ClubRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubRole::Member => "member",
            ClubRole::Moderator => "moderator",
            ClubRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for ClubRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Membership record mapping a user to a club
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Membership {
    pub user_id: i32,
    pub club_id: i32,
    pub join_date: NaiveDate,
    pub admin: bool,
    pub moderator: bool,
}

impl Membership {
    /// Effective role. Admin wins over moderator when both flags are set.
    pub fn role(&self) -> ClubRole {
        if self.admin {
            ClubRole::Admin
        } else if self.moderator {
            ClubRole::Moderator
        } else {
            ClubRole::Member
        }
    }
}

/// Club member with user display fields, for club detail views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MemberInfo {
    pub user_id: i32,
    pub username: String,
    pub image: Option<String>,
    pub join_date: NaiveDate,
    pub admin: bool,
    pub moderator: bool,
}

/// Club list entry with member count
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClubShort {
    pub id: i32,
    pub name: String,
    pub nb_members: Option<i64>,
}

/// Full club view: members, reading queue, meetings
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClubDetails {
    pub id: i32,
    pub name: String,
    pub members: Vec<MemberInfo>,
    pub reads: Vec<ReadDetails>,
    pub meetings: Vec<Meeting>,
}

/// Create club request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClub {
    #[validate(length(min = 1, max = 20, message = "Club name must be 1-20 characters"))]
    pub name: String,
}

/// Club query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ClubQuery {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(admin: bool, moderator: bool) -> Membership {
        Membership {
            user_id: 1,
            club_id: 1,
            join_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            admin,
            moderator,
        }
    }

    #[test]
    fn role_derivation() {
        assert_eq!(membership(false, false).role(), ClubRole::Member);
        assert_eq!(membership(false, true).role(), ClubRole::Moderator);
        assert_eq!(membership(true, false).role(), ClubRole::Admin);
        // admin flag wins if both are set
        assert_eq!(membership(true, true).role(), ClubRole::Admin);
    }

    #[test]
    fn role_ordering() {
        assert!(ClubRole::Member < ClubRole::Moderator);
        assert!(ClubRole::Moderator < ClubRole::Admin);
    }
}
