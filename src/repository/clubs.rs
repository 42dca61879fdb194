//! Clubs and memberships repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::club::{Club, ClubQuery, ClubShort, MemberInfo, Membership},
};

#[derive(Clone)]
pub struct ClubsRepository {
    pool: Pool<Postgres>,
}

impl ClubsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get club by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Club> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Club with id {} not found", id)))
    }

    /// List clubs with optional name filter and pagination
    pub async fn search(&self, query: &ClubQuery) -> AppResult<(Vec<ClubShort>, i64)> {
        let page = query.page.unwrap_or(1);
        let per_page = query.per_page.unwrap_or(20);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref name) = query.name {
            params.push(format!("%{}%", name.to_lowercase()));
            conditions.push(format!("LOWER(c.name) LIKE ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM clubs c {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            r#"
            SELECT c.id, c.name,
                   (SELECT COUNT(*) FROM memberships m WHERE m.club_id = c.id) as nb_members
            FROM clubs c
            {}
            ORDER BY c.name
            LIMIT {} OFFSET {}
            "#,
            where_clause, per_page, offset
        );

        let mut select_builder = sqlx::query_as::<_, ClubShort>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let clubs = select_builder.fetch_all(&self.pool).await?;

        Ok((clubs, total))
    }

    /// Create a club. A duplicate name surfaces the unique violation as
    /// a recoverable Conflict at commit time.
    pub async fn create(&self, name: &str) -> AppResult<Club> {
        sqlx::query_as::<_, Club>("INSERT INTO clubs (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::on_unique(e, "Club name already taken"))
    }

    /// Delete a club. Memberships, reads and meetings go with it through
    /// the foreign-key cascade rules.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Club with id {} not found", id)));
        }
        Ok(())
    }

    /// List a club's members with their display fields
    pub async fn members(&self, club_id: i32) -> AppResult<Vec<MemberInfo>> {
        let members = sqlx::query_as::<_, MemberInfo>(
            r#"
            SELECT m.user_id, u.username, u.image, m.join_date, m.admin, m.moderator
            FROM memberships m
            JOIN users u ON u.id = m.user_id
            WHERE m.club_id = $1
            ORDER BY m.join_date, u.username
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Look up a user's membership in a club, if any
    pub async fn membership(&self, user_id: i32, club_id: i32) -> AppResult<Option<Membership>> {
        let membership = sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE user_id = $1 AND club_id = $2",
        )
        .bind(user_id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    /// Join a club. The first joiner of an empty club becomes admin;
    /// everyone after that joins as a plain member. The member count and
    /// the insert run in one transaction.
    pub async fn join(&self, user_id: i32, club_id: i32) -> AppResult<Membership> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM memberships WHERE club_id = $1")
                .bind(club_id)
                .fetch_one(&mut *tx)
                .await?;

        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (user_id, club_id, join_date, admin, moderator)
            VALUES ($1, $2, CURRENT_DATE, $3, FALSE)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(club_id)
        .bind(existing == 0)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::on_unique(e, "Already a member of this club"))?;

        tx.commit().await?;

        Ok(membership)
    }

    /// Remove a membership. Applies to any role; an admin leaving is not
    /// treated specially.
    pub async fn delete_membership(&self, user_id: i32, club_id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM memberships WHERE user_id = $1 AND club_id = $2")
            .bind(user_id)
            .bind(club_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Membership not found".to_string()));
        }
        Ok(())
    }

    /// Set the moderator flag on a membership
    pub async fn set_moderator(
        &self,
        user_id: i32,
        club_id: i32,
        moderator: bool,
    ) -> AppResult<Membership> {
        sqlx::query_as::<_, Membership>(
            r#"
            UPDATE memberships SET moderator = $1
            WHERE user_id = $2 AND club_id = $3
            RETURNING *
            "#,
        )
        .bind(moderator)
        .bind(user_id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))
    }
}
