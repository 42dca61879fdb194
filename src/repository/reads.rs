//! Reads repository: a club's reading queue and progress flags

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::read::{Read, ReadDetails},
};

#[derive(Clone)]
pub struct ReadsRepository {
    pool: Pool<Postgres>,
}

impl ReadsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get one read by (club, book)
    pub async fn get(&self, club_id: i32, book_id: i32) -> AppResult<Read> {
        sqlx::query_as::<_, Read>("SELECT * FROM reads WHERE club_id = $1 AND book_id = $2")
            .bind(club_id)
            .bind(book_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Book {} is not in club {}'s queue",
                    book_id, club_id
                ))
            })
    }

    /// List a club's reads with book display fields, current first
    pub async fn list_for_club(&self, club_id: i32) -> AppResult<Vec<ReadDetails>> {
        let reads = sqlx::query_as::<_, ReadDetails>(
            r#"
            SELECT r.club_id, r.book_id, b.title, b.author, b.image, r.current, r.complete
            FROM reads r
            JOIN books b ON b.id = r.book_id
            WHERE r.club_id = $1
            ORDER BY r.current DESC, b.title
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reads)
    }

    /// Assign a book to a club's queue. New reads start neither current
    /// nor complete.
    pub async fn add(&self, club_id: i32, book_id: i32) -> AppResult<Read> {
        sqlx::query_as::<_, Read>(
            r#"
            INSERT INTO reads (club_id, book_id, current, complete)
            VALUES ($1, $2, FALSE, FALSE)
            RETURNING *
            "#,
        )
        .bind(club_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::on_unique(e, "Book is already in this club's queue"))
    }

    /// Remove a book from a club's queue
    pub async fn remove(&self, club_id: i32, book_id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM reads WHERE club_id = $1 AND book_id = $2")
            .bind(club_id)
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Book {} is not in club {}'s queue",
                book_id, club_id
            )));
        }
        Ok(())
    }

    /// Toggle the current flag on a read.
    ///
    /// If the target read is current, it is cleared. Otherwise any other
    /// current read in the same club is cleared first, keeping at most
    /// one current read per club. Both steps run in one transaction; no
    /// row locks are taken.
    pub async fn toggle_current(&self, club_id: i32, book_id: i32) -> AppResult<Read> {
        let mut tx = self.pool.begin().await?;

        let read = sqlx::query_as::<_, Read>(
            "SELECT * FROM reads WHERE club_id = $1 AND book_id = $2",
        )
        .bind(club_id)
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Book {} is not in club {}'s queue",
                book_id, club_id
            ))
        })?;

        let updated = if read.current {
            sqlx::query_as::<_, Read>(
                r#"
                UPDATE reads SET current = FALSE
                WHERE club_id = $1 AND book_id = $2
                RETURNING *
                "#,
            )
            .bind(club_id)
            .bind(book_id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            sqlx::query("UPDATE reads SET current = FALSE WHERE club_id = $1 AND current")
                .bind(club_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query_as::<_, Read>(
                r#"
                UPDATE reads SET current = TRUE
                WHERE club_id = $1 AND book_id = $2
                RETURNING *
                "#,
            )
            .bind(club_id)
            .bind(book_id)
            .fetch_one(&mut *tx)
            .await?
        };

        tx.commit().await?;

        Ok(updated)
    }

    /// Toggle the complete flag on a read. Marking a read complete also
    /// forces current off: a book cannot be both complete and currently
    /// being read.
    pub async fn toggle_complete(&self, club_id: i32, book_id: i32) -> AppResult<Read> {
        let mut tx = self.pool.begin().await?;

        let read = sqlx::query_as::<_, Read>(
            "SELECT * FROM reads WHERE club_id = $1 AND book_id = $2",
        )
        .bind(club_id)
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Book {} is not in club {}'s queue",
                book_id, club_id
            ))
        })?;

        let updated = if read.complete {
            sqlx::query_as::<_, Read>(
                r#"
                UPDATE reads SET complete = FALSE
                WHERE club_id = $1 AND book_id = $2
                RETURNING *
                "#,
            )
            .bind(club_id)
            .bind(book_id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            sqlx::query_as::<_, Read>(
                r#"
                UPDATE reads SET complete = TRUE, current = FALSE
                WHERE club_id = $1 AND book_id = $2
                RETURNING *
                "#,
            )
            .bind(club_id)
            .bind(book_id)
            .fetch_one(&mut *tx)
            .await?
        };

        tx.commit().await?;

        Ok(updated)
    }
}
