//! Repository layer for database operations

pub mod books;
pub mod clubs;
pub mod meetings;
pub mod notes;
pub mod reads;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub clubs: clubs::ClubsRepository,
    pub books: books::BooksRepository,
    pub reads: reads::ReadsRepository,
    pub meetings: meetings::MeetingsRepository,
    pub notes: notes::NotesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            clubs: clubs::ClubsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            reads: reads::ReadsRepository::new(pool.clone()),
            meetings: meetings::MeetingsRepository::new(pool.clone()),
            notes: notes::NotesRepository::new(pool.clone()),
            pool,
        }
    }
}
