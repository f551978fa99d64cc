pub use in_memory_books_repository::InMemoryBookRepository;
pub use postgres_books_repository::{PostgresBooksRepository, PostgresBooksRepositoryConfig};

use chrono::{NaiveDateTime, SubsecRound};

use crate::api::{Book, BookId, NewBook};

mod in_memory_books_repository;
mod postgres_books_repository;

#[derive(thiserror::Error, Debug)]
pub enum BookRepositoryError {
    #[error("Book {0} not found")]
    NotFound(BookId),

    #[error("Book with isbn {0} already stored")]
    DuplicateIsbn(String),

    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

/// Current UTC time at the microsecond precision postgres stores
pub fn current_timestamp() -> NaiveDateTime {
    chrono::Utc::now().naive_utc().trunc_subsecs(6)
}

#[async_trait::async_trait]
pub trait BookRepository: Send + Sync {
    /// Adds book to repository, id and timestamps are assigned by the repository.
    /// Fails with DuplicateIsbn if the isbn is already taken
    async fn add_book(&self, book: NewBook) -> Result<Book, BookRepositoryError>;
    /// Retrieves the book with given id, fails with NotFound if it is not stored
    async fn get_book(&self, book_id: BookId) -> Result<Book, BookRepositoryError>;
    /// Looks up the book by isbn
    async fn find_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>, BookRepositoryError>;
    /// Overwrites name, isbn, author and updated_at of an already stored book.
    /// id and created_at are never changed
    async fn save_book(&self, book: Book) -> Result<Book, BookRepositoryError>;
    /// Removes the book, fails with NotFound if it is not stored
    async fn delete_book(&self, book_id: BookId) -> Result<(), BookRepositoryError>;
}

#[cfg(test)]
mod timestamp_tests {
    use chrono::Timelike;

    use crate::books_repository::current_timestamp;

    #[test]
    fn test_current_timestamp_has_microsecond_precision() {
        let now = current_timestamp();
        assert_eq!(now.nanosecond() % 1_000, 0);
        let serialized = serde_json::to_value(now).unwrap();
        let fraction = serialized
            .as_str()
            .unwrap()
            .split('.')
            .nth(1)
            .unwrap_or_default();
        assert!(fraction.len() <= 6, "{serialized}");
    }
}
