use std::sync::Arc;

use crate::api::{Book, BookId, CreateBookRequest, NewBook, UpdateBookRequest};
use crate::books_repository::{current_timestamp, BookRepository, BookRepositoryError};

#[derive(thiserror::Error, Debug)]
pub enum BookServiceError {
    #[error("Book with ID {0} not found")]
    NotFound(BookId),

    #[error("Book with isbn :{0} already exists")]
    DuplicateBook(String),

    #[error("Repository failure: {0}")]
    Repository(BookRepositoryError),
}

impl From<BookRepositoryError> for BookServiceError {
    fn from(err: BookRepositoryError) -> Self {
        match err {
            BookRepositoryError::NotFound(book_id) => BookServiceError::NotFound(book_id),
            BookRepositoryError::DuplicateIsbn(isbn) => BookServiceError::DuplicateBook(isbn),
            other => BookServiceError::Repository(other),
        }
    }
}

/// Business rules for managing books on top of a [`BookRepository`]
#[derive(Clone)]
pub struct BookService {
    books_repository: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(books_repository: Arc<dyn BookRepository>) -> Self {
        Self { books_repository }
    }

    /// Fetches a book by its id, fails with NotFound if there is no such book
    #[tracing::instrument(skip(self))]
    pub async fn get_book_by_id(&self, book_id: BookId) -> Result<Book, BookServiceError> {
        Ok(self.books_repository.get_book(book_id).await?)
    }

    /// Creates a new book, fails with DuplicateBook if a book with the same isbn already exists.
    /// A duplicate inserted concurrently between the check and the write is rejected by the
    /// repository and reported the same way
    #[tracing::instrument(skip(self))]
    pub async fn create_book(&self, request: CreateBookRequest) -> Result<Book, BookServiceError> {
        if self
            .books_repository
            .find_book_by_isbn(&request.isbn)
            .await?
            .is_some()
        {
            tracing::warn!("Book with isbn {} already exists", request.isbn);
            return Err(BookServiceError::DuplicateBook(request.isbn));
        }

        let book = self
            .books_repository
            .add_book(NewBook {
                name: request.name,
                isbn: request.isbn,
                author: request.author,
            })
            .await?;
        tracing::info!("Created book {}", book.id);
        Ok(book)
    }

    /// Replaces only the fields present in the request and refreshes updated_at.
    /// The isbn is not checked against other books here, only the repository constraint applies
    #[tracing::instrument(skip(self))]
    pub async fn update_book(
        &self,
        book_id: BookId,
        request: UpdateBookRequest,
    ) -> Result<Book, BookServiceError> {
        let mut book = self.get_book_by_id(book_id).await?;

        if let Some(name) = request.name {
            book.name = name;
        }
        if let Some(author) = request.author {
            book.author = author;
        }
        if let Some(isbn) = request.isbn {
            book.isbn = isbn;
        }
        // updated_at never goes backwards, even if the clock does
        book.updated_at = current_timestamp().max(book.updated_at);

        Ok(self.books_repository.save_book(book).await?)
    }

    /// Deletes a book by its id, fails with NotFound if there is no such book
    #[tracing::instrument(skip(self))]
    pub async fn delete_book(&self, book_id: BookId) -> Result<(), BookServiceError> {
        let book = self.get_book_by_id(book_id).await?;
        self.books_repository.delete_book(book.id).await?;
        tracing::info!("Deleted book {}", book.id);
        Ok(())
    }
}
