use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::api::{Book, BookId, NewBook};
use crate::books_repository::{current_timestamp, BookRepository, BookRepositoryError};

pub struct InMemoryBookRepository {
    book_sequence_generator: AtomicI64,
    books: parking_lot::RwLock<HashMap<BookId, Book>>,
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self {
            book_sequence_generator: AtomicI64::new(1),
            books: Default::default(),
        }
    }
}

fn isbn_taken_by_other(books: &HashMap<BookId, Book>, isbn: &str, book_id: Option<BookId>) -> bool {
    books
        .values()
        .any(|book| book.isbn == isbn && Some(book.id) != book_id)
}

#[async_trait::async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn add_book(&self, book: NewBook) -> Result<Book, BookRepositoryError> {
        let mut locked_books = self.books.write();
        if isbn_taken_by_other(&locked_books, &book.isbn, None) {
            return Err(BookRepositoryError::DuplicateIsbn(book.isbn));
        }
        let id = self.book_sequence_generator.fetch_add(1, Ordering::Relaxed);
        let now = current_timestamp();
        let stored = Book {
            id,
            name: book.name,
            isbn: book.isbn,
            author: book.author,
            created_at: now,
            updated_at: now,
        };
        locked_books.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_book(&self, book_id: BookId) -> Result<Book, BookRepositoryError> {
        self.books
            .read()
            .get(&book_id)
            .cloned()
            .ok_or(BookRepositoryError::NotFound(book_id))
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>, BookRepositoryError> {
        Ok(self
            .books
            .read()
            .values()
            .find(|book| book.isbn == isbn)
            .cloned())
    }

    async fn save_book(&self, book: Book) -> Result<Book, BookRepositoryError> {
        let mut locked_books = self.books.write();
        if isbn_taken_by_other(&locked_books, &book.isbn, Some(book.id)) {
            return Err(BookRepositoryError::DuplicateIsbn(book.isbn));
        }
        let stored = locked_books
            .get_mut(&book.id)
            .ok_or(BookRepositoryError::NotFound(book.id))?;
        stored.name = book.name;
        stored.isbn = book.isbn;
        stored.author = book.author;
        stored.updated_at = book.updated_at;
        Ok(stored.clone())
    }

    async fn delete_book(&self, book_id: BookId) -> Result<(), BookRepositoryError> {
        self.books
            .write()
            .remove(&book_id)
            .map(|_| ())
            .ok_or(BookRepositoryError::NotFound(book_id))
    }
}
