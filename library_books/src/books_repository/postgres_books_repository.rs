use anyhow::Context;
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, NoTls, Row, Statement};

use crate::api::{Book, BookId, NewBook};
use crate::books_repository::{current_timestamp, BookRepository, BookRepositoryError};

const BOOK_COLUMNS: &str = "id, name, isbn, author, created_at, updated_at";

pub struct PostgresBooksRepository {
    client: Client,
}

pub struct PostgresBooksRepositoryConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
}

impl PostgresBooksRepository {
    pub async fn init(config: PostgresBooksRepositoryConfig) -> anyhow::Result<Self> {
        let connection_str = format!(
            "postgresql://{}:{}@{}",
            config.username, config.password, config.hostname
        );
        tracing::info!("Connecting to postgres at {}", config.hostname);
        let (client, connection) = tokio_postgres::connect(&connection_str, NoTls)
            .await
            .context("Failed to start postgres")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("Postgres connection error: {}", e);
            }
        });

        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS books (
            id              BIGSERIAL PRIMARY KEY,
            name            TEXT NOT NULL,
            isbn            TEXT NOT NULL UNIQUE,
            author          TEXT NOT NULL,
            created_at      TIMESTAMP NOT NULL,
            updated_at      TIMESTAMP NOT NULL
            )
        ",
            )
            .await
            .context("Failed to setup table")?;
        Ok(Self { client })
    }
}

fn book_from_row(row: &Row) -> Result<Book, BookRepositoryError> {
    Ok(Book {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        isbn: row.try_get("isbn")?,
        author: row.try_get("author")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn is_unique_violation(err: &tokio_postgres::Error) -> bool {
    err.as_db_error()
        .map(|db_err| db_err.code() == &SqlState::UNIQUE_VIOLATION)
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl BookRepository for PostgresBooksRepository {
    async fn add_book(&self, book: NewBook) -> Result<Book, BookRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!(
                "INSERT INTO books (name, isbn, author, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $4) RETURNING {BOOK_COLUMNS}"
            ))
            .await?;

        let now = current_timestamp();
        let rows = self
            .client
            .query(&stmt, &[&book.name, &book.isbn, &book.author, &now])
            .await;

        match rows {
            Ok(rows) => book_from_row(
                rows.first()
                    .ok_or_else(|| BookRepositoryError::Other("Book not returned".to_string()))?,
            ),
            // Another request inserted the same isbn after the duplicate check
            Err(err) if is_unique_violation(&err) => {
                Err(BookRepositoryError::DuplicateIsbn(book.isbn))
            }
            Err(other_err) => Err(other_err.into()),
        }
    }

    async fn get_book(&self, book_id: BookId) -> Result<Book, BookRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ($1)"))
            .await?;

        let rows = self.client.query(&stmt, &[&book_id]).await?;

        book_from_row(
            rows.first()
                .ok_or_else(|| BookRepositoryError::NotFound(book_id))?,
        )
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>, BookRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE isbn = ($1)"))
            .await?;

        let rows = self.client.query(&stmt, &[&isbn]).await?;

        rows.first().map(book_from_row).transpose()
    }

    async fn save_book(&self, book: Book) -> Result<Book, BookRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!(
                "UPDATE books SET name = $1, isbn = $2, author = $3, updated_at = $4 \
                 WHERE id = ($5) RETURNING {BOOK_COLUMNS}"
            ))
            .await?;

        let rows = self
            .client
            .query(
                &stmt,
                &[
                    &book.name,
                    &book.isbn,
                    &book.author,
                    &book.updated_at,
                    &book.id,
                ],
            )
            .await;

        match rows {
            Ok(rows) => book_from_row(
                rows.first()
                    .ok_or_else(|| BookRepositoryError::NotFound(book.id))?,
            ),
            Err(err) if is_unique_violation(&err) => {
                Err(BookRepositoryError::DuplicateIsbn(book.isbn))
            }
            Err(other_err) => Err(other_err.into()),
        }
    }

    async fn delete_book(&self, book_id: BookId) -> Result<(), BookRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("DELETE FROM books WHERE id = ($1) RETURNING id")
            .await?;

        let rows = self.client.query(&stmt, &[&book_id]).await?;

        if rows.is_empty() {
            Err(BookRepositoryError::NotFound(book_id))
        } else {
            Ok(())
        }
    }
}
