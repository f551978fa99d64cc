use anyhow::{bail, Context};
use reqwest::{Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::api::{Book, BookId, CreateBookRequest, ErrorBody, UpdateBookRequest};

/// Request rejected by the service, with the decoded error body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub body: ErrorBody,
}

pub struct LibraryBooksClient {
    url: String,
    client: ClientWithMiddleware,
}

impl LibraryBooksClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// Calls GET /health endpoint
    pub async fn health(&self) -> anyhow::Result<bool> {
        let response = self
            .client
            .get(format!("{}/health", self.url))
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    /// Calls POST /api/books endpoint
    /// Returns id of the created book, or the rejection for invalid input and duplicated isbn
    pub async fn create_book(
        &self,
        request: &CreateBookRequest,
    ) -> anyhow::Result<Result<BookId, ApiFailure>> {
        let response = self
            .client
            .post(format!("{}/api/books", self.url))
            .json(request)
            .send()
            .await?;

        if response.status() == StatusCode::CREATED {
            Ok(Ok(response.json().await.context("Failed to parse book id")?))
        } else {
            Ok(Err(api_failure(response).await?))
        }
    }

    /// Calls GET /api/books/{book_id} endpoint
    /// Returns None if book was not in the repository
    pub async fn get_book(&self, book_id: BookId) -> anyhow::Result<Option<Book>> {
        let response = self
            .client
            .get(format!("{}/api/books/{}", self.url, book_id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(None)
        } else if response.status().is_success() {
            Ok(Some(response.json().await?))
        } else {
            let failure = api_failure(response).await?;
            bail!("Failed to get book {:?}", failure)
        }
    }

    /// Calls PATCH /api/books/{book_id} endpoint
    /// Returns the updated book or the rejection
    pub async fn update_book(
        &self,
        book_id: BookId,
        request: &UpdateBookRequest,
    ) -> anyhow::Result<Result<Book, ApiFailure>> {
        let response = self
            .client
            .patch(format!("{}/api/books/{}", self.url, book_id))
            .json(request)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(Ok(response.json().await?))
        } else {
            Ok(Err(api_failure(response).await?))
        }
    }

    /// Calls DELETE /api/books/{book_id} endpoint
    /// Returns true if book was deleted and false if it was not found
    pub async fn delete_book(&self, book_id: BookId) -> anyhow::Result<bool> {
        let response = self
            .client
            .delete(format!("{}/api/books/{}", self.url, book_id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            let failure = api_failure(response).await?;
            bail!("Failed to delete book {:?}", failure)
        }
    }
}

async fn api_failure(response: Response) -> anyhow::Result<ApiFailure> {
    let status = response.status();
    let body = response
        .json()
        .await
        .with_context(|| format!("Unexpected error body for status {}", status))?;
    Ok(ApiFailure { status, body })
}
