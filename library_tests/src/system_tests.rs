use library_books::api::{CreateBookRequest, ErrorBody, ErrorResponse, UpdateBookRequest};
use library_books::client::LibraryBooksClient;
use reqwest::StatusCode;

use crate::{library_books_url, random_isbn};

#[tokio::test]
/// Simple test for library books
/// Creates a book
/// Gets the book
/// Patches the name of the book
/// Deletes the book and checks it is gone
async fn library_books_e2e_test() {
    let client = LibraryBooksClient::new(&library_books_url()).expect("Failed to create client");
    assert!(client.health().await.expect("Failed to call health"));

    let isbn = random_isbn(&mut rand::thread_rng());
    let create_request = CreateBookRequest {
        name: "Bible".to_string(),
        author: "Jesus".to_string(),
        isbn: isbn.clone(),
    };

    // CREATE
    let book_id = client
        .create_book(&create_request)
        .await
        .expect("Failed to call create")
        .expect("Create rejected");

    // GET
    let book = client
        .get_book(book_id)
        .await
        .expect("Failed to get book")
        .expect("Book not found");
    assert_eq!(book.id, book_id);
    assert_eq!(book.name, "Bible");
    assert_eq!(book.author, "Jesus");
    assert_eq!(book.isbn, isbn);

    // PATCH name only
    let updated = client
        .update_book(
            book_id,
            &UpdateBookRequest {
                name: Some("New Title".to_string()),
                ..UpdateBookRequest::default()
            },
        )
        .await
        .expect("Failed to call update")
        .expect("Update rejected");
    assert_eq!(updated.name, "New Title");
    assert_eq!(updated.isbn, isbn);
    assert_eq!(updated.author, "Jesus");
    assert_eq!(updated.created_at, book.created_at);
    assert!(updated.updated_at >= book.updated_at);

    // DELETE
    assert!(client
        .delete_book(book_id)
        .await
        .expect("Failed to delete book"));

    // GET after delete
    assert_eq!(
        client.get_book(book_id).await.expect("Failed to get book"),
        None
    );
    assert!(!client
        .delete_book(book_id)
        .await
        .expect("Failed to delete book"));
}

#[tokio::test]
/// Creating a book twice with the same isbn is rejected the second time
async fn library_books_duplicate_isbn_test() {
    let client = LibraryBooksClient::new(&library_books_url()).expect("Failed to create client");
    let isbn = random_isbn(&mut rand::thread_rng());
    let create_request = CreateBookRequest {
        name: "Bible".to_string(),
        author: "Jesus".to_string(),
        isbn: isbn.clone(),
    };

    let book_id = client
        .create_book(&create_request)
        .await
        .expect("Failed to call create")
        .expect("Create rejected");

    let failure = client
        .create_book(&create_request)
        .await
        .expect("Failed to call create")
        .expect_err("Duplicate accepted");
    assert_eq!(failure.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        failure.body,
        ErrorBody::Single(ErrorResponse::new(format!(
            "Book with isbn :{} already exists",
            isbn
        )))
    );

    client
        .delete_book(book_id)
        .await
        .expect("Failed to delete book");
}

#[tokio::test]
/// Invalid fields are all reported at once
async fn library_books_validation_test() {
    let client = LibraryBooksClient::new(&library_books_url()).expect("Failed to create client");

    let failure = client
        .create_book(&CreateBookRequest {
            name: "".to_string(),
            author: "".to_string(),
            isbn: "12143".to_string(),
        })
        .await
        .expect("Failed to call create")
        .expect_err("Invalid book accepted");
    assert_eq!(failure.status, StatusCode::BAD_REQUEST);
    let messages = failure.body.messages();
    for expected in [
        "Name cannot be blank",
        "Author cannot be blank",
        "Invalid ISBN format",
    ] {
        assert!(messages.contains(&expected), "{expected} not in {messages:?}");
    }

    let failure = client
        .update_book(
            1,
            &UpdateBookRequest {
                isbn: Some("12143".to_string()),
                ..UpdateBookRequest::default()
            },
        )
        .await
        .expect("Failed to call update")
        .expect_err("Invalid isbn accepted");
    assert_eq!(failure.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        failure.body,
        ErrorBody::Fields(vec![ErrorResponse::new("Invalid ISBN format")])
    );
}
