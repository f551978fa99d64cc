use actix_web::http::header::LOCATION;
use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpResponse;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{BookId, CreateBookRequest, UpdateBookRequest};
use crate::book_service::BookService;
use crate::errors::ApiError;
use crate::validation::BookRequestValidator;

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn get_book(
    book_service: Data<BookService>,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    let book = book_service
        .get_book_by_id(book_id.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(book))
}

#[api_v2_operation]
pub async fn create_book(
    book_service: Data<BookService>,
    validator: Data<BookRequestValidator>,
    request: web::Json<CreateBookRequest>,
) -> Result<HttpResponse, Error> {
    let request = request.into_inner();
    validator
        .validate_create(&request)
        .map_err(ApiError::from)?;
    let book = book_service
        .create_book(request)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Created()
        .append_header((LOCATION, format!("/api/books/{}", book.id)))
        .json(book.id))
}

#[api_v2_operation]
pub async fn update_book(
    book_service: Data<BookService>,
    validator: Data<BookRequestValidator>,
    book_id: web::Path<BookId>,
    request: web::Json<UpdateBookRequest>,
) -> Result<HttpResponse, Error> {
    let request = request.into_inner();
    validator
        .validate_update(&request)
        .map_err(ApiError::from)?;
    let book = book_service
        .update_book(book_id.into_inner(), request)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(book))
}

#[api_v2_operation]
pub async fn delete_book(
    book_service: Data<BookService>,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    book_service
        .delete_book(book_id.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::NoContent().finish())
}
