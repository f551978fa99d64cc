use regex::Regex;

use crate::api::{CreateBookRequest, UpdateBookRequest};

/// ISBN-10 or ISBN-13, plain or split into hyphenated groups
pub const DEFAULT_ISBN_PATTERN: &str =
    r"\d{9}[\dX]|97[89]\d{10}|\d{1,5}-\d{1,7}-\d{1,7}-[\dX]|97[89]-\d{1,5}-\d{1,7}-\d{1,7}-\d";

pub const NAME_BLANK_MESSAGE: &str = "Name cannot be blank";
pub const AUTHOR_BLANK_MESSAGE: &str = "Author cannot be blank";
pub const INVALID_ISBN_MESSAGE: &str = "Invalid ISBN format";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", .0.join(", "))]
pub struct ValidationErrors(pub Vec<String>);

/// Field rules for book request bodies
#[derive(Debug, Clone)]
pub struct BookRequestValidator {
    isbn_regex: Regex,
}

impl BookRequestValidator {
    /// The pattern always has to match the whole isbn, anchors are added here
    pub fn new(isbn_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            isbn_regex: Regex::new(&format!("^(?:{isbn_pattern})$"))?,
        })
    }

    pub fn is_valid_isbn(&self, isbn: &str) -> bool {
        self.isbn_regex.is_match(isbn)
    }

    pub fn validate_create(&self, request: &CreateBookRequest) -> Result<(), ValidationErrors> {
        let mut errors = vec![];
        if is_blank(&request.name) {
            errors.push(NAME_BLANK_MESSAGE.to_string());
        }
        if is_blank(&request.author) {
            errors.push(AUTHOR_BLANK_MESSAGE.to_string());
        }
        if !self.is_valid_isbn(&request.isbn) {
            errors.push(INVALID_ISBN_MESSAGE.to_string());
        }
        into_result(errors)
    }

    pub fn validate_update(&self, request: &UpdateBookRequest) -> Result<(), ValidationErrors> {
        let mut errors = vec![];
        if let Some(isbn) = &request.isbn {
            if !self.is_valid_isbn(isbn) {
                errors.push(INVALID_ISBN_MESSAGE.to_string());
            }
        }
        into_result(errors)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn into_result(errors: Vec<String>) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
