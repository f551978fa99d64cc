use chrono::NaiveDateTime;
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Deserializer, Serialize};

pub type BookId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
/// Book as stored in the repository and returned by the api
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub isbn: String,
    pub author: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Eq, PartialEq)]
/// Book that was not persisted yet, id and timestamps are assigned by the repository
pub struct NewBook {
    pub name: String,
    pub isbn: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Body of POST /api/books
/// Missing and null fields are read as empty strings so that they are reported by validation
pub struct CreateBookRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub isbn: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Body of PATCH /api/books/{id}. Only fields that are present replace the stored values
pub struct UpdateBookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
/// Error body returned by the api
/// Validation failures carry one entry per failing field, every other error a single message
pub enum ErrorBody {
    Single(ErrorResponse),
    Fields(Vec<ErrorResponse>),
}

impl ErrorBody {
    pub fn messages(&self) -> Vec<&str> {
        match self {
            ErrorBody::Single(error) => vec![error.message.as_str()],
            ErrorBody::Fields(errors) => errors.iter().map(|e| e.message.as_str()).collect(),
        }
    }
}
