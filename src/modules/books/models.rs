use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Stored catalog record.
///
/// `year`, `author`, `summary`, `publisher` and `reading` are opaque: whatever
/// JSON value the client sent is kept as is. Optional fields that were absent
/// from the write payload are left out of the serialized form entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Generated identifier, immutable once assigned
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_page: Option<u32>,
    /// True iff `read_page == page_count`, recomputed on every write
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<Value>,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Build a new record from a validated payload.
    pub fn new(id: String, fields: NormalizedBook, now: OffsetDateTime) -> Self {
        Self {
            id,
            name: fields.name,
            year: fields.year,
            author: fields.author,
            summary: fields.summary,
            publisher: fields.publisher,
            page_count: fields.page_count,
            read_page: fields.read_page,
            finished: fields.finished,
            reading: fields.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every caller-owned field, keeping `id` and `inserted_at`.
    pub fn replace(&mut self, fields: NormalizedBook, now: OffsetDateTime) {
        let id = std::mem::take(&mut self.id);
        *self = Self {
            inserted_at: self.inserted_at,
            ..Self::new(id, fields, now)
        };
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Write payload for create and update, as sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<Value>,
    pub author: Option<Value>,
    pub summary: Option<Value>,
    pub publisher: Option<Value>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub reading: Option<Value>,
}

/// Payload that passed validation, with `finished` derived.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBook {
    pub name: String,
    pub year: Option<Value>,
    pub author: Option<Value>,
    pub summary: Option<Value>,
    pub publisher: Option<Value>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub finished: bool,
    pub reading: Option<Value>,
}

/// Listing projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedBook {
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub book: Book,
}
