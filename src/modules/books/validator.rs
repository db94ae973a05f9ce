//! Acceptance rules for create/update payloads.

use thiserror::Error;

use super::models::{BookPayload, NormalizedBook};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("book name is required")]
    MissingName,

    #[error("readPage ({read_page}) is greater than pageCount ({page_count})")]
    PageOverflow { read_page: u32, page_count: u32 },
}

/// Check a payload and derive `finished`.
///
/// The page rule only fires when both counts are present. `finished` compares
/// the raw options, so two absent counts are equal and one absent count is not.
pub fn validate(payload: BookPayload) -> Result<NormalizedBook, ValidationError> {
    let name = match payload.name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ValidationError::MissingName),
    };

    if let (Some(read_page), Some(page_count)) = (payload.read_page, payload.page_count) {
        if read_page > page_count {
            return Err(ValidationError::PageOverflow {
                read_page,
                page_count,
            });
        }
    }

    Ok(NormalizedBook {
        name,
        year: payload.year,
        author: payload.author,
        summary: payload.summary,
        publisher: payload.publisher,
        page_count: payload.page_count,
        read_page: payload.read_page,
        finished: payload.page_count == payload.read_page,
        reading: payload.reading,
    })
}
