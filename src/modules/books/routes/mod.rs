use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use bookshelf_http::{ApiResponse, AppError, JsonBody};

use super::models::{AddedBook, BookDetail, BookList, BookPayload};
use super::store::{BookStore, StoreError};
use super::validator::{self, ValidationError};

const ADDED: &str = "Buku berhasil ditambahkan";
const UPDATED: &str = "Buku berhasil diperbarui";
const DELETED: &str = "Buku berhasil dihapus";
const GET_NOT_FOUND: &str = "Buku tidak ditemukan";
const UPDATE_NOT_FOUND: &str = "Gagal memperbarui buku. Id tidak ditemukan";
const DELETE_NOT_FOUND: &str = "Buku gagal dihapus. Id tidak ditemukan";

/// Write path a validation failure happened on; selects the message prefix.
#[derive(Debug, Clone, Copy)]
enum WriteAction {
    Add,
    Update,
}

impl WriteAction {
    fn reject(self, error: ValidationError) -> AppError {
        let prefix = match self {
            WriteAction::Add => "Gagal menambahkan buku",
            WriteAction::Update => "Gagal memperbarui buku",
        };
        let reason = match error {
            ValidationError::MissingName => "Mohon isi nama buku",
            ValidationError::PageOverflow { .. } => {
                "readPage tidak boleh lebih besar dari pageCount"
            }
        };
        tracing::debug!(action = ?self, %error, "book payload rejected");
        AppError::bad_request(format!("{prefix}. {reason}"))
    }
}

fn not_found(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |error| {
        tracing::debug!(%error, "book lookup failed");
        AppError::not_found(message)
    }
}

/// Routes mounted under `/books`
pub fn router(store: BookStore) -> Router {
    Router::new()
        .route("/", get(list_books).post(add_book))
        .route(
            "/{book_id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(store)
}

async fn add_book(
    State(store): State<BookStore>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> Result<ApiResponse<AddedBook>, AppError> {
    let fields = validator::validate(payload).map_err(|e| WriteAction::Add.reject(e))?;
    let book_id = store.add(fields);

    tracing::info!(book_id = %book_id, "book added");
    Ok(ApiResponse::created(ADDED, AddedBook { book_id }))
}

async fn list_books(State(store): State<BookStore>) -> ApiResponse<BookList> {
    ApiResponse::data(BookList {
        books: store.list(),
    })
}

async fn get_book(
    State(store): State<BookStore>,
    Path(book_id): Path<String>,
) -> Result<ApiResponse<BookDetail>, AppError> {
    let book = store.get(&book_id).map_err(not_found(GET_NOT_FOUND))?;
    Ok(ApiResponse::data(BookDetail { book }))
}

async fn update_book(
    State(store): State<BookStore>,
    Path(book_id): Path<String>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> Result<ApiResponse, AppError> {
    // Payload problems win over an unknown id
    let fields = validator::validate(payload).map_err(|e| WriteAction::Update.reject(e))?;
    store
        .update(&book_id, fields)
        .map_err(not_found(UPDATE_NOT_FOUND))?;

    tracing::info!(book_id = %book_id, "book updated");
    Ok(ApiResponse::message(UPDATED))
}

async fn delete_book(
    State(store): State<BookStore>,
    Path(book_id): Path<String>,
) -> Result<ApiResponse, AppError> {
    store
        .remove(&book_id)
        .map_err(not_found(DELETE_NOT_FOUND))?;

    tracing::info!(book_id = %book_id, "book deleted");
    Ok(ApiResponse::message(DELETED))
}
