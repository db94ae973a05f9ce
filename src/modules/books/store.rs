//! In-memory book collection.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use time::OffsetDateTime;

use super::models::{Book, BookSummary, NormalizedBook};
use crate::utils;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("book '{0}' not found")]
    NotFound(String),
}

#[derive(Debug, Default)]
struct Shelf {
    /// Insertion order is listing order
    books: Vec<Book>,
    /// Every id ever handed out, so deleted ids are never reissued.
    /// Grows with the total number of books ever added, not the live count.
    issued: HashSet<String>,
}

impl Shelf {
    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// Shared handle to the book collection.
///
/// Clones share the same collection. Every operation holds the lock for its
/// whole read-modify-write and never across an await point.
#[derive(Debug, Clone, Default)]
pub struct BookStore {
    shelf: Arc<RwLock<Shelf>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Each primitive leaves the shelf consistent, so a poisoned lock is safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, Shelf> {
        self.shelf.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Shelf> {
        self.shelf.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a new book and return its freshly generated id.
    pub fn add(&self, fields: NormalizedBook) -> String {
        let mut shelf = self.write();

        let id = loop {
            let candidate = utils::generate_id(utils::ID_LENGTH);
            if shelf.issued.insert(candidate.clone()) {
                break candidate;
            }
        };

        shelf
            .books
            .push(Book::new(id.clone(), fields, OffsetDateTime::now_utc()));
        tracing::debug!(book_id = %id, total = shelf.books.len(), "book stored");
        id
    }

    /// Project every book to `{id, name, publisher}` in insertion order.
    pub fn list(&self) -> Vec<BookSummary> {
        self.read().books.iter().map(Book::summary).collect()
    }

    pub fn get(&self, id: &str) -> Result<Book, StoreError> {
        let shelf = self.read();
        let index = shelf.position(id)?;
        Ok(shelf.books[index].clone())
    }

    /// Full replace of everything but `id` and `insertedAt`.
    pub fn update(&self, id: &str, fields: NormalizedBook) -> Result<(), StoreError> {
        let mut shelf = self.write();
        let index = shelf.position(id)?;
        shelf.books[index].replace(fields, OffsetDateTime::now_utc());
        tracing::debug!(book_id = %id, "book replaced");
        Ok(())
    }

    /// Remove a book, keeping the order of the remaining ones.
    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut shelf = self.write();
        let index = shelf.position(id)?;
        shelf.books.remove(index);
        tracing::debug!(book_id = %id, total = shelf.books.len(), "book removed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.read().books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(name: &str, page_count: u32, read_page: u32) -> NormalizedBook {
        NormalizedBook {
            name: name.to_string(),
            year: Some(json!(2010)),
            author: Some(json!("Author")),
            summary: None,
            publisher: Some(json!(format!("{name} Press"))),
            page_count: Some(page_count),
            read_page: Some(read_page),
            finished: page_count == read_page,
            reading: Some(json!(false)),
        }
    }

    #[test]
    fn add_then_get_round_trips() {
        let store = BookStore::new();
        let id = store.add(fields("A", 100, 100));

        assert!(id.len() >= 10);
        let book = store.get(&id).unwrap();
        assert_eq!(book.id, id);
        assert_eq!(book.name, "A");
        assert_eq!(book.publisher, Some(json!("A Press")));
        assert_eq!(book.page_count, Some(100));
        assert!(book.finished);
        assert_eq!(book.inserted_at, book.updated_at);
    }

    #[test]
    fn list_projects_in_insertion_order() {
        let store = BookStore::new();
        let first = store.add(fields("first", 10, 1));
        let second = store.add(fields("second", 10, 2));

        let listed = store.list();
        assert_eq!(
            listed,
            vec![
                BookSummary {
                    id: first,
                    name: "first".to_string(),
                    publisher: Some(json!("first Press")),
                },
                BookSummary {
                    id: second,
                    name: "second".to_string(),
                    publisher: Some(json!("second Press")),
                },
            ]
        );
        assert_eq!(store.list(), listed);
    }

    #[test]
    fn update_replaces_fields_and_keeps_identity() {
        let store = BookStore::new();
        let id = store.add(fields("draft", 10, 2));
        let before = store.get(&id).unwrap();

        let mut replacement = fields("final", 10, 10);
        replacement.publisher = None;
        store.update(&id, replacement).unwrap();

        let after = store.get(&id).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.inserted_at, before.inserted_at);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.name, "final");
        assert_eq!(after.publisher, None);
        assert!(after.finished);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let store = BookStore::new();
        store.add(fields("kept", 1, 0));
        let missing = StoreError::NotFound("nope".to_string());

        assert_eq!(store.get("nope").unwrap_err(), missing);
        assert_eq!(store.update("nope", fields("x", 1, 1)).unwrap_err(), missing);
        assert_eq!(store.remove("nope").unwrap_err(), missing);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].name, "kept");
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let store = BookStore::new();
        let a = store.add(fields("a", 1, 0));
        let b = store.add(fields("b", 1, 0));
        let c = store.add(fields("c", 1, 0));

        store.remove(&b).unwrap();

        let ids: Vec<String> = store.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, c]);
        // The live list shrinks but the id stays reserved
        assert_eq!(store.read().issued.len(), 3);
        assert!(store.read().issued.contains(&b));
        assert_eq!(store.get(&b).unwrap_err(), StoreError::NotFound(b.clone()));
        assert_eq!(store.remove(&b).unwrap_err(), StoreError::NotFound(b));
    }

    #[test]
    fn clones_share_the_collection() {
        let store = BookStore::new();
        let handle = store.clone();
        handle.add(fields("shared", 3, 1));
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }

    #[test]
    fn concurrent_adds_are_all_kept() {
        let store = BookStore::new();
        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|n| store.add(fields(&format!("{worker}-{n}"), 5, 1)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<String> = workers
            .into_iter()
            .flat_map(|worker| worker.join().unwrap())
            .collect();
        assert_eq!(ids.len(), 400);
        assert_eq!(store.len(), 400);
    }
}
