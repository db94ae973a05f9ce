pub mod models;
pub mod routes;
pub mod store;
pub mod validator;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use store::BookStore;

/// Books module: owns the in-memory collection and serves `/books`
pub struct BooksModule {
    store: BookStore,
}

impl BooksModule {
    pub fn new(store: BookStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            discarded = self.store.len(),
            "books module stopped"
        );
        Ok(())
    }
}

/// Create a new instance of the books module with an empty collection
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(BookStore::new()))
}

fn fail_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/FailResponse" }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let book_id_param = json!({
        "name": "bookId",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    });
    let payload_body = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookPayload" }
            }
        }
    });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "Every book as {id, name, publisher}",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "status": { "type": "string" },
                                            "data": {
                                                "type": "object",
                                                "properties": {
                                                    "books": {
                                                        "type": "array",
                                                        "items": { "$ref": "#/components/schemas/BookSummary" }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": payload_body.clone(),
                    "responses": {
                        "201": {
                            "description": "Book added; data.bookId holds the new id",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "status": { "type": "string" },
                                            "message": { "type": "string" },
                                            "data": {
                                                "type": "object",
                                                "properties": { "bookId": { "type": "string" } }
                                            }
                                        }
                                    }
                                }
                            }
                        },
                        "400": fail_response("Missing name or readPage greater than pageCount")
                    }
                }
            },
            "/{bookId}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param.clone()],
                    "responses": {
                        "200": {
                            "description": "Full book record under data.book",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "status": { "type": "string" },
                                            "data": {
                                                "type": "object",
                                                "properties": {
                                                    "book": { "$ref": "#/components/schemas/Book" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        },
                        "404": fail_response("Unknown book id")
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param.clone()],
                    "requestBody": payload_body,
                    "responses": {
                        "200": { "description": "Book updated" },
                        "400": fail_response("Missing name or readPage greater than pageCount"),
                        "404": fail_response("Unknown book id")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param],
                    "responses": {
                        "200": { "description": "Book deleted" },
                        "404": fail_response("Unknown book id")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "year": { "type": "integer" },
                        "author": { "type": "string" },
                        "summary": { "type": "string" },
                        "publisher": { "type": "string" },
                        "pageCount": { "type": "integer", "minimum": 0 },
                        "readPage": { "type": "integer", "minimum": 0 },
                        "finished": { "type": "boolean" },
                        "reading": { "type": "boolean" },
                        "insertedAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    },
                    "required": ["id", "name", "finished", "insertedAt", "updatedAt"]
                },
                "BookSummary": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "publisher": { "type": "string" }
                    },
                    "required": ["id", "name"]
                },
                "BookPayload": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "minLength": 1 },
                        "year": { "type": "integer" },
                        "author": { "type": "string" },
                        "summary": { "type": "string" },
                        "publisher": { "type": "string" },
                        "pageCount": { "type": "integer", "minimum": 0 },
                        "readPage": { "type": "integer", "minimum": 0 },
                        "reading": { "type": "boolean" }
                    },
                    "required": ["name"]
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_kernel::Settings;

    #[test]
    fn openapi_fragment_documents_every_operation() {
        let spec = openapi_fragment();
        for (path, method) in [
            ("/", "get"),
            ("/", "post"),
            ("/{bookId}", "get"),
            ("/{bookId}", "put"),
            ("/{bookId}", "delete"),
        ] {
            assert!(
                spec["paths"][path][method].is_object(),
                "{method} {path} undocumented"
            );
        }
    }

    #[tokio::test]
    async fn lifecycle_hooks_succeed() {
        let module = BooksModule::new(BookStore::new());
        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };

        module.init(&ctx).await.unwrap();
        module.start(&ctx).await.unwrap();
        module.stop().await.unwrap();
        assert_eq!(module.name(), "books");
        assert!(module.store().is_empty());
    }
}
