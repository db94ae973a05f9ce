//! Bookshelf application library
//!
//! Wires the project modules into the kernel registry and runs the HTTP server.

use anyhow::Context;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub mod modules;
pub mod utils;

/// Re-export commonly used types
pub use modules::*;

/// Registry with every project module registered
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Run the full module lifecycle around the HTTP server
pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    let registry = build_registry();
    let ctx = InitCtx { settings };

    registry
        .init_all(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_all(&ctx)
        .await
        .context("module start failed")?;

    let served = bookshelf_http::start_server(&registry, settings).await;

    registry
        .stop_all()
        .await
        .context("module shutdown failed")?;
    served
}
