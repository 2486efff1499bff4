//! # Tracing Setup
//!
//! Every store actor logs with structured fields instead of formatted strings:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `entity_type` | Short type name of the store (`Book`, `Comment`, ...) |
//! | `id` | Record id, rendered with `Display` (`book_3`) |
//! | `size` | Number of records held after the operation |
//! | `params` / `update` | Payloads, rendered with `Debug` at `debug` level |
//!
//! With `RUST_LOG=info` only lifecycle and write events show up; `RUST_LOG=debug` adds every
//! read and the full payloads.

/// Initializes the tracing/logging infrastructure for the application.
///
/// Uses `RUST_LOG` for filtering (defaulting to `info`), compact formatting and no module
/// targets, so each line reads as `LEVEL message field=value ...`.
///
/// Calling it twice is harmless: the second call leaves the installed subscriber in place.
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
