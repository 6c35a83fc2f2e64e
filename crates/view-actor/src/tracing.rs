//! # Observability & Tracing
//!
//! Structured logging for actor-driven views.
//!
//! The actor loop logs every request with the model's type name (`model_type`), full intent
//! payloads at `debug` level and handler failures at `warn`. Models add their own fields
//! (`query`, `page`, `token`, ...).
//!
//! ```bash
//! RUST_LOG=info movie-discovery       # lifecycle, fetches issued and applied
//! RUST_LOG=debug movie-discovery      # every intent with its payload
//! RUST_LOG=view_actor=trace movie-discovery   # debounce scheduling
//! ```

/// Initializes the tracing subscriber.
///
/// Filtering follows `RUST_LOG`. The compact format hides module paths; spans show inline
/// (e.g. `next_page:dispatch`).
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
