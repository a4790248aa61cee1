//! # Frases Architecture
//!
//! Frases is a **read-mostly quotation library with an HTTP surface**. The
//! core components know nothing about HTTP; the router is a thin layer that
//! maps requests onto them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HTTP Layer (server.rs, routes.rs, wired by main.rs)        │
//! │  - Router assembly, extractors, status mapping              │
//! │  - The ONLY place that knows about axum types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌────────────────┐  ┌────────────────┐  ┌────────────────┐
//! │  QuoteStore    │  │ SubmissionQueue│  │  AccessGate    │
//! │  (store.rs)    │  │  (queue.rs)    │  │  (auth.rs)     │
//! │  Immutable     │  │  Append-only,  │  │  Bearer-token  │
//! │  snapshot,     │  │  atomic file   │  │  equality,     │
//! │  pure queries  │  │  persistence   │  │  nothing else  │
//! └────────────────┘  └────────────────┘  └────────────────┘
//! ```
//!
//! ## Key principles
//!
//! - **No globals**: the store, queue, and gate are constructed in `main`
//!   from an explicit [`config::Config`] and handed to the router as shared
//!   state. Tests build their own instances against temp files.
//! - **Immutable reads**: the quote snapshot never changes after load, so
//!   query operations are lock-free borrows.
//! - **One persistence boundary**: the queue's temp-write-then-rename is
//!   the only place service state touches disk.
//! - **Errors carry their status**: every failure is a [`error::FrasesError`]
//!   variant, and the HTTP mapping lives next to the error type.
//!
//! ## Module overview
//!
//! - [`model`]: Core data types (`Quote`, `NewSubmission`, `PendingSubmission`)
//! - [`store`]: The in-memory quote snapshot and its query operations
//! - [`queue`]: Durable submission queue with crash-safe appends
//! - [`auth`]: Shared-secret gate for the submit path
//! - [`config`]: Environment-derived configuration
//! - [`state`]: Shared handler state assembled at startup
//! - [`routes`] / [`server`]: The axum surface
//! - [`error`]: Error types and status mapping

pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod queue;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;
