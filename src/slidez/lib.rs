//! # Slidez Architecture
//!
//! Slidez edits, queries and exports remote slide presentations. Users address
//! slides by position; the remote service addresses everything by opaque
//! object ids. The library's job is to bridge the two: fetch a snapshot,
//! resolve positions against it, assemble an all-or-nothing batch of edits and
//! submit it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Snapshot → resolve ordinals → assemble batch → submit    │
//! │  - Built on ids, resolve, request and walker                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Service Layer (service/)                                   │
//! │  - DocumentService + FileService traits                     │
//! │  - Google HTTP backends, in-memory fakes for tests          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordinals Versus Ids
//!
//! A slide index is only meaningful against the snapshot it was read from.
//! Every command fetches its own snapshot right before assembling a batch and
//! throws it away afterwards; nothing is cached between invocations.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Remote calls block; there is no background work.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per area (slides, tables, text, notes, ...)
//! - [`service`]: Remote collaborators and their fakes
//! - [`model`]: Snapshot types
//! - [`request`]: Primitive edit operations and batches
//! - [`resolve`]: Slide ordinal resolution
//! - [`walker`]: Text extraction and search
//! - [`ids`]: Identifiers for new elements
//! - [`auth`]: OAuth client and token cache
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod init;
pub mod model;
pub mod request;
pub mod resolve;
pub mod service;
pub mod walker;
