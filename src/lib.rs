//! Purpose: Shared core library crate used by the `resplice` CLI and tests.
//! Exports: `api` (stable surface), `core` (locate, splice, errors), `json`, `notice`.
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: Treat the crate API as internal until a dedicated library release.
//! Invariants: Core operations are pure functions of their inputs (no hidden state).
pub mod api;
pub mod core;
pub mod json;
pub mod notice;
