//! Purpose: Define the stable public Rust API boundary for resplice.
//! Exports: Error types, span location, splicing, and payload decoding.
//! Role: Canonical import path for the CLI binary and integration tests.
//! Invariants: Surface is additive-only; internal module layout may shift.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind, LookupStage};
pub use crate::core::locate::{
    CLOSE_TOKEN, LOOKBACK_WINDOW, OPEN_TOKEN, Span, count_occurrences, locate, locate_tagged,
};
pub use crate::core::mutate::{replace_nearby_block, replace_tagged_block};
pub use crate::core::splice::{escape_single_quoted, serialize_payload, splice, splice_tagged};
pub use crate::json::parse::payload_from_str;
