//! Purpose: Internal JSON parsing boundary shared by runtime callsites.
//! Exports: `parse` module with the payload decode helper.
//! Role: Single seam for payload decoding so callsites avoid ad hoc logic.
//! Invariants: Payload decoding goes through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub mod parse;
