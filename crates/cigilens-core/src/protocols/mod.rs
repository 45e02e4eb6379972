//! Protocol decoding modules.
//!
//! The CIGI module follows a layered structure:
//! - `layout`: byte offsets, field tables and size rules (source of truth)
//! - `reader`: safe byte access
//! - `parser`: table-driven layer decoding (no direct byte indexing)
//! - `encoder`: inverse transform for round-trip use
//! - `error`: explicit, actionable framing errors
//!
//! Parsers are pure and contain no I/O; sources and the decode layer handle
//! buffer acquisition and aggregation.

pub mod cigi;
