//! Store Module - application state
//!
//! Single owned holder for what the client currently knows.
//! Mutated by the coordinator only; everything else reads through accessors.
//!
//! Key types:
//! - `StateStore`: list, selection and cursor
//! - `PaginationCursor`: offset + fixed page size

mod state;

pub use state::{PaginationCursor, StateStore};
