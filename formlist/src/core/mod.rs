//! Deterministic, pure logic for the record-list form.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! collections and return new values instead of mutating their inputs.

pub mod error;
pub mod error_store;
pub mod field_list;
pub mod invariants;
pub mod types;
pub mod validation;
