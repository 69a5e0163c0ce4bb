//! Dynamic record-list form with paired validation.
//!
//! The form keeps an ordered list of editable records and a parallel list of
//! per-field error messages, and decides when the list may be submitted. The
//! architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (record/error collections,
//!   validation rules, alignment checks). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting host pieces (config, submission sinks, text
//!   rendering, script parsing).
//!
//! [`form`], [`submit`] and [`session`] combine the core collections into the
//! stateful form the host talks to; [`run`] drives it from a script for the
//! CLI.

pub mod core;
pub mod exit_codes;
pub mod form;
pub mod io;
pub mod logging;
pub mod run;
pub mod session;
pub mod submit;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
