//! I/O helpers for the form host.

pub mod config;
pub mod render;
pub mod script;
pub mod sink;
