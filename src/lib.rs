//! Purpose: Library crate backing the `doubler` CLI and its tests.
//! Exports: `error` (error model), `transform` (value doubling), `response` (pipeline + JSON line).
//! Role: Keeps all behavior testable without spawning the binary.
//! Invariants: Modules take explicit inputs and hold no global state.
pub mod error;
mod json;
pub mod response;
pub mod transform;

pub use error::{Error, ErrorKind, to_exit_code};
pub use response::{process, render_line};
pub use transform::{GREETING, OutputRecord, transform};
