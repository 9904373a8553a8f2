//! Purpose: Internal JSON parsing boundary for command-line input.
//! Exports: `parse` module with decode and failure-classification helpers.
//! Role: Single seam for parser details so callsites avoid ad hoc decode logic.
//! Invariants: Raw input text is decoded only through this module.

pub(crate) mod parse;
