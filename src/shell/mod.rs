//! Shell integration helpers.
//!
//! The binary talks to the calling shell through **stdout**.  All TUI
//! rendering goes to the alternate screen (stderr-backed), so stdout is
//! reserved for the "result" — the product URL a confirmed click decided
//! to open.  A small wrapper function parses it and launches the browser.

pub mod integration;
