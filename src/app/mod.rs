//! Application layer — event plumbing, shared state, and input handling.

pub mod event;
pub mod handler;
pub mod state;
