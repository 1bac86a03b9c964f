//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* ring state and turns it into cells on the
//! terminal.  The projection math lives here too: the core never sees a
//! screen coordinate.

pub mod layout;
pub mod scene;
pub mod theme;
