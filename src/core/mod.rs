//! Pure carousel core — catalog data, layout, interaction, and placement math.
//!
//! Nothing in this module depends on any TUI or rendering crate, so the
//! whole ring (sizing, rotation, hit semantics) is unit-testable without a
//! host.  The `ui` and `app` modules are thin adapters over this.

pub mod catalog;
pub mod layout;
pub mod placement;
pub mod ring;
pub mod viewport;
