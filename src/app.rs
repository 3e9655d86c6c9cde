//! Application module: exposes the view model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the library view,
//! search filter, gesture state and the displayed slider values.

mod model;

pub use model::*;
