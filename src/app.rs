//! Application module: exposes the browsing model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the loaded catalog, which
//! folder is open and where the cursor is.

mod model;

pub use model::*;
