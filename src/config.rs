//! Settings for the catalog, playback and the terminal UI.
//!
//! Defaults are layered under an optional `config.toml` and `TUNEDECK__*`
//! environment overrides; see `Settings::load`.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
