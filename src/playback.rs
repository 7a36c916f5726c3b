//! Playback control.
//!
//! The [`Player`] owns the single [`PlaybackSession`], resolves a track to a
//! playable address through the [`resolver`] and drives a
//! [`PlaybackSink`](crate::audio::PlaybackSink). Display helpers for tracks
//! live in [`label`].

mod controller;
pub mod label;
pub mod resolver;
mod session;

pub use controller::{PlayError, Player};
pub use label::{TrackLabel, format_time, track_label};
pub use resolver::{ResolveError, candidate_urls, last_resort_url, resolve_playable_url};
pub use session::{DEFAULT_VOLUME, Notice, Notices, PlaybackSession, next_index, previous_index};
