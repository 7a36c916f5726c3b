//! Audio output.
//!
//! [`PlaybackSink`] is the contract the playback controller drives;
//! [`RodioSink`] implements it on top of a dedicated audio thread that owns
//! the output stream.

mod player;
mod thread;
mod types;

pub use player::RodioSink;
pub use types::{
    MediaErrorCode, PlaybackError, PlaybackSink, SinkEvent, clamp_volume, seek_position,
};
