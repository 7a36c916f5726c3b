//! Audio-related small types.
//!
//! This module defines the playback sink contract, the notifications a sink
//! reports and the commands understood by the audio thread.

use std::io::Cursor;
use std::time::Duration;

use rodio::Decoder;

/// Decoded media handed to the audio thread.
pub(super) type MediaSource = Decoder<Cursor<Vec<u8>>>;

/// A notification paired with the load it belongs to.
pub(super) type TaggedEvent = (u64, SinkEvent);

/// Commands understood by the audio thread.
pub(super) enum AudioCmd {
    /// Replace the current source with `media`, paused at the start.
    /// Events about it are tagged with `generation`.
    Load {
        media: MediaSource,
        duration: Option<Duration>,
        generation: u64,
    },
    /// Drop the current source without loading another.
    Stop,
    Play,
    Pause,
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    SetVolume(f32),
    Quit,
}

/// Why a source could not be played, numbered like the media element codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaErrorCode {
    Aborted = 1,
    Network = 2,
    SrcNotSupported = 4,
}

/// Notifications reported by a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    /// Playback position moved.
    TimeUpdate {
        current: Duration,
        duration: Option<Duration>,
    },
    /// The source played to its end.
    Ended,
    /// The source failed while loading or playing.
    Error(MediaErrorCode),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("no source loaded")]
    NoSource,
    #[error("source cannot be decoded")]
    InvalidSource,
    #[error("audio output unavailable: {0}")]
    Device(String),
}

/// The audio output. Exactly one source is loaded at a time; loading
/// replaces whatever was there.
pub trait PlaybackSink {
    /// Replace the current source. Failures are reported as an `Error` event
    /// and by the next `play`.
    fn load(&mut self, url: &str, media: Vec<u8>);
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    /// Drop the current source. Pending notifications about it are discarded.
    fn stop(&mut self);
    /// Jump to `fraction` (`0.0..=1.0`) of the current source. Ignored when
    /// the length is unknown.
    fn seek(&mut self, fraction: f64);
    /// Output volume, `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
    /// Next pending notification, without blocking.
    fn poll_event(&mut self) -> Option<SinkEvent>;
}

/// Position for `fraction` of `duration`, clamped to the source.
pub fn seek_position(fraction: f64, duration: Duration) -> Duration {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    duration.mul_f64(fraction)
}

pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
