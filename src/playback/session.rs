use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::catalog::FolderEntry;

/// Volume restored by unmuting when none was remembered.
pub const DEFAULT_VOLUME: f32 = 0.8;

/// What is playing right now. There is exactly one per player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    /// Folder the current track was started from.
    pub current_folder: Option<FolderEntry>,
    pub current_track: Option<String>,
    pub current_url: Option<String>,
    pub is_paused: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub volume: f32,
    pub(super) muted_volume: Option<f32>,
    pub(super) pending_advance: Option<Instant>,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self {
            current_folder: None,
            current_track: None,
            current_url: None,
            is_paused: true,
            position: Duration::ZERO,
            duration: None,
            volume: DEFAULT_VOLUME,
            muted_volume: None,
            pending_advance: None,
        }
    }
}

impl PlaybackSession {
    pub fn current_folder_name(&self) -> Option<&str> {
        self.current_folder.as_ref().map(|f| f.name())
    }

    /// Index of the current track within its folder.
    pub fn current_index(&self) -> Option<usize> {
        let folder = self.current_folder.as_ref()?;
        let track = self.current_track.as_deref()?;
        folder.audio_files().iter().position(|f| f.name == track)
    }

    /// True when `track` of `folder` is the current track.
    pub fn is_current(&self, folder: &str, track: &str) -> bool {
        self.current_folder_name() == Some(folder) && self.current_track.as_deref() == Some(track)
    }

    /// Fraction of the current track already played, when its length is known.
    pub fn progress(&self) -> Option<f64> {
        let total = self.duration?.as_secs_f64();
        if total <= 0.0 {
            return None;
        }
        Some((self.position.as_secs_f64() / total).clamp(0.0, 1.0))
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance.is_some()
    }
}

/// Index after `current` in a queue of `len`, wrapping around. Without a
/// current index the queue starts over.
pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        Some(i) => Some((i + 1) % len),
        None => Some(0),
    }
}

/// Index before `current` in a queue of `len`, wrapping around.
pub fn previous_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        Some(i) => Some((i + len - 1) % len),
        None => Some(0),
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub raised_at: Instant,
}

/// Pending user-facing messages, oldest first.
#[derive(Debug, Default)]
pub struct Notices {
    items: VecDeque<Notice>,
}

impl Notices {
    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push_back(Notice {
            message: message.into(),
            raised_at: Instant::now(),
        });
    }

    /// Drop messages older than `ttl`.
    pub fn prune(&mut self, now: Instant, ttl: Duration) {
        self.items
            .retain(|n| now.saturating_duration_since(n.raised_at) < ttl);
    }

    /// The newest message.
    pub fn latest(&self) -> Option<&Notice> {
        self.items.back()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.items.iter().map(|n| n.message.as_str()).collect()
    }
}
