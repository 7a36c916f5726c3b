use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::audio::{MediaErrorCode, PlaybackSink, SinkEvent, clamp_volume};
use crate::catalog::{FolderEntry, file_name_from_path};
use crate::config::PlaybackSettings;
use crate::source::MediaSource;

use super::label::track_label;
use super::resolver::{ResolveError, last_resort_url, resolve_playable_url};
use super::session::{DEFAULT_VOLUME, Notices, PlaybackSession, next_index, previous_index};

#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("no track selected")]
    NoTrack,
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("could not fetch `{url}`")]
    Fetch { url: String },
}

/// Drives one sink from user actions and sink notifications.
///
/// The player owns the session; every change to what is playing goes
/// through it. Failures are recorded as [`Notices`] for the front end.
pub struct Player<K> {
    sink: K,
    session: PlaybackSession,
    notices: Notices,
    settings: PlaybackSettings,
}

impl<K: PlaybackSink> Player<K> {
    pub fn new(mut sink: K, settings: PlaybackSettings) -> Self {
        let session = PlaybackSession {
            volume: clamp_volume(settings.volume),
            ..PlaybackSession::default()
        };
        sink.set_volume(session.volume);
        Self {
            sink,
            session,
            notices: Notices::default(),
            settings,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    #[cfg(test)]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    #[cfg(test)]
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Resolve, fetch and load track `index` of `folder`, replacing whatever
    /// was loaded. The session is left alone when the track cannot be found.
    /// A track that is found but cannot be fetched still becomes current and
    /// is skipped like one the sink failed to play.
    pub async fn play<S: MediaSource>(
        &mut self,
        source: &S,
        folder: &FolderEntry,
        index: usize,
    ) -> Result<(), PlayError> {
        let Some(track) = folder.audio_files().get(index) else {
            self.notices.push("No track selected");
            return Err(PlayError::NoTrack);
        };
        let label = track_label(&track.name);
        info!("Attempting to play: {}", label.clean_name);

        let url = match resolve_playable_url(source, track, folder.path()).await {
            Ok(url) => url,
            Err(e) => {
                warn!("{e}");
                self.notices.push(format!(
                    "File not found: {}. Trying simple path...",
                    label.clean_name
                ));
                let guess = last_resort_url(track, folder.path());
                let accepted = self.settings.unverified_fallback
                    || matches!(source.exists(&guess).await, Ok(true));
                if !accepted {
                    self.notices.push(format!(
                        "Could not find file: {}",
                        file_name_from_path(&track.name)
                    ));
                    return Err(e.into());
                }
                guess
            }
        };

        let fetched = match source.fetch(&url).await {
            Ok(Some(media)) => Some(media),
            Ok(None) => {
                warn!("{url} vanished before it could be fetched");
                None
            }
            Err(e) => {
                warn!("Fetching {url} failed: {e}");
                None
            }
        };

        self.sink.pause();
        // Notifications still queued belong to the source being replaced.
        while self.sink.poll_event().is_some() {}

        self.session.current_folder = Some(folder.clone());
        self.session.current_track = Some(track.name.clone());
        self.session.current_url = Some(url.clone());
        self.session.position = Duration::ZERO;
        self.session.duration = None;
        self.session.pending_advance = None;
        self.session.is_paused = true;

        let Some(media) = fetched else {
            self.sink.stop();
            self.handle_event(SinkEvent::Error(MediaErrorCode::Network), Instant::now());
            return Err(PlayError::Fetch { url });
        };
        debug!("Fetched {} bytes from {url}", media.len());
        self.sink.load(&url, media);

        if self.settings.autoplay {
            match self.sink.play() {
                Ok(()) => self.session.is_paused = false,
                // Stays paused until the user asks to play.
                Err(e) => debug!("Playback deferred: {e}"),
            }
        }
        Ok(())
    }

    /// Play the track after the current one, wrapping around. `browsing` is
    /// used when nothing has been played yet.
    pub async fn next<S: MediaSource>(
        &mut self,
        source: &S,
        browsing: Option<&FolderEntry>,
    ) -> Result<(), PlayError> {
        self.step(source, browsing, next_index).await
    }

    /// Play the track before the current one, wrapping around.
    pub async fn previous<S: MediaSource>(
        &mut self,
        source: &S,
        browsing: Option<&FolderEntry>,
    ) -> Result<(), PlayError> {
        self.step(source, browsing, previous_index).await
    }

    async fn step<S: MediaSource>(
        &mut self,
        source: &S,
        browsing: Option<&FolderEntry>,
        pick: fn(Option<usize>, usize) -> Option<usize>,
    ) -> Result<(), PlayError> {
        let folder = match (&self.session.current_folder, browsing) {
            (Some(f), _) => f.clone(),
            (None, Some(f)) => f.clone(),
            (None, None) => {
                self.notices.push("No songs available");
                return Err(PlayError::NoTrack);
            }
        };

        let current = self.session.current_index();
        let Some(index) = pick(current, folder.audio_files().len()) else {
            self.notices.push("No songs available");
            return Err(PlayError::NoTrack);
        };
        self.play(source, &folder, index).await
    }

    /// Play or pause. With nothing loaded, starts the first track of
    /// `browsing`.
    pub async fn toggle_pause<S: MediaSource>(
        &mut self,
        source: &S,
        browsing: Option<&FolderEntry>,
    ) -> Result<(), PlayError> {
        if self.session.current_url.is_none() {
            return match browsing {
                Some(folder) if !folder.audio_files().is_empty() => {
                    self.play(source, folder, 0).await
                }
                _ => {
                    self.notices.push("No song selected");
                    Err(PlayError::NoTrack)
                }
            };
        }

        if self.session.is_paused {
            match self.sink.play() {
                Ok(()) => self.session.is_paused = false,
                Err(e) => {
                    warn!("Playback error: {e}");
                    self.notices.push("Could not play audio");
                }
            }
        } else {
            self.sink.pause();
            self.session.is_paused = true;
        }
        Ok(())
    }

    /// Jump to `fraction` of the current track.
    pub fn seek_to(&mut self, fraction: f64) {
        if self.session.current_url.is_none() || self.session.duration.is_none() {
            return;
        }
        self.sink.seek(fraction.clamp(0.0, 1.0));
    }

    /// Move by `delta` (a fraction of the track, may be negative).
    pub fn seek_by(&mut self, delta: f64) {
        if let Some(progress) = self.session.progress() {
            self.seek_to(progress + delta);
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = clamp_volume(volume);
        self.session.volume = volume;
        if volume > 0.0 {
            self.session.muted_volume = None;
        }
        self.sink.set_volume(volume);
    }

    pub fn change_volume(&mut self, delta: f32) {
        self.set_volume(self.session.volume + delta);
    }

    /// Mute, or restore the volume from before muting.
    pub fn toggle_mute(&mut self) {
        if self.session.volume > 0.0 {
            let previous = self.session.volume;
            self.set_volume(0.0);
            self.session.muted_volume = Some(previous);
        } else {
            let restore = self.session.muted_volume.take().unwrap_or(DEFAULT_VOLUME);
            self.set_volume(restore);
        }
    }

    /// Apply one sink notification. End of track schedules an immediate
    /// advance; an error schedules one after the configured delay.
    pub fn handle_event(&mut self, event: SinkEvent, now: Instant) {
        match event {
            SinkEvent::TimeUpdate { current, duration } => {
                self.session.position = current;
                if duration.is_some() {
                    self.session.duration = duration;
                }
            }
            SinkEvent::Ended => {
                debug!("Audio ended");
                self.session.is_paused = true;
                self.session.pending_advance = Some(now);
            }
            SinkEvent::Error(code) => {
                let name = self
                    .session
                    .current_track
                    .as_deref()
                    .map(|t| track_label(t).clean_name)
                    .unwrap_or_default();
                warn!(
                    "Audio error {code:?} ({})",
                    self.session.current_url.as_deref().unwrap_or("no source")
                );
                self.notices
                    .push(format!("Could not play: {name}. Trying next song..."));
                self.session.is_paused = true;
                self.session.pending_advance =
                    Some(now + Duration::from_millis(self.settings.error_advance_ms));
            }
        }
    }

    /// Drain every pending sink notification.
    pub fn pump_events(&mut self, now: Instant) {
        while let Some(event) = self.sink.poll_event() {
            self.handle_event(event, now);
        }
    }

    /// True once a scheduled advance is due; clears it.
    pub fn take_due_advance(&mut self, now: Instant) -> bool {
        match self.session.pending_advance {
            Some(at) if now >= at => {
                self.session.pending_advance = None;
                true
            }
            _ => false,
        }
    }
}
