use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, warn};
use rodio::{Decoder, Source};

use super::thread::spawn_audio_thread;
use super::types::{
    AudioCmd, MediaErrorCode, PlaybackError, PlaybackSink, SinkEvent, TaggedEvent, clamp_volume,
    seek_position,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Loaded {
    Nothing,
    Ready,
    Invalid,
}

/// Sink backed by the default audio output device.
pub struct RodioSink {
    tx: Sender<AudioCmd>,
    events: Receiver<TaggedEvent>,
    local_events: VecDeque<SinkEvent>,
    loaded: Loaded,
    /// Bumped on every load and stop; older events are dropped.
    generation: u64,
    duration: Option<Duration>,
    join: Option<JoinHandle<()>>,
}

impl RodioSink {
    /// Open the default output device.
    pub fn open(initial_volume: f32) -> Result<Self, PlaybackError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<TaggedEvent>();
        let (ready_tx, ready_rx) = mpsc::channel();

        let join = spawn_audio_thread(rx, event_tx, ready_tx, clamp_volume(initial_volume));
        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                return Err(PlaybackError::Device(
                    "audio thread exited during startup".to_string(),
                ));
            }
        }

        Ok(Self {
            tx,
            events: event_rx,
            local_events: VecDeque::new(),
            loaded: Loaded::Nothing,
            generation: 0,
            duration: None,
            join: Some(join),
        })
    }

    /// Forget everything reported about the previous source.
    fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.local_events.clear();
        self.generation
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), PlaybackError> {
        self.tx
            .send(cmd)
            .map_err(|_| PlaybackError::Device("audio thread stopped".to_string()))
    }
}

impl PlaybackSink for RodioSink {
    fn load(&mut self, url: &str, media: Vec<u8>) {
        let generation = self.next_generation();
        match Decoder::new(Cursor::new(media)) {
            Ok(decoder) => {
                let duration = decoder.total_duration();
                debug!("Loaded {url} ({duration:?})");
                self.duration = duration;
                self.loaded = Loaded::Ready;
                if let Err(e) = self.send(AudioCmd::Load {
                    media: decoder,
                    duration,
                    generation,
                }) {
                    warn!("Could not hand {url} to the audio thread: {e}");
                    self.loaded = Loaded::Invalid;
                    self.local_events
                        .push_back(SinkEvent::Error(MediaErrorCode::Aborted));
                }
            }
            Err(e) => {
                warn!("Cannot decode {url}: {e}");
                self.duration = None;
                self.loaded = Loaded::Invalid;
                let _ = self.send(AudioCmd::Stop);
                self.local_events
                    .push_back(SinkEvent::Error(MediaErrorCode::SrcNotSupported));
            }
        }
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        match self.loaded {
            Loaded::Nothing => Err(PlaybackError::NoSource),
            Loaded::Invalid => Err(PlaybackError::InvalidSource),
            Loaded::Ready => self.send(AudioCmd::Play),
        }
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn stop(&mut self) {
        self.next_generation();
        self.duration = None;
        self.loaded = Loaded::Nothing;
        let _ = self.send(AudioCmd::Stop);
    }

    fn seek(&mut self, fraction: f64) {
        if let Some(duration) = self.duration {
            let _ = self.send(AudioCmd::Seek(seek_position(fraction, duration)));
        }
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.send(AudioCmd::SetVolume(clamp_volume(volume)));
    }

    fn poll_event(&mut self) -> Option<SinkEvent> {
        if let Some(event) = self.local_events.pop_front() {
            return Some(event);
        }
        next_current_event(&self.events, self.generation)
    }
}

/// Next event tagged with `generation`. Events left over from earlier loads
/// are dropped.
pub(super) fn next_current_event(
    events: &Receiver<TaggedEvent>,
    generation: u64,
) -> Option<SinkEvent> {
    while let Ok((tag, event)) = events.try_recv() {
        if tag == generation {
            return Some(event);
        }
        debug!("Dropping {event:?} from load {tag}");
    }
    None
}

impl Drop for RodioSink {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}
