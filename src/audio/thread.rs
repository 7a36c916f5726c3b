use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, warn};
use rodio::{OutputStreamBuilder, Sink};

use super::types::{AudioCmd, PlaybackError, SinkEvent, TaggedEvent};

/// How often position updates are published while playing.
const TICK: Duration = Duration::from_millis(250);

/// Spawn the thread that owns the output stream and the single `Sink`.
///
/// `ready` receives the outcome of opening the output device before any
/// command is processed.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<TaggedEvent>,
    ready: Sender<Result<(), PlaybackError>>,
    initial_volume: f32,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => {
                let _ = ready.send(Ok(()));
                stream
            }
            Err(e) => {
                let _ = ready.send(Err(PlaybackError::Device(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut duration: Option<Duration> = None;
        let mut playing = false;
        let mut volume = initial_volume;
        let mut current_generation = 0u64;
        let report = |generation: u64, event: SinkEvent| {
            let _ = events.send((generation, event));
        };

        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load {
                        media,
                        duration: media_duration,
                        generation,
                    } => {
                        if let Some(old) = sink.take() {
                            old.stop();
                        }
                        let new_sink = Sink::connect_new(stream.mixer());
                        new_sink.pause();
                        new_sink.set_volume(volume);
                        new_sink.append(media);

                        sink = Some(new_sink);
                        duration = media_duration;
                        playing = false;
                        current_generation = generation;
                        report(
                            current_generation,
                            SinkEvent::TimeUpdate {
                                current: Duration::ZERO,
                                duration,
                            },
                        );
                    }

                    AudioCmd::Stop => {
                        if let Some(old) = sink.take() {
                            old.stop();
                        }
                        duration = None;
                        playing = false;
                    }

                    AudioCmd::Play => {
                        if let Some(ref s) = sink {
                            s.play();
                            playing = true;
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(ref s) = sink {
                            s.pause();
                            playing = false;
                        }
                    }

                    AudioCmd::Seek(pos) => {
                        if let Some(ref s) = sink {
                            match s.try_seek(pos) {
                                Ok(()) => report(
                                    current_generation,
                                    SinkEvent::TimeUpdate {
                                        current: s.get_pos(),
                                        duration,
                                    },
                                ),
                                Err(e) => warn!("Seek to {pos:?} failed: {e}"),
                            }
                        }
                    }

                    AudioCmd::SetVolume(v) => {
                        volume = v;
                        if let Some(ref s) = sink {
                            s.set_volume(v);
                        }
                    }

                    AudioCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // periodic position report and end-of-track check
                    let Some(ref s) = sink else {
                        continue;
                    };
                    if !playing {
                        continue;
                    }
                    if s.empty() {
                        debug!("Source played to its end");
                        playing = false;
                        report(current_generation, SinkEvent::Ended);
                    } else {
                        report(
                            current_generation,
                            SinkEvent::TimeUpdate {
                                current: s.get_pos(),
                                duration,
                            },
                        );
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
