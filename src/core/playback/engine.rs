//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink (per current track; seek replaces it)
//! - command loop + periodic position ticks
//!
//! Seeking reopens the symphonia source at the target position and swaps
//! in a fresh sink, keeping the pause/play state. Volume is remembered
//! here so every new sink starts at the last requested level.
//!
//! Emits PlayerEvent back via a channel. No Iced imports.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use super::decoder::open_source_at_ms;
use super::{PlaybackError, PlayerCommand, PlayerEvent};

const TICK_MS: u64 = 200;

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine!
    stream: OutputStream,

    // Current playback
    sink: Option<Sink>,
    current_path: Option<PathBuf>,
    duration_ms: Option<u64>,
    /// Position of the current sink's first sample; nonzero after a seek.
    base_ms: u64,
    paused: bool,

    /// Last requested volume, applied to every sink we create.
    volume: f32,

    // Event channel
    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<PlayerEvent>) -> Result<Self, PlaybackError> {
        // rodio 0.21.x: build/open the default output stream via OutputStreamBuilder
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Output(e.to_string()))?;

        Ok(Self {
            stream,
            sink: None,
            current_path: None,
            duration_ms: None,
            base_ms: 0,
            paused: false,
            volume: 1.0,
            event_tx,
        })
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>) {
        let tick = Duration::from_millis(TICK_MS);

        loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            return;
                        }
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.stop_internal();
    }

    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        match cmd {
            PlayerCommand::PlayFile(path) => {
                if let Err(e) = self.open_at(path, 0, false) {
                    let _ = self.event_tx.send(PlayerEvent::Error(e.to_string()));
                }
            }
            PlayerCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                    self.paused = true;
                    let _ = self.event_tx.send(PlayerEvent::Paused);
                }
            }
            PlayerCommand::Resume => {
                if let Some(sink) = &self.sink {
                    sink.play();
                    self.paused = false;
                    let _ = self.event_tx.send(PlayerEvent::Resumed);
                }
            }
            PlayerCommand::Stop => {
                self.stop_internal();
                let _ = self.event_tx.send(PlayerEvent::Stopped);
            }
            PlayerCommand::Seek(ms) => {
                let Some(path) = self.current_path.clone() else {
                    return false;
                };
                let keep_paused = self.paused;
                if let Err(e) = self.open_at(path, ms, keep_paused) {
                    let _ = self
                        .event_tx
                        .send(PlayerEvent::Error(PlaybackError::Seek(e.to_string()).to_string()));
                }
            }
            PlayerCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        if let Some(sink) = &self.sink {
            let position_ms = self.base_ms + sink.get_pos().as_millis() as u64;
            let _ = self.event_tx.send(PlayerEvent::Position { position_ms });

            if sink.empty() && self.current_path.is_some() && !self.paused {
                let _ = self.event_tx.send(PlayerEvent::TrackEnded);
                self.stop_internal();
            }
        }
    }

    /// Open `path` at `start_ms` on a fresh sink. Used for both initial
    /// playback (start 0, playing) and seeks (preserving paused state).
    fn open_at(&mut self, path: PathBuf, start_ms: u64, paused: bool) -> Result<(), PlaybackError> {
        self.stop_internal();

        // rodio 0.21.x: Sink is created from the stream's mixer
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);

        let (source, duration_ms) = open_source_at_ms(&path, start_ms)?;

        sink.append(source);
        if paused {
            sink.pause();
        } else {
            sink.play();
        }

        debug!(
            path = %path.display(),
            start_ms,
            ?duration_ms,
            paused,
            "source opened"
        );

        self.duration_ms = duration_ms;
        self.base_ms = start_ms;
        self.paused = paused;
        self.current_path = Some(path.clone());
        self.sink = Some(sink);

        let _ = self.event_tx.send(PlayerEvent::Started {
            path,
            duration_ms,
            start_ms,
        });

        Ok(())
    }

    fn stop_internal(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current_path = None;
        self.duration_ms = None;
        self.base_ms = 0;
        self.paused = false;
    }
}
