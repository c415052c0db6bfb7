//! core/playback/mod.rs
//! Playback core: a dedicated engine thread speaking commands in,
//! events out. The GUI never touches rodio/symphonia directly.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use thiserror::Error;

mod decoder;
mod engine;

pub use engine::PlaybackEngine;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("failed to open audio file: {0}")]
    Open(#[from] std::io::Error),

    #[error("no audio output device: {0}")]
    Output(String),

    #[error("unsupported or corrupt audio stream: {0}")]
    Format(String),

    #[error("no supported audio track found")]
    NoTrack,

    #[error("seek failed: {0}")]
    Seek(String),
}

#[derive(Clone)]
pub struct PlaybackController {
    command_tx: Sender<PlayerCommand>,
}

impl PlaybackController {
    /// Best-effort send. If the engine died, the command is dropped.
    pub fn send(&self, cmd: PlayerCommand) {
        let _ = self.command_tx.send(cmd);
    }
}

#[derive(Debug)]
pub enum PlayerCommand {
    /// Load `path` and start playing from the beginning.
    PlayFile(PathBuf),
    Pause,
    Resume,
    Stop,
    /// Reopen the current source at this position (ms), preserving the
    /// pause/play state.
    Seek(u64),
    /// Applied to the live sink and remembered for future ones.
    SetVolume(f32),
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    /// Playback (re)started from `start_ms`; duration is known here when
    /// the container declares one.
    Started {
        path: PathBuf,
        duration_ms: Option<u64>,
        start_ms: u64,
    },
    Paused,
    Resumed,
    Stopped,
    Position {
        position_ms: u64,
    },
    TrackEnded,
    /// Non-fatal: the GUI logs it and playback stays paused/stopped.
    Error(String),
}

/// Spawns the playback thread and returns:
/// - a `PlaybackController` (store in GUI state)
/// - a `Receiver<PlayerEvent>` (drained by the GUI tick)
pub fn start_playback() -> (PlaybackController, Receiver<PlayerEvent>) {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();

    thread::spawn(move || {
        let mut engine = match PlaybackEngine::new(event_tx.clone()) {
            Ok(e) => e,
            Err(e) => {
                tracing::error!("playback engine failed to start: {e}");
                let _ = event_tx.send(PlayerEvent::Error(e.to_string()));
                return;
            }
        };

        engine.run(command_rx);
    });

    (PlaybackController { command_tx }, event_rx)
}
