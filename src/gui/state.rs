//! GUI state + messages.
//! Pure data definitions used by update/ + view/.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use crate::core::playback::{PlaybackController, PlayerEvent};
use crate::core::types::{Artwork, Track, TrackId};

/// Preview lifecycle inside the artwork dialog.
#[derive(Debug, Default)]
pub(crate) enum ArtworkPreview {
    #[default]
    Idle,
    Loading,
    /// Fetched and decoded; may be accepted.
    Ready {
        artwork: Artwork,
        handle: iced::widget::image::Handle,
    },
    Failed(String),
}

/// Modal state for the artwork-override flow.
#[derive(Debug)]
pub(crate) struct ArtworkDialog {
    /// Track whose cover gets replaced on Apply.
    pub target: TrackId,
    pub url_input: String,
    /// Bumped whenever the URL changes; responses carrying an older
    /// sequence number are stale and get dropped.
    pub request_seq: u64,
    pub preview: ArtworkPreview,
}

impl ArtworkDialog {
    pub fn new(target: TrackId) -> Self {
        Self {
            target,
            url_input: String::new(),
            request_seq: 0,
            preview: ArtworkPreview::Idle,
        }
    }
}

/// App state
pub(crate) struct Cadenza {
    pub status: String,
    pub loading: bool,

    // File queue (files or folders, loaded into the playlist on demand)
    pub path_input: String,
    pub queue: Vec<PathBuf>,

    // Playlist
    pub tracks: Vec<Track>,
    pub selected_track: Option<TrackId>,

    // Playback
    pub now_playing: Option<TrackId>,
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
    /// Some while the user drags the seek slider; committed on release.
    pub seek_preview_ratio: Option<f32>,
    pub volume: f32,

    pub playback: Option<PlaybackController>,
    pub playback_events: Option<RefCell<Receiver<PlayerEvent>>>,

    // Cover cache, keyed by TrackId. Fed from embedded art on selection
    // and refreshed by artwork overrides.
    pub cover_cache: BTreeMap<TrackId, iced::widget::image::Handle>,

    // Artwork override modal (occupies the right pane while open)
    pub artwork_dialog: Option<ArtworkDialog>,
}

impl Default for Cadenza {
    fn default() -> Self {
        Self {
            status: "Queue files or folders, then Load.".to_string(),
            loading: false,

            path_input: String::new(),
            queue: Vec::new(),

            tracks: Vec::new(),
            selected_track: None,

            now_playing: None,
            is_playing: false,
            position_ms: 0,
            duration_ms: None,
            seek_preview_ratio: None,
            volume: 1.0,

            playback: None,
            playback_events: None,

            cover_cache: BTreeMap::new(),

            artwork_dialog: None,
        }
    }
}

impl Cadenza {
    /// Initial state from the command line: pre-queued paths and an
    /// optional starting volume.
    pub fn with_startup(paths: &[PathBuf], volume: Option<f32>) -> Self {
        let mut state = Self::default();
        state.queue = paths.to_vec();
        if let Some(v) = volume {
            state.volume = v.clamp(0.0, 1.0);
        }
        if !state.queue.is_empty() {
            state.status = format!("{} path(s) queued. Load to build the playlist.", state.queue.len());
        }
        state
    }

    pub fn track_by_id(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == Some(id))
    }

    pub fn track_by_id_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == Some(id))
    }

    pub fn index_of_id(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == Some(id))
    }

    /// The track shown in the now-playing pane: selection wins, else
    /// whatever is playing.
    pub fn shown_track(&self) -> Option<&Track> {
        self.selected_track
            .or(self.now_playing)
            .and_then(|id| self.track_by_id(id))
    }
}

/// Message = "something happened".
#[derive(Debug, Clone)]
pub(crate) enum Message {
    TickPlayback,

    // File queue
    PathInputChanged(String),
    AddPathPressed,
    RemovePath(usize),

    // Playlist loading
    LoadPlaylist,
    LoadFinished(Result<Vec<Track>, String>),

    // Selection
    SelectTrack(TrackId),

    // Transport
    TogglePlayPause,
    Next,
    Prev,

    // Seek: preview vs commit
    SeekTo(f32),
    SeekCommit,

    SetVolume(f32),

    // Artwork override
    OpenArtworkDialog,
    ArtworkUrlChanged(String),
    RequestArtworkPreview,
    ArtworkPreviewLoaded(u64, Result<Artwork, String>),
    ApplyArtwork,
    CloseArtworkDialog,
}
