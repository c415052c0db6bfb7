//! core/types.rs
//! Core data types shared between core logic and the UI.
//!
//! Rule of thumb:
//! - boring bags of data
//! - no GUI code, no filesystem code, no tag parsing code

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Stable per-load track identity. Assigned when a playlist is built,
/// never reused within one playlist.
pub type TrackId = u64;

/// Tag dialect a native frame was sourced from.
///
/// Variant order doubles as lookup priority: most-specific revision first,
/// so a `BTreeMap<TagDialect, _>` iterates v2.4 before v2.3 before v2.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TagDialect {
    Id3v24,
    Id3v23,
    Id3v22,
}

/// One frame as the tag stores it: identifier plus the text payload,
/// if the frame carries text at all (pictures and binary frames do not).
#[derive(Debug, Clone)]
pub struct NativeFrame {
    pub id: String,
    pub text: Option<String>,
}

/// All native frames of a file, keyed by dialect.
/// Iteration order is lookup priority (see [`TagDialect`]).
pub type NativeTags = BTreeMap<TagDialect, Vec<NativeFrame>>;

/// Technical audio parameters probed from the container.
/// Fields the container does not declare stay `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioInfo {
    pub duration_secs: Option<f64>,
    /// Average bitrate in kbit/s (file size over duration).
    pub bitrate_kbps: Option<u32>,
    pub sample_rate: Option<u32>,
    pub bits_per_sample: Option<u32>,
}

/// Cover image bytes plus their MIME type ("image/jpeg" etc).
#[derive(Clone)]
pub struct Artwork {
    pub data: Vec<u8>,
    pub mime: String,
}

impl std::fmt::Debug for Artwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Don't dump image bytes into logs.
        f.debug_struct("Artwork")
            .field("mime", &self.mime)
            .field("len", &self.data.len())
            .finish()
    }
}

/// One playlist entry: a file on disk plus everything we extracted from it.
///
/// Text fields are `Option` because tags may be missing entirely; display
/// fallbacks (filename stem, "Unknown Artist") belong to the UI layer.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: Option<TrackId>,

    pub path: PathBuf,

    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,

    pub info: AudioInfo,

    /// Current cover: first embedded picture at load time, possibly
    /// replaced later by the artwork-override flow.
    pub artwork: Option<Artwork>,

    /// Raw frames by dialect, kept for native-priority field lookup.
    pub native: NativeTags,
}
