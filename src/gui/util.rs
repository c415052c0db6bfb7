//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

use std::path::Path;

use crate::core::types::Track;

/// Gets filename without extension, used as a fallback title.
/// Ex: 'song.mp3' -> 'song'
pub(crate) fn filename_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown Title")
        .to_string()
}

/// Title for display: tag title, else the filename stem.
pub(crate) fn display_title(track: &Track) -> String {
    track
        .title
        .clone()
        .unwrap_or_else(|| filename_stem(&track.path))
}

pub(crate) fn display_artist(track: &Track) -> String {
    track
        .artist
        .clone()
        .unwrap_or_else(|| "Unknown Artist".to_string())
}

pub(crate) fn display_album(track: &Track) -> String {
    track
        .album
        .clone()
        .unwrap_or_else(|| "Unknown Album".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AudioInfo, NativeTags};
    use std::path::PathBuf;

    fn bare_track(path: &str) -> Track {
        Track {
            id: None,
            path: PathBuf::from(path),
            title: None,
            artist: None,
            album: None,
            info: AudioInfo::default(),
            artwork: None,
            native: NativeTags::new(),
        }
    }

    #[test]
    fn title_falls_back_to_filename_stem() {
        let track = bare_track("/music/late night drive.mp3");
        assert_eq!(display_title(&track), "late night drive");
    }

    #[test]
    fn tagged_title_wins_over_filename() {
        let mut track = bare_track("/music/track01.mp3");
        track.title = Some("Actual Name".into());
        assert_eq!(display_title(&track), "Actual Name");
    }

    #[test]
    fn missing_artist_and_album_get_placeholders() {
        let track = bare_track("/music/x.mp3");
        assert_eq!(display_artist(&track), "Unknown Artist");
        assert_eq!(display_album(&track), "Unknown Album");
    }
}
