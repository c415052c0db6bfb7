//! gui/update/load.rs
//! Playlist loading: queue -> paths -> metadata workers -> playlist.
//!
//! All-or-nothing: if any file in the batch fails to extract, the user
//! gets a generic failure message and an EMPTY playlist. No partial
//! results.

use iced::Task;
use tracing::{info, warn};

use crate::core;

use super::super::state::{Cadenza, Message};
use super::playback;
use super::util::spawn_blocking;
use crate::core::types::Track;

pub(crate) fn load_playlist(state: &mut Cadenza) -> Task<Message> {
    if state.loading {
        return Task::none();
    }

    if state.queue.is_empty() {
        state.status = "Nothing queued. Add files or folders first.".into();
        return Task::none();
    }

    state.loading = true;
    state.status = "Loading...".to_string();

    let queue = state.queue.clone();

    Task::perform(
        spawn_blocking(move || {
            let paths = core::collect_audio_paths(&queue).map_err(|e| e.to_string())?;
            if paths.is_empty() {
                return Err("no audio files found".to_string());
            }
            core::load_tracks(paths).map_err(|e| e.to_string())
        }),
        Message::LoadFinished,
    )
}

pub(crate) fn load_finished(
    state: &mut Cadenza,
    result: Result<Vec<Track>, String>,
) -> Task<Message> {
    state.loading = false;

    match result {
        Ok(mut tracks) => {
            assign_track_ids(&mut tracks);
            info!(count = tracks.len(), "playlist loaded");

            state.status = format!("Loaded {} tracks.", tracks.len());
            state.tracks = tracks;
        }
        Err(e) => {
            // Detail goes to the log; the user gets a generic message and
            // an empty playlist rather than a partial one.
            warn!("playlist load failed: {e}");
            state.status = "Could not load playlist.".into();
            state.tracks.clear();
        }
    }

    // Either way the old playlist is gone: selection, covers and any
    // in-flight playback refer to ids that no longer exist.
    state.selected_track = None;
    state.now_playing = None;
    state.cover_cache.clear();
    state.artwork_dialog = None;
    playback::stop(state)
}

/// Per-load ids, deterministic and stable within one playlist.
fn assign_track_ids(tracks: &mut [Track]) {
    let mut next: u64 = 1;

    for t in tracks.iter_mut() {
        if t.id.is_none() {
            t.id = Some(next);
            next += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AudioInfo, NativeTags};
    use std::path::PathBuf;

    fn track(path: &str) -> Track {
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
    fn ids_are_assigned_in_order() {
        let mut tracks = vec![track("/a.mp3"), track("/b.mp3"), track("/c.mp3")];
        assign_track_ids(&mut tracks);
        let ids: Vec<_> = tracks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn successful_load_replaces_the_playlist() {
        let mut state = Cadenza::default();
        state.loading = true;
        state.selected_track = Some(7);

        let _ = load_finished(&mut state, Ok(vec![track("/a.mp3"), track("/b.mp3")]));

        assert!(!state.loading);
        assert_eq!(state.tracks.len(), 2);
        assert_eq!(state.selected_track, None);
        assert_eq!(state.status, "Loaded 2 tracks.");
    }

    #[test]
    fn failed_load_leaves_an_empty_playlist() {
        let mut state = Cadenza::default();
        state.loading = true;
        state.tracks = vec![track("/old.mp3")];
        state.tracks[0].id = Some(1);
        state.selected_track = Some(1);

        let _ = load_finished(&mut state, Err("boom".into()));

        assert!(state.tracks.is_empty(), "no partial playlist allowed");
        assert_eq!(state.selected_track, None);
        assert_eq!(state.status, "Could not load playlist.");
    }

    #[test]
    fn load_with_empty_queue_is_refused() {
        let mut state = Cadenza::default();
        let _ = load_playlist(&mut state);
        assert!(!state.loading);
        assert!(state.status.starts_with("Nothing queued"));
    }
}
