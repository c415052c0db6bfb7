//! gui/update/selection.rs
//! Playlist selection, keyed by `TrackId` (stable), not Vec indices.
//! The cover cache is fed here from each track's embedded artwork.

use iced::Task;

use super::super::state::{Cadenza, Message};
use crate::core::types::TrackId;

pub(crate) fn select_track(state: &mut Cadenza, id: TrackId) -> Task<Message> {
    // If the id doesn't exist in the current playlist, ignore.
    if state.index_of_id(id).is_none() {
        return Task::none();
    }

    state.selected_track = Some(id);
    ensure_cover(state, id);

    Task::none()
}

/// Make sure the cover cache holds an image handle for `id`, built from
/// the track's current artwork bytes. Cheap no-op when already cached or
/// when the track has no artwork.
pub(crate) fn ensure_cover(state: &mut Cadenza, id: TrackId) {
    if state.cover_cache.contains_key(&id) {
        return;
    }

    let Some(track) = state.track_by_id(id) else {
        return;
    };

    if let Some(art) = &track.artwork {
        let handle = iced::widget::image::Handle::from_bytes(art.data.clone());
        state.cover_cache.insert(id, handle);
    }
}
