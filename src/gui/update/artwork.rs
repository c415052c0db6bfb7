//! gui/update/artwork.rs
//! Artwork-override flow: a modal with URL input, live preview and
//! accept/reject. The URL must be http(s) and must decode as an image
//! before Apply becomes possible.

use iced::Task;
use tracing::{info, warn};

use super::super::state::{ArtworkDialog, ArtworkPreview, Cadenza, Message};
use super::util::spawn_blocking;
use crate::core::artwork::{fetch_image, validate_url};
use crate::core::types::Artwork;

pub(crate) fn open_dialog(state: &mut Cadenza) -> Task<Message> {
    // Target is the track shown in the now-playing pane.
    let Some(target) = state.shown_track().and_then(|t| t.id) else {
        state.status = "Select a track first.".into();
        return Task::none();
    };

    state.artwork_dialog = Some(ArtworkDialog::new(target));
    Task::none()
}

pub(crate) fn close_dialog(state: &mut Cadenza) -> Task<Message> {
    state.artwork_dialog = None;
    Task::none()
}

pub(crate) fn url_changed(state: &mut Cadenza, url: String) -> Task<Message> {
    let Some(dialog) = state.artwork_dialog.as_mut() else {
        return Task::none();
    };

    dialog.url_input = url;
    // Any preview in flight is now answering a question nobody asked.
    dialog.request_seq += 1;
    dialog.preview = ArtworkPreview::Idle;

    Task::none()
}

pub(crate) fn request_preview(state: &mut Cadenza) -> Task<Message> {
    let Some(dialog) = state.artwork_dialog.as_mut() else {
        return Task::none();
    };

    let url = dialog.url_input.trim().to_string();

    // Scheme gate before any network traffic.
    if let Err(e) = validate_url(&url) {
        dialog.preview = ArtworkPreview::Failed(e.to_string());
        return Task::none();
    }

    dialog.request_seq += 1;
    let seq = dialog.request_seq;
    dialog.preview = ArtworkPreview::Loading;

    Task::perform(
        spawn_blocking(move || fetch_image(&url).map_err(|e| e.to_string())),
        move |result| Message::ArtworkPreviewLoaded(seq, result),
    )
}

pub(crate) fn preview_loaded(
    state: &mut Cadenza,
    seq: u64,
    result: Result<Artwork, String>,
) -> Task<Message> {
    let Some(dialog) = state.artwork_dialog.as_mut() else {
        // Dialog was cancelled while the fetch ran.
        return Task::none();
    };

    if seq != dialog.request_seq {
        // Stale response for a URL the user has since edited.
        return Task::none();
    }

    match result {
        Ok(artwork) => {
            let handle = iced::widget::image::Handle::from_bytes(artwork.data.clone());
            dialog.preview = ArtworkPreview::Ready { artwork, handle };
        }
        Err(e) => {
            warn!("artwork preview failed: {e}");
            dialog.preview = ArtworkPreview::Failed(e);
        }
    }

    Task::none()
}

pub(crate) fn apply(state: &mut Cadenza) -> Task<Message> {
    let ready = state
        .artwork_dialog
        .as_ref()
        .is_some_and(|d| matches!(d.preview, ArtworkPreview::Ready { .. }));
    if !ready {
        // Nothing validated yet; keep the dialog open.
        return Task::none();
    }

    let Some(dialog) = state.artwork_dialog.take() else {
        return Task::none();
    };
    let target = dialog.target;
    let ArtworkPreview::Ready { artwork, handle } = dialog.preview else {
        return Task::none();
    };
    let Some(track) = state.track_by_id_mut(target) else {
        state.status = "Artwork target no longer exists.".into();
        return Task::none();
    };

    info!(target, mime = %artwork.mime, "artwork override applied");
    track.artwork = Some(artwork);
    state.cover_cache.insert(target, handle);
    state.status = "Artwork replaced.".into();

    Task::none()
}
