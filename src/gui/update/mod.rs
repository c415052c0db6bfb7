//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Cadenza, Message};

mod artwork;
mod load;
mod playback;
mod queue;
mod selection;
mod util;

pub(crate) fn update(state: &mut Cadenza, message: Message) -> Task<Message> {
    match message {
        Message::TickPlayback => playback::drain_events(state),

        // File queue
        Message::PathInputChanged(s) => queue::path_input_changed(state, s),
        Message::AddPathPressed => queue::add_path_pressed(state),
        Message::RemovePath(i) => queue::remove_path(state, i),

        // Playlist loading
        Message::LoadPlaylist => load::load_playlist(state),
        Message::LoadFinished(result) => load::load_finished(state, result),

        // Selection
        Message::SelectTrack(id) => selection::select_track(state, id),

        // Transport
        Message::TogglePlayPause => playback::toggle_play_pause(state),
        Message::Next => playback::next(state),
        Message::Prev => playback::prev(state),

        // Seek: preview vs commit
        Message::SeekTo(ratio) => playback::seek_preview(state, ratio),
        Message::SeekCommit => playback::seek_commit(state),

        Message::SetVolume(vol) => playback::set_volume(state, vol),

        // Artwork override
        Message::OpenArtworkDialog => artwork::open_dialog(state),
        Message::ArtworkUrlChanged(url) => artwork::url_changed(state, url),
        Message::RequestArtworkPreview => artwork::request_preview(state),
        Message::ArtworkPreviewLoaded(seq, result) => artwork::preview_loaded(state, seq, result),
        Message::ApplyArtwork => artwork::apply(state),
        Message::CloseArtworkDialog => artwork::close_dialog(state),
    }
}
