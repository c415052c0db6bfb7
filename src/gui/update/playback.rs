//! gui/update/playback.rs
//! GUI-playback engine bridge.
//!
//! - `now_playing` and selection are `TrackId`, not Vec indices.
//! - Manual next/prev wrap at the playlist ends; natural end-of-track
//!   auto-advances WITHOUT wrapping and stops after the last track.
//! - The GUI never touches rodio/symphonia directly. All IO/timing is
//!   driven by the engine plus TickPlayback polling.

use iced::Task;
use tracing::{debug, info, warn};

use super::super::state::{Cadenza, Message};
use super::selection::ensure_cover;
use crate::core::playback::{PlayerCommand, PlayerEvent, start_playback};
use crate::core::types::TrackId;

fn ensure_engine(state: &mut Cadenza) {
    if state.playback.is_some() && state.playback_events.is_some() {
        return;
    }

    let (controller, events) = start_playback();
    controller.send(PlayerCommand::SetVolume(state.volume));

    state.playback = Some(controller);
    state.playback_events = Some(std::cell::RefCell::new(events));
}

pub(crate) fn drain_events(state: &mut Cadenza) -> Task<Message> {
    let Some(rx_cell) = state.playback_events.as_ref() else {
        return Task::none();
    };

    let mut drained: Vec<PlayerEvent> = Vec::new();
    {
        // Receiver::try_recv only needs &self, so borrow() is enough.
        let rx = rx_cell.borrow();
        while let Ok(ev) = rx.try_recv() {
            drained.push(ev);
        }
    }

    for ev in drained {
        let _ = handle_event(state, ev);
    }

    Task::none()
}

pub(crate) fn play_selected(state: &mut Cadenza) -> Task<Message> {
    let Some(id) = state.selected_track else {
        state.status = "No track selected.".into();
        return Task::none();
    };
    play_track(state, id)
}

pub(crate) fn play_track(state: &mut Cadenza, id: TrackId) -> Task<Message> {
    ensure_engine(state);

    let Some(controller) = &state.playback else {
        state.status = "Playback engine failed to initialize.".into();
        return Task::none();
    };

    let Some(track) = state.track_by_id(id) else {
        state.status = "Play failed: track not found (reload?).".into();
        return Task::none();
    };

    let path = track.path.clone();
    debug!(id, path = %path.display(), "play track");

    controller.send(PlayerCommand::PlayFile(path.clone()));

    // Playback should not hijack selection.
    state.now_playing = Some(id);
    state.is_playing = true;
    state.position_ms = 0;
    state.duration_ms = None;
    state.seek_preview_ratio = None;
    state.status = format!("Playing: {}", path.display());

    ensure_cover(state, id);

    Task::none()
}

pub(crate) fn toggle_play_pause(state: &mut Cadenza) -> Task<Message> {
    if state.is_playing {
        return pause(state);
    }

    if state.now_playing.is_some() {
        resume(state)
    } else {
        play_selected(state)
    }
}

pub(crate) fn pause(state: &mut Cadenza) -> Task<Message> {
    let Some(controller) = &state.playback else {
        return Task::none();
    };

    controller.send(PlayerCommand::Pause);
    state.is_playing = false;

    Task::none()
}

pub(crate) fn resume(state: &mut Cadenza) -> Task<Message> {
    if state.now_playing.is_none() {
        return play_selected(state);
    }

    let Some(controller) = &state.playback else {
        return Task::none();
    };

    controller.send(PlayerCommand::Resume);
    state.is_playing = true;

    Task::none()
}

pub(crate) fn stop(state: &mut Cadenza) -> Task<Message> {
    if let Some(controller) = &state.playback {
        controller.send(PlayerCommand::Stop);
    }

    state.is_playing = false;
    state.position_ms = 0;
    state.duration_ms = None;
    state.seek_preview_ratio = None;

    Task::none()
}

/// Index after `cur`, wrapping past the end. Manual transport only.
fn wrap_next(len: usize, cur: usize) -> usize {
    if cur + 1 >= len { 0 } else { cur + 1 }
}

/// Index before `cur`, wrapping past the start. Manual transport only.
fn wrap_prev(len: usize, cur: usize) -> usize {
    if cur == 0 { len - 1 } else { cur - 1 }
}

/// Anchor for relative movement: now playing, else selection, else the
/// first track.
fn anchor_id(state: &Cadenza) -> Option<TrackId> {
    state
        .now_playing
        .or(state.selected_track)
        .or_else(|| state.tracks.first().and_then(|t| t.id))
}

pub(crate) fn next(state: &mut Cadenza) -> Task<Message> {
    if state.tracks.is_empty() {
        return Task::none();
    }

    let Some(cur_id) = anchor_id(state) else {
        return Task::none();
    };

    let cur_idx = state.index_of_id(cur_id).unwrap_or(0);
    let next_idx = wrap_next(state.tracks.len(), cur_idx);

    let Some(next_id) = state.tracks.get(next_idx).and_then(|t| t.id) else {
        return Task::none();
    };

    play_track(state, next_id)
}

pub(crate) fn prev(state: &mut Cadenza) -> Task<Message> {
    if state.tracks.is_empty() {
        return Task::none();
    }

    let Some(cur_id) = anchor_id(state) else {
        return Task::none();
    };

    let cur_idx = state.index_of_id(cur_id).unwrap_or(0);
    let prev_idx = wrap_prev(state.tracks.len(), cur_idx);

    let Some(prev_id) = state.tracks.get(prev_idx).and_then(|t| t.id) else {
        return Task::none();
    };

    play_track(state, prev_id)
}

/// Seek slider changed: preview only (UI updates, no engine command).
pub(crate) fn seek_preview(state: &mut Cadenza, ratio: f32) -> Task<Message> {
    let Some(dur_ms) = state.duration_ms else {
        return Task::none();
    };

    let ratio = ratio.clamp(0.0, 1.0);
    state.seek_preview_ratio = Some(ratio);

    let target_ms = ((ratio as f64) * (dur_ms as f64)).round() as u64;
    state.position_ms = target_ms.min(dur_ms);

    Task::none()
}

/// Seek slider released: commit the last preview to the engine.
pub(crate) fn seek_commit(state: &mut Cadenza) -> Task<Message> {
    let Some(dur_ms) = state.duration_ms else {
        state.seek_preview_ratio = None;
        return Task::none();
    };

    let Some(ratio) = state.seek_preview_ratio.take() else {
        return Task::none();
    };

    let Some(controller) = &state.playback else {
        return Task::none();
    };

    let mut target_ms = ((ratio as f64) * (dur_ms as f64)).round() as u64;

    // Seeking to *exactly* the end tends to produce EOF weirdness; clamp
    // slightly short.
    if target_ms >= dur_ms {
        target_ms = dur_ms.saturating_sub(1);
    }

    debug!(target_ms, dur_ms, "seek commit");
    controller.send(PlayerCommand::Seek(target_ms));

    // Optimistic UI update; engine will confirm via Started/Position.
    state.position_ms = target_ms;

    Task::none()
}

pub(crate) fn set_volume(state: &mut Cadenza, volume: f32) -> Task<Message> {
    let volume = volume.clamp(0.0, 1.0);
    state.volume = volume;

    if let Some(controller) = &state.playback {
        controller.send(PlayerCommand::SetVolume(volume));
    }

    Task::none()
}

pub(crate) fn handle_event(state: &mut Cadenza, event: PlayerEvent) -> Task<Message> {
    match event {
        PlayerEvent::Started {
            path,
            duration_ms,
            start_ms,
        } => {
            // Fired for fresh playback and for seek reopens; pause/play
            // state is whatever the GUI already believes.
            state.duration_ms = duration_ms;
            state.position_ms = start_ms;
            state.seek_preview_ratio = None;
            info!(path = %path.display(), ?duration_ms, start_ms, "playback started");
        }
        PlayerEvent::Paused => state.is_playing = false,
        PlayerEvent::Resumed => state.is_playing = true,
        PlayerEvent::Stopped => {
            state.is_playing = false;
            state.position_ms = 0;
            state.duration_ms = None;
            state.seek_preview_ratio = None;
        }
        PlayerEvent::Position { position_ms } => {
            // If the user is dragging the seek slider, don't fight them.
            if state.seek_preview_ratio.is_none() {
                state.position_ms = position_ms;
            }
        }
        PlayerEvent::TrackEnded => {
            state.is_playing = false;
            state.position_ms = 0;
            state.seek_preview_ratio = None;

            // Auto-advance: next track in playlist order, no wrap.
            let ended = state.now_playing.take();
            if let Some(idx) = ended.and_then(|id| state.index_of_id(id)) {
                if let Some(next_id) = state.tracks.get(idx + 1).and_then(|t| t.id) {
                    return play_track(state, next_id);
                }
            }

            state.duration_ms = None;
            state.status = "End of playlist.".into();
        }
        PlayerEvent::Error(err) => {
            // Non-fatal: log it and stay paused.
            warn!("playback error: {err}");
            state.is_playing = false;
            state.status = format!("Playback error: {err}");
        }
    }

    Task::none()
}
