//! Reusable small widgets/helpers used across view modules.

use iced::widget::{button, column, container, image, row, slider, text};
use iced::{Alignment, Element, Length};

use super::super::state::{Cadenza, Message};
use super::super::util::display_title;

pub(crate) fn fmt_duration_secs(secs: Option<f64>) -> String {
    let Some(secs) = secs else { return "-".into() };
    fmt_duration_ms((secs * 1000.0).round() as u64)
}

pub(crate) fn fmt_duration_ms(ms: u64) -> String {
    let s = ms / 1000;
    let m = s / 60;
    let s = s % 60;
    format!("{m}:{s:02}")
}

pub(crate) fn cover_placeholder(size: f32) -> iced::widget::Container<'static, Message> {
    container(
        column![text("♪").size(28), text("cover").size(12)]
            .spacing(4)
            .align_x(Alignment::Center),
    )
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .center_x(Length::Fill)
    .center_y(Length::Fill)
}

/// If `handle` exists, show it; otherwise show the placeholder.
/// Returns an Element so callers can embed it in `row![]` easily.
pub(crate) fn cover_thumb(
    handle: Option<&iced::widget::image::Handle>,
    size: f32,
) -> Element<'static, Message> {
    match handle {
        Some(h) => container(image(h.clone()))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
        None => cover_placeholder(size).into(),
    }
}

/// Top transport bar.
///
/// Emits only Messages (no rodio, no decoding).
pub(crate) fn transport_bar(state: &Cadenza) -> iced::widget::Container<'_, Message> {
    let play_label = if state.is_playing { "Pause" } else { "Play" };

    let prev_btn = button("⏮").on_press(Message::Prev);
    let play_btn = button(play_label).on_press(Message::TogglePlayPause);
    let next_btn = button("⏭").on_press(Message::Next);

    // --- seek slider ---
    let pos = state.position_ms;
    let dur = state.duration_ms.unwrap_or(0);
    let seek_enabled = dur > 0;

    // slider needs a sane range; if duration is unknown, freeze it at 0..=1
    let (seek_max, seek_val) = if seek_enabled {
        (1.0f32, (pos.min(dur) as f64 / dur as f64) as f32)
    } else {
        (1.0f32, 0.0f32)
    };

    let seek = slider(0.0..=seek_max, seek_val, Message::SeekTo)
        .on_release(Message::SeekCommit)
        .width(Length::Fill);

    let time_text = if seek_enabled {
        format!("{} / {}", fmt_duration_ms(pos), fmt_duration_ms(dur))
    } else {
        // show position even if duration unknown
        format!("{} / -:--", fmt_duration_ms(pos))
    };

    // --- volume slider ---
    let vol = state.volume.clamp(0.0, 1.0);
    let vol_slider = slider(0.0..=1.0, vol, Message::SetVolume).width(Length::Fixed(140.0));

    // --- now playing label ---
    let now_playing = match state.now_playing.and_then(|id| state.track_by_id(id)) {
        Some(t) => display_title(t),
        None => "Nothing playing".into(),
    };

    let bar = row![
        // left: transport
        row![prev_btn, play_btn, next_btn]
            .spacing(8)
            .align_y(Alignment::Center),
        // middle: now playing + seek
        column![
            text(now_playing).size(14),
            row![seek, text(time_text).size(12)]
                .spacing(10)
                .align_y(Alignment::Center),
        ]
        .spacing(6)
        .width(Length::Fill),
        // right: volume
        row![text("Vol").size(12), vol_slider]
            .spacing(8)
            .align_y(Alignment::Center),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    container(bar).padding(12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_format_as_minutes_and_seconds() {
        assert_eq!(fmt_duration_ms(0), "0:00");
        assert_eq!(fmt_duration_ms(61_000), "1:01");
        assert_eq!(fmt_duration_ms(600_000), "10:00");
    }

    #[test]
    fn unknown_duration_renders_a_dash() {
        assert_eq!(fmt_duration_secs(None), "-");
        assert_eq!(fmt_duration_secs(Some(83.4)), "1:23");
    }
}
