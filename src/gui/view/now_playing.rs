//! Right pane: current track details (cover, fields, technical
//! parameters). While the artwork dialog is open it takes over the pane.

use iced::Length;
use iced::widget::{button, column, container, image, row, scrollable, text, text_input};

use super::super::state::{ArtworkPreview, Cadenza, Message};
use super::super::util::{display_album, display_artist, display_title};
use super::constants::{COVER_BIG, COVER_PREVIEW};
use super::widgets::{cover_thumb, fmt_duration_secs};

pub(crate) fn build_pane(state: &Cadenza) -> iced::widget::Container<'_, Message> {
    if state.artwork_dialog.is_some() {
        return build_artwork_dialog(state);
    }

    let Some(track) = state.shown_track() else {
        return container(
            column![
                text("Now playing").size(18),
                text("Select a track (center panel)."),
            ]
            .spacing(8),
        )
        .padding(12);
    };

    let cover = track
        .id
        .and_then(|id| state.cover_cache.get(&id))
        .map(|h| cover_thumb(Some(h), COVER_BIG))
        .unwrap_or_else(|| cover_thumb(None, COVER_BIG));

    let info = &track.info;
    let mut tech_parts: Vec<String> = Vec::new();
    if let Some(kbps) = info.bitrate_kbps {
        tech_parts.push(format!("{kbps} kbps"));
    }
    if let Some(rate) = info.sample_rate {
        tech_parts.push(format!("{:.1} kHz", rate as f64 / 1000.0));
    }
    if let Some(bits) = info.bits_per_sample {
        tech_parts.push(format!("{bits}-bit"));
    }
    let tech_line = if tech_parts.is_empty() {
        "no technical info".to_string()
    } else {
        tech_parts.join(" · ")
    };

    let col = column![
        text("Now playing").size(18),
        cover,
        text(display_title(track)).size(16),
        text(display_artist(track)).size(14),
        text(display_album(track)).size(14),
        text(format!(
            "{} · {}",
            fmt_duration_secs(info.duration_secs),
            tech_line
        ))
        .size(12),
        button("Change artwork…").on_press(Message::OpenArtworkDialog),
    ]
    .spacing(10);

    container(scrollable(col).height(Length::Fill)).padding(12)
}

fn build_artwork_dialog(state: &Cadenza) -> iced::widget::Container<'_, Message> {
    // Caller checked is_some.
    let Some(dialog) = state.artwork_dialog.as_ref() else {
        return container(column![]);
    };

    let url_input = text_input("https://…/cover.jpg", &dialog.url_input)
        .on_input(Message::ArtworkUrlChanged)
        .on_submit(Message::RequestArtworkPreview)
        .width(Length::Fill);

    let preview: iced::Element<'_, Message> = match &dialog.preview {
        ArtworkPreview::Idle => text("Enter an image URL and press Preview.").size(12).into(),
        ArtworkPreview::Loading => text("Loading preview…").size(12).into(),
        ArtworkPreview::Ready { handle, .. } => container(image(handle.clone()))
            .width(Length::Fixed(COVER_PREVIEW))
            .height(Length::Fixed(COVER_PREVIEW))
            .into(),
        ArtworkPreview::Failed(e) => text(format!("Preview failed: {e}")).size(12).into(),
    };

    let preview_btn = button("Preview").on_press(Message::RequestArtworkPreview);
    let apply_btn = if matches!(dialog.preview, ArtworkPreview::Ready { .. }) {
        button("Apply").on_press(Message::ApplyArtwork)
    } else {
        button("Apply")
    };
    let cancel_btn = button("Cancel").on_press(Message::CloseArtworkDialog);

    let col = column![
        text("Replace artwork").size(18),
        url_input,
        preview,
        row![preview_btn, apply_btn, cancel_btn].spacing(8),
    ]
    .spacing(10);

    container(scrollable(col).height(Length::Fill)).padding(12)
}
