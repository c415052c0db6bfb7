//! Center panel: the playlist table.

use iced::widget::{Column, column, container, mouse_area, row, scrollable, text};
use iced::{Alignment, Length};

use super::super::state::{Cadenza, Message};
use super::super::util::{display_artist, display_title};
use super::constants::{
    HEADER_TEXT, ROW_TEXT, TRACK_LIST_SPACING, TRACK_ROW_H, TRACK_ROW_HPAD, TRACK_ROW_VPAD,
};
use super::widgets::fmt_duration_secs;

pub(crate) fn build_playlist(state: &Cadenza) -> Column<'_, Message> {
    column![
        text("Playlist").size(18),
        build_playlist_table(state).height(Length::Fill),
    ]
    .spacing(12)
}

fn build_playlist_table(state: &Cadenza) -> iced::widget::Scrollable<'_, Message> {
    let header = row![
        text("").size(HEADER_TEXT).width(Length::Fixed(24.0)),
        text("#").size(HEADER_TEXT).width(Length::Fixed(44.0)),
        text("Title").size(HEADER_TEXT).width(Length::Fixed(240.0)),
        text("Artist").size(HEADER_TEXT).width(Length::Fixed(190.0)),
        text("Album").size(HEADER_TEXT).width(Length::Fixed(240.0)),
        text("Len").size(HEADER_TEXT).width(Length::Fixed(70.0)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut col = column![header].spacing(TRACK_LIST_SPACING);

    for (i, t) in state.tracks.iter().enumerate() {
        let is_playing_row = t.id.is_some() && state.now_playing == t.id;
        let is_selected = t.id.is_some() && state.selected_track == t.id;

        // Now playing gets ▶. A selected (but not playing) row gets ●.
        let marker = if is_playing_row {
            "▶"
        } else if is_selected {
            "●"
        } else {
            ""
        };

        let title = display_title(t);
        let artist = display_artist(t);
        let album = t.album.clone().unwrap_or_else(|| "Unknown".into());
        let len = fmt_duration_secs(t.info.duration_secs);

        let row_cells = row![
            text(marker).size(ROW_TEXT).width(Length::Fixed(24.0)),
            text((i + 1).to_string())
                .size(ROW_TEXT)
                .width(Length::Fixed(44.0)),
            text(title).size(ROW_TEXT).width(Length::Fixed(240.0)),
            text(artist).size(ROW_TEXT).width(Length::Fixed(190.0)),
            text(album).size(ROW_TEXT).width(Length::Fixed(240.0)),
            text(len).size(ROW_TEXT).width(Length::Fixed(70.0)),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let mut row_widget = mouse_area(
            container(row_cells)
                .padding([TRACK_ROW_VPAD, TRACK_ROW_HPAD])
                .height(Length::Fixed(TRACK_ROW_H))
                .width(Length::Fill),
        );

        if let Some(id) = t.id {
            row_widget = row_widget.on_press(Message::SelectTrack(id));
        }

        col = col.push(row_widget);
    }

    scrollable(col).height(Length::Fill)
}
