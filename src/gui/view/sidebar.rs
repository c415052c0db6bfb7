//! Left sidebar (queue input, queued paths, load button, status).

use iced::Length;
use iced::widget::{button, column, container, row, scrollable, text, text_input};

use super::super::state::{Cadenza, Message};
use super::constants::QUEUE_LIST_H;

pub(crate) fn build_sidebar(state: &Cadenza) -> iced::widget::Container<'_, Message> {
    let path_input = text_input("Add file or folder path", &state.path_input)
        .on_input(Message::PathInputChanged)
        .on_submit(Message::AddPathPressed)
        .width(Length::Fill);

    let add_btn = if state.loading {
        button("Add")
    } else {
        button("Add").on_press(Message::AddPathPressed)
    };

    let add_row = row![path_input, add_btn].spacing(8);

    let mut queue_list = column![];
    for (i, p) in state.queue.iter().enumerate() {
        let remove_btn = if state.loading {
            button("×")
        } else {
            button("×").on_press(Message::RemovePath(i))
        };

        queue_list = queue_list.push(row![text(p.display().to_string()), remove_btn].spacing(8));
    }
    let queue_panel = scrollable(queue_list.spacing(6)).height(Length::Fixed(QUEUE_LIST_H));

    let load_btn = if state.loading {
        button("Loading...")
    } else {
        button("Load Playlist").on_press(Message::LoadPlaylist)
    };

    let col = column![
        text("Cadenza").size(20),
        text(&state.status).size(12),
        text("Queue").size(16),
        add_row,
        queue_panel,
        load_btn,
    ]
    .spacing(12);

    container(scrollable(col).height(Length::Fill)).padding(12)
}
