//! GUI renderer (reads state, produces widgets; no mutation).

mod constants;
mod now_playing;
mod playlist;
mod sidebar;
mod widgets;

use iced::Length;
use iced::widget::{Column, column, container, row};

use super::state::{Cadenza, Message};
use constants::{PANE_W, SIDEBAR_W, TRANSPORT_H};

pub(crate) fn view(state: &Cadenza) -> Column<'_, Message> {
    let transport = widgets::transport_bar(state).height(Length::Fixed(TRANSPORT_H));

    let sidebar = sidebar::build_sidebar(state).width(Length::Fixed(SIDEBAR_W));
    let main = container(playlist::build_playlist(state))
        .padding(12)
        .width(Length::Fill);
    let pane = now_playing::build_pane(state).width(Length::Fixed(PANE_W));

    let body = row![sidebar, main, pane].spacing(12).height(Length::Fill);
    column![transport, body].spacing(12).padding(12)
}
