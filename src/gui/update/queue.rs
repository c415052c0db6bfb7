//! gui/update/queue.rs
//! The file queue: paths (files or folders) the user has staged for the
//! next playlist load.

use iced::Task;
use std::path::{Path, PathBuf};

use super::super::state::{Cadenza, Message};

pub(crate) fn path_input_changed(state: &mut Cadenza, s: String) -> Task<Message> {
    state.path_input = s;
    Task::none()
}

pub(crate) fn add_path_pressed(state: &mut Cadenza) -> Task<Message> {
    if state.loading {
        return Task::none();
    }

    let input = state.path_input.trim();
    if input.is_empty() {
        return Task::none();
    }

    let p = PathBuf::from(input);

    // Validate: the entry must exist, as a file or a folder.
    if !Path::new(input).exists() {
        state.status = format!("No such file or folder: {}", p.display());
        return Task::none();
    }

    // Avoid duplicates.
    if state.queue.contains(&p) {
        state.status = format!("Already queued: {}", p.display());
        state.path_input.clear();
        return Task::none();
    }

    state.queue.push(p.clone());
    state.path_input.clear();
    state.status = format!("Queued: {}", p.display());
    Task::none()
}

pub(crate) fn remove_path(state: &mut Cadenza, i: usize) -> Task<Message> {
    if i < state.queue.len() && !state.loading {
        let removed = state.queue.remove(i);
        state.status = format!("Removed: {}", removed.display());
    }
    Task::none()
}
