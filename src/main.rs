//! Cadenza
//!
//! A small desktop audio player (built with the `iced` GUI library): the
//! user queues audio files or folders, metadata (ID3 tags, technical
//! parameters, embedded artwork) is extracted into an in-memory playlist,
//! and standard transport controls drive playback. Garbled tag text is
//! repaired best-effort by `core::repair` before it reaches the UI, and a
//! modal lets the user override a track's artwork with an image fetched
//! from an http(s) URL.
//!
//! # Architecture
//! Message-based, the usual iced loop:
//!
//! - `Cadenza` = the *entire memory* of the app (all the state)
//! - `Message` = "something happened" (button clicked, load finished)
//! - `update(state, message)` = handles that thing and updates state
//! - `view(state)` = draws UI based on the current state
//!
//! Constraints (on purpose):
//! - The UI layer calls `core::*` for metadata, repair and playback.
//! - Slow work (metadata batches, artwork fetches) runs on worker
//!   threads and comes back as a Message.
//! - Audio playback lives on its own engine thread behind channels.

mod core;
mod gui;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use gui::{Cadenza, subscription, update, view};

#[derive(Debug, Parser)]
#[command(name = "cadenza", about = "Desktop audio player")]
struct Args {
    /// Files or folders queued at startup.
    paths: Vec<PathBuf>,

    /// Initial volume, 0.0 to 1.0.
    #[arg(long)]
    volume: Option<f32>,
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cadenza=info")))
        .with(fmt::layer())
        .init();

    let args = Args::parse();

    iced::application(
        move || Cadenza::with_startup(&args.paths, args.volume),
        update,
        view,
    )
    .title("Cadenza")
    .subscription(subscription)
    .run()
}
