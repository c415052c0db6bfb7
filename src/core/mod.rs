//! core/mod.rs
//!
//! The brain of the app:
//! - Discover candidate audio file paths (filesystem walk)
//! - Extract metadata (tags, technical parameters, embedded art)
//! - Repair garbled tag text
//! - Drive audio playback on its own thread
//!
//! The GUI stays dumb: it calls into `core::*` and renders plain data.

pub mod artwork;
pub mod metadata;
pub mod playback;
pub mod repair;
pub mod types;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::thread;

use metadata::MetadataError;
use types::Track;

/// Extensions we hand to the playback/probe stack.
/// Matches the symphonia features enabled in Cargo.toml.
const AUDIO_EXTENSIONS: [&str; 7] = ["mp3", "flac", "wav", "ogg", "oga", "m4a", "aac"];

/// Expand queued entries (files or folders) into a flat list of audio files.
///
/// - Folders are walked recursively; only known audio extensions are kept.
/// - Files are taken as-is when they carry an audio extension.
/// - De-dupes across overlapping entries by full path, then sorts once
///   (core owns ordering, the GUI shouldn't).
pub fn collect_audio_paths(entries: &[PathBuf]) -> Result<Vec<PathBuf>, MetadataError> {
    let mut seen: HashSet<PathBuf> = HashSet::with_capacity(256);
    let mut out: Vec<PathBuf> = Vec::new();

    for entry in entries {
        if entry.is_dir() {
            let mut found = Vec::new();
            walk_dir(entry, &mut found)?;
            for path in found {
                if seen.insert(path.clone()) {
                    out.push(path);
                }
            }
        } else if is_audio_file(entry) && seen.insert(entry.clone()) {
            out.push(entry.clone());
        }
    }

    out.sort();
    Ok(out)
}

fn walk_dir(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), MetadataError> {
    let entries = std::fs::read_dir(dir).map_err(|source| MetadataError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| MetadataError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            walk_dir(&path, out)?;
        } else if is_audio_file(&path) {
            out.push(path);
        }
    }

    Ok(())
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Extract metadata for a batch of files, one worker thread per file.
///
/// All-or-nothing: every extraction must succeed before any track is
/// returned. A single unreadable file fails the whole batch, so callers
/// never end up showing a partial playlist.
pub fn load_tracks(paths: Vec<PathBuf>) -> Result<Vec<Track>, MetadataError> {
    let workers: Vec<_> = paths
        .into_iter()
        .map(|path| thread::spawn(move || metadata::extract_track(&path)))
        .collect();

    // Join every worker before inspecting results, so the batch either
    // resolves completely or fails as a unit.
    let mut results = Vec::with_capacity(workers.len());
    for worker in workers {
        results.push(worker.join().map_err(|_| MetadataError::WorkerPanicked)?);
    }

    results.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_extension_check_is_case_insensitive() {
        assert!(is_audio_file(Path::new("song.MP3")));
        assert!(is_audio_file(Path::new("song.Flac")));
        assert!(!is_audio_file(Path::new("cover.jpg")));
        assert!(!is_audio_file(Path::new("noext")));
    }

    #[test]
    fn collecting_dedupes_repeated_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = dir.path().join("a.mp3");
        let b = dir.path().join("b.flac");
        std::fs::write(&a, b"x").expect("write");
        std::fs::write(&b, b"x").expect("write");

        let entries = vec![a.clone(), dir.path().to_path_buf(), b.clone()];
        let paths = collect_audio_paths(&entries).expect("collect");

        assert_eq!(paths, vec![a, b]);
    }

    #[test]
    fn collecting_skips_non_audio_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("notes.txt"), b"x").expect("write");
        std::fs::write(dir.path().join("take.wav"), b"x").expect("write");

        let paths = collect_audio_paths(&[dir.path().to_path_buf()]).expect("collect");

        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("take.wav"));
    }

    #[test]
    fn nonexistent_entry_without_audio_extension_is_ignored() {
        let entries = vec![PathBuf::from("definitely/not/a/folder")];
        assert!(collect_audio_paths(&entries).expect("collect").is_empty());
    }

    #[test]
    fn batch_load_fails_when_any_file_is_unreadable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bogus = dir.path().join("broken.mp3");
        std::fs::write(&bogus, b"not really audio").expect("write");

        assert!(load_tracks(vec![bogus]).is_err());
    }
}
