//! core/metadata.rs
//! Turn one audio file into a [`Track`]: ID3 fields (repaired), the native
//! frame map, embedded pictures, and probed technical parameters.
//!
//! - A file without any tag is NOT a failure: fields stay `None`, the
//!   container is still probed.
//! - A file that cannot be opened or probed IS a failure; batch loading
//!   in `core::load_tracks` turns that into an all-or-nothing result.
//! - Identity (`Track.id`) is assigned by the playlist layer, not here.

use std::fs::File;
use std::path::{Path, PathBuf};

use id3::frame::Content;
use id3::{Tag, TagLike, Version};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

use super::repair::repair_text;
use super::types::{Artwork, AudioInfo, NativeFrame, NativeTags, TagDialect, Track};

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read tag from {path}: {source}")]
    Tag {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("failed to probe {path}: {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: symphonia::core::errors::Error,
    },

    #[error("no supported audio track in {0}")]
    NoAudioTrack(PathBuf),

    #[error("metadata worker panicked")]
    WorkerPanicked,
}

/// Read one file into a playlist entry.
///
/// Every text field goes through [`repair_text`]: the native-priority
/// frame value and the common accessor value are repaired independently,
/// and the first that yields something wins.
pub fn extract_track(path: &Path) -> Result<Track, MetadataError> {
    let tag = read_tag(path)?;
    let info = probe_audio_info(path)?;

    let (native, mut pictures) = match &tag {
        Some(tag) => (native_frames(tag), embedded_pictures(tag)),
        None => (NativeTags::new(), Vec::new()),
    };

    let title = repaired_field(&native, &["TIT2", "TT2"], tag.as_ref().and_then(|t| t.title()));
    let artist = repaired_field(&native, &["TPE1", "TP1"], tag.as_ref().and_then(|t| t.artist()));
    let album = repaired_field(&native, &["TALB", "TAL"], tag.as_ref().and_then(|t| t.album()));

    let artwork = if pictures.is_empty() {
        None
    } else {
        Some(pictures.remove(0))
    };

    Ok(Track {
        id: None,
        path: path.to_path_buf(),
        title,
        artist,
        album,
        info,
        artwork,
        native,
    })
}

fn read_tag(path: &Path) -> Result<Option<Tag>, MetadataError> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(Some(tag)),
        Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => Ok(None),
        Err(source) => Err(MetadataError::Tag {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Native-priority lookup, then the common accessor, each repaired on its
/// own. Empty strings count as missing.
fn repaired_field(native: &NativeTags, ids: &[&str], common: Option<&str>) -> Option<String> {
    native_text(native, ids)
        .map(repair_text)
        .or_else(|| common.filter(|s| !s.is_empty()).map(repair_text))
}

/// Walk the native frame map most-specific dialect first and return the
/// first non-empty text payload matching one of `ids` (modern 4-char id
/// plus its legacy 3-char form).
pub fn native_text<'a>(native: &'a NativeTags, ids: &[&str]) -> Option<&'a str> {
    for frames in native.values() {
        for frame in frames {
            if !ids.contains(&frame.id.as_str()) {
                continue;
            }
            if let Some(text) = frame.text.as_deref() {
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

fn dialect_of(version: Version) -> TagDialect {
    match version {
        Version::Id3v24 => TagDialect::Id3v24,
        Version::Id3v23 => TagDialect::Id3v23,
        Version::Id3v22 => TagDialect::Id3v22,
    }
}

/// Capture every frame under the dialect the tag was written in.
/// Non-text frames (pictures, binary blobs) keep their id with no text.
fn native_frames(tag: &Tag) -> NativeTags {
    let frames = tag
        .frames()
        .map(|frame| NativeFrame {
            id: frame.id().to_string(),
            text: match frame.content() {
                Content::Text(s) => Some(s.clone()),
                Content::Link(s) => Some(s.clone()),
                _ => None,
            },
        })
        .collect();

    let mut native = NativeTags::new();
    native.insert(dialect_of(tag.version()), frames);
    native
}

/// All embedded pictures (APIC, legacy PIC), in frame order.
fn embedded_pictures(tag: &Tag) -> Vec<Artwork> {
    tag.frames()
        .filter(|f| f.id() == "APIC" || f.id() == "PIC")
        .filter_map(|f| match f.content() {
            Content::Picture(p) => Some(Artwork {
                data: p.data.clone(),
                mime: p.mime_type.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Probe technical parameters from the container itself.
///
/// Duration comes from the default track's time base and frame count;
/// average bitrate is derived from file size over duration. Anything the
/// container does not declare stays `None`.
fn probe_audio_info(path: &Path) -> Result<AudioInfo, MetadataError> {
    let file = File::open(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let byte_len = file.metadata().ok().map(|m| m.len());

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|source| MetadataError::Probe {
            path: path.to_path_buf(),
            source,
        })?;

    let format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| MetadataError::NoAudioTrack(path.to_path_buf()))?;
    let params = &track.codec_params;

    let duration_secs = match (params.time_base, params.n_frames) {
        (Some(tb), Some(frames)) => {
            let t = tb.calc_time(frames);
            Some(t.seconds as f64 + t.frac)
        }
        _ => None,
    };

    let bitrate_kbps = match (byte_len, duration_secs) {
        (Some(bytes), Some(secs)) if secs > 0.0 => {
            Some(((bytes as f64 * 8.0) / secs / 1000.0).round() as u32)
        }
        _ => None,
    };

    Ok(AudioInfo {
        duration_secs,
        bitrate_kbps,
        sample_rate: params.sample_rate,
        bits_per_sample: params.bits_per_sample,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use id3::frame::Picture;
    use id3::frame::PictureType;
    use std::io::Write;

    fn tag_with(version: Version, frames: &[(&str, &str)]) -> Tag {
        let mut tag = Tag::with_version(version);
        for (id, value) in frames {
            tag.add_frame(id3::Frame::text(*id, *value));
        }
        tag
    }

    #[test]
    fn dialect_order_is_most_specific_first() {
        let mut native = NativeTags::new();
        native.insert(
            TagDialect::Id3v22,
            vec![NativeFrame {
                id: "TT2".into(),
                text: Some("legacy title".into()),
            }],
        );
        native.insert(
            TagDialect::Id3v24,
            vec![NativeFrame {
                id: "TIT2".into(),
                text: Some("modern title".into()),
            }],
        );

        assert_eq!(
            native_text(&native, &["TIT2", "TT2"]),
            Some("modern title")
        );
    }

    #[test]
    fn native_lookup_skips_empty_and_textless_frames() {
        let mut native = NativeTags::new();
        native.insert(
            TagDialect::Id3v24,
            vec![
                NativeFrame {
                    id: "TIT2".into(),
                    text: Some(String::new()),
                },
                NativeFrame {
                    id: "APIC".into(),
                    text: None,
                },
                NativeFrame {
                    id: "TIT2".into(),
                    text: Some("kept".into()),
                },
            ],
        );

        assert_eq!(native_text(&native, &["TIT2", "TT2"]), Some("kept"));
    }

    #[test]
    fn native_frames_capture_dialect_and_text() {
        let tag = tag_with(Version::Id3v23, &[("TIT2", "Song"), ("TPE1", "Band")]);
        let native = native_frames(&tag);

        let frames = native.get(&TagDialect::Id3v23).expect("dialect present");
        assert!(frames.iter().any(|f| f.id == "TIT2" && f.text.as_deref() == Some("Song")));
        assert!(frames.iter().any(|f| f.id == "TPE1" && f.text.as_deref() == Some("Band")));
    }

    #[test]
    fn repaired_field_prefers_native_over_common() {
        let mut native = NativeTags::new();
        native.insert(
            TagDialect::Id3v24,
            vec![NativeFrame {
                id: "TIT2".into(),
                text: Some("Native".into()),
            }],
        );

        assert_eq!(
            repaired_field(&native, &["TIT2", "TT2"], Some("Common")),
            Some("Native".into())
        );
        assert_eq!(
            repaired_field(&NativeTags::new(), &["TIT2", "TT2"], Some("Common")),
            Some("Common".into())
        );
        assert_eq!(repaired_field(&NativeTags::new(), &["TIT2", "TT2"], Some("")), None);
    }

    #[test]
    fn repaired_field_fixes_mojibake_from_either_source() {
        // UTF-8 for "日本" read byte-per-char.
        let garbled: String = [0xE6u8, 0x97, 0xA5, 0xE6, 0x9C, 0xAC]
            .iter()
            .map(|&b| b as char)
            .collect();

        let mut native = NativeTags::new();
        native.insert(
            TagDialect::Id3v24,
            vec![NativeFrame {
                id: "TALB".into(),
                text: Some(garbled.clone()),
            }],
        );

        assert_eq!(
            repaired_field(&native, &["TALB", "TAL"], None),
            Some("日本".into())
        );
        assert_eq!(
            repaired_field(&NativeTags::new(), &["TALB", "TAL"], Some(&garbled)),
            Some("日本".into())
        );
    }

    #[test]
    fn embedded_pictures_keep_frame_order() {
        let mut tag = Tag::new();
        tag.add_frame(Picture {
            mime_type: "image/jpeg".into(),
            picture_type: PictureType::CoverFront,
            description: String::new(),
            data: vec![1, 2, 3],
        });
        tag.add_frame(Picture {
            mime_type: "image/png".into(),
            picture_type: PictureType::CoverBack,
            description: "back".into(),
            data: vec![4, 5],
        });

        let pics = embedded_pictures(&tag);
        assert_eq!(pics.len(), 2);
        assert_eq!(pics[0].mime, "image/jpeg");
        assert_eq!(pics[0].data, vec![1, 2, 3]);
    }

    /// Canonical 44-byte WAV header plus silent 16-bit mono PCM.
    fn write_wav(path: &Path, sample_rate: u32, seconds: u32) {
        let frames = sample_rate * seconds;
        let data_len = frames * 2;
        let mut f = File::create(path).expect("create wav");

        f.write_all(b"RIFF").unwrap();
        f.write_all(&(36 + data_len).to_le_bytes()).unwrap();
        f.write_all(b"WAVE").unwrap();
        f.write_all(b"fmt ").unwrap();
        f.write_all(&16u32.to_le_bytes()).unwrap();
        f.write_all(&1u16.to_le_bytes()).unwrap(); // PCM
        f.write_all(&1u16.to_le_bytes()).unwrap(); // mono
        f.write_all(&sample_rate.to_le_bytes()).unwrap();
        f.write_all(&(sample_rate * 2).to_le_bytes()).unwrap();
        f.write_all(&2u16.to_le_bytes()).unwrap();
        f.write_all(&16u16.to_le_bytes()).unwrap();
        f.write_all(b"data").unwrap();
        f.write_all(&data_len.to_le_bytes()).unwrap();
        f.write_all(&vec![0u8; data_len as usize]).unwrap();
    }

    #[test]
    fn probe_reads_technical_parameters_from_wav() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tone.wav");
        write_wav(&path, 8000, 2);

        let info = probe_audio_info(&path).expect("probe");

        assert_eq!(info.sample_rate, Some(8000));
        assert_eq!(info.bits_per_sample, Some(16));
        let dur = info.duration_secs.expect("duration");
        assert!((dur - 2.0).abs() < 0.05, "duration {dur} not ~2s");
        assert!(info.bitrate_kbps.is_some());
    }

    #[test]
    fn untagged_file_is_not_a_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("plain.wav");
        write_wav(&path, 8000, 1);

        let track = extract_track(&path).expect("extract");

        assert_eq!(track.title, None);
        assert_eq!(track.artist, None);
        assert!(track.artwork.is_none());
        assert!(track.native.is_empty());
        assert!(track.info.duration_secs.is_some());
    }

    #[test]
    fn unreadable_file_is_a_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("junk.mp3");
        std::fs::write(&path, b"this is not audio at all").expect("write");

        assert!(extract_track(&path).is_err());
    }
}
