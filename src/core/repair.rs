//! core/repair.rs
//! Best-effort repair of tag text that was decoded with the wrong encoding.
//!
//! Tag writers get this wrong in a few well-known ways:
//! - single-byte text stored padded to 16-bit units, read back as wide text
//!   (every original byte ends up in the high half of a unit);
//! - UTF-8 or Shift-JIS bytes stored in a field declared Latin-1, so each
//!   byte surfaces as one character <= U+00FF.
//!
//! `repair_text` tries the candidate decodings in priority order and keeps
//! the first that applies. It never fails: when no candidate fits, the
//! input comes back unchanged.

use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;

/// Recover the intended text of a single tag field, best effort.
///
/// Works on the string's UTF-16 code units so that the byte-pattern checks
/// see exactly what the tag reader produced. Priority order:
///
/// 1. all units are printable ASCII shifted into the high byte -> fold the
///    high bytes back down;
/// 2. any unit above 0xFF -> genuine wide text, return unchanged;
/// 3. units reinterpreted as bytes decode strictly as UTF-8 -> that;
/// 4. same bytes decode strictly as Shift-JIS -> that;
/// 5. otherwise unchanged.
///
/// "Strict" means a malformed sequence rejects the whole candidate; no
/// replacement characters are ever introduced. Callers keep missing values
/// missing by applying this through `Option::map`.
pub fn repair_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let units: Vec<u16> = text.encode_utf16().collect();

    if let Some(folded) = fold_wide_ascii(&units) {
        return folded;
    }

    if units.iter().any(|&u| u > 0x00FF) {
        // Not a byte sequence in disguise. This also covers strings that mix
        // wide characters with garbled runs; those stay as they are.
        return text.to_string();
    }

    let bytes: Vec<u8> = units.iter().map(|&u| u as u8).collect();

    match std::str::from_utf8(&bytes) {
        Ok(decoded) if decoded != text => return decoded.to_string(),
        _ => {}
    }

    if let Some(decoded) = decode_strict_shift_jis(&bytes) {
        if decoded != text {
            return decoded.into_owned();
        }
    }

    text.to_string()
}

/// Fold "wide ASCII" back to narrow text: succeeds only if every unit has a
/// zero low byte and a printable-ASCII high byte (0x20..=0x7E).
fn fold_wide_ascii(units: &[u16]) -> Option<String> {
    let mut out = String::with_capacity(units.len());

    for &u in units {
        if u & 0x00FF != 0 {
            return None;
        }
        let hi = (u >> 8) as u8;
        if !(0x20..=0x7E).contains(&hi) {
            return None;
        }
        out.push(hi as char);
    }

    if out.is_empty() { None } else { Some(out) }
}

/// Strict Shift-JIS decode: `None` if any byte sequence is malformed,
/// rather than substituting replacement characters.
fn decode_strict_shift_jis(bytes: &[u8]) -> Option<Cow<'_, str>> {
    SHIFT_JIS.decode_without_bom_handling_and_without_replacement(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a string whose chars are exactly the given byte values,
    /// mimicking a Latin-1 read of raw bytes.
    fn latin1(bytes: &[u8]) -> String {
        bytes.iter().map(|&b| b as char).collect()
    }

    fn units(u: &[u16]) -> String {
        String::from_utf16(u).expect("test input must be valid UTF-16")
    }

    #[test]
    fn empty_input_is_returned_unchanged() {
        assert_eq!(repair_text(""), "");
    }

    #[test]
    fn missing_values_stay_missing_through_map() {
        let missing: Option<String> = None;
        assert_eq!(missing.map(|s| repair_text(&s)), None);
    }

    #[test]
    fn wide_ascii_folds_to_high_bytes() {
        // "ABC" stored padded to 16 bits and read back as wide chars.
        let garbled = units(&[0x4100, 0x4200, 0x4300]);
        assert_eq!(repair_text(&garbled), "ABC");
    }

    #[test]
    fn wide_ascii_has_no_minimum_length() {
        let garbled = units(&[0x4100]);
        assert_eq!(repair_text(&garbled), "A");
    }

    #[test]
    fn wide_ascii_rejects_unprintable_high_bytes() {
        // High byte 0x1F is below the printable range; unit is > 0xFF,
        // so the whole string passes through untouched.
        let s = units(&[0x1F00]);
        assert_eq!(repair_text(&s), s);
    }

    #[test]
    fn wide_ascii_rejects_nonzero_low_bytes() {
        let s = units(&[0x4100, 0x0041]);
        assert_eq!(repair_text(&s), s);
    }

    #[test]
    fn genuine_wide_text_is_untouched() {
        let s = "日本語タイトル";
        assert_eq!(repair_text(s), s);
    }

    #[test]
    fn astral_chars_are_untouched() {
        // Surrogate halves have nonzero low bytes, and the units exceed
        // 0xFF, so both early branches leave the text alone.
        let s = "🎵 mix 🎶";
        assert_eq!(repair_text(s), s);
    }

    #[test]
    fn one_wide_char_disables_byte_reinterpretation() {
        // Mostly Latin-1 mojibake, but the arrow is > 0xFF: unchanged.
        let mut s = latin1(&[0xC3, 0xA9]);
        s.push('→');
        assert_eq!(repair_text(&s), s);
    }

    #[test]
    fn utf8_mojibake_is_redecoded() {
        // UTF-8 for "日本" read byte-per-char.
        let garbled = latin1(&[0xE6, 0x97, 0xA5, 0xE6, 0x9C, 0xAC]);
        assert_eq!(repair_text(&garbled), "日本");
    }

    #[test]
    fn utf8_mojibake_two_byte_sequence() {
        // "é" as UTF-8 read byte-per-char is "Ã©".
        assert_eq!(repair_text("Ã©"), "é");
    }

    #[test]
    fn shift_jis_mojibake_is_redecoded() {
        // Shift-JIS for "日本" is invalid UTF-8, so the fallback fires.
        let garbled = latin1(&[0x93, 0xFA, 0x96, 0x7B]);
        assert_eq!(repair_text(&garbled), "日本");
    }

    #[test]
    fn bytes_invalid_in_both_encodings_pass_through() {
        // 0xFF is malformed in UTF-8 and not a valid Shift-JIS byte.
        let s = latin1(&[0xFF, 0xFE]);
        assert_eq!(repair_text(&s), s);
    }

    #[test]
    fn truncated_multibyte_sequences_pass_through() {
        // Latin-1 "café": 0xE9 alone is a truncated lead in both
        // candidate encodings, so the accent survives.
        let s = latin1(&[0x63, 0x61, 0x66, 0xE9]);
        assert_eq!(repair_text(&s), s);
        assert_eq!(repair_text(&s), "café");
    }

    #[test]
    fn plain_ascii_is_a_fixed_point() {
        // Decodes fine as UTF-8 and as Shift-JIS, but identically, so no
        // candidate "applies".
        assert_eq!(repair_text("Hello, World"), "Hello, World");
    }

    #[test]
    fn repair_is_idempotent_on_fixed_points() {
        for s in ["", "Hello", "日本語", "🎵", &latin1(&[0xFF, 0xFE])] {
            let once = repair_text(s);
            if once == *s {
                assert_eq!(repair_text(&once), once);
            }
        }
    }

    #[test]
    fn repaired_output_is_stable() {
        // Fixing a fixed string again must not mangle it further.
        let garbled = latin1(&[0xE6, 0x97, 0xA5, 0xE6, 0x9C, 0xAC]);
        let fixed = repair_text(&garbled);
        assert_eq!(repair_text(&fixed), fixed);
    }
}
