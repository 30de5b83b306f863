//! Purpose: Marker-driven location of embedded-JSON spans inside templates.
//! Exports: `Span`, `locate`, `locate_tagged`, `count_occurrences`, literal tokens.
//! Role: Pure text search; the template is an opaque buffer except for two tokens.
//! Invariants: Returned spans satisfy `start <= end <= template.len()`.
//! Invariants: Every failure carries the unresolved identifier and lookup stage.

use crate::core::error::{Error, ErrorKind, LookupStage};

/// Opening sequence of the constructor-call string literal the locators target.
pub const OPEN_TOKEN: &str = "JSON.parse('";

/// Closing sequence of the same literal: closing quote plus call close.
pub const CLOSE_TOKEN: &str = "')";

/// Backward-search bound for the proximity convention, in bytes.
///
/// A heuristic tuning knob, not a semantic contract: the opening token must
/// sit within this many bytes before the start marker's first occurrence.
/// Templates with an opening token farther away fail at the
/// `OpeningToken` stage rather than matching an unrelated literal.
pub const LOOKBACK_WINDOW: usize = 100;

/// Half-open byte range `[start, end)` into a template buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Locate the interior of an embedded-JSON literal by the proximity convention.
///
/// `start_idx` and `end_idx` are free-standing text inside the literal: the
/// opening token must appear within [`LOOKBACK_WINDOW`] bytes before the first
/// occurrence of `start_idx`, and `end_idx` must appear after it, before the
/// closing token. The returned span covers only the literal's interior (the
/// text between the opening and closing tokens).
pub fn locate(template: &str, start_idx: &str, end_idx: &str) -> Result<Span, Error> {
    let approx_pos = template.find(start_idx).ok_or_else(|| {
        marker_error(
            LookupStage::StartMarker,
            start_idx,
            format!("start marker {start_idx:?} not found in template"),
        )
        .with_hint("Check that the template block is tagged with this identifier.")
    })?;

    // Window start is clamped to 0 and nudged forward onto a UTF-8 boundary.
    let mut window_start = approx_pos.saturating_sub(LOOKBACK_WINDOW);
    while !template.is_char_boundary(window_start) {
        window_start += 1;
    }

    // Rightmost opening token in the window, i.e. the one closest to the
    // marker. Matching the first token anywhere earlier in the file would
    // misfire on templates with several independent embedded-JSON blocks.
    let open_pos = template[window_start..approx_pos]
        .rfind(OPEN_TOKEN)
        .map(|pos| window_start + pos)
        .ok_or_else(|| {
            marker_error(
                LookupStage::OpeningToken,
                OPEN_TOKEN,
                format!(
                    "no {OPEN_TOKEN:?} within {LOOKBACK_WINDOW} bytes before start marker {start_idx:?}"
                ),
            )
        })?;

    let end_marker_pos = template[open_pos..]
        .find(end_idx)
        .map(|pos| open_pos + pos)
        .ok_or_else(|| {
            marker_error(
                LookupStage::EndMarker,
                end_idx,
                format!("end marker {end_idx:?} not found after opening token"),
            )
        })?;

    let search_from = end_marker_pos + end_idx.len();
    let close_pos = template[search_from..]
        .find(CLOSE_TOKEN)
        .map(|pos| search_from + pos)
        .ok_or_else(|| {
            marker_error(
                LookupStage::ClosingToken,
                CLOSE_TOKEN,
                format!("no closing {CLOSE_TOKEN:?} after end marker {end_idx:?}"),
            )
        })?;

    Ok(Span {
        start: open_pos + OPEN_TOKEN.len(),
        end: close_pos,
    })
}

/// Locate an entire tagged block by the embedded-tag convention.
///
/// The markers are themselves part of the literal:
/// `JSON.parse('{"startIdx":"<id>"` opens the block and `"endIdx":"<id>"}')`
/// closes it. The end marker must occur at or after the start marker even if
/// an earlier occurrence exists elsewhere in the template. The returned span
/// covers the whole block, markers and constructor tokens included.
pub fn locate_tagged(template: &str, start_idx: &str, end_idx: &str) -> Result<Span, Error> {
    let start_marker = format!("{OPEN_TOKEN}{{\"startIdx\":\"{start_idx}\"");
    let end_marker = format!("\"endIdx\":\"{end_idx}\"}}{CLOSE_TOKEN}");

    let start_pos = template.find(&start_marker).ok_or_else(|| {
        marker_error(
            LookupStage::StartMarker,
            start_idx,
            format!("tagged start marker {start_idx:?} not found in template"),
        )
        .with_hint("Tagged blocks are consumed on splice; a previously spliced output carries no markers.")
    })?;

    let end_pos = template[start_pos..]
        .find(&end_marker)
        .map(|pos| start_pos + pos)
        .ok_or_else(|| {
            marker_error(
                LookupStage::EndMarker,
                end_idx,
                format!("tagged end marker {end_idx:?} not found after start marker {start_idx:?}"),
            )
        })?;

    Ok(Span {
        start: start_pos,
        end: end_pos + end_marker.len(),
    })
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        count += 1;
        from += pos + needle.len();
    }
    count
}

fn marker_error(stage: LookupStage, marker: &str, message: String) -> Error {
    Error::new(ErrorKind::MarkerResolution)
        .with_message(message)
        .with_marker(marker)
        .with_stage(stage)
}
