//! Purpose: Serialize, escape, and splice JSON payloads into located spans.
//! Exports: `serialize_payload`, `escape_single_quoted`, `splice`, `splice_tagged`.
//! Role: Pure buffer assembly; never mutates the input template.
//! Invariants: Bytes outside the span are copied position-for-position.
//! Invariants: Backslashes are doubled before single quotes are escaped.

use crate::core::error::{Error, ErrorKind};
use crate::core::locate::{CLOSE_TOKEN, OPEN_TOKEN, Span};
use serde::Serialize;

/// Serialize a payload to compact JSON.
///
/// Generic over `Serialize` so callers are not limited to `serde_json::Value`;
/// maps with integer keys serialize with the keys coerced to strings, per
/// standard JSON key semantics.
pub fn serialize_payload<T: Serialize + ?Sized>(payload: &T) -> Result<String, Error> {
    serde_json::to_string(payload).map_err(|err| {
        Error::new(ErrorKind::InvalidPayload)
            .with_message("payload is not JSON-serializable")
            .with_source(err)
    })
}

/// Escape serialized JSON for embedding inside a single-quoted string literal.
///
/// Order is the one correctness-critical invariant here: backslashes must be
/// doubled first, then literal single quotes gain their escape backslash.
/// Double quotes and control characters are already escaped by the JSON
/// serializer and need no further treatment.
pub fn escape_single_quoted(json: &str) -> String {
    json.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Replace a span's interior with the escaped payload (proximity convention).
///
/// The span must bound the literal's interior only; the surrounding opening
/// and closing tokens stay in place.
pub fn splice<T: Serialize + ?Sized>(
    template: &str,
    span: Span,
    payload: &T,
) -> Result<String, Error> {
    let escaped = escape_single_quoted(&serialize_payload(payload)?);
    assemble(template, span, &[&escaped])
}

/// Replace an entire tagged block with a fresh, untagged literal.
///
/// The span covers the whole block including its markers; the replacement is
/// a bare `JSON.parse('...')` call, so the output carries no markers and a
/// repeated splice with the same identifiers will not resolve.
pub fn splice_tagged<T: Serialize + ?Sized>(
    template: &str,
    span: Span,
    payload: &T,
) -> Result<String, Error> {
    let escaped = escape_single_quoted(&serialize_payload(payload)?);
    assemble(template, span, &[OPEN_TOKEN, &escaped, CLOSE_TOKEN])
}

fn assemble(template: &str, span: Span, parts: &[&str]) -> Result<String, Error> {
    if span.start > span.end || span.end > template.len() {
        return Err(Error::new(ErrorKind::Internal).with_message(format!(
            "span [{}, {}) out of bounds for template of {} bytes",
            span.start,
            span.end,
            template.len()
        )));
    }

    let replacement_len: usize = parts.iter().map(|part| part.len()).sum();
    let mut out =
        String::with_capacity(template.len() - span.len() + replacement_len);
    out.push_str(&template[..span.start]);
    for part in parts {
        out.push_str(part);
    }
    out.push_str(&template[span.end..]);
    Ok(out)
}
