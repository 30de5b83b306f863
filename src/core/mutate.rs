//! Purpose: Composed locate-then-splice operations over whole templates.
//! Exports: `replace_tagged_block`, `replace_nearby_block`.
//! Role: The two public mutation entrypoints backing the CLI subcommands.
//! Invariants: Pure functions of their inputs; no caching across calls.
//! Invariants: A locate failure yields no output buffer at all.

use crate::core::error::Error;
use crate::core::locate::{locate, locate_tagged};
use crate::core::splice::{splice, splice_tagged};
use serde::Serialize;

/// Replace a tagged block (embedded-tag convention) with a fresh literal.
///
/// The whole block, markers included, is replaced by an untagged
/// `JSON.parse('...')` call carrying the serialized payload. Because the
/// markers are consumed, repeating the call with the same identifiers
/// against the output fails; that asymmetry is deliberate.
pub fn replace_tagged_block<T: Serialize + ?Sized>(
    template: &str,
    start_idx: &str,
    end_idx: &str,
    payload: &T,
) -> Result<String, Error> {
    let span = locate_tagged(template, start_idx, end_idx)?;
    splice_tagged(template, span, payload)
}

/// Replace the literal interior located by free-standing markers
/// (proximity convention). The markers themselves are part of the replaced
/// interior only if they sit inside the literal; the constructor tokens
/// always stay in place.
pub fn replace_nearby_block<T: Serialize + ?Sized>(
    template: &str,
    start_idx: &str,
    end_idx: &str,
    payload: &T,
) -> Result<String, Error> {
    let span = locate(template, start_idx, end_idx)?;
    splice(template, span, payload)
}

#[cfg(test)]
mod tests {
    use super::{replace_nearby_block, replace_tagged_block};
    use crate::core::error::{ErrorKind, LookupStage};
    use serde_json::json;

    #[test]
    fn tagged_replacement_matches_reference_scenario() {
        let template = r#"x = JSON.parse('{"startIdx":"A","rows":[4,5],"endIdx":"B"}')"#;
        let out = replace_tagged_block(template, "A", "B", &json!({"k": [1, 2]}))
            .expect("replace");
        assert_eq!(out, r#"x = JSON.parse('{"k":[1,2]}')"#);
    }

    #[test]
    fn tagged_replacement_leaves_sibling_blocks_untouched() {
        let first = r#"a = JSON.parse('{"startIdx":"A","n":1,"endIdx":"B"}');"#;
        let second = r#"b = JSON.parse('{"startIdx":"C","n":2,"endIdx":"D"}');"#;
        let template = format!("{first}\n{second}\n");

        let out = replace_tagged_block(&template, "A", "B", &json!({"n": 9})).expect("replace");
        assert_eq!(out, format!("a = JSON.parse('{{\"n\":9}}');\n{second}\n"));
    }

    #[test]
    fn retagged_output_is_not_relocatable() {
        // The replacement literal carries no markers, so a second splice with
        // the same identifiers must fail. Deliberate: do not "fix" this into
        // an idempotent chain.
        let template = r#"x = JSON.parse('{"startIdx":"A","endIdx":"B"}')"#;
        let out = replace_tagged_block(template, "A", "B", &json!({"k": 1})).expect("first");
        let err = replace_tagged_block(&out, "A", "B", &json!({"k": 2})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MarkerResolution);
        assert_eq!(err.stage(), Some(LookupStage::StartMarker));
    }

    #[test]
    fn nearby_replacement_keeps_constructor_tokens() {
        let template = r#"<html>var d = JSON.parse('{"first":1,"last":2}'); draw(d);</html>"#;
        let out = replace_nearby_block(template, "first", "last", &json!([true, null]))
            .expect("replace");
        assert_eq!(out, r#"<html>var d = JSON.parse('[true,null]'); draw(d);</html>"#);
    }

    #[test]
    fn nearby_replacement_escapes_quotes_in_payload() {
        let template = r#"var d = JSON.parse('{"first":1,"last":2}');"#;
        let out = replace_nearby_block(template, "first", "last", &json!({"s": "it's"}))
            .expect("replace");
        assert_eq!(out, r#"var d = JSON.parse('{"s":"it\'s"}');"#);
    }

    #[test]
    fn missing_marker_produces_no_output() {
        let template = r#"var d = JSON.parse('{"first":1,"last":2}');"#;
        let err = replace_nearby_block(template, "nope", "last", &json!(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MarkerResolution);
        assert_eq!(err.marker(), Some("nope"));
    }
}
