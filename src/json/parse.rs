//! Purpose: Provide the payload JSON decode entrypoint.
//! Exports: `payload_from_str`.
//! Role: Parser boundary mapping decode failures onto the crate error model.
//! Invariants: Leading and trailing whitespace is stripped before parsing.
//! Invariants: Any parse failure aborts the operation; nothing is guessed.

use crate::core::error::{Error, ErrorKind};
use serde_json::Value;

/// Parse one JSON value (object, array, or scalar) from payload text.
pub fn payload_from_str(input: &str) -> Result<Value, Error> {
    serde_json::from_str(input.trim()).map_err(|err| {
        Error::new(ErrorKind::InvalidPayload)
            .with_message(format!("payload is not valid JSON ({err})"))
            .with_source(err)
            .with_hint("The payload file must contain a single JSON value.")
    })
}

#[cfg(test)]
mod tests {
    use super::payload_from_str;
    use crate::core::error::ErrorKind;
    use serde_json::json;
    use std::error::Error as _;

    #[test]
    fn surrounding_whitespace_is_stripped() {
        let value = payload_from_str("\n  {\"k\": [1, 2]}  \n").expect("parse");
        assert_eq!(value, json!({"k": [1, 2]}));
    }

    #[test]
    fn scalars_are_accepted() {
        assert_eq!(payload_from_str("42").expect("parse"), json!(42));
        assert_eq!(payload_from_str("null").expect("parse"), json!(null));
    }

    #[test]
    fn malformed_payload_maps_to_invalid_payload() {
        let err = payload_from_str("{\"k\":}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPayload);
        assert!(err.source().is_some());
        assert!(err.hint().is_some());
    }
}
