//! Pulls the JSON payload out of a free-text reply.
//!
//! Replies often wrap the payload in prose or a code fence. The payload is
//! taken as the span from the first opening bracket to the last matching
//! closing bracket.

use serde_json::Value;

use docsmith_core::ValidationError;

fn extract_between(text: &str, open: char, close: char, what: &str) -> Result<Value, ValidationError> {
    let span = match (text.find(open), text.rfind(close)) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => {
            return Err(ValidationError::new("$", format!("no JSON {what} found in reply")).with_raw(text));
        }
    };
    serde_json::from_str(span)
        .map_err(|e| ValidationError::new("$", format!("invalid JSON {what}: {e}")).with_raw(text))
}

/// First `{` through last `}`, parsed.
pub fn extract_json_object(text: &str) -> Result<Value, ValidationError> {
    extract_between(text, '{', '}', "object")
}

/// First `[` through last `]`, parsed.
pub fn extract_json_array(text: &str) -> Result<Value, ValidationError> {
    extract_between(text, '[', ']', "array")
}
