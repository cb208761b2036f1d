//! Persisted-state decoding
//!
//! The app's previous session lives in LocalStorage under a single key as a
//! JSON string. The shell decodes it into an opaque `Value` and hands it to
//! the application runtime as init flags; it never looks inside.

use serde_json::Value;
use thiserror::Error;

/// Stored state exists but is not valid JSON.
///
/// Never recovered anywhere in the shell: a corrupt blob aborts startup
/// rather than silently discarding the user's state.
#[derive(Debug, Error)]
#[error("persisted state is not valid JSON: {0}")]
pub struct MalformedState(#[from] serde_json::Error);

/// Decode the raw stored string into init flags.
///
/// `None` (first run, nothing stored) decodes to absent flags without
/// touching the parser. A present string must be valid JSON.
pub fn decode_flags(raw: Option<&str>) -> Result<Option<Value>, MalformedState> {
    match raw {
        None => Ok(None),
        Some(text) => Ok(Some(serde_json::from_str(text)?)),
    }
}
