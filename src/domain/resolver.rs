//! Tag name decoding

use crate::domain::tokens::{lookup, sorted_letters};
use crate::error::{HtlmError, Result};

/// Decode a scrambled tag name into its canonical name.
///
/// Only membership of the alternative's parent in `ancestors` matters, not
/// its position.
pub fn resolve_tag(encoded: &str, ancestors: &[&str]) -> Result<&'static str> {
    let entry =
        lookup(&sorted_letters(encoded)).ok_or_else(|| HtlmError::UnknownTag(encoded.to_string()))?;

    match entry.alternative {
        Some(alt) if ancestors.contains(&alt.parent) => Ok(alt.value),
        _ => Ok(entry.default),
    }
}
