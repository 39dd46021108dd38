//! Plain-text upstream body parsing

use crate::error::WorkerError;

/// Parse a whitespace-separated list of base-10 integers.
///
/// Source order is preserved. The first token that is not an integer fails
/// the whole body; an empty or whitespace-only body yields an empty list.
pub fn parse_integers(body: &[u8]) -> Result<Vec<i64>, WorkerError> {
    let text = std::str::from_utf8(body).map_err(|e| WorkerError::Parse {
        reason: format!("body is not valid UTF-8: {e}"),
    })?;

    text.split_whitespace()
        .map(|token| {
            token.parse::<i64>().map_err(|_| WorkerError::Parse {
                reason: format!("invalid integer '{token}'"),
            })
        })
        .collect()
}
