//! Ordinal resolution against a fetched snapshot.
//!
//! Users address slides by zero-based position; the service addresses them
//! by object id. Positions only mean something relative to the snapshot they
//! were read from, so every lookup here takes that snapshot explicitly.

use crate::error::{Result, SlidezError};
use crate::model::{Page, Presentation};

/// Returns the slide at `index`. Negative indexes do not wrap.
pub fn resolve_slide(snapshot: &Presentation, index: i64) -> Result<&Page> {
    resolve_position(snapshot, index).map(|(_, slide)| slide)
}

/// Like [`resolve_slide`], also handing back the checked position.
pub fn resolve_position(snapshot: &Presentation, index: i64) -> Result<(usize, &Page)> {
    usize::try_from(index)
        .ok()
        .and_then(|i| snapshot.slides.get(i).map(|slide| (i, slide)))
        .ok_or(SlidezError::OutOfRange {
            index,
            len: snapshot.slides.len(),
        })
}

/// Parses a comma separated ordinal list such as `"2, 0,1"`.
pub fn parse_ordinals(input: &str) -> Result<Vec<i64>> {
    input
        .split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<i64>().map_err(|_| {
                SlidezError::MalformedInput(format!("invalid slide index '{}'", token))
            })
        })
        .collect()
}

/// Pairs each listed ordinal with its new position (its place in the list).
///
/// Every ordinal is looked up in the original ordering of `snapshot`, never in
/// the ordering produced by moving earlier entries.
pub fn resolve_reorder(snapshot: &Presentation, ordinals: &[i64]) -> Result<Vec<(usize, String)>> {
    ordinals
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            let slide = resolve_slide(snapshot, index)?;
            Ok((position, slide.object_id.clone()))
        })
        .collect()
}
