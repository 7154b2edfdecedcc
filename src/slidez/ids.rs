//! Client-side identifiers for elements created by a batch.
//!
//! An identifier is `<prefix>_<nanos>_<seq>`: the wall clock in nanoseconds
//! plus a per-process sequence number, so two calls landing on the same clock
//! tick still differ. When the clock cannot be read as nanoseconds the
//! sequence number alone keeps identifiers unique within the process.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Returns a fresh identifier for a new element, e.g. `slide_1760601234567890123_0`.
pub fn new_id(prefix: &str) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    compose(prefix, Utc::now().timestamp_nanos_opt(), seq)
}

fn compose(prefix: &str, nanos: Option<i64>, seq: u64) -> String {
    match nanos {
        Some(nanos) => format!("{}_{}_{}", prefix, nanos, seq),
        None => format!("{}_seq_{}", prefix, seq),
    }
}
