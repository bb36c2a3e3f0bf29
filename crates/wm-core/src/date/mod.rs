pub mod launch_date;

pub use launch_date::{normalize_launch_date, LaunchDatePrecision, NormalizedLaunchDate};

use chrono::{DateTime, Utc};

/// Whole minutes elapsed since `then`. Timestamps from the future clamp to 0
/// instead of going negative (clock skew between writers is expected).
pub fn minutes_since(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_minutes().max(0)
}

/// Fractional hours between two instants, clamped at 0 for inverted pairs.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    ((end - start).num_seconds() as f64 / 3600.0).max(0.0)
}

/// A missing due date is never past due.
pub fn is_past_due(due_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    matches!(due_at, Some(due) if due < now)
}
