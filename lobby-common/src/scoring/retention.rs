//! Supporter retention percentage
//!
//! A supporter is "returning" when they have pledged to more than one
//! campaign. Retention is the returning share of all supporters, as a
//! percentage rounded to one decimal.

/// Calculate retention percentage from aggregate supporter counts
///
/// Returns 0.0 when there are no supporters.
pub fn retention_percentage(returning_supporters: i64, total_supporters: i64) -> f64 {
    if total_supporters <= 0 {
        return 0.0;
    }
    let pct = returning_supporters.max(0) as f64 / total_supporters as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}
