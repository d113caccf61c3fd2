//! Membership expiry policy.
//!
//! Paid memberships run until the first day of the next calendar year,
//! regardless of when in the current year the payment was made.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Computes the expiry for a membership paid at `now`.
///
/// Returns midnight UTC on January 1 of the year after `now`.
pub fn next_membership_expiry(now: Timestamp) -> Result<Timestamp, ValidationError> {
    let next_year = now.year() + 1;
    let midnight = NaiveDate::from_ymd_opt(next_year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            ValidationError::invalid_format(
                "membership_expires_at",
                format!("year {} is out of range", next_year),
            )
        })?;

    Ok(Timestamp::from_datetime(Utc.from_utc_datetime(&midnight)))
}
