use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::utils::constants::TOKEN_VALIDITY_DAYS;

/// Current time truncated to whole seconds, the precision of JWT claims.
pub fn now() -> DateTime<Utc> {
    truncate_to_seconds(Utc::now())
}

pub fn truncate_to_seconds(ts: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_opt(ts.timestamp(), 0).single().unwrap_or(ts)
}

/// Fixed validity window of a developer token.
pub fn token_validity() -> Duration {
    Duration::days(TOKEN_VALIDITY_DAYS)
}
