//! UTC timestamp wrapper used throughout the domain.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps an existing chrono datetime.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner chrono datetime.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns a timestamp `days` days after this one.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// True when this timestamp is strictly before `other`.
    pub fn is_before(&self, other: Timestamp) -> bool {
        self.0 < other.0
    }

    /// True when this timestamp is strictly after `other`.
    pub fn is_after(&self, other: Timestamp) -> bool {
        self.0 > other.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_days_moves_forward() {
        let now = Timestamp::now();
        let later = now.plus_days(7);
        assert!(now.is_before(later));
        assert!(later.is_after(now));
        assert_eq!(later.as_datetime() - now.as_datetime(), Duration::days(7));
    }

    #[test]
    fn ordering_follows_time() {
        let a = Timestamp::now();
        let b = a.plus_days(1);
        assert!(a < b);
        assert!(!a.is_after(b));
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        let restored: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ts);
    }
}
