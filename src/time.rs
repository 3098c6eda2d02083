use chrono::Utc;

use crate::domain::Timestamp;

/// Get the current Unix timestamp in milliseconds (UTC)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current wall-clock time as a domain Timestamp
pub fn now() -> Timestamp {
    Timestamp::new(now_millis())
}

/// Format a millisecond Unix timestamp as RFC 3339 (UTC)
pub fn millis_to_rfc3339(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| millis.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_monotonic_enough() {
        // given:
        let a = now_millis();

        // when:
        let b = now_millis();

        // then:
        assert!(b >= a);
    }

    #[test]
    fn test_millis_to_rfc3339() {
        // when:
        let formatted = millis_to_rfc3339(0);

        // then:
        assert!(formatted.starts_with("1970-01-01T00:00:00"));
    }
}
