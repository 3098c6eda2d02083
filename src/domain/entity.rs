//! Core domain models for the real-time delivery subsystem.

use serde::{Deserialize, Serialize};

use super::value_object::{SessionId, Timestamp};

/// Kind of admin notification pushed over the one-way stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewOrder,
    NewListing,
    NewUser,
    NewMessage,
    Dispute,
    Notice,
    System,
}

/// An admin notification.
///
/// Immutable once constructed and never persisted; delivery is
/// fire-and-forget over the currently connected admin streams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Free-form payload for the client (order id, listing slug, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub timestamp: i64,
}

impl Notification {
    /// Create a new notification stamped with the given time.
    pub fn new(
        kind: NotificationKind,
        title: String,
        message: String,
        data: Option<serde_json::Value>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            kind,
            title,
            message,
            data,
            timestamp: timestamp.value(),
        }
    }
}

/// Presence status of a marketplace user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Offline,
}

/// An anonymous visitor's browsing session.
///
/// Kept alive by periodic client heartbeats; reclassified as ended by the
/// staleness sweep or an explicit disconnect. `ended_at` transitions from
/// `None` to `Some` at most once and the session is never reactivated
/// afterwards, not even by a late heartbeat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorSession {
    pub id: SessionId,
    pub entry_page: String,
    pub current_page: String,
    pub country: String,
    pub device: String,
    pub browser: String,
    pub started_at: Timestamp,
    pub last_activity_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub page_view_count: u64,
}

impl VisitorSession {
    /// Create a new session starting on `entry_page` at `started_at`.
    ///
    /// The entry page counts as the first page view.
    pub fn new(
        id: SessionId,
        entry_page: String,
        country: String,
        device: String,
        browser: String,
        started_at: Timestamp,
    ) -> Self {
        Self {
            id,
            current_page: entry_page.clone(),
            entry_page,
            country,
            device,
            browser,
            started_at,
            last_activity_at: started_at,
            ended_at: None,
            page_view_count: 1,
        }
    }

    /// Whether the session has not been marked ended.
    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Refresh the activity timestamp.
    ///
    /// Returns `false` without touching anything when the session has
    /// already ended: a late heartbeat must not resurrect it.
    pub fn record_heartbeat(&mut self, at: Timestamp) -> bool {
        if !self.is_active() {
            return false;
        }
        self.last_activity_at = at;
        true
    }

    /// Record a navigation to `path`.
    ///
    /// Counts a page view and refreshes activity. No-op on ended sessions,
    /// same as [`Self::record_heartbeat`].
    pub fn record_page_view(&mut self, path: String, at: Timestamp) -> bool {
        if !self.is_active() {
            return false;
        }
        self.current_page = path;
        self.page_view_count += 1;
        self.last_activity_at = at;
        true
    }

    /// Mark the session ended.
    ///
    /// Returns `true` only on the first call (the active-to-ended
    /// transition); later calls leave the original end time untouched.
    pub fn end(&mut self, at: Timestamp) -> bool {
        if self.ended_at.is_some() {
            return false;
        }
        self.ended_at = Some(at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(started_at: i64) -> VisitorSession {
        VisitorSession::new(
            SessionId::new("v1".to_string()).unwrap(),
            "/listings".to_string(),
            "MA".to_string(),
            "desktop".to_string(),
            "Firefox".to_string(),
            Timestamp::new(started_at),
        )
    }

    #[test]
    fn test_new_session_counts_entry_page_view() {
        // when:
        let s = session(1000);

        // then:
        assert!(s.is_active());
        assert_eq!(s.page_view_count, 1);
        assert_eq!(s.current_page, "/listings");
        assert_eq!(s.entry_page, "/listings");
        assert_eq!(s.last_activity_at, Timestamp::new(1000));
    }

    #[test]
    fn test_heartbeat_refreshes_activity() {
        // given:
        let mut s = session(1000);

        // when:
        let refreshed = s.record_heartbeat(Timestamp::new(5000));

        // then:
        assert!(refreshed);
        assert_eq!(s.last_activity_at, Timestamp::new(5000));
        assert_eq!(s.page_view_count, 1);
    }

    #[test]
    fn test_page_view_bumps_count_and_page() {
        // given:
        let mut s = session(1000);

        // when:
        let recorded = s.record_page_view("/listings/42".to_string(), Timestamp::new(2000));

        // then:
        assert!(recorded);
        assert_eq!(s.page_view_count, 2);
        assert_eq!(s.current_page, "/listings/42");
        assert_eq!(s.entry_page, "/listings");
        assert_eq!(s.last_activity_at, Timestamp::new(2000));
    }

    #[test]
    fn test_end_is_set_at_most_once() {
        // given:
        let mut s = session(1000);

        // when: ended twice
        let first = s.end(Timestamp::new(2000));
        let second = s.end(Timestamp::new(9000));

        // then: only the first transition counts and the time sticks
        assert!(first);
        assert!(!second);
        assert_eq!(s.ended_at, Some(Timestamp::new(2000)));
    }

    #[test]
    fn test_late_heartbeat_does_not_resurrect() {
        // given: an ended session
        let mut s = session(1000);
        s.end(Timestamp::new(2000));

        // when: a heartbeat arrives after the end
        let refreshed = s.record_heartbeat(Timestamp::new(3000));

        // then: rejected, activity timestamp unchanged
        assert!(!refreshed);
        assert!(!s.is_active());
        assert_eq!(s.last_activity_at, Timestamp::new(1000));
    }

    #[test]
    fn test_page_view_on_ended_session_is_rejected() {
        // given:
        let mut s = session(1000);
        s.end(Timestamp::new(2000));

        // when:
        let recorded = s.record_page_view("/cart".to_string(), Timestamp::new(3000));

        // then:
        assert!(!recorded);
        assert_eq!(s.page_view_count, 1);
        assert_eq!(s.current_page, "/listings");
    }
}
