use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One completed focus cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLog {
    pub id: String,
    /// RFC 3339 timestamp of completion
    pub date: String,
    /// Minutes
    pub duration: u32,
}

impl SessionLog {
    pub fn completed_at(at: DateTime<Utc>, duration: u32) -> Self {
        Self {
            id: at.timestamp_millis().to_string(),
            date: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_completed_at() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let log = SessionLog::completed_at(at, 25);
        assert_eq!(log.id, at.timestamp_millis().to_string());
        assert_eq!(log.date, "2024-03-01T09:30:00.000Z");
        assert_eq!(log.duration, 25);
    }
}
