use serde::{Deserialize, Serialize};

/// Cached tip of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTip {
    pub tip: String,
    /// Issuance date, `YYYY-MM-DD`
    pub date: String,
}

impl DailyTip {
    pub fn new(tip: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            tip: tip.into(),
            date: date.into(),
        }
    }

    /// Usable for `today` when issued today and non-empty
    pub fn is_fresh(&self, today: &str) -> bool {
        self.date == today && !self.tip.trim().is_empty()
    }
}
