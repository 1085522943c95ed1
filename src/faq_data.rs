use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Format used for the snapshot timestamp, in the cache file and on screen.
pub const SNAPSHOT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A question/answer pair as it comes out of the page, before cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFaqRecord {
    pub category: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaqRecord {
    pub category: String,
    pub question: String,
    pub answer: String,
}

/// Every record captured by one successful refresh, with the capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqSnapshot {
    pub records: Vec<FaqRecord>,
    #[serde(rename = "snapshotTime", with = "snapshot_time")]
    pub captured_at: NaiveDateTime,
}

impl FaqSnapshot {
    /// Stamps `records` with the current local time, to the second.
    pub fn capture(records: Vec<FaqRecord>) -> Self {
        let now = Local::now().naive_local();
        let captured_at = now.with_nanosecond(0).unwrap_or(now);
        Self { records, captured_at }
    }

    pub fn captured_at_display(&self) -> String {
        self.captured_at.format(SNAPSHOT_TIME_FORMAT).to_string()
    }
}

mod snapshot_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::SNAPSHOT_TIME_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(SNAPSHOT_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, SNAPSHOT_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}
