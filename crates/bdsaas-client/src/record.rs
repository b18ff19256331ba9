//! Historical call records.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A completed or attempted call, as recorded by the service.
///
/// Field names follow the service's wire format. Absent and `null` fields
/// both decode as the zero value. Timestamps are epoch milliseconds; zero
/// means the event never happened (e.g. an unanswered call has no connect
/// time).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallRecord {
    /// Number that placed the call (the seat).
    #[serde(deserialize_with = "null_as_default")]
    pub caller_num: String,
    /// Identifier of the recording file, empty if nothing was recorded.
    #[serde(deserialize_with = "null_as_default")]
    pub record_file_id: String,
    /// Hang-up time.
    #[serde(deserialize_with = "null_as_default")]
    pub disconnect_time: i64,
    /// Talk time in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub time_consume: i64,
    /// Session identifier returned when the call was placed.
    #[serde(deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub call_type: String,
    /// Display name of the seat owner.
    #[serde(deserialize_with = "null_as_default")]
    pub real_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_id: i64,
    /// Time the callee answered.
    #[serde(deserialize_with = "null_as_default")]
    pub connect_time: i64,
    /// Time the record was created.
    #[serde(deserialize_with = "null_as_default")]
    pub created_time: i64,
    /// Number that was called.
    #[serde(deserialize_with = "null_as_default")]
    pub callee_num: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Free-form notes passed as `notes` when the call was placed.
    #[serde(deserialize_with = "null_as_default")]
    pub ext1: String,
}

impl CallRecord {
    /// Returns the time the callee answered, if the call connected.
    pub fn connected_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.connect_time)
    }

    /// Returns the hang-up time, if known.
    pub fn disconnected_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.disconnect_time)
    }

    /// Returns the record creation time, if known.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.created_time)
    }

    /// Returns the talk time.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.time_consume.max(0) as u64)
    }

    /// Returns true if a recording file is attached to this call.
    pub fn has_recording(&self) -> bool {
        !self.record_file_id.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    if millis <= 0 {
        return None;
    }
    DateTime::from_timestamp_millis(millis)
}
