//! Rendering of API results for the terminal.

use bdsaas_client::CallRecord;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::error::{CliError, CliResult};

/// Serializes any result as pretty JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Output(format!("failed to serialize JSON: {}", e)))
}

/// One seat per line.
pub fn seats(seats: &[String]) -> String {
    if seats.is_empty() {
        return "No seats available".to_string();
    }
    seats.join("\n")
}

/// A multi-line block per record, separated by blank lines.
pub fn records(records: &[CallRecord]) -> String {
    if records.is_empty() {
        return "No call records found".to_string();
    }
    records
        .iter()
        .map(record)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn record(record: &CallRecord) -> String {
    let mut lines = vec![
        format!("session:    {}", record.session_id),
        format!(
            "call:       {} -> {} ({})",
            record.caller_num, record.callee_num, record.call_type
        ),
        format!("status:     {}", record.status),
    ];
    if !record.real_name.is_empty() {
        lines.push(format!("seat owner: {}", record.real_name));
    }
    lines.push(format!("created:    {}", timestamp(record.created_at())));
    lines.push(format!("connected:  {}", timestamp(record.connected_at())));
    lines.push(format!("ended:      {}", timestamp(record.disconnected_at())));
    lines.push(format!("duration:   {}s", record.duration().as_secs()));
    if record.has_recording() {
        lines.push(format!("recording:  {}", record.record_file_id));
    }
    if !record.ext1.is_empty() {
        lines.push(format!("notes:      {}", record.ext1));
    }
    lines.join("\n")
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CallRecord {
        CallRecord {
            caller_num: "13800000000".to_string(),
            callee_num: "13900000000".to_string(),
            session_id: "badu1".to_string(),
            call_type: "OUT".to_string(),
            status: "NO_ANSWER".to_string(),
            time_consume: 0,
            ..Default::default()
        }
    }

    #[test]
    fn empty_lists_have_placeholder() {
        assert_eq!(seats(&[]), "No seats available");
        assert_eq!(records(&[]), "No call records found");
    }

    #[test]
    fn seats_one_per_line() {
        let list = vec!["13800000000".to_string(), "13800000001".to_string()];
        assert_eq!(seats(&list), "13800000000\n13800000001");
    }

    #[test]
    fn unanswered_record_shows_dashes() {
        let text = records(&[sample()]);
        assert!(text.contains("session:    badu1"));
        assert!(text.contains("13800000000 -> 13900000000 (OUT)"));
        assert!(text.contains("connected:  -"));
        assert!(text.contains("duration:   0s"));
        assert!(!text.contains("recording:"));
        assert!(!text.contains("notes:"));
    }

    #[test]
    fn records_are_separated_by_blank_line() {
        let text = records(&[sample(), sample()]);
        assert_eq!(text.matches("\n\n").count(), 1);
    }

    #[test]
    fn json_uses_wire_names() {
        let text = json(&[sample()]).unwrap();
        assert!(text.contains("\"sessionId\": \"badu1\""));
    }
}
