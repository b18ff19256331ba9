//! Commands that talk to the bdsaas service.

use std::path::{Path, PathBuf};

use bdsaas_client::{CallOptions, Client};
use tracing::{info, warn};

use crate::error::CliResult;
use crate::output;

/// Lists seat phone numbers.
pub async fn seats(client: &Client, json: bool) -> CliResult<()> {
    let seats = client.seats().await?;
    if json {
        println!("{}", output::json(&seats)?);
    } else {
        println!("{}", output::seats(&seats));
    }
    Ok(())
}

/// Places a call and prints the session ID.
pub async fn call(
    client: &Client,
    from: &str,
    to: &str,
    ip: Option<String>,
    notes: Option<String>,
    json: bool,
) -> CliResult<()> {
    let mut options = CallOptions::new();
    if let Some(ip) = ip {
        options = options.with_ip(ip);
    }
    if let Some(notes) = notes {
        options = options.with_notes(notes);
    }

    let session_id = client.call(from, to, &options).await?;
    info!(session_id = %session_id, from = %from, to = %to, "call placed");
    if json {
        println!("{}", output::json(&serde_json::json!({ "sessionId": session_id }))?);
    } else {
        println!("{}", session_id);
    }
    Ok(())
}

/// Prints call records for the given sessions.
pub async fn query(client: &Client, session_ids: &[String], json: bool) -> CliResult<()> {
    let records = client.query(session_ids).await?;
    if records.len() < session_ids.len() {
        warn!(
            requested = session_ids.len(),
            found = records.len(),
            "some sessions have no record yet"
        );
    }
    if json {
        println!("{}", output::json(&records)?);
    } else {
        println!("{}", output::records(&records));
    }
    Ok(())
}

/// Downloads a call recording to a file.
pub async fn download(
    client: &Client,
    session_id: &str,
    output_path: Option<PathBuf>,
    json: bool,
) -> CliResult<()> {
    let recording = client.download_recording(session_id).await?;
    if !recording.is_mpeg_audio() {
        warn!(session_id = %session_id, "recording does not look like MP3 audio");
    }

    let path = output_path.unwrap_or_else(|| default_output_path(session_id));
    tokio::fs::write(&path, recording.as_bytes()).await?;

    if json {
        println!(
            "{}",
            output::json(&serde_json::json!({
                "sessionId": session_id,
                "path": path.display().to_string(),
                "bytes": recording.len(),
                "mpeg": recording.is_mpeg_audio(),
            }))?
        );
    } else {
        println!("{} ({} bytes)", path.display(), recording.len());
    }
    Ok(())
}

fn default_output_path(session_id: &str) -> PathBuf {
    let name: String = session_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    Path::new(".").join(format!("{}.mp3", name))
}
