// Aircraft feed ingestion
// Reads dump1090-style aircraft.json snapshots: {"now": ..., "aircraft": [ {...}, ... ]}
// Top-level fields other than "aircraft" are ignored; the host clock timestamps updates.

use std::path::Path;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::messages::AircraftMessage;

/// Raw file layout. Entries are kept as JSON values so one malformed entry
/// only drops itself.
#[derive(Debug, Deserialize)]
struct RawFeed {
    #[serde(default)]
    aircraft: Vec<Value>,
}

/// One parsed feed snapshot
#[derive(Debug, Default)]
pub struct AircraftFeed {
    pub messages: Vec<AircraftMessage>,
    /// Entries that could not be read as an aircraft message
    pub skipped: usize,
}

/// Parse a feed document
pub fn parse_feed(json: &str) -> Result<AircraftFeed> {
    let raw: RawFeed = serde_json::from_str(json)?;

    let mut feed = AircraftFeed {
        messages: Vec::with_capacity(raw.aircraft.len()),
        skipped: 0,
    };
    for entry in raw.aircraft {
        match serde_json::from_value::<AircraftMessage>(entry) {
            Ok(msg) => feed.messages.push(msg),
            Err(e) => {
                debug!("Skipping feed entry: {}", e);
                feed.skipped += 1;
            }
        }
    }
    Ok(feed)
}

/// Read and parse a feed file
pub async fn read_feed<P: AsRef<Path>>(path: P) -> Result<AircraftFeed> {
    let json = tokio::fs::read_to_string(path).await?;
    parse_feed(&json)
}
