// Output handlers for tracked aircraft
//
// Handlers receive every aircraft touched in an update cycle and every
// identifier removed by eviction.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::Result;
use crate::tracker::TrackedAircraft;

/// Trait for output handlers
pub trait OutputHandler: Send {
    /// Handle an aircraft that was created or updated
    fn handle_update(&mut self, ac: &TrackedAircraft);

    /// Handle an aircraft that was evicted
    fn handle_eviction(&mut self, _hex: &str) {}

    /// Push buffered data out, called once per update cycle
    fn flush(&mut self) {}
}

/// Per-identifier JSON snapshot files: `<dir>/<hex>.json`, overwritten on every update
pub struct JsonSnapshotOutput {
    dir: PathBuf,
}

impl JsonSnapshotOutput {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(JsonSnapshotOutput { dir })
    }

    pub fn path_for(&self, hex: &str) -> PathBuf {
        // '~' marks non-ICAO addresses in dump1090 feeds
        self.dir.join(format!("{}.json", hex.trim_start_matches('~')))
    }

    fn write(&self, ac: &TrackedAircraft) -> Result<()> {
        let json = serde_json::to_string(ac)?;
        fs::write(self.path_for(&ac.hex), json)?;
        Ok(())
    }
}

impl OutputHandler for JsonSnapshotOutput {
    fn handle_update(&mut self, ac: &TrackedAircraft) {
        if let Err(e) = self.write(ac) {
            warn!("Failed to write snapshot for {}: {}", ac.hex, e);
        }
    }

    fn handle_eviction(&mut self, hex: &str) {
        let path = self.path_for(hex);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove snapshot {}: {}", path.display(), e);
            }
        }
    }
}

/// CSV format output
pub struct CsvOutput {
    writer: BufWriter<File>,
}

impl CsvOutput {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(CsvOutput { writer: BufWriter::new(file) })
    }

    fn format_time(timestamp: f64) -> String {
        let secs = timestamp.floor() as i64;
        let nanos = ((timestamp - secs as f64) * 1e9) as u32;
        match chrono::DateTime::from_timestamp(secs, nanos) {
            Some(dt) => dt.format("%Y/%m/%d %H:%M:%S%.3f").to_string(),
            None => String::new(),
        }
    }

    /// Format: time,hex,flight,lat,lon,alt_ft,speed_kt,track,distance_km,bearing
    pub fn format_line(ac: &TrackedAircraft) -> String {
        format!(
            "{},{},{},{:.5},{:.5},{:.0},{:.0},{:.0},{:.2},{:.1}",
            Self::format_time(ac.last_seen),
            ac.hex.to_uppercase(),
            ac.flight,
            ac.lat,
            ac.lon,
            ac.altitude,
            ac.speed,
            ac.track,
            ac.distance,
            ac.bearing,
        )
    }
}

impl OutputHandler for CsvOutput {
    fn handle_update(&mut self, ac: &TrackedAircraft) {
        if let Err(e) = writeln!(self.writer, "{}", Self::format_line(ac)) {
            warn!("Failed to write CSV: {}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!("Failed to flush CSV: {}", e);
        }
    }
}
