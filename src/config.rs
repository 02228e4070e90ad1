use clap::Parser;
use serde::Serialize;

use crate::constants::*;
use crate::geodesy::{ReferenceFrame, Viewport};

/// Radar tracker configuration
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Aircraft feed file (dump1090 aircraft.json) to poll.
    #[arg(long, value_name = "FILE")]
    pub feed: String,

    /// Seconds between feed polls (at least 0.1).
    #[arg(long, default_value_t = 2.0, value_parser = parse_poll_interval)]
    pub poll_interval: f64,

    /// Latitude of the reference position (degrees).
    #[arg(long, default_value_t = DEFAULT_BASE_LAT, allow_negative_numbers = true)]
    pub base_lat: f64,

    /// Longitude of the reference position (degrees).
    #[arg(long, default_value_t = DEFAULT_BASE_LON, allow_negative_numbers = true)]
    pub base_lon: f64,

    /// Display scale factor (km mapped onto the radar radius).
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// Screen width used for projection scaling.
    #[arg(long, default_value_t = DEFAULT_SCREEN_WIDTH)]
    pub screen_width: f64,

    /// Screen height used for projection scaling.
    #[arg(long, default_value_t = DEFAULT_SCREEN_HEIGHT)]
    pub screen_height: f64,

    /// Number of samples kept in every per-aircraft history series.
    #[arg(long, default_value_t = DEFAULT_HISTORY_LEN)]
    pub history: usize,

    /// Seconds without update after which an aircraft is shown as stale.
    #[arg(long, default_value_t = DEFAULT_SOFT_STALE)]
    pub soft_stale: f64,

    /// Seconds without update after which an aircraft is removed.
    #[arg(long, default_value_t = DEFAULT_HARD_EVICT)]
    pub hard_evict: f64,

    /// RSSI (dBFS) mapped to signal strength 0.
    #[arg(long, default_value_t = DEFAULT_RSSI_MIN, allow_negative_numbers = true)]
    pub rssi_min: f64,

    /// RSSI (dBFS) mapped to signal strength 1.
    #[arg(long, default_value_t = DEFAULT_RSSI_MAX, allow_negative_numbers = true)]
    pub rssi_max: f64,

    /// Rotation added to reported bearings (degrees).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub bearing_offset: f64,

    /// Minimum projected displacement before a new trail sample is stored.
    #[arg(long, default_value_t = DEFAULT_JITTER_THRESHOLD)]
    pub jitter_threshold: f64,

    /// Directory for per-aircraft JSON snapshots (one file per identifier).
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<String>,

    /// Append position updates in CSV format to a local file.
    #[arg(long, value_name = "FILE")]
    pub write_csv: Option<String>,

    /// Status logging interval in seconds, <= 0 to disable
    #[arg(long, default_value_t = 30)]
    pub status_interval: i32,

    /// Verbose logging (DEBUG level)
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Core tracker settings derived from the command line
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            frame: ReferenceFrame::new(self.base_lat, self.base_lon),
            viewport: Viewport::new(self.screen_width, self.screen_height, self.scale),
            history_len: self.history,
            soft_stale: self.soft_stale,
            hard_evict: self.hard_evict,
            rssi_min: self.rssi_min,
            rssi_max: self.rssi_max,
            bearing_offset: self.bearing_offset,
            jitter_threshold: self.jitter_threshold,
            animation_rmax: DEFAULT_ANIMATION_RMAX,
        }
    }
}

/// Settings the tracking core needs from its host. Fixed for the lifetime of a [`crate::tracker::Tracker`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerConfig {
    pub frame: ReferenceFrame,
    pub viewport: Viewport,
    pub history_len: usize,
    /// seconds
    pub soft_stale: f64,
    /// seconds
    pub hard_evict: f64,
    pub rssi_min: f64,
    pub rssi_max: f64,
    /// degrees
    pub bearing_offset: f64,
    pub jitter_threshold: f64,
    pub animation_rmax: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            frame: ReferenceFrame::new(DEFAULT_BASE_LAT, DEFAULT_BASE_LON),
            viewport: Viewport::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCALE),
            history_len: DEFAULT_HISTORY_LEN,
            soft_stale: DEFAULT_SOFT_STALE,
            hard_evict: DEFAULT_HARD_EVICT,
            rssi_min: DEFAULT_RSSI_MIN,
            rssi_max: DEFAULT_RSSI_MAX,
            bearing_offset: 0.0,
            jitter_threshold: DEFAULT_JITTER_THRESHOLD,
            animation_rmax: DEFAULT_ANIMATION_RMAX,
        }
    }
}

impl TrackerConfig {
    /// Default settings around another reference position
    pub fn with_reference(lat: f64, lon: f64) -> Self {
        TrackerConfig {
            frame: ReferenceFrame::new(lat, lon),
            ..Default::default()
        }
    }
}

/// Accepts finite intervals up to one day, raising anything below 0.1 s to 0.1 s
fn parse_poll_interval(s: &str) -> Result<f64, String> {
    let secs: f64 = s.trim().parse().map_err(|e| format!("invalid interval '{}': {}", s, e))?;
    if !secs.is_finite() || secs > MAX_POLL_INTERVAL {
        return Err(format!("interval must be at most {} seconds, got '{}'", MAX_POLL_INTERVAL, s));
    }
    Ok(secs.max(MIN_POLL_INTERVAL))
}
