// Shared constants for tracking and projection

/// Mean Earth radius (km) for the spherical model used by all projections.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Feet to metres.
pub const FT_TO_M: f64 = 0.3048;

/// Knots to kilometres per hour.
pub const KT_TO_KMH: f64 = 1.852;

/// Latitude limit (degrees) of the spherical Mercator projection.
/// Inputs beyond this are clamped so the projection stays finite at the poles.
pub const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

/// Width of one compass sector (degrees).
pub const CARDINAL_SECTOR: f64 = 22.5;

/// 16-point compass labels, clockwise from north.
pub const CARDINALS: [&str; 16] = [
    "N", "N-NE", "N-E", "E-NE", "E", "E-SE", "S-E", "S-SE",
    "S", "S-SW", "S-W", "W-SW", "W", "W-NW", "N-W", "N-NW",
];

// --- Defaults for the host configuration ---

/// Shortest accepted feed poll interval (s).
pub const MIN_POLL_INTERVAL: f64 = 0.1;

/// Longest accepted feed poll interval (s).
pub const MAX_POLL_INTERVAL: f64 = 86400.0;

/// Default reference latitude (degrees).
pub const DEFAULT_BASE_LAT: f64 = 52.3081;

/// Default reference longitude (degrees).
pub const DEFAULT_BASE_LON: f64 = 4.7649;

/// Default display scale factor.
pub const DEFAULT_SCALE: f64 = 80.0;

/// Default projection screen size (pixels).
pub const DEFAULT_SCREEN_WIDTH: f64 = 1024.0;
pub const DEFAULT_SCREEN_HEIGHT: f64 = 800.0;

/// Default capacity of every per-aircraft history series.
pub const DEFAULT_HISTORY_LEN: usize = 64;

/// Default age (s) after which an aircraft is displayed as stale.
pub const DEFAULT_SOFT_STALE: f64 = 60.0;

/// Default age (s) after which an aircraft is removed.
pub const DEFAULT_HARD_EVICT: f64 = 150.0;

/// Default RSSI normalization bounds (dBFS).
pub const DEFAULT_RSSI_MIN: f64 = -50.0;
pub const DEFAULT_RSSI_MAX: f64 = 0.0;

/// Default minimum projected displacement before a new trail sample is stored.
pub const DEFAULT_JITTER_THRESHOLD: f64 = 5.0;

/// Upper bound of the animated ping radius.
pub const DEFAULT_ANIMATION_RMAX: f64 = 10.0;

/// Altitude band (ft) used for display colouring.
pub const ALTITUDE_BAND_LOW: f64 = 500.0;
pub const ALTITUDE_BAND_HIGH: f64 = 50000.0;
