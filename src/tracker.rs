// Aircraft tracking
//
// `TrackedAircraft` holds the live state of one transponder: current attributes,
// position-derived attributes and bounded history series. `Tracker` owns all of
// them keyed by identifier and applies feed messages, staleness and eviction.

use std::cmp::Ordering;
use std::collections::HashMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::category;
use crate::config::TrackerConfig;
use crate::constants::{ALTITUDE_BAND_HIGH, ALTITUDE_BAND_LOW, FT_TO_M, KT_TO_KMH};
use crate::error::{Result, TrackError};
use crate::geodesy::{self, ScreenPoint};
use crate::history::History;
use crate::messages::{normalize_identifier, AircraftMessage, RejectReason};

/// Display freshness of a tracked aircraft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackState {
    Active,
    /// Soft threshold elapsed; still tracked and still updatable
    Stale,
}

/// Sign of the vertical rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerticalTrend {
    Climbing,
    Level,
    Descending,
}

/// Presentation-only ping radius, advanced once per render tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingAnimation {
    pub radius: f64,
    pub rmax: f64,
    pub reversing: bool,
}

impl PingAnimation {
    pub fn new(rmax: f64) -> Self {
        PingAnimation { radius: 0.0, rmax, reversing: false }
    }

    /// Advance by `rate · (10 − |signal|)`; direction flips at the bounds and the
    /// radius is kept inside [0, rmax].
    pub fn step(&mut self, rate: f64, signal: f64) {
        let delta = rate * (10.0 - signal.abs());
        if self.reversing {
            self.radius -= delta;
        } else {
            self.radius += delta;
        }

        if self.radius >= self.rmax {
            self.radius = self.rmax;
            self.reversing = true;
        } else if self.radius <= 0.0 {
            self.radius = 0.0;
            self.reversing = false;
        }
    }
}

/// A single tracked aircraft
#[derive(Debug, Clone, Serialize)]
pub struct TrackedAircraft {
    // Identity
    /// Normalized transponder identifier (lowercase hex)
    pub hex: String,

    // Current attributes
    pub lat: f64,
    pub lon: f64,
    /// Track over ground, degrees [0, 360)
    pub track: f64,
    /// feet
    pub altitude: f64,
    pub altitude_m: f64,
    /// knots
    pub speed: f64,
    pub speed_kmh: f64,
    /// feet per minute
    pub vert_rate: f64,
    /// Last raw signal strength (dBFS)
    pub rssi: f64,
    /// Signal strength normalized into [0, 1]
    pub rssi_norm: f64,
    pub category: String,
    pub size: u8,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub flight: String,
    pub squawk: Option<String>,
    /// Creation time (Unix seconds)
    pub created: f64,
    /// Last accepted update (Unix seconds)
    pub last_seen: f64,

    // Derived from the last applied lat/lon
    /// km from the reference position
    pub distance: f64,
    /// degrees from the reference position, offset-rotated
    pub bearing: f64,
    pub cardinal: &'static str,
    /// Relative (azimuthal) projection
    pub position: ScreenPoint,
    /// Mercator projection
    pub mercator: ScreenPoint,

    // History
    pub positions: History<ScreenPoint>,
    /// Mercator trail, only extended on displacement >= jitter threshold
    pub trail: History<ScreenPoint>,
    pub timestamps: History<f64>,
    pub distances: History<f64>,
    pub altitudes: History<f64>,
    pub speeds: History<f64>,
    pub vert_rates: History<f64>,
    pub tracks: History<f64>,
    /// normalized values
    pub rssis: History<f64>,

    #[serde(skip)]
    pub animation: PingAnimation,
}

impl TrackedAircraft {
    /// Create a new tracked aircraft at the given position.
    /// The position path runs once so derived fields and the first samples exist.
    pub fn new(hex: &str, lat: f64, lon: f64, now: f64, config: &TrackerConfig) -> Self {
        let cap = config.history_len;
        let undefined = category::UNDEFINED;

        let mut ac = TrackedAircraft {
            hex: hex.to_string(),

            lat,
            lon,
            track: 0.0,
            altitude: 0.0,
            altitude_m: 0.0,
            speed: 0.0,
            speed_kmh: 0.0,
            vert_rate: 0.0,
            rssi: 0.0,
            rssi_norm: 0.5,
            category: String::new(),
            size: undefined.size,
            kind: undefined.kind,
            flight: String::new(),
            squawk: None,
            created: now,
            last_seen: now,

            distance: 0.0,
            bearing: 0.0,
            cardinal: "N",
            position: ScreenPoint::default(),
            mercator: ScreenPoint::default(),

            positions: History::new(cap),
            trail: History::new(cap),
            timestamps: History::new(cap),
            distances: History::new(cap),
            altitudes: History::new(cap),
            speeds: History::new(cap),
            vert_rates: History::new(cap),
            tracks: History::new(cap),
            rssis: History::new(cap),

            animation: PingAnimation::new(config.animation_rmax),
        };
        ac.apply_position(lat, lon, now, config);
        ac
    }

    /// Update the position and everything derived from it
    pub fn apply_position(&mut self, lat: f64, lon: f64, now: f64, config: &TrackerConfig) {
        let frame = &config.frame;
        let viewport = &config.viewport;

        self.lat = lat;
        self.lon = lon;

        self.distance = frame.distance_to(lat, lon);
        // compass label follows the true bearing, the offset only rotates the reported value
        self.cardinal = geodesy::cardinal_label(frame.bearing_to(lat, lon, 0.0));
        self.bearing = frame.bearing_to(lat, lon, config.bearing_offset);
        self.position = geodesy::relative_projection(lat, lon, frame, viewport);
        self.mercator = geodesy::mercator_projection(lat, lon, frame.lat, frame.lon, viewport);

        self.positions.push(self.position);
        self.timestamps.push(now);
        self.distances.push(self.distance);

        let moved = match self.trail.last() {
            Some(&last) => geodesy::mercator_point_distance(last, self.mercator) >= config.jitter_threshold,
            None => true,
        };
        if moved {
            self.trail.push(self.mercator);
        }

        self.last_seen = now;
    }

    /// Update altitude (feet)
    pub fn apply_altitude(&mut self, ft: f64) {
        self.altitude = ft;
        self.altitude_m = ft * FT_TO_M;
        self.altitudes.push(ft);
    }

    /// Update ground speed (knots)
    pub fn apply_speed(&mut self, kt: f64) {
        self.speed = kt;
        self.speed_kmh = kt * KT_TO_KMH;
        self.speeds.push(kt);
    }

    /// Update vertical rate (feet per minute)
    pub fn apply_vertical_rate(&mut self, fpm: f64) {
        self.vert_rate = fpm;
        self.vert_rates.push(fpm);
    }

    /// Update track over ground (degrees)
    pub fn apply_track(&mut self, deg: f64) {
        self.track = geodesy::normalize_degrees(deg);
        self.tracks.push(self.track);
    }

    pub fn apply_rssi(&mut self, raw: f64, config: &TrackerConfig) {
        self.rssi = raw;
        self.rssi_norm = geodesy::normalize_signal(raw, config.rssi_min, config.rssi_max);
        self.rssis.push(self.rssi_norm);
    }

    /// Update the emitter category; unknown codes resolve to the "Undefined" entry
    pub fn apply_category(&mut self, code: &str) {
        let info = category::lookup(code);
        self.category = code.trim().to_uppercase();
        self.size = info.size;
        self.kind = info.kind;
    }

    pub fn apply_flight_label(&mut self, text: &str) {
        self.flight = text.trim().to_string();
    }

    pub fn apply_squawk(&mut self, code: &str) {
        let code = code.trim();
        self.squawk = if code.is_empty() { None } else { Some(code.to_string()) };
    }

    /// Mark the aircraft as heard at `now` without changing any attribute
    pub fn touch(&mut self, now: f64) {
        self.last_seen = now;
    }

    /// Flight label if there is one, else the uppercased identifier
    pub fn display_label(&self) -> String {
        if self.flight.is_empty() {
            self.hex.to_uppercase()
        } else {
            self.flight.clone()
        }
    }

    /// Advance the presentation ping
    pub fn step_animation(&mut self, rate: f64) {
        self.animation.step(rate, self.rssi_norm);
    }

    /// Seconds since the last accepted update
    pub fn age(&self, now: f64) -> f64 {
        now - self.last_seen
    }

    pub fn is_stale(&self, now: f64, soft_threshold: f64) -> bool {
        self.age(now) >= soft_threshold
    }

    pub fn state(&self, now: f64, soft_threshold: f64) -> TrackState {
        if self.is_stale(now, soft_threshold) { TrackState::Stale } else { TrackState::Active }
    }

    pub fn vertical_trend(&self) -> VerticalTrend {
        if self.vert_rate > 0.0 {
            VerticalTrend::Climbing
        } else if self.vert_rate < 0.0 {
            VerticalTrend::Descending
        } else {
            VerticalTrend::Level
        }
    }

    /// Position of the altitude inside the display colour band, [0, 1]
    pub fn altitude_fraction(&self) -> f64 {
        ((self.altitude - ALTITUDE_BAND_LOW) / (ALTITUDE_BAND_HIGH - ALTITUDE_BAND_LOW)).clamp(0.0, 1.0)
    }

    /// Deterministic per-aircraft seed derived from the identifier
    pub fn seed(&self) -> u32 {
        let hex = self.hex.trim_start_matches('~');
        let mut h = match u32::from_str_radix(hex, 16) {
            Ok(addr) => addr,
            Err(_) => self.hex.bytes().fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32)),
        };
        h = ((h >> 16) ^ h).wrapping_mul(0x45d9f3b);
        h = ((h >> 16) ^ h).wrapping_mul(0x45d9f3b);
        (h >> 16) ^ h
    }
}

impl PartialEq for TrackedAircraft {
    fn eq(&self, other: &Self) -> bool {
        self.hex == other.hex
    }
}

impl Eq for TrackedAircraft {}

/// Snapshot orderings offered to displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Nearest first
    Distance,
    /// By identifier-derived seed
    Seed,
    /// Most recently updated first
    Age,
    Identifier,
}

impl SortKey {
    pub fn compare(&self, a: &TrackedAircraft, b: &TrackedAircraft) -> Ordering {
        match self {
            SortKey::Distance => a.distance.total_cmp(&b.distance),
            SortKey::Seed => a.seed().cmp(&b.seed()),
            SortKey::Age => b.last_seen.total_cmp(&a.last_seen),
            SortKey::Identifier => a.hex.cmp(&b.hex),
        }
    }
}

/// Result of applying one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    Rejected(RejectReason),
}

/// Running totals since the tracker was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrackerStats {
    pub created: usize,
    pub updated: usize,
    pub rejected: usize,
    pub evicted: usize,
}

/// Aircraft tracker - owns all tracked aircraft.
///
/// Has no internal synchronization: embed it behind a single lock or on a
/// single task so every call has exclusive access.
pub struct Tracker {
    config: TrackerConfig,
    /// Map of identifier -> TrackedAircraft
    aircraft: HashMap<String, TrackedAircraft>,
    stats: TrackerStats,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Self {
        Tracker {
            config,
            aircraft: HashMap::new(),
            stats: TrackerStats::default(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn stats(&self) -> TrackerStats {
        self.stats
    }

    /// Number of tracked aircraft
    pub fn num_aircraft(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    pub fn contains(&self, hex: &str) -> bool {
        self.aircraft.contains_key(&normalize_identifier(hex))
    }

    /// Apply one message: update a known aircraft sparsely or create a new one.
    ///
    /// Messages without identifier, and messages for an unseen identifier without
    /// a complete position, are dropped without touching the tracker.
    pub fn upsert(&mut self, msg: &AircraftMessage, now: f64) -> UpsertOutcome {
        let Some(hex) = msg.identifier() else {
            trace!("Dropping message without identifier");
            self.stats.rejected += 1;
            return UpsertOutcome::Rejected(RejectReason::MissingIdentifier);
        };

        if let Some(ac) = self.aircraft.get_mut(&hex) {
            msg.apply_to(ac, now, &self.config);
            ac.touch(now);
            self.stats.updated += 1;
            return UpsertOutcome::Updated;
        }

        let Some((lat, lon)) = msg.position() else {
            trace!("Dropping message for unseen {} without position", hex);
            self.stats.rejected += 1;
            return UpsertOutcome::Rejected(RejectReason::MissingPosition);
        };

        let mut ac = TrackedAircraft::new(&hex, lat, lon, now, &self.config);
        msg.apply_attributes(&mut ac, &self.config);
        debug!("New aircraft {} at {:.1} km {}", hex, ac.distance, ac.cardinal);

        self.aircraft.insert(hex, ac);
        self.stats.created += 1;
        UpsertOutcome::Created
    }

    /// Apply a batch of messages, returning the identifiers that were created or updated
    pub fn upsert_all<'a, I>(&mut self, messages: I, now: f64) -> Vec<String>
    where
        I: IntoIterator<Item = &'a AircraftMessage>,
    {
        messages
            .into_iter()
            .filter_map(|msg| match self.upsert(msg, now) {
                UpsertOutcome::Rejected(_) => None,
                _ => msg.identifier(),
            })
            .collect()
    }

    /// Remove every aircraft not updated for strictly more than `hard_threshold` seconds.
    /// Returns the removed identifiers.
    pub fn evict_older_than(&mut self, hard_threshold: f64, now: f64) -> Vec<String> {
        let to_remove: Vec<String> = self.aircraft
            .iter()
            .filter(|(_, ac)| ac.age(now) > hard_threshold)
            .map(|(hex, _)| hex.clone())
            .collect();

        for hex in &to_remove {
            self.aircraft.remove(hex);
        }

        if !to_remove.is_empty() {
            debug!("Evicted {:?}", to_remove);
            self.stats.evicted += to_remove.len();
        }
        to_remove
    }

    /// Evict using the configured hard threshold
    pub fn evict_expired(&mut self, now: f64) -> Vec<String> {
        self.evict_older_than(self.config.hard_evict, now)
    }

    /// Get an aircraft by identifier
    pub fn get(&self, hex: &str) -> Option<&TrackedAircraft> {
        self.aircraft.get(&normalize_identifier(hex))
    }

    /// Like [`Tracker::get`] but reports unknown identifiers as an error
    pub fn lookup(&self, hex: &str) -> Result<&TrackedAircraft> {
        self.get(hex).ok_or_else(|| TrackError::NotFound(hex.to_string()))
    }

    /// Freshness of one aircraft against the configured soft threshold
    pub fn state_of(&self, hex: &str, now: f64) -> Result<TrackState> {
        Ok(self.lookup(hex)?.state(now, self.config.soft_stale))
    }

    pub fn num_stale(&self, now: f64) -> usize {
        self.aircraft.values().filter(|ac| ac.is_stale(now, self.config.soft_stale)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedAircraft> {
        self.aircraft.values()
    }

    /// All aircraft ordered by `cmp`. Ties keep identifier order, so the result
    /// is the same for equal tracker contents regardless of map layout.
    pub fn snapshot_by<F>(&self, mut cmp: F) -> Vec<&TrackedAircraft>
    where
        F: FnMut(&TrackedAircraft, &TrackedAircraft) -> Ordering,
    {
        let mut list: Vec<&TrackedAircraft> = self.aircraft.values().collect();
        list.sort_by(|a, b| a.hex.cmp(&b.hex));
        list.sort_by(|a, b| cmp(*a, *b));
        list
    }

    pub fn snapshot(&self, key: SortKey) -> Vec<&TrackedAircraft> {
        self.snapshot_by(|a, b| key.compare(a, b))
    }

    /// Advance the ping animation of every aircraft that is not stale
    pub fn step_animations(&mut self, rate: f64, now: f64) {
        let soft = self.config.soft_stale;
        for ac in self.aircraft.values_mut().filter(|ac| !ac.is_stale(now, soft)) {
            ac.step_animation(rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const EPSILON: f64 = 1e-6;

    fn config() -> TrackerConfig {
        TrackerConfig::with_reference(52.0841, 4.2666)
    }

    #[test]
    fn test_tracked_aircraft_creation() {
        let cfg = config();
        let ac = TrackedAircraft::new("a1b2c3", 52.5, 4.9, 1000.0, &cfg);
        assert_eq!(ac.hex, "a1b2c3");
        assert_eq!(ac.last_seen, 1000.0);
        assert_eq!(ac.positions.len(), 1);
        assert_eq!(ac.timestamps.len(), 1);
        assert_eq!(ac.distances.len(), 1);
        assert_eq!(ac.trail.len(), 1);
        assert!(ac.altitudes.is_empty());
        assert!(ac.distance > 0.0);
        assert_eq!(ac.kind, "Undefined");
        assert_eq!(ac.size, 1);
    }

    #[test]
    fn test_derived_fields_follow_position() {
        let cfg = config();
        let mut ac = TrackedAircraft::new("a1b2c3", 52.0841, 5.2666, 1000.0, &cfg);
        assert_eq!(ac.cardinal, "E");

        ac.apply_position(53.0841, 4.2666, 1001.0, &cfg);
        assert_eq!(ac.cardinal, "N");
        assert!(ac.bearing.abs() < EPSILON);
        assert!((ac.distance - cfg.frame.distance_to(53.0841, 4.2666)).abs() < EPSILON);
        let expected = geodesy::relative_projection(53.0841, 4.2666, &cfg.frame, &cfg.viewport);
        assert_eq!(ac.position, expected);
        assert_eq!(ac.positions.last(), Some(&expected));
        assert_eq!(ac.timestamps.last(), Some(&1001.0));
        assert_eq!(ac.last_seen, 1001.0);
    }

    #[test]
    fn test_bearing_offset_rotates_bearing_not_cardinal() {
        let mut cfg = config();
        cfg.bearing_offset = -90.0;
        let ac = TrackedAircraft::new("a1b2c3", 52.0841, 5.2666, 1000.0, &cfg);
        assert!((ac.bearing - 359.6).abs() < 1.0, "Bearing: {}", ac.bearing);
        assert_eq!(ac.cardinal, "E");
    }

    #[test]
    fn test_same_position_twice() {
        let cfg = config();
        let mut ac = TrackedAircraft::new("a1b2c3", 51.9, 4.6, 1000.0, &cfg);
        let (d, b) = (ac.distance, ac.bearing);
        ac.apply_position(51.9, 4.6, 1001.0, &cfg);
        assert_eq!(ac.distance, d);
        assert_eq!(ac.bearing, b);
    }

    #[test]
    fn test_trail_ignores_jitter() {
        let cfg = config();
        let mut ac = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 1000.0, &cfg);
        // a few metres move projects well below the jitter threshold
        ac.apply_position(52.00001, 4.50001, 1001.0, &cfg);
        assert_eq!(ac.trail.len(), 1);
        assert_eq!(ac.positions.len(), 2);

        ac.apply_position(52.5, 5.0, 1002.0, &cfg);
        assert_eq!(ac.trail.len(), 2);
        assert_eq!(ac.trail.last(), Some(&ac.mercator));
    }

    #[test]
    fn test_unit_conversions() {
        let cfg = config();
        let mut ac = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 1000.0, &cfg);
        ac.apply_altitude(35000.0);
        ac.apply_speed(450.0);
        assert!((ac.altitude_m - 10668.0).abs() < EPSILON);
        assert!((ac.speed_kmh - 833.4).abs() < EPSILON);
    }

    #[test]
    fn test_rssi_normalization() {
        let cfg = config();
        let mut ac = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 1000.0, &cfg);
        ac.apply_rssi(-25.0, &cfg);
        assert_eq!(ac.rssi, -25.0);
        assert!((ac.rssi_norm - 0.5).abs() < EPSILON);
        ac.apply_rssi(-90.0, &cfg);
        assert_eq!(ac.rssi_norm, 0.0);
        assert_eq!(ac.rssis.last(), Some(&0.0));
    }

    #[test]
    fn test_category() {
        let cfg = config();
        let mut ac = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 1000.0, &cfg);
        ac.apply_category("a5");
        assert_eq!(ac.category, "A5");
        assert_eq!(ac.kind, "Heavy");
        ac.apply_category("X9");
        assert_eq!(ac.category, "X9");
        assert_eq!(ac.kind, "Undefined");
        assert_eq!(ac.size, 1);
    }

    #[test]
    fn test_display_label() {
        let cfg = config();
        let mut ac = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 1000.0, &cfg);
        assert_eq!(ac.display_label(), "A1B2C3");
        ac.apply_flight_label("KLM1234  ");
        assert_eq!(ac.display_label(), "KLM1234");
        ac.apply_flight_label("   ");
        assert_eq!(ac.display_label(), "A1B2C3");
    }

    #[test]
    fn test_track_normalized() {
        let cfg = config();
        let mut ac = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 1000.0, &cfg);
        ac.apply_track(370.0);
        assert!((ac.track - 10.0).abs() < EPSILON);
        ac.apply_track(-90.0);
        assert!((ac.track - 270.0).abs() < EPSILON);
    }

    #[test]
    fn test_animation_stays_bounded() {
        let cfg = config();
        let mut ac = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 1000.0, &cfg);
        let mut reversals = 0;
        let mut last_dir = ac.animation.reversing;
        for _ in 0..2000 {
            ac.step_animation(0.02);
            assert!((0.0..=cfg.animation_rmax).contains(&ac.animation.radius));
            if ac.animation.reversing != last_dir {
                reversals += 1;
                last_dir = ac.animation.reversing;
            }
        }
        assert!(reversals >= 2, "ping must oscillate");
    }

    #[test]
    fn test_animation_rate() {
        let mut ping = PingAnimation::new(10.0);
        ping.step(0.5, 0.0);
        assert!((ping.radius - 5.0).abs() < EPSILON);
        ping.step(0.5, 1.0);
        assert!((ping.radius - 9.5).abs() < EPSILON);
        ping.step(0.5, 1.0);
        assert_eq!(ping.radius, 10.0);
        assert!(ping.reversing);
        ping.step(0.5, 1.0);
        assert!((ping.radius - 5.5).abs() < EPSILON);
    }

    #[test]
    fn test_staleness() {
        let cfg = config();
        let ac = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 1000.0, &cfg);
        assert!(!ac.is_stale(1059.9, 60.0));
        assert!(ac.is_stale(1060.0, 60.0));
        assert_eq!(ac.state(1060.0, 60.0), TrackState::Stale);
        assert_eq!(ac.state(1010.0, 60.0), TrackState::Active);
    }

    #[test]
    fn test_vertical_trend_and_altitude_band() {
        let cfg = config();
        let mut ac = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 1000.0, &cfg);
        assert_eq!(ac.vertical_trend(), VerticalTrend::Level);
        ac.apply_vertical_rate(-640.0);
        assert_eq!(ac.vertical_trend(), VerticalTrend::Descending);
        ac.apply_vertical_rate(1200.0);
        assert_eq!(ac.vertical_trend(), VerticalTrend::Climbing);

        assert_eq!(ac.altitude_fraction(), 0.0);
        ac.apply_altitude(60000.0);
        assert_eq!(ac.altitude_fraction(), 1.0);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let cfg = config();
        let a = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 1000.0, &cfg);
        let b = TrackedAircraft::new("a1b2c3", 50.0, 3.0, 2000.0, &cfg);
        let c = TrackedAircraft::new("a1b2c4", 52.0, 4.5, 1000.0, &cfg);
        let d = TrackedAircraft::new("~tis-b", 52.0, 4.5, 1000.0, &cfg);
        assert_eq!(a.seed(), b.seed());
        assert_ne!(a.seed(), c.seed());
        assert_eq!(d.seed(), d.clone().seed());
    }

    #[test]
    fn test_history_cap_invariant() {
        let mut cfg = config();
        cfg.history_len = 8;
        let mut rng = StdRng::seed_from_u64(42);
        let mut ac = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 0.0, &cfg);

        for i in 1..500 {
            let now = i as f64;
            match rng.gen_range(0..7) {
                0 => {
                    let (lat, lon) = (rng.gen_range(50.0..54.0), rng.gen_range(2.0..7.0));
                    ac.apply_position(lat, lon, now, &cfg);
                    assert_eq!(ac.timestamps.last(), Some(&now));
                    assert_eq!(ac.distances.last(), Some(&ac.distance));
                    assert_eq!(ac.positions.last(), Some(&ac.position));
                }
                1 => {
                    let v = rng.gen_range(0.0..45000.0);
                    ac.apply_altitude(v);
                    assert_eq!(ac.altitudes.last(), Some(&v));
                }
                2 => {
                    let v = rng.gen_range(0.0..600.0);
                    ac.apply_speed(v);
                    assert_eq!(ac.speeds.last(), Some(&v));
                }
                3 => {
                    let v = rng.gen_range(-3000.0..3000.0);
                    ac.apply_vertical_rate(v);
                    assert_eq!(ac.vert_rates.last(), Some(&v));
                }
                4 => {
                    let v = rng.gen_range(0.0..360.0);
                    ac.apply_track(v);
                    assert_eq!(ac.tracks.last(), Some(&v));
                }
                5 => {
                    ac.apply_rssi(rng.gen_range(-60.0..0.0), &cfg);
                    assert_eq!(ac.rssis.last(), Some(&ac.rssi_norm));
                }
                _ => ac.apply_category("A3"),
            }

            for len in [
                ac.positions.len(), ac.trail.len(), ac.timestamps.len(), ac.distances.len(),
                ac.altitudes.len(), ac.speeds.len(), ac.vert_rates.len(), ac.tracks.len(), ac.rssis.len(),
            ] {
                assert!(len <= 8);
            }
        }
        assert_eq!(ac.positions.len(), 8);
    }

    #[test]
    fn test_serialized_record() {
        let cfg = config();
        let mut ac = TrackedAircraft::new("a1b2c3", 52.0, 4.5, 1000.0, &cfg);
        ac.apply_category("A3");
        let v = serde_json::to_value(&ac).unwrap();
        assert_eq!(v["hex"], "a1b2c3");
        assert_eq!(v["type"], "Large");
        assert_eq!(v["positions"].as_array().map(|a| a.len()), Some(1));
        assert!(v["position"]["x"].is_number());
        assert!(v.get("animation").is_none());
    }
}
