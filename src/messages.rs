// Inbound aircraft messages and the sparse merge rules
//
// A message is one entry of the feed's "aircraft" array. Every field is
// optional; only the identifier plus a latitude/longitude pair are needed to
// start tracking a new aircraft. Known aircraft accept any subset of fields.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::TrackerConfig;
use crate::tracker::TrackedAircraft;

/// One aircraft report as produced by the feed
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AircraftMessage {
    /// 24-bit transponder address as hex
    #[serde(default, alias = "icao", deserialize_with = "lenient_string")]
    pub hex: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lon: Option<f64>,
    /// Track over ground (degrees)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub track: Option<f64>,
    /// Callsign, usually space padded
    #[serde(default, deserialize_with = "lenient_string")]
    pub flight: Option<String>,
    /// Barometric altitude (ft); "ground" reads as 0
    #[serde(default, alias = "alt_baro", deserialize_with = "lenient_altitude")]
    pub altitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    /// Vertical rate (ft/min)
    #[serde(default, alias = "baro_rate", deserialize_with = "lenient_f64")]
    pub vert_rate: Option<f64>,
    /// Ground speed (kt)
    #[serde(default, alias = "gs", deserialize_with = "lenient_f64")]
    pub speed: Option<f64>,
    /// Signal strength (dBFS)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rssi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub squawk: Option<String>,
}

/// Why a message was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No usable identifier
    MissingIdentifier,
    /// Unseen identifier without a complete, valid position
    MissingPosition,
}

impl AircraftMessage {
    /// Message carrying only the fields required to create an aircraft
    pub fn with_position(hex: &str, lat: f64, lon: f64) -> Self {
        AircraftMessage {
            hex: Some(hex.to_string()),
            lat: Some(lat),
            lon: Some(lon),
            ..Default::default()
        }
    }

    /// Normalized identifier (trimmed, lowercase), if present and non-empty
    pub fn identifier(&self) -> Option<String> {
        self.hex
            .as_deref()
            .map(normalize_identifier)
            .filter(|h| !h.is_empty())
    }

    /// The (lat, lon) pair, only if both are present, finite and in range.
    /// A lone latitude or longitude is never combined with a stored coordinate.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon))
                if lat.is_finite() && lon.is_finite()
                    && (-90.0..=90.0).contains(&lat)
                    && (-180.0..=180.0).contains(&lon) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Apply every field present in the message to `ac`, leaving all others untouched.
    ///
    /// The position goes first so derived state is recomputed from the new
    /// coordinate pair as a whole. The remaining setters are independent of each
    /// other, so their order does not affect the result.
    pub fn apply_to(&self, ac: &mut TrackedAircraft, now: f64, config: &TrackerConfig) {
        if let Some((lat, lon)) = self.position() {
            ac.apply_position(lat, lon, now, config);
        }
        self.apply_attributes(ac, config);
    }

    /// Apply all non-position fields present in the message
    pub fn apply_attributes(&self, ac: &mut TrackedAircraft, config: &TrackerConfig) {
        if let Some(alt) = self.altitude { ac.apply_altitude(alt); }
        if let Some(spd) = self.speed { ac.apply_speed(spd); }
        if let Some(vr) = self.vert_rate { ac.apply_vertical_rate(vr); }
        if let Some(trk) = self.track { ac.apply_track(trk); }
        if let Some(rssi) = self.rssi { ac.apply_rssi(rssi, config); }
        if let Some(cat) = &self.category { ac.apply_category(cat); }
        if let Some(flight) = &self.flight { ac.apply_flight_label(flight); }
        if let Some(squawk) = &self.squawk { ac.apply_squawk(squawk); }
    }
}

/// Registry key for an identifier: surrounding whitespace dropped, lowercase
pub(crate) fn normalize_identifier(hex: &str) -> String {
    hex.trim().to_lowercase()
}

// --- lenient field parsing: a bad value drops the field, never the message ---

fn value_to_f64(v: &Value) -> Option<f64> {
    let f = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    f.filter(|f| f.is_finite())
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(value_to_f64))
}

fn lenient_altitude<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(match &v {
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("ground") => Some(0.0),
        Some(v) => value_to_f64(v),
        None => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_message() {
        let json = r#"{
            "hex": "A1B2C3", "lat": 52.1, "lon": 4.5, "track": 270,
            "flight": "KLM1234 ", "altitude": 35000, "category": "A3",
            "vert_rate": -640, "speed": 450.5, "rssi": -21.4, "squawk": "7000"
        }"#;
        let msg: AircraftMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.identifier().as_deref(), Some("a1b2c3"));
        assert_eq!(msg.position(), Some((52.1, 4.5)));
        assert_eq!(msg.track, Some(270.0));
        assert_eq!(msg.flight.as_deref(), Some("KLM1234 "));
        assert_eq!(msg.altitude, Some(35000.0));
        assert_eq!(msg.vert_rate, Some(-640.0));
        assert_eq!(msg.speed, Some(450.5));
        assert_eq!(msg.rssi, Some(-21.4));
        assert_eq!(msg.squawk.as_deref(), Some("7000"));
    }

    #[test]
    fn test_deserialize_sparse_message() {
        let msg: AircraftMessage = serde_json::from_str(r#"{"hex": "a1b2c3", "altitude": 35000}"#).unwrap();
        assert_eq!(msg.position(), None);
        assert_eq!(msg.altitude, Some(35000.0));
        assert_eq!(msg.speed, None);
        assert_eq!(msg.category, None);
    }

    #[test]
    fn test_lenient_values() {
        let json = r#"{"hex": "~2a4f01", "lat": "51.5", "lon": 0.1, "alt_baro": "ground",
                       "gs": "bogus", "baro_rate": 128, "squawk": 1200, "rssi": null}"#;
        let msg: AircraftMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.identifier().as_deref(), Some("~2a4f01"));
        assert_eq!(msg.position(), Some((51.5, 0.1)));
        assert_eq!(msg.altitude, Some(0.0));
        assert_eq!(msg.speed, None);
        assert_eq!(msg.vert_rate, Some(128.0));
        assert_eq!(msg.squawk.as_deref(), Some("1200"));
        assert_eq!(msg.rssi, None);
    }

    #[test]
    fn test_incomplete_or_invalid_position() {
        let mut msg = AircraftMessage::with_position("abc", 52.0, 4.0);
        msg.lon = None;
        assert_eq!(msg.position(), None);

        let msg = AircraftMessage::with_position("abc", 95.0, 4.0);
        assert_eq!(msg.position(), None);

        let msg = AircraftMessage::with_position("abc", f64::NAN, 4.0);
        assert_eq!(msg.position(), None);
    }

    #[test]
    fn test_blank_identifier() {
        let msg = AircraftMessage::with_position("   ", 52.0, 4.0);
        assert_eq!(msg.identifier(), None);
        assert_eq!(AircraftMessage::default().identifier(), None);
    }
}
