// Geodesy module - distances, bearings and screen projections
//
// Provides:
// - great-circle distance and initial bearing relative to a fixed reference frame
// - 16-point compass quantization
// - two independent screen projections (azimuthal relative, spherical Mercator)
// - RSSI normalization
//
// Uses a spherical Earth model. Angles are degrees and distances kilometres
// unless noted; conversion to radians happens at the function boundary.

use std::f64::consts::PI;
use serde::Serialize;

use crate::constants::{CARDINALS, CARDINAL_SECTOR, EARTH_RADIUS_KM, MERCATOR_MAX_LAT};

/// Degrees to radians conversion factor
const DTOR: f64 = PI / 180.0;

/// Radians to degrees conversion factor
const RTOD: f64 = 180.0 / PI;

/// The fixed position all relative measurements are computed against.
///
/// Built once at startup; radian forms and the trigonometric terms of the base
/// latitude are precomputed because every position update needs them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceFrame {
    pub lat: f64,
    pub lon: f64,
    pub lat_rad: f64,
    pub lon_rad: f64,
    pub cos_lat: f64,
    pub sin_lat: f64,
}

impl ReferenceFrame {
    pub fn new(lat: f64, lon: f64) -> Self {
        let lat_rad = lat * DTOR;
        let lon_rad = lon * DTOR;
        ReferenceFrame {
            lat,
            lon,
            lat_rad,
            lon_rad,
            cos_lat: lat_rad.cos(),
            sin_lat: lat_rad.sin(),
        }
    }

    /// Distance (km) from the reference position
    pub fn distance_to(&self, lat: f64, lon: f64) -> f64 {
        great_circle_distance(self.lat, self.lon, lat, lon, self.cos_lat)
    }

    /// Initial bearing (degrees) from the reference position, rotated by `offset`
    pub fn bearing_to(&self, lat: f64, lon: f64, offset: f64) -> f64 {
        initial_bearing(self.lat, self.lon, lat, lon, offset)
    }
}

/// Screen geometry the projections scale into. Not used for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Display scale factor (range in km that maps onto the radar radius)
    pub scale: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Viewport { width, height, scale }
    }

    /// Radius of the circular radar area, half the shorter screen side
    #[inline]
    pub fn radar_radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    /// Pixels per kilometre for the relative projection
    #[inline]
    pub fn pixels_per_km(&self) -> f64 {
        self.radar_radius() / self.scale
    }

    /// Pixels per kilometre (at the reference parallel) for the Mercator projection
    #[inline]
    pub fn mercator_scale(&self) -> f64 {
        self.width / (2.0 * PI * EARTH_RADIUS_KM) * self.scale
    }
}

/// A projected screen-space position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        ScreenPoint { x, y }
    }
}

/// Normalize an angle into [0, 360)
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to 360.0
    if d >= 360.0 { 0.0 } else { d }
}

/// Wrap a longitude difference into [-180, 180) so date-line crossings take the short way
#[inline]
pub fn wrap_longitude(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Haversine distance (km) where the first point is the reference frame
///
/// `cos_base_lat` is the precomputed cosine of `lat1`, which is the fixed
/// reference latitude on every hot-path call. Uses `atan2(sqrt(a), sqrt(1-a))`
/// so that both tiny and near-antipodal separations stay well conditioned.
///
/// # Example
/// ```
/// use radar_track::geodesy::great_circle_distance;
/// let d = great_circle_distance(52.0, 4.0, 52.0, 5.0, 52.0_f64.to_radians().cos());
/// assert!((d - 68.5).abs() < 0.5);
/// ```
pub fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64, cos_base_lat: f64) -> f64 {
    let dlat = (lat2 - lat1) * DTOR;
    let dlon = (lon2 - lon1) * DTOR;

    let a = (dlat / 2.0).sin().powi(2)
        + cos_base_lat * (lat2 * DTOR).cos() * (dlon / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Haversine distance (km) between two arbitrary points
pub fn great_circle_distance_simple(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    great_circle_distance(lat1, lon1, lat2, lon2, (lat1 * DTOR).cos())
}

/// Initial bearing (forward azimuth) from point 1 to point 2
///
/// The raw azimuth is normalized into [0, 360) and then rotated by `offset`,
/// again normalized into [0, 360).
pub fn initial_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64, offset: f64) -> f64 {
    let lat1_rad = lat1 * DTOR;
    let lat2_rad = lat2 * DTOR;
    let dlon = (lon2 - lon1) * DTOR;

    let y = dlon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * dlon.cos();

    let bearing = normalize_degrees(y.atan2(x) * RTOD);
    normalize_degrees(bearing + offset)
}

/// Quantize a bearing into one of the 16 compass labels
///
/// Sector boundaries (11.25, 33.75, ...) round half away from zero, i.e. into
/// the next clockwise sector.
pub fn cardinal_label(bearing: f64) -> &'static str {
    let sector = (normalize_degrees(bearing) / CARDINAL_SECTOR).round() as i64;
    CARDINALS[sector.rem_euclid(CARDINALS.len() as i64) as usize]
}

/// Azimuthal-equidistant style projection centred on the radar area
///
/// The point is placed at its true bearing and scaled distance from the
/// screen-space reference point `(radius, radius)`. Bearing 0 points along +x.
pub fn relative_projection(lat: f64, lon: f64, frame: &ReferenceFrame, viewport: &Viewport) -> ScreenPoint {
    let distance = frame.distance_to(lat, lon);
    let bearing = frame.bearing_to(lat, lon, 0.0) * DTOR;

    let radius = viewport.radar_radius();
    let r = distance * viewport.pixels_per_km();

    ScreenPoint::new(radius + r * bearing.cos(), radius + r * bearing.sin())
}

#[inline]
fn mercator_y(lat: f64) -> f64 {
    let lat_rad = lat.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT) * DTOR;
    (PI / 4.0 + lat_rad / 2.0).tan().ln()
}

/// Spherical Mercator projection relative to the reference position
///
/// The reference maps to the screen centre; the screen width corresponds to
/// `2π·R / scale` km. Increasing latitude decreases pixel y. Latitudes are clamped
/// to the Mercator limit and longitude differences wrapped across the date line.
pub fn mercator_projection(lat: f64, lon: f64, base_lat: f64, base_lon: f64, viewport: &Viewport) -> ScreenPoint {
    let x = EARTH_RADIUS_KM * wrap_longitude(lon - base_lon) * DTOR;
    let y = EARTH_RADIUS_KM * (mercator_y(lat) - mercator_y(base_lat));

    let scale = viewport.mercator_scale();
    ScreenPoint::new(
        viewport.width / 2.0 + x * scale,
        viewport.height / 2.0 - y * scale,
    )
}

/// Inverse of [`mercator_projection`]: screen position back to (lat, lon) degrees
pub fn mercator_to_coords(point: ScreenPoint, base_lat: f64, base_lon: f64, viewport: &Viewport) -> (f64, f64) {
    let scale = viewport.mercator_scale();
    let x = (point.x - viewport.width / 2.0) / scale;
    let y = (viewport.height / 2.0 - point.y) / scale;

    let lat_rad = 2.0 * (y / EARTH_RADIUS_KM + mercator_y(base_lat)).exp().atan() - PI / 2.0;
    let lon = base_lon + (x / EARTH_RADIUS_KM) * RTOD;

    (lat_rad * RTOD, wrap_longitude(lon))
}

/// Euclidean distance between two projected points
#[inline]
pub fn mercator_point_distance(p1: ScreenPoint, p2: ScreenPoint) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}

/// Linear clamp-normalize `raw` from [min, max] into [0, 1]
///
/// Degenerate bounds (`min == max`) and NaN input yield the midpoint 0.5.
pub fn normalize_signal(raw: f64, min: f64, max: f64) -> f64 {
    if min == max {
        return 0.5;
    }
    let v = (raw - min) / (max - min);
    if v.is_nan() { 0.5 } else { v.clamp(0.0, 1.0) }
}
