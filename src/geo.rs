//! Great-circle geometry on a spherical Earth.
//!
//! Distances are in statute miles. Swapping the radius for kilometres also
//! means changing every "mi" label rendered downstream.

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// A coordinate pair in canonical (latitude, longitude) order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build a point only if both axes are finite and within range
    /// (lat -90..90, lon -180..180).
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        (lat_ok && lon_ok).then(|| Self::new(latitude, longitude))
    }

    pub fn distance_miles(&self, other: &GeoPoint) -> f64 {
        haversine_miles(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Haversine great-circle distance between two points, in miles.
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Format coordinates as "37.7749°N, 122.4194°W".
pub fn format_coords(point: &GeoPoint) -> String {
    let ns = if point.latitude >= 0.0 { 'N' } else { 'S' };
    let ew = if point.longitude >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}\u{00B0}{}, {:.4}\u{00B0}{}",
        point.latitude.abs(),
        ns,
        point.longitude.abs(),
        ew
    )
}
