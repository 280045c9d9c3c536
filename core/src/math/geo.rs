use crate::reference::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Local flat-earth projection around an anchor point.
///
/// Axes are east (x), north (y) and up (z). The equirectangular approximation
/// holds for the few-kilometre extents a single flight covers.
pub struct LocalFrame {
    anchor: GeoPoint,
    meters_per_deg_lat: f64,
    meters_per_deg_long: f64,
}

impl LocalFrame {
    pub fn new(anchor: GeoPoint) -> Self {
        let meters_per_deg_lat = EARTH_RADIUS_M.to_radians();
        let meters_per_deg_long = meters_per_deg_lat * anchor.lat.to_radians().cos();
        Self {
            anchor,
            meters_per_deg_lat,
            meters_per_deg_long,
        }
    }

    /// Offset of `point` from the anchor in meters.
    pub fn offset(&self, point: GeoPoint) -> (f64, f64, f64) {
        let east = (point.long - self.anchor.long) * self.meters_per_deg_long;
        let north = (point.lat - self.anchor.lat) * self.meters_per_deg_lat;
        let up = point.alt - self.anchor.alt;
        (east, north, up)
    }

    /// Point lying `east`, `north` and `up` meters away from the anchor.
    pub fn displace(&self, east: f64, north: f64, up: f64) -> GeoPoint {
        GeoPoint::new(
            self.anchor.lat + north / self.meters_per_deg_lat,
            self.anchor.long + east / self.meters_per_deg_long,
            self.anchor.alt + up,
        )
    }
}
