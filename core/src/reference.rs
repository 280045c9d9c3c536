use serde::{Deserialize, Serialize};
use std::fmt;

/// Geodetic anchor: latitude and longitude in degrees, altitude in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub long: f64,
    pub alt: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, long: f64, alt: f64) -> Self {
        Self { lat, long, alt }
    }

    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.lat, self.long, self.alt)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lat: {}, Long: {}, Alt: {}", self.lat, self.long, self.alt)
    }
}

/// Reference values shared by the processors of one run.
///
/// Passed by `&mut` into every processor invocation. Whoever owns the value
/// decides how far it is shared; nothing in this crate keeps a global copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceState {
    boot_time: i64,
    origin: GeoPoint,
    origin_set: bool,
    reference: GeoPoint,
}

impl ReferenceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boot_time(&self) -> i64 {
        self.boot_time
    }

    pub fn set_boot_time(&mut self, boot_time: i64) {
        self.boot_time = boot_time;
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn set_origin(&mut self, lat: f64, long: f64, alt: f64) {
        self.origin = GeoPoint::new(lat, long, alt);
        self.origin_set = true;
    }

    /// True once any caller or processor has written the origin.
    pub fn is_origin_set(&self) -> bool {
        self.origin_set
    }

    pub fn reference(&self) -> GeoPoint {
        self.reference
    }

    pub fn set_reference(&mut self, lat: f64, long: f64, alt: f64) {
        self.reference = GeoPoint::new(lat, long, alt);
    }

    /// Maps a since-boot timestamp onto the clock the boot time was taken from.
    pub fn to_boot_relative(&self, time: i64) -> i64 {
        self.boot_time + time
    }
}
