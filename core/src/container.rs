use serde::{Deserialize, Serialize};
use std::fmt;

/// Attitude angles (radians) and their angular rates (radians per second).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrincipalAxes {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
    pub vpitch: f64,
    pub vroll: f64,
    pub vyaw: f64,
}

/// Geodetic location (degrees, degrees, meters) and its rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
    pub alt: f64,
    pub vlat: f64,
    pub vlong: f64,
    pub valt: f64,
}

/// Local Cartesian position in meters relative to an anchor location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
}

/// Variant-specific half of a container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    PrincipalAxes(PrincipalAxes),
    Coordinates(Coordinates),
    Position(Position),
}

/// Discriminant of [`Payload`], used in diagnostics and mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    PrincipalAxes,
    Coordinates,
    Position,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContainerKind::PrincipalAxes => "PrincipalAxes",
            ContainerKind::Coordinates => "Coordinates",
            ContainerKind::Position => "Position",
        };
        f.write_str(name)
    }
}

/// A single timestamped observation.
///
/// `time` is milliseconds since boot, not wall-clock time. It is signed
/// because re-basing can move a late-arriving sample before the start time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub time: i64,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Container {
    pub fn new(time: i64, payload: Payload) -> Self {
        Self { time, payload }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn principal_axes(
        time: i64,
        pitch: f64,
        roll: f64,
        yaw: f64,
        vpitch: f64,
        vroll: f64,
        vyaw: f64,
    ) -> Self {
        Self::new(
            time,
            Payload::PrincipalAxes(PrincipalAxes {
                pitch,
                roll,
                yaw,
                vpitch,
                vroll,
                vyaw,
            }),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn coordinates(
        time: i64,
        lat: f64,
        long: f64,
        alt: f64,
        vlat: f64,
        vlong: f64,
        valt: f64,
    ) -> Self {
        Self::new(
            time,
            Payload::Coordinates(Coordinates {
                lat,
                long,
                alt,
                vlat,
                vlong,
                valt,
            }),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn position(time: i64, x: f64, y: f64, z: f64, vx: f64, vy: f64, vz: f64) -> Self {
        Self::new(
            time,
            Payload::Position(Position {
                x,
                y,
                z,
                vx,
                vy,
                vz,
            }),
        )
    }

    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn set_time(&mut self, time: i64) {
        self.time = time;
    }

    pub fn kind(&self) -> ContainerKind {
        match self.payload {
            Payload::PrincipalAxes(_) => ContainerKind::PrincipalAxes,
            Payload::Coordinates(_) => ContainerKind::Coordinates,
            Payload::Position(_) => ContainerKind::Position,
        }
    }

    pub fn as_principal_axes(&self) -> Option<&PrincipalAxes> {
        match &self.payload {
            Payload::PrincipalAxes(axes) => Some(axes),
            _ => None,
        }
    }

    pub fn as_coordinates(&self) -> Option<&Coordinates> {
        match &self.payload {
            Payload::Coordinates(coords) => Some(coords),
            _ => None,
        }
    }

    pub fn as_position(&self) -> Option<&Position> {
        match &self.payload {
            Payload::Position(position) => Some(position),
            _ => None,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time: {}", self.time)?;
        match &self.payload {
            Payload::PrincipalAxes(a) => {
                write!(f, ", Pitch: {}, Roll: {}, Yaw: {}", a.pitch, a.roll, a.yaw)
            }
            Payload::Coordinates(c) => {
                write!(f, ", Lat: {}, Long: {}, Alt: {}", c.lat, c.long, c.alt)
            }
            Payload::Position(p) => write!(f, ", X: {}, Y: {}, Z: {}", p.x, p.y, p.z),
        }
    }
}
