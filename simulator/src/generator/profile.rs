use anyhow::{ensure, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use telemcore::math::LocalFrame;
use telemcore::{Container, GeoPoint};

/// Configuration for generating a synthetic `Coordinates` flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub samples: usize,
    /// Since-boot time of the first sample, in milliseconds.
    pub start_time: i64,
    pub interval_ms: i64,
    pub lat: f64,
    pub long: f64,
    pub alt: f64,
    /// Northward rate, meters per second.
    pub vlat: f64,
    /// Eastward rate, meters per second.
    pub vlong: f64,
    /// Climb rate, meters per second.
    pub valt: f64,
    /// Peak position jitter per axis, in meters.
    pub noise: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples: 10,
            start_time: 5,
            interval_ms: 100,
            lat: 47.3977,
            long: 8.5456,
            alt: 488.0,
            vlat: 1.2,
            vlong: 2.0,
            valt: 1.5,
            noise: 0.0,
            seed: 0,
        }
    }
}

pub fn build_flight(config: &GeneratorConfig) -> anyhow::Result<Vec<Container>> {
    ensure!(config.interval_ms >= 0, "interval_ms must not be negative");

    let frame = LocalFrame::new(GeoPoint::new(config.lat, config.long, config.alt));
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut samples = Vec::with_capacity(config.samples);

    for index in 0..config.samples {
        let step = i64::try_from(index).context("sample index exceeds i64")?;
        let offset_ms = step
            .checked_mul(config.interval_ms)
            .context("overflow computing sample time")?;
        let time = config
            .start_time
            .checked_add(offset_ms)
            .context("overflow computing sample time")?;
        let elapsed = offset_ms as f64 / 1000.0;

        let (jitter_east, jitter_north, jitter_up) = if config.noise > 0.0 {
            (
                rng.gen_range(-config.noise..config.noise),
                rng.gen_range(-config.noise..config.noise),
                rng.gen_range(-config.noise..config.noise),
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        let point = frame.displace(
            config.vlong * elapsed + jitter_east,
            config.vlat * elapsed + jitter_north,
            config.valt * elapsed + jitter_up,
        );

        samples.push(Container::coordinates(
            time,
            point.lat,
            point.long,
            point.alt,
            config.vlat,
            config.vlong,
            config.valt,
        ));
    }

    Ok(samples)
}

/// The two samples of the reference demonstration flight.
pub fn demonstration_samples() -> Vec<Container> {
    vec![
        Container::coordinates(5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0),
        Container::coordinates(7, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0),
    ]
}
