//! Simulated ISS telemetry
//!
//! No live data: readings jitter around nominal orbit values on a fixed
//! refresh interval.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

const NOMINAL_ALTITUDE_KM: f32 = 408.0;
const ALTITUDE_JITTER_KM: f32 = 10.0;
const NOMINAL_SPEED_KMH: f32 = 28_000.0;
const SPEED_JITTER_KMH: f32 = 100.0;
const NOMINAL_ORBIT_MINUTES: f32 = 90.0;
const ORBIT_JITTER_MINUTES: f32 = 2.0;

/// One set of readouts, rounded for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryReading {
    pub altitude_km: i32,
    pub speed_kmh: i32,
    pub orbit_minutes: i32,
}

impl TelemetryReading {
    pub fn altitude_label(&self) -> String {
        format!("{} km", self.altitude_km)
    }

    pub fn speed_label(&self) -> String {
        format!("{} km/h", self.speed_kmh)
    }

    pub fn orbit_label(&self) -> String {
        format!("{} minutes", self.orbit_minutes)
    }
}

/// Seeded telemetry source
#[derive(Debug, Clone)]
pub struct TelemetryFeed {
    rng: Pcg32,
    refresh_secs: f32,
    since_refresh: f32,
    latest: TelemetryReading,
}

impl TelemetryFeed {
    pub fn new(seed: u64, refresh_secs: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let latest = Self::sample(&mut rng);
        Self {
            rng,
            refresh_secs: refresh_secs.max(0.1),
            since_refresh: 0.0,
            latest,
        }
    }

    /// Symmetric jitter around `nominal` with total width `spread`
    fn jitter(rng: &mut Pcg32, nominal: f32, spread: f32) -> i32 {
        (nominal + (rng.random::<f32>() - 0.5) * spread).round() as i32
    }

    fn sample(rng: &mut Pcg32) -> TelemetryReading {
        TelemetryReading {
            altitude_km: Self::jitter(rng, NOMINAL_ALTITUDE_KM, ALTITUDE_JITTER_KM),
            speed_kmh: Self::jitter(rng, NOMINAL_SPEED_KMH, SPEED_JITTER_KMH),
            orbit_minutes: Self::jitter(rng, NOMINAL_ORBIT_MINUTES, ORBIT_JITTER_MINUTES),
        }
    }

    pub fn latest(&self) -> TelemetryReading {
        self.latest
    }

    /// Advance the refresh clock; returns a new reading when one is due
    pub fn update(&mut self, dt: f32) -> Option<TelemetryReading> {
        if dt.is_finite() && dt > 0.0 {
            self.since_refresh += dt;
        }
        if self.since_refresh < self.refresh_secs {
            return None;
        }
        self.since_refresh = 0.0;
        self.latest = Self::sample(&mut self.rng);
        log::debug!("Telemetry: {:?}", self.latest);
        Some(self.latest)
    }
}
