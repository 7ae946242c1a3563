//! Engine configuration.
//!
//! The defaults are the canonical look: equal thirds banding, a constant
//! 300 ms emission cadence per source and no pulse modulation. The other
//! policies are opt-in.

use crate::constants::*;
use crate::error::ConfigError;
use crate::spectrum::BandPolicy;

/// How long a source waits between emissions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnInterval {
    Constant { ms: f64 },
    /// `reference_ms / energy`, clamped to `[min_ms, max_ms]`; louder is faster.
    EnergyScaled {
        reference_ms: f64,
        min_ms: f64,
        max_ms: f64,
    },
}

impl Default for SpawnInterval {
    fn default() -> Self {
        SpawnInterval::Constant {
            ms: DEFAULT_SPAWN_INTERVAL_MS,
        }
    }
}

impl SpawnInterval {
    pub fn energy_scaled() -> Self {
        SpawnInterval::EnergyScaled {
            reference_ms: ENERGY_REFERENCE_MS,
            min_ms: MIN_SPAWN_INTERVAL_MS,
            max_ms: MAX_SPAWN_INTERVAL_MS,
        }
    }

    pub fn interval_ms(&self, energy: f32) -> f64 {
        match *self {
            SpawnInterval::Constant { ms } => ms,
            SpawnInterval::EnergyScaled {
                reference_ms,
                min_ms,
                max_ms,
            } => {
                let e = (energy as f64).max(1e-6);
                (reference_ms / e).clamp(min_ms, max_ms)
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            SpawnInterval::Constant { ms } if ms <= 0.0 => {
                Err(ConfigError::NonPositiveInterval(ms))
            }
            SpawnInterval::Constant { .. } => Ok(()),
            SpawnInterval::EnergyScaled {
                reference_ms,
                min_ms,
                max_ms,
            } => {
                for v in [reference_ms, min_ms, max_ms] {
                    if v <= 0.0 {
                        return Err(ConfigError::NonPositiveInterval(v));
                    }
                }
                if min_ms > max_ms {
                    return Err(ConfigError::IntervalRange {
                        min: min_ms,
                        max: max_ms,
                    });
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub ray_count: usize,
    pub band_policy: BandPolicy,
    pub spawn_interval: SpawnInterval,
    /// Relative +/- jitter applied to spawn length and thickness.
    pub geometry_jitter: f32,
    pub hue_jitter_deg: f32,
    pub hue_shift_per_tick: f32,
    /// Weight of the audio-independent sine pulse blended into intensity.
    pub pulse_weight: Option<f32>,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            ray_count: DEFAULT_RAY_COUNT,
            band_policy: BandPolicy::default(),
            spawn_interval: SpawnInterval::default(),
            geometry_jitter: DEFAULT_GEOMETRY_JITTER,
            hue_jitter_deg: HUE_JITTER_DEG,
            hue_shift_per_tick: HUE_SHIFT_PER_TICK,
            pulse_weight: None,
            seed: None,
        }
    }
}

impl VisualizerConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_ray_count(mut self, ray_count: usize) -> Self {
        self.ray_count = ray_count;
        self
    }

    pub fn with_band_policy(mut self, policy: BandPolicy) -> Self {
        self.band_policy = policy;
        self
    }

    pub fn with_spawn_interval(mut self, interval: SpawnInterval) -> Self {
        self.spawn_interval = interval;
        self
    }

    pub fn with_pulse(mut self, weight: f32) -> Self {
        self.pulse_weight = Some(weight);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ray_count == 0 {
            return Err(ConfigError::ZeroRayCount);
        }
        self.spawn_interval.validate()?;
        if !(0.0..1.0).contains(&self.geometry_jitter) {
            return Err(ConfigError::JitterOutOfRange(self.geometry_jitter));
        }
        if let Some(w) = self.pulse_weight {
            if !(0.0..=1.0).contains(&w) {
                return Err(ConfigError::PulseWeightOutOfRange(w));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(VisualizerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn energy_scaled_interval_is_clamped() {
        let s = SpawnInterval::energy_scaled();
        assert_eq!(s.interval_ms(0.0), MAX_SPAWN_INTERVAL_MS);
        assert_eq!(s.interval_ms(1.0), MIN_SPAWN_INTERVAL_MS);
        let mid = s.interval_ms(0.4);
        assert!(mid > MIN_SPAWN_INTERVAL_MS && mid < MAX_SPAWN_INTERVAL_MS);
    }

    #[test]
    fn louder_spawns_faster() {
        let s = SpawnInterval::energy_scaled();
        assert!(s.interval_ms(0.5) < s.interval_ms(0.2));
    }
}
