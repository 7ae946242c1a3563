use thiserror::Error;

/// Rejected `VisualizerConfig` values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("ray count must be at least 1")]
    ZeroRayCount,
    #[error("spawn interval must be positive, got {0} ms")]
    NonPositiveInterval(f64),
    #[error("minimum spawn interval {min} ms exceeds maximum {max} ms")]
    IntervalRange { min: f64, max: f64 },
    #[error("geometry jitter must be in [0, 1), got {0}")]
    JitterOutOfRange(f32),
    #[error("pulse weight must be in [0, 1], got {0}")]
    PulseWeightOutOfRange(f32),
    #[error("unknown band policy {0:?}")]
    UnknownBandPolicy(String),
}
