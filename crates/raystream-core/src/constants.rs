//! Ray field tuning constants.
//!
//! Defaults for `VisualizerConfig` and the fixed drawing parameters of the
//! renderer. Angles are radians, hues are degrees, times are milliseconds.

use std::f32::consts::PI;

// Ring buffer
pub const DEFAULT_RAY_COUNT: usize = 120;

// Sources
pub const SOURCE_COUNT: usize = 3;
// Measured clockwise from the top of the canvas: 0°, 120°, 240°
pub const SOURCE_ANGLES: [f32; SOURCE_COUNT] = [
    -PI / 2.0,
    -PI / 2.0 + (PI * 2.0 / 3.0),
    -PI / 2.0 + (PI * 4.0 / 3.0),
];
pub const SOURCE_BASE_HUES: [f32; SOURCE_COUNT] = [300.0, 60.0, 180.0]; // magenta, yellow, cyan
pub const HUE_SHIFT_PER_TICK: f32 = 0.03;
pub const HUE_JITTER_DEG: f32 = 2.0;

// Spawning
pub const DEFAULT_SPAWN_INTERVAL_MS: f64 = 300.0;
pub const ENERGY_REFERENCE_MS: f64 = 60.0; // interval at full band energy before clamping
pub const MIN_SPAWN_INTERVAL_MS: f64 = 80.0;
pub const MAX_SPAWN_INTERVAL_MS: f64 = 600.0;
pub const MIN_INTENSITY: f32 = 0.1; // near-silence still yields a faint ray
pub const INTENSITY_EXPONENT: i32 = 2;
pub const DEFAULT_GEOMETRY_JITTER: f32 = 0.05;

// Pulse modulation (independent of audio)
pub const PULSE_PHASE_PER_SPAWN: f32 = 0.35;
pub const PULSE_PHASE_OFFSETS: [f32; SOURCE_COUNT] = [0.0, PI * 2.0 / 3.0, PI * 4.0 / 3.0];
pub const DEFAULT_PULSE_WEIGHT: f32 = 0.3;

// Spawn-time geometry, as fractions/offsets applied to the squared intensity
pub const MAX_LENGTH_FRACTION: f32 = 0.8; // of min(width, height)
pub const LENGTH_MIN_FACTOR: f32 = 0.1;
pub const LENGTH_MAX_FACTOR: f32 = 1.0;
pub const THICKNESS_BASE: f32 = 1.0;
pub const THICKNESS_SPAN: f32 = 1.0;
pub const ALPHA_BASE: f32 = 0.7;
pub const ALPHA_SPAN: f32 = 0.3;

// Rendering
pub const TRAIL_OVERLAY_ALPHA: f32 = 0.1;
pub const GROWTH_TICKS: f32 = 10.0;
pub const SEGMENTS: usize = 15;
pub const FIRST_SEGMENT_START: f32 = 0.01; // keeps the first segment off the exact center
pub const SEGMENT_THICKNESS_BASE: f32 = 0.3;
pub const SEGMENT_ALPHA_BASE: f32 = 0.4;
pub const RAY_SATURATION: f32 = 100.0;
pub const RAY_LIGHTNESS: f32 = 60.0;
pub const GLOW_ALPHA_THRESHOLD: f32 = 0.3;
pub const GLOW_ALPHA_SCALE: f32 = 0.15;
pub const GLOW_WIDTH_BASE: f32 = 2.0;
pub const GLOW_WIDTH_SCALE: f32 = 2.0;
pub const GLOW_LIGHTNESS_BOOST: f32 = 10.0;

// Analyser
pub const FFT_SIZE: u32 = 256;
