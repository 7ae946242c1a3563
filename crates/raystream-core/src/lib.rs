//! Audio-reactive radial ray field.
//!
//! Platform-free engine shared by the web front-end and host-side tests:
//! three emission sources sample band energy from a frequency spectrum, emit
//! rays into a fixed ring of slots, and the renderer paints the live rays
//! through a [`Painter`].

pub mod clock;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod ray;
pub mod render;
pub mod source;
pub mod spawner;
pub mod spectrum;

pub use clock::{Clock, InstantClock, ManualClock};
pub use config::{SpawnInterval, VisualizerConfig};
pub use engine::{RayEngine, TickReport, Ticker};
pub use error::ConfigError;
pub use ray::{Ray, RayField};
pub use render::{growth_factor, render_field, Hsla, Painter, RecordingPainter, Stroke};
pub use source::SourceState;
pub use spectrum::{band_energies, BandPolicy, FixedSpectrum, FrequencySource};
