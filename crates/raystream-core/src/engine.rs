//! The per-tick ray engine: sample, maybe spawn, render.

use crate::clock::Clock;
use crate::config::VisualizerConfig;
use crate::constants::{MAX_LENGTH_FRACTION, SOURCE_COUNT};
use crate::error::ConfigError;
use crate::ray::RayField;
use crate::render::{render_field, Painter};
use crate::source::SourceState;
use crate::spawner::make_ray;
use crate::spectrum::{band_energies, FrequencySource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Source indices that emitted a ray, in emission order.
    pub spawned: SmallVec<[usize; SOURCE_COUNT]>,
    /// Age-ticks taken without emitting (paused or no analyser).
    pub idle_ticks: usize,
    pub energies: Option<[f32; SOURCE_COUNT]>,
}

pub struct RayEngine {
    config: VisualizerConfig,
    field: RayField,
    sources: [SourceState; SOURCE_COUNT],
    rng: StdRng,
    width: f32,
    height: f32,
    max_len: f32,
    playing: bool,
    spectrum: Vec<u8>,
}

impl RayEngine {
    pub fn new(config: VisualizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            field: RayField::new(config.ray_count),
            sources: SourceState::initial_set(),
            rng,
            width: 0.0,
            height: 0.0,
            max_len: 0.0,
            playing: false,
            spectrum: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn field(&self) -> &RayField {
        &self.field
    }

    pub fn sources(&self) -> &[SourceState; SOURCE_COUNT] {
        &self.sources
    }

    pub fn max_len(&self) -> f32 {
        self.max_len
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Recompute the length scale; rays already in flight keep their length.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.max_len = self.width.min(self.height) * MAX_LENGTH_FRACTION;
        log::debug!(
            "[rays] resize {}x{} max_len={:.1}",
            self.width,
            self.height,
            self.max_len
        );
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.playing != playing {
            log::debug!("[rays] playing={}", playing);
        }
        self.playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Clear every slot and re-anchor source timers on the next tick.
    pub fn reset(&mut self) {
        self.field.reset();
        for s in &mut self.sources {
            s.last_spawn_ms = None;
        }
    }

    /// Emit a ray for `source_index` immediately, bypassing cadence and the
    /// playing gate. Returns the slot written, or `None` for an unknown source.
    pub fn emit(&mut self, source_index: usize, energy: f32) -> Option<usize> {
        let source = self.sources.get_mut(source_index)?;
        let ray = make_ray(
            &self.config,
            source_index,
            source,
            energy,
            self.max_len,
            &mut self.rng,
        );
        log::trace!(
            "[rays] emit source={} intensity={:.3} len={:.1} hue={:.1}",
            source_index,
            ray.intensity,
            ray.length,
            ray.hue
        );
        Some(self.field.spawn(ray))
    }

    /// One animation step. Missing analyser or painter degrade to no spawns
    /// or no drawing respectively.
    pub fn tick(
        &mut self,
        now_ms: f64,
        analyser: Option<&mut dyn FrequencySource>,
        painter: Option<&mut dyn Painter>,
    ) -> TickReport {
        let mut report = TickReport::default();

        for s in &mut self.sources {
            s.advance_hue(self.config.hue_shift_per_tick);
        }

        let energies = analyser.map(|a| {
            self.spectrum.resize(a.bin_count(), 0);
            a.fill_bytes(&mut self.spectrum);
            band_energies(self.config.band_policy, &self.spectrum)
        });
        report.energies = energies;

        for i in 0..SOURCE_COUNT {
            let energy = energies.map_or(0.0, |e| e[i]);
            let interval = self.config.spawn_interval.interval_ms(energy);
            // The first tick after a reset only anchors the timer (elapsed == 0).
            if self.sources[i].elapsed_ms(now_ms) < interval {
                continue;
            }
            if self.playing && energies.is_some() {
                if self.emit(i, energy).is_some() {
                    report.spawned.push(i);
                }
            } else {
                self.field.advance_idle();
                report.idle_ticks += 1;
            }
            self.sources[i].last_spawn_ms = Some(now_ms);
        }

        if let Some(p) = painter {
            render_field(p, &self.field, &self.sources, self.width, self.height);
        }
        report
    }
}

/// Couples an engine with a clock so the browser frame loop and test loops
/// drive ticks the same way.
pub struct Ticker<C: Clock> {
    pub engine: RayEngine,
    clock: C,
}

impl<C: Clock> Ticker<C> {
    pub fn new(engine: RayEngine, clock: C) -> Self {
        Self { engine, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn tick(
        &mut self,
        analyser: Option<&mut dyn FrequencySource>,
        painter: Option<&mut dyn Painter>,
    ) -> TickReport {
        let now = self.clock.now_ms();
        self.engine.tick(now, analyser, painter)
    }
}
