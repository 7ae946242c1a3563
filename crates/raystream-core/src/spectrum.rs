//! Frequency-domain input and the per-source banding policy.
//!
//! Spectra arrive as byte magnitudes (0..=255 per bin), the format the
//! browser's `AnalyserNode::getByteFrequencyData` produces. Each of the three
//! sources is driven by the normalized average magnitude of one contiguous
//! slice of that spectrum.

use crate::constants::SOURCE_COUNT;
use crate::error::ConfigError;
use std::str::FromStr;

/// Anything that can deliver a byte magnitude spectrum once per tick.
pub trait FrequencySource {
    /// Number of bins `fill_bytes` writes.
    fn bin_count(&self) -> usize;
    /// Overwrite `out` with the current spectrum. `out.len()` equals `bin_count()`.
    fn fill_bytes(&mut self, out: &mut [u8]);
}

/// How the spectrum is partitioned between the three sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BandPolicy {
    /// Three equal contiguous thirds; the remainder goes to the last band.
    #[default]
    EqualThirds,
    /// Bass = first 1/8 of bins, mid = next 3/8, treble = upper half.
    BassMidTreble,
}

impl BandPolicy {
    /// Bin ranges `[start, end)` for each source.
    pub fn ranges(self, bins: usize) -> [(usize, usize); SOURCE_COUNT] {
        match self {
            BandPolicy::EqualThirds => {
                let s = bins / 3;
                [(0, s), (s, s * 2), (s * 2, bins)]
            }
            BandPolicy::BassMidTreble => {
                let bass = bins / 8;
                let mid = bins / 2;
                [(0, bass), (bass, mid), (mid, bins)]
            }
        }
    }
}

impl FromStr for BandPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" | "equal-thirds" => Ok(BandPolicy::EqualThirds),
            "bass-mid-treble" => Ok(BandPolicy::BassMidTreble),
            other => Err(ConfigError::UnknownBandPolicy(other.to_string())),
        }
    }
}

/// Normalized band energies in [0, 1], one per source. Empty bands read 0.
pub fn band_energies(policy: BandPolicy, spectrum: &[u8]) -> [f32; SOURCE_COUNT] {
    let mut out = [0.0; SOURCE_COUNT];
    for (e, (start, end)) in out.iter_mut().zip(policy.ranges(spectrum.len())) {
        *e = normalized_mean(&spectrum[start..end]);
    }
    out
}

#[inline]
fn normalized_mean(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / (bins.len() as f32 * 255.0)
}

/// A spectrum that never changes; used by tests and headless runs.
#[derive(Clone, Debug)]
pub struct FixedSpectrum {
    bins: Vec<u8>,
}

impl FixedSpectrum {
    pub fn new(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    pub fn uniform(bin_count: usize, level: u8) -> Self {
        Self::new(vec![level; bin_count])
    }
}

impl FrequencySource for FixedSpectrum {
    fn bin_count(&self) -> usize {
        self.bins.len()
    }

    fn fill_bytes(&mut self, out: &mut [u8]) {
        let n = out.len().min(self.bins.len());
        out[..n].copy_from_slice(&self.bins[..n]);
        out[n..].fill(0);
    }
}
