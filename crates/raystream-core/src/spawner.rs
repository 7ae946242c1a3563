use crate::config::VisualizerConfig;
use crate::constants::*;
use crate::ray::Ray;
use crate::source::SourceState;
use rand::Rng;

/// Compute a new ray for `source` from its current band energy.
///
/// Appearance is a nonlinear (squared) function of the floored intensity,
/// with seeded jitter on length, thickness and hue. The returned ray has
/// `age == 0` and is not yet placed in the field.
pub fn make_ray<R: Rng + ?Sized>(
    config: &VisualizerConfig,
    source_index: usize,
    source: &mut SourceState,
    energy: f32,
    max_len: f32,
    rng: &mut R,
) -> Ray {
    let mut intensity = energy.clamp(0.0, 1.0).max(MIN_INTENSITY);
    if let Some(w) = config.pulse_weight {
        let pulse = 0.5 + 0.5 * source.pulse_phase.sin();
        intensity = (intensity * (1.0 - w) + pulse * w).max(MIN_INTENSITY);
        source.pulse_phase = (source.pulse_phase + PULSE_PHASE_PER_SPAWN) % std::f32::consts::TAU;
    }
    let amp = intensity.powi(INTENSITY_EXPONENT);

    let length_factor = LENGTH_MIN_FACTOR + amp * (LENGTH_MAX_FACTOR - LENGTH_MIN_FACTOR);
    let length = max_len * length_factor * jitter(rng, config.geometry_jitter);
    let thickness = (THICKNESS_BASE + amp * THICKNESS_SPAN) * jitter(rng, config.geometry_jitter);
    let alpha = (ALPHA_BASE + amp * ALPHA_SPAN).min(1.0);

    let hue_offset = if config.hue_jitter_deg > 0.0 {
        rng.gen_range(-config.hue_jitter_deg..config.hue_jitter_deg)
    } else {
        0.0
    };
    let hue = (source.hue + hue_offset).rem_euclid(360.0);

    Ray {
        intensity,
        length,
        thickness,
        alpha,
        age: 0,
        source: source_index,
        hue,
    }
}

#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> f32 {
    if amount > 0.0 {
        1.0 + rng.gen_range(-amount..amount)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn exact() -> VisualizerConfig {
        VisualizerConfig {
            geometry_jitter: 0.0,
            hue_jitter_deg: 0.0,
            ..VisualizerConfig::default()
        }
    }

    #[test]
    fn silence_is_floored() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = SourceState::new(0);
        let r = make_ray(&exact(), 0, &mut s, 0.0, 100.0, &mut rng);
        assert_eq!(r.intensity, MIN_INTENSITY);
        assert!(r.length > 0.0);
        assert!(r.alpha >= ALPHA_BASE);
    }

    #[test]
    fn full_energy_reaches_max_length() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = SourceState::new(1);
        let r = make_ray(&exact(), 1, &mut s, 1.0, 200.0, &mut rng);
        assert!((r.length - 200.0).abs() < 1e-3);
        assert!((r.thickness - 2.0).abs() < 1e-6);
        assert!((r.alpha - 1.0).abs() < 1e-6);
        assert_eq!(r.hue, s.hue);
    }

    #[test]
    fn hue_jitter_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut s = SourceState::new(2);
        for _ in 0..200 {
            let r = make_ray(&VisualizerConfig::default(), 2, &mut s, 0.5, 100.0, &mut rng);
            assert!((r.hue - s.hue).abs() <= HUE_JITTER_DEG);
        }
    }

    #[test]
    fn pulse_advances_phase_and_changes_intensity() {
        let cfg = exact().with_pulse(1.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = SourceState::new(0);
        let a = make_ray(&cfg, 0, &mut s, 0.5, 100.0, &mut rng);
        let b = make_ray(&cfg, 0, &mut s, 0.5, 100.0, &mut rng);
        assert_ne!(a.intensity, b.intensity);
    }
}
