use crate::constants::{PULSE_PHASE_OFFSETS, SOURCE_ANGLES, SOURCE_BASE_HUES, SOURCE_COUNT};
use std::f32::consts::TAU;

/// Sector of the circle each source emits into.
pub const SECTOR_SIZE: f32 = TAU / SOURCE_COUNT as f32;

/// Per-source mutable state owned by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceState {
    /// Center of this source's sector, radians.
    pub angle: f32,
    /// Drifting base hue, degrees in [0, 360).
    pub hue: f32,
    /// `None` until the first tick after a reset.
    pub last_spawn_ms: Option<f64>,
    pub pulse_phase: f32,
}

impl SourceState {
    pub fn new(index: usize) -> Self {
        Self {
            angle: SOURCE_ANGLES[index],
            hue: SOURCE_BASE_HUES[index],
            last_spawn_ms: None,
            pulse_phase: PULSE_PHASE_OFFSETS[index],
        }
    }

    pub fn initial_set() -> [SourceState; SOURCE_COUNT] {
        std::array::from_fn(SourceState::new)
    }

    #[inline]
    pub fn advance_hue(&mut self, degrees: f32) {
        self.hue = (self.hue + degrees).rem_euclid(360.0);
    }

    /// Milliseconds since the last emission, anchoring the timer on first use.
    pub fn elapsed_ms(&mut self, now_ms: f64) -> f64 {
        match self.last_spawn_ms {
            Some(t) => now_ms - t,
            None => {
                self.last_spawn_ms = Some(now_ms);
                0.0
            }
        }
    }

    /// Angle of a ray of this source at angular `position` in a ring of `ray_count`.
    pub fn ray_angle(&self, position: usize, ray_count: usize) -> f32 {
        let step = TAU / ray_count as f32;
        let within = (position as f32 * step * SOURCE_COUNT as f32) % SECTOR_SIZE;
        self.angle - SECTOR_SIZE / 2.0 + within
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_wraps_around() {
        let mut s = SourceState::new(0);
        s.hue = 359.99;
        s.advance_hue(0.03);
        assert!(s.hue < 1.0);
    }

    #[test]
    fn first_elapsed_anchors_timer() {
        let mut s = SourceState::new(1);
        assert_eq!(s.elapsed_ms(500.0), 0.0);
        assert_eq!(s.elapsed_ms(800.0), 300.0);
    }

    #[test]
    fn ray_angles_stay_inside_sector() {
        let s = SourceState::new(2);
        for p in 0..120 {
            let a = s.ray_angle(p, 120);
            assert!(a >= s.angle - SECTOR_SIZE / 2.0 - 1e-5);
            assert!(a < s.angle + SECTOR_SIZE / 2.0 + 1e-5);
        }
    }
}
