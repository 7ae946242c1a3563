//! Ray field rendering through a platform-neutral painter.
//!
//! Every tick paints a translucent black overlay (the trail effect) and then
//! each live ray as a short chain of segments that get thicker and brighter
//! toward the tip, plus an optional wide, faint glow stroke.

use crate::constants::*;
use crate::ray::RayField;
use crate::source::SourceState;
use glam::Vec2;

/// HSL color with alpha; hue in degrees, saturation/lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    /// CSS color string, e.g. `hsla(300, 100%, 60%, 0.5)`.
    pub fn to_css(&self) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// Drawing surface operations the renderer needs.
pub trait Painter {
    /// Cover the whole surface with black at `alpha`.
    fn fill_overlay(&mut self, width: f32, height: f32, alpha: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla);
}

/// Length multiplier for a ray of the given age; ramps 0 -> 1 over `GROWTH_TICKS`.
#[inline]
pub fn growth_factor(age: u32) -> f32 {
    (age as f32 / GROWTH_TICKS).min(1.0)
}

pub fn render_field<P: Painter + ?Sized>(
    painter: &mut P,
    field: &RayField,
    sources: &[SourceState],
    width: f32,
    height: f32,
) {
    painter.fill_overlay(width, height, TRAIL_OVERLAY_ALPHA);

    let center = Vec2::new(width / 2.0, height / 2.0);
    let ray_count = field.ray_count();
    for (position, ray) in field.live() {
        let Some(source) = sources.get(ray.source) else {
            continue;
        };
        let angle = source.ray_angle(position, ray_count);
        let dir = Vec2::new(angle.cos(), angle.sin());
        let len = ray.length * growth_factor(ray.age);

        for j in 0..SEGMENTS {
            let seg = j as f32 / SEGMENTS as f32;
            let next = (j + 1) as f32 / SEGMENTS as f32;
            let start = len * if j == 0 { FIRST_SEGMENT_START } else { seg };
            let end = len * next;
            painter.stroke_line(
                center + dir * start,
                center + dir * end,
                ray.thickness * (SEGMENT_THICKNESS_BASE + next * (1.0 - SEGMENT_THICKNESS_BASE)),
                Hsla {
                    hue: ray.hue,
                    saturation: RAY_SATURATION,
                    lightness: RAY_LIGHTNESS,
                    alpha: ray.alpha * (SEGMENT_ALPHA_BASE + next * (1.0 - SEGMENT_ALPHA_BASE)),
                },
            );
        }

        if ray.alpha > GLOW_ALPHA_THRESHOLD {
            painter.stroke_line(
                center,
                center + dir * len,
                GLOW_WIDTH_BASE + ray.thickness * GLOW_WIDTH_SCALE,
                Hsla {
                    hue: ray.hue,
                    saturation: RAY_SATURATION,
                    lightness: RAY_LIGHTNESS + GLOW_LIGHTNESS_BOOST,
                    alpha: ray.alpha * GLOW_ALPHA_SCALE,
                },
            );
        }
    }
}

/// Painter that records calls; used by tests and diagnostics.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    pub overlays: usize,
    pub strokes: Vec<Stroke>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: Hsla,
}

impl Painter for RecordingPainter {
    fn fill_overlay(&mut self, _width: f32, _height: f32, _alpha: f32) {
        self.overlays += 1;
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla) {
        self.strokes.push(Stroke {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_ramps_then_saturates() {
        assert_eq!(growth_factor(0), 0.0);
        assert!((growth_factor(5) - 0.5).abs() < 1e-6);
        assert_eq!(growth_factor(10), 1.0);
        assert_eq!(growth_factor(500), 1.0);
    }

    #[test]
    fn css_format() {
        let c = Hsla {
            hue: 300.0,
            saturation: 100.0,
            lightness: 60.0,
            alpha: 0.5,
        };
        assert_eq!(c.to_css(), "hsla(300, 100%, 60%, 0.5)");
    }
}
