// Host-side tests for the ray renderer, using a recording painter in place
// of the browser canvas.

use raystream_core::constants::*;
use raystream_core::*;

fn engine_with(seed: u64) -> RayEngine {
    let mut e = RayEngine::new(VisualizerConfig {
        geometry_jitter: 0.0,
        hue_jitter_deg: 0.0,
        ..VisualizerConfig::default().with_seed(seed)
    })
    .unwrap();
    e.resize(400.0, 400.0);
    e
}

fn draw(engine: &RayEngine) -> RecordingPainter {
    let mut p = RecordingPainter::default();
    let (w, h) = engine.size();
    render_field(&mut p, engine.field(), engine.sources(), w, h);
    p
}

#[test]
fn empty_field_paints_only_the_overlay() {
    let e = engine_with(1);
    let p = draw(&e);
    assert_eq!(p.overlays, 1);
    assert!(p.strokes.is_empty());
}

#[test]
fn bright_ray_gets_segments_and_glow() {
    let mut e = engine_with(1);
    e.emit(0, 1.0);
    for _ in 0..12 {
        e.emit(1, 0.0);
    }
    let p = draw(&e);
    // 13 rays, each 15 segments + glow (alpha >= 0.7 always exceeds the threshold)
    assert_eq!(p.strokes.len(), 13 * (SEGMENTS + 1));
}

#[test]
fn segments_thicken_and_brighten_toward_the_tip() {
    let mut e = engine_with(2);
    let slot = e.emit(2, 0.8).unwrap();
    for _ in 0..20 {
        e.emit(0, 0.0);
    }
    let ray = *e.field().slot(slot).unwrap();
    let p = draw(&e);
    let center = glam::Vec2::new(200.0, 200.0);

    let own: Vec<&Stroke> = p
        .strokes
        .iter()
        .filter(|s| s.color.hue == ray.hue && s.color.lightness == RAY_LIGHTNESS)
        .collect();
    assert_eq!(own.len(), SEGMENTS);
    for pair in own.windows(2) {
        assert!(pair[1].width > pair[0].width);
        assert!(pair[1].color.alpha > pair[0].color.alpha);
    }
    let tip = own.last().unwrap();
    assert!((tip.to.distance(center) - ray.length).abs() < 1e-2);
    assert!((tip.width - ray.thickness).abs() < 1e-5);
    assert!((tip.color.alpha - ray.alpha).abs() < 1e-5);
    assert_eq!(tip.color.saturation, RAY_SATURATION);
}

#[test]
fn young_rays_grow_outward() {
    let mut e = engine_with(3);
    let slot = e.emit(1, 0.6).unwrap();
    for _ in 0..4 {
        e.emit(0, 0.0);
    }
    let ray = *e.field().slot(slot).unwrap();
    assert_eq!(ray.age, 4);
    let p = draw(&e);
    let center = glam::Vec2::new(200.0, 200.0);
    let reach = p
        .strokes
        .iter()
        .filter(|s| s.color.hue == ray.hue)
        .map(|s| s.to.distance(center))
        .fold(0.0f32, f32::max);
    assert!((reach - ray.length * 0.4).abs() < 1e-2);
}

#[test]
fn newest_ray_has_zero_length() {
    let mut e = engine_with(4);
    e.emit(0, 1.0);
    let p = draw(&e);
    assert!(p.strokes.iter().all(|s| s.from == s.to));
}

#[test]
fn expired_rays_are_not_drawn() {
    let mut e = RayEngine::new(VisualizerConfig::default().with_seed(5).with_ray_count(6)).unwrap();
    e.resize(100.0, 100.0);
    e.emit(0, 1.0);
    for _ in 0..5 {
        e.emit(1, 1.0);
    }
    assert_eq!(e.field().live_count(), 6);
    // overwriting the oldest slot retires it
    e.emit(2, 1.0);
    assert_eq!(e.field().live_count(), 6);
    assert!(e.field().live().all(|(_, r)| r.source != 0));
}

#[test]
fn tick_without_painter_is_a_no_op_draw() {
    let mut e = engine_with(6);
    e.set_playing(true);
    let mut spectrum = FixedSpectrum::uniform(128, 255);
    e.tick(0.0, Some(&mut spectrum), None);
    let r = e.tick(DEFAULT_SPAWN_INTERVAL_MS, Some(&mut spectrum), None);
    assert_eq!(r.spawned.len(), 3);

    let mut p = RecordingPainter::default();
    e.tick(DEFAULT_SPAWN_INTERVAL_MS + 16.0, Some(&mut spectrum), Some(&mut p));
    assert_eq!(p.overlays, 1);
}

#[test]
fn rays_of_each_source_stay_in_their_sector() {
    let mut e = engine_with(7);
    for i in 0..90 {
        e.emit(i % 3, 0.5);
    }
    let n = e.field().ray_count();
    for (pos, ray) in e.field().live() {
        let src = &e.sources()[ray.source];
        let a = src.ray_angle(pos, n);
        let half = source::SECTOR_SIZE / 2.0;
        assert!(a >= src.angle - half - 1e-4 && a <= src.angle + half + 1e-4);
    }
}
