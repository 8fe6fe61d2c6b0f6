// tests/windowing_tests.rs
//! Strip window placement and coordinate mapping

use ekg_core::config::constants::synthesis::LEAD_COUNT;
use ekg_core::config::{RenderSettings, SynthesisSettings};
use ekg_core::render::{window, StripRenderer};
use ekg_core::synthesis::{generate, Lead, LeadSet, Rhythm};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn normal_set() -> LeadSet {
    let mut rng = StdRng::seed_from_u64(0);
    generate(Rhythm::Normal, 75, &SynthesisSettings::default(), &mut rng)
}

#[test]
fn test_window_at_37_5_percent() {
    let set = normal_set();
    let strip = window(set.channel(Lead::II), 37.5);

    assert_eq!(strip.start_index, 937);
    assert_eq!(strip.width_samples, 500);
    assert_eq!(strip.len(), 500);
    assert_eq!(strip.points[0].index, 937);
    assert_eq!(strip.points[499].index, 1436);
}

#[test]
fn test_window_truncates_near_end() {
    let set = normal_set();
    let strip = window(set.channel(Lead::II), 90.0);

    assert_eq!(strip.start_index, 2250);
    assert_eq!(strip.len(), 250);
    assert_eq!(strip.points.last().map(|p| p.index), Some(2499));
}

#[test]
fn test_coordinates_map_into_canvas() {
    let set = normal_set();
    let channel = set.channel(Lead::V4);
    let strip = window(channel, 10.0);

    for (k, point) in strip.points.iter().enumerate() {
        assert!((point.x - k as f64 * 0.6).abs() < 1e-9);
        assert_eq!(point.y, channel.samples[point.index].amplitude.clamp(0.0, 100.0));
        assert!(point.x < 300.0);
    }
}

#[test]
fn test_cursor_at_100_is_empty() {
    let set = normal_set();
    let strip = window(set.channel(Lead::I), 100.0);
    assert_eq!(strip.start_index, 2500);
    assert!(strip.is_empty());
    assert!(strip.to_path_data().is_empty());
}

#[test]
fn test_out_of_range_cursors() {
    assert_eq!(StripRenderer::start_index(-5.0, 2500), 0);
    assert_eq!(StripRenderer::start_index(f64::NAN, 2500), 0);
    assert_eq!(StripRenderer::start_index(250.0, 2500), 2500);
    assert_eq!(StripRenderer::start_index(f64::INFINITY, 2500), 2500);
}

#[test]
fn test_custom_divisor_and_canvas() {
    let renderer = StripRenderer::new(RenderSettings {
        window_divisor: 10,
        canvas_width: 500.0,
        canvas_height: 120.0,
    });
    let set = normal_set();
    let strip = renderer.window(set.channel(Lead::II), 0.0);

    assert_eq!(strip.width_samples, 250);
    assert_eq!(strip.len(), 250);
    assert!((strip.points[1].x - 2.0).abs() < 1e-9);
}

#[test]
fn test_render_all_shares_cursor() {
    let set = normal_set();
    let strips = StripRenderer::default().render_all(&set, 20.0);

    assert_eq!(strips.len(), LEAD_COUNT);
    for (strip, lead) in strips.iter().zip(Lead::ALL) {
        assert_eq!(strip.lead, lead);
        assert_eq!(strip.start_index, 500);
    }
}

#[test]
fn test_path_data_follows_points() {
    let set = normal_set();
    let strip = window(set.channel(Lead::II), 0.0);
    let path = strip.to_path_data();

    assert!(path.starts_with("M0.00 50.00"));
    assert_eq!(path.matches('L').count(), strip.len() - 1);
}

#[test]
fn test_every_rhythm_stays_inside_the_surface() {
    let renderer = StripRenderer::default();
    for seed in 0..10 {
        for rhythm in Rhythm::ALL {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = generate(rhythm, rhythm.default_rate_bpm(), &SynthesisSettings::default(), &mut rng);
            for cursor in [0.0, 25.0, 50.0, 80.0] {
                for strip in renderer.render_all(&set, cursor) {
                    for point in &strip.points {
                        assert!((0.0..300.0).contains(&point.x), "{} x {}", rhythm, point.x);
                        assert!((0.0..=100.0).contains(&point.y), "{} y {}", rhythm, point.y);
                    }
                }
            }
        }
    }
}

