// src/config/mod.rs
//! Simulator configuration management

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

/// Complete simulator configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SimulatorSettings {
    #[serde(default)]
    pub synthesis: SynthesisSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub playback: PlaybackSettings,
}

/// Sample buffer geometry and randomness
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SynthesisSettings {
    #[serde(default = "defaults::sampling_rate_hz")]
    pub sampling_rate_hz: u32,

    #[serde(default = "defaults::duration_seconds")]
    pub duration_seconds: u32,

    #[serde(default = "defaults::baseline")]
    pub baseline: f64,

    /// Fixed seed for chaotic rhythms; entropy-seeded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Strip-chart window and drawing surface
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RenderSettings {
    #[serde(default = "defaults::window_divisor")]
    pub window_divisor: usize,

    #[serde(default = "defaults::canvas_width")]
    pub canvas_width: f64,

    #[serde(default = "defaults::canvas_height")]
    pub canvas_height: f64,
}

/// Cursor timer and rate input bounds
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlaybackSettings {
    #[serde(default = "defaults::tick_period_ms")]
    pub tick_period_ms: u64,

    #[serde(default = "defaults::min_rate_bpm")]
    pub min_rate_bpm: i32,

    #[serde(default = "defaults::max_rate_bpm")]
    pub max_rate_bpm: i32,
}

/// Default value providers using constants
mod defaults {
    use crate::config::constants::*;

    pub fn sampling_rate_hz() -> u32 { synthesis::DEFAULT_SAMPLING_RATE_HZ }
    pub fn duration_seconds() -> u32 { synthesis::DEFAULT_DURATION_SECONDS }
    pub fn baseline() -> f64 { synthesis::DEFAULT_BASELINE }

    pub fn window_divisor() -> usize { render::DEFAULT_WINDOW_DIVISOR }
    pub fn canvas_width() -> f64 { render::DEFAULT_CANVAS_WIDTH }
    pub fn canvas_height() -> f64 { render::DEFAULT_CANVAS_HEIGHT }

    pub fn tick_period_ms() -> u64 { playback::DEFAULT_TICK_PERIOD_MS }
    pub fn min_rate_bpm() -> i32 { playback::DEFAULT_MIN_RATE_BPM }
    pub fn max_rate_bpm() -> i32 { playback::DEFAULT_MAX_RATE_BPM }
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            sampling_rate_hz: defaults::sampling_rate_hz(),
            duration_seconds: defaults::duration_seconds(),
            baseline: defaults::baseline(),
            seed: None,
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            window_divisor: defaults::window_divisor(),
            canvas_width: defaults::canvas_width(),
            canvas_height: defaults::canvas_height(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tick_period_ms: defaults::tick_period_ms(),
            min_rate_bpm: defaults::min_rate_bpm(),
            max_rate_bpm: defaults::max_rate_bpm(),
        }
    }
}

impl SynthesisSettings {
    /// Samples per lead for one generation pass
    pub fn total_samples(&self) -> usize {
        self.sampling_rate_hz as usize * self.duration_seconds as usize
    }

    /// Simulated buffer length in milliseconds
    pub fn total_duration_ms(&self) -> u64 {
        self.duration_seconds as u64 * 1000
    }
}

impl RenderSettings {
    /// Visible samples for a buffer of `total_samples`
    pub fn window_width(&self, total_samples: usize) -> usize {
        total_samples / self.window_divisor.max(1)
    }
}

impl PlaybackSettings {
    /// Clamp a user-entered rate to the input control's range
    pub fn clamp_rate(&self, rate_bpm: i32) -> i32 {
        rate_bpm.clamp(self.min_rate_bpm, self.max_rate_bpm.max(self.min_rate_bpm))
    }
}

impl SimulatorSettings {
    /// Validate ranges and cross-field consistency
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let s = &self.synthesis;
        if !(synthesis::MIN_SAMPLING_RATE_HZ..=synthesis::MAX_SAMPLING_RATE_HZ)
            .contains(&s.sampling_rate_hz)
        {
            errors.push(format!(
                "synthesis.sampling_rate_hz {} outside [{}, {}]",
                s.sampling_rate_hz,
                synthesis::MIN_SAMPLING_RATE_HZ,
                synthesis::MAX_SAMPLING_RATE_HZ
            ));
        }
        if !(synthesis::MIN_DURATION_SECONDS..=synthesis::MAX_DURATION_SECONDS)
            .contains(&s.duration_seconds)
        {
            errors.push(format!(
                "synthesis.duration_seconds {} outside [{}, {}]",
                s.duration_seconds,
                synthesis::MIN_DURATION_SECONDS,
                synthesis::MAX_DURATION_SECONDS
            ));
        }
        if !s.baseline.is_finite() {
            errors.push("synthesis.baseline must be finite".to_string());
        }

        let r = &self.render;
        if !(render::MIN_WINDOW_DIVISOR..=render::MAX_WINDOW_DIVISOR).contains(&r.window_divisor) {
            errors.push(format!(
                "render.window_divisor {} outside [{}, {}]",
                r.window_divisor,
                render::MIN_WINDOW_DIVISOR,
                render::MAX_WINDOW_DIVISOR
            ));
        }
        for (name, value) in [("canvas_width", r.canvas_width), ("canvas_height", r.canvas_height)] {
            if !(value.is_finite() && value > 0.0) {
                errors.push(format!("render.{} must be positive, got {}", name, value));
            }
        }

        let p = &self.playback;
        if !(playback::MIN_TICK_PERIOD_MS..=playback::MAX_TICK_PERIOD_MS).contains(&p.tick_period_ms) {
            errors.push(format!(
                "playback.tick_period_ms {} outside [{}, {}]",
                p.tick_period_ms,
                playback::MIN_TICK_PERIOD_MS,
                playback::MAX_TICK_PERIOD_MS
            ));
        }
        if p.min_rate_bpm < 0 {
            errors.push(format!("playback.min_rate_bpm {} must not be negative", p.min_rate_bpm));
        }
        if p.min_rate_bpm > p.max_rate_bpm {
            errors.push(format!(
                "playback.min_rate_bpm {} exceeds max_rate_bpm {}",
                p.min_rate_bpm, p.max_rate_bpm
            ));
        }

        // A tick must move the cursor by less than the visible window
        let window_ms = s.total_duration_ms() / r.window_divisor.max(1) as u64;
        if p.tick_period_ms >= window_ms.max(1) {
            errors.push(format!(
                "playback.tick_period_ms {} must be shorter than the visible window ({} ms)",
                p.tick_period_ms, window_ms
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
