// src/render/window.rs
//! Scrolling strip-chart window over a generated lead

use crate::config::RenderSettings;
use crate::synthesis::{Lead, LeadChannel, LeadSet};
use serde::Serialize;

/// A sample mapped into drawing coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawPoint {
    /// Index of the source sample in the full buffer
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Visible slice of one lead
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripWindow {
    pub lead: Lead,
    pub start_index: usize,
    /// Nominal window width; `points` is shorter near the buffer end
    pub width_samples: usize,
    pub points: Vec<DrawPoint>,
}

impl StripWindow {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Straight-segment path data (`M x y L x y ...`) for a vector renderer
    pub fn to_path_data(&self) -> String {
        self.points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let command = if i == 0 { 'M' } else { 'L' };
                format!("{}{:.2} {:.2}", command, point.x, point.y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Maps lead channels into the fixed drawing surface
#[derive(Debug, Clone, Default)]
pub struct StripRenderer {
    settings: RenderSettings,
}

impl StripRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Visible samples for a buffer of `total_samples`
    pub fn window_width(&self, total_samples: usize) -> usize {
        self.settings.window_width(total_samples)
    }

    /// `floor(cursor / 100 * total)`, with negative or NaN cursors at 0 and
    /// cursors at or past 100 landing on the buffer end
    pub fn start_index(cursor_percent: f64, total_samples: usize) -> usize {
        if !cursor_percent.is_finite() || cursor_percent <= 0.0 {
            return if cursor_percent == f64::INFINITY { total_samples } else { 0 };
        }
        let start = (cursor_percent / 100.0 * total_samples as f64).floor() as usize;
        start.min(total_samples)
    }

    /// Slice `[start, start + width)` of `channel`, truncated at the buffer end.
    /// Wraparound is the caller's job. Amplitudes beyond the surface are
    /// clipped to its top and bottom edges.
    pub fn window(&self, channel: &LeadChannel, cursor_percent: f64) -> StripWindow {
        let total = channel.len();
        let width = self.window_width(total);
        let start = Self::start_index(cursor_percent, total);
        let end = start.saturating_add(width).min(total);
        let x_scale = self.settings.canvas_width / width.max(1) as f64;
        let height = self.settings.canvas_height.max(0.0);

        let points = channel.samples[start..end]
            .iter()
            .enumerate()
            .map(|(k, sample)| DrawPoint {
                index: sample.index,
                x: k as f64 * x_scale,
                y: sample.amplitude.clamp(0.0, height),
            })
            .collect();

        StripWindow {
            lead: channel.lead,
            start_index: start,
            width_samples: width,
            points,
        }
    }

    /// Windows for all 12 leads at the same cursor
    pub fn render_all(&self, set: &LeadSet, cursor_percent: f64) -> Vec<StripWindow> {
        set.channels()
            .iter()
            .map(|channel| self.window(channel, cursor_percent))
            .collect()
    }
}

/// Window with the default 300 x 100 surface and one-fifth width
pub fn window(channel: &LeadChannel, cursor_percent: f64) -> StripWindow {
    StripRenderer::default().window(channel, cursor_percent)
}
