// src/simulation/state.rs
//! Caller-owned simulator state: rhythm, rate, playback and the live buffer

use crate::config::{constants::playback, PlaybackSettings, SimulatorSettings};
use crate::error::{EkgError, EkgResult};
use crate::render::{StripRenderer, StripWindow};
use crate::synthesis::{Lead, LeadSet, Rhythm, WaveformSynthesizer};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Playback state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

/// State of one open simulator view.
///
/// The buffer is regenerated synchronously whenever the rhythm or rate
/// changes and swapped in whole, so readers never observe a mix of old and
/// new channels.
pub struct SimulationState {
    synthesizer: WaveformSynthesizer,
    renderer: StripRenderer,
    playback: PlaybackSettings,
    rhythm: Rhythm,
    rate_bpm: i32,
    state: PlaybackState,
    cursor_percent: f64,
    buffer: LeadSet,
    generation: u64,
}

impl SimulationState {
    /// Normal sinus at its default rate, idle, cursor at 0
    pub fn new(settings: SimulatorSettings) -> Self {
        Self::with_rhythm(settings, Rhythm::Normal)
    }

    /// Validate settings before building the state
    pub fn try_new(settings: SimulatorSettings) -> EkgResult<Self> {
        settings.validate().map_err(EkgError::Validation)?;
        Ok(Self::new(settings))
    }

    pub fn with_rhythm(settings: SimulatorSettings, rhythm: Rhythm) -> Self {
        let SimulatorSettings { synthesis, render, playback } = settings;
        let rate_bpm = playback.clamp_rate(rhythm.default_rate_bpm());
        let mut synthesizer = WaveformSynthesizer::new(synthesis);
        let buffer = synthesizer.generate(rhythm, rate_bpm);

        Self {
            synthesizer,
            renderer: StripRenderer::new(render),
            playback,
            rhythm,
            rate_bpm,
            state: PlaybackState::Idle,
            cursor_percent: 0.0,
            buffer,
            generation: 1,
        }
    }

    pub fn rhythm(&self) -> Rhythm {
        self.rhythm
    }

    pub fn rate_bpm(&self) -> i32 {
        self.rate_bpm
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn cursor_percent(&self) -> f64 {
        self.cursor_percent
    }

    pub fn buffer(&self) -> &LeadSet {
        &self.buffer
    }

    /// Number of buffers generated so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn playback_settings(&self) -> &PlaybackSettings {
        &self.playback
    }

    /// Select a rhythm; the rate resets to the rhythm's suggested default
    pub fn select_rhythm(&mut self, rhythm: Rhythm) {
        self.rhythm = rhythm;
        self.rate_bpm = self.playback.clamp_rate(rhythm.default_rate_bpm());
        self.regenerate();
    }

    /// Select by identifier; unknown identifiers select normal sinus
    pub fn select_rhythm_id(&mut self, id: &str) {
        self.select_rhythm(Rhythm::from_id(id));
    }

    /// Set the rate independently of the rhythm default. Returns the clamped value.
    pub fn set_rate(&mut self, rate_bpm: i32) -> i32 {
        let clamped = self.playback.clamp_rate(rate_bpm);
        if clamped != rate_bpm {
            debug!(requested = rate_bpm, clamped, "rate clamped to input range");
        }
        if clamped != self.rate_bpm {
            self.rate_bpm = clamped;
            self.regenerate();
        }
        clamped
    }

    /// idle or paused -> playing
    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    /// playing -> paused, cursor frozen
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// any -> idle with the cursor back at 0
    pub fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.cursor_percent = 0.0;
    }

    /// Percent of the buffer covered by one timer period
    pub fn cursor_step_percent(&self) -> f64 {
        let total_ms = self.synthesizer.settings().total_duration_ms().max(1) as f64;
        self.playback.tick_period_ms as f64 / total_ms * playback::CURSOR_WRAP_PERCENT
    }

    /// Advance the cursor by one timer period while playing. Returns whether it moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.cursor_percent =
            (self.cursor_percent + self.cursor_step_percent()) % playback::CURSOR_WRAP_PERCENT;
        trace!(cursor = self.cursor_percent, "cursor advanced");
        true
    }

    /// Visible slice of one lead at the current cursor
    pub fn visible_window(&self, lead: Lead) -> StripWindow {
        self.renderer
            .window(self.buffer.channel(lead), self.cursor_percent)
    }

    /// Visible slices of all 12 leads at the current cursor
    pub fn visible_windows(&self) -> Vec<StripWindow> {
        self.renderer.render_all(&self.buffer, self.cursor_percent)
    }

    fn regenerate(&mut self) {
        let buffer = self.synthesizer.generate(self.rhythm, self.rate_bpm);
        self.buffer = buffer;
        self.generation += 1;
        debug!(
            rhythm = %self.rhythm,
            rate_bpm = self.rate_bpm,
            generation = self.generation,
            "buffer regenerated"
        );
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(SimulatorSettings::default())
    }
}
