//! 12-lead buffer generation
//! Location: src/synthesis/generator.rs

use super::leads::Lead;
use super::models::{synthesize, Timeline};
use super::rhythm::Rhythm;
use crate::config::SynthesisSettings;
use crate::error::EkgResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One discrete time step of a lead
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub index: usize,
    pub amplitude: f64,
}

/// Generated samples for a single lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadChannel {
    pub lead: Lead,
    pub samples: Vec<SamplePoint>,
}

impl LeadChannel {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn amplitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.amplitude)
    }
}

/// The 12 channels produced by one generation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadSet {
    rhythm: Rhythm,
    rate_bpm: i32,
    sampling_rate_hz: u32,
    baseline: f64,
    channels: Vec<LeadChannel>,
}

impl LeadSet {
    pub fn rhythm(&self) -> Rhythm {
        self.rhythm
    }

    pub fn rate_bpm(&self) -> i32 {
        self.rate_bpm
    }

    pub fn sampling_rate_hz(&self) -> u32 {
        self.sampling_rate_hz
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Channels in `Lead::ALL` order
    pub fn channels(&self) -> &[LeadChannel] {
        &self.channels
    }

    pub fn channel(&self, lead: Lead) -> &LeadChannel {
        &self.channels[lead.index()]
    }

    /// Samples per lead
    pub fn total_samples(&self) -> usize {
        self.channels.first().map_or(0, LeadChannel::len)
    }

    /// JSON for a browser-side path renderer
    pub fn to_json(&self) -> EkgResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Generate all 12 leads for `rhythm` at `rate_bpm`.
///
/// The base trace is computed once and projected onto every lead, so each
/// lead shows the same cardiac event scaled by its multiplier. Stored values
/// are `baseline - scaled` so positive deflections draw upward on a canvas
/// whose y axis grows downward. Randomness only comes from `rng`.
pub fn generate<R: Rng + ?Sized>(
    rhythm: Rhythm,
    rate_bpm: i32,
    settings: &SynthesisSettings,
    rng: &mut R,
) -> LeadSet {
    let timeline = Timeline::new(settings.sampling_rate_hz, settings.total_samples());
    let base = synthesize(rhythm, rate_bpm, &timeline, rng);
    let baseline = settings.baseline;

    let channels = Lead::ALL
        .iter()
        .map(|&lead| {
            let multiplier = lead.multiplier();
            let samples = base
                .iter()
                .enumerate()
                .map(|(index, &value)| SamplePoint {
                    index,
                    amplitude: baseline - value * multiplier,
                })
                .collect();
            LeadChannel { lead, samples }
        })
        .collect();

    debug!(
        rhythm = %rhythm,
        rate_bpm,
        samples = timeline.total_samples,
        "generated 12-lead buffer"
    );

    LeadSet {
        rhythm,
        rate_bpm,
        sampling_rate_hz: settings.sampling_rate_hz,
        baseline,
        channels,
    }
}

/// Synthesizer owning its settings and random source
pub struct WaveformSynthesizer {
    settings: SynthesisSettings,
    rng: StdRng,
}

impl WaveformSynthesizer {
    /// Seeded from `settings.seed`, or from entropy when unset
    pub fn new(settings: SynthesisSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { settings, rng }
    }

    pub fn settings(&self) -> &SynthesisSettings {
        &self.settings
    }

    pub fn generate(&mut self, rhythm: Rhythm, rate_bpm: i32) -> LeadSet {
        generate(rhythm, rate_bpm, &self.settings, &mut self.rng)
    }

    /// Unknown identifiers draw normal sinus rhythm
    pub fn generate_id(&mut self, rhythm_id: &str, rate_bpm: i32) -> LeadSet {
        self.generate(Rhythm::from_id(rhythm_id), rate_bpm)
    }
}

impl Default for WaveformSynthesizer {
    fn default() -> Self {
        Self::new(SynthesisSettings::default())
    }
}
