//! Per-rhythm base amplitude models
//! Location: src/synthesis/models.rs
//!
//! Each model fills one base trace for the whole buffer. The trace is in
//! draw units with positive values meaning an upward deflection; lead
//! projection and baseline inversion happen in the generator.

use super::components::{Bump, QrsComplex};
use super::rhythm::Rhythm;
use crate::config::constants::{beat, rhythm as tuning, synthesis};
use rand::Rng;
use std::f64::consts::PI;

/// Sampling geometry shared by all models
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    pub sampling_rate_hz: f64,
    pub total_samples: usize,
}

impl Timeline {
    pub fn new(sampling_rate_hz: u32, total_samples: usize) -> Self {
        Self {
            sampling_rate_hz: sampling_rate_hz as f64,
            total_samples,
        }
    }

    /// Samples spanning one cardiac cycle
    pub fn beat_interval(&self, rate_bpm: f64) -> f64 {
        let rate = rate_bpm.clamp(synthesis::MIN_EFFECTIVE_RATE_BPM, synthesis::MAX_EFFECTIVE_RATE_BPM);
        60.0 / rate * self.sampling_rate_hz
    }

    pub fn seconds(&self, index: usize) -> f64 {
        index as f64 / self.sampling_rate_hz
    }

    pub fn index_at(&self, seconds: f64) -> usize {
        ((seconds * self.sampling_rate_hz) as usize).min(self.total_samples)
    }
}

/// Rates at or below zero are drawn as one beat per minute; very large rates
/// are held at the ceiling
pub fn effective_rate(rate_bpm: i32) -> f64 {
    (rate_bpm as f64).clamp(synthesis::MIN_EFFECTIVE_RATE_BPM, synthesis::MAX_EFFECTIVE_RATE_BPM)
}

/// Position within the current beat cycle, in [0, 1)
pub fn beat_phase(index: usize, beat_interval: f64) -> f64 {
    (index as f64 % beat_interval) / beat_interval
}

/// P, QRS and T parameters for one organized beat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatShape {
    pub p: Bump,
    pub qrs: QrsComplex,
    pub t: Bump,
}

impl BeatShape {
    pub fn standard() -> Self {
        Self {
            p: Bump::new(beat::P_AMPLITUDE, beat::P_DURATION, beat::P_OFFSET),
            qrs: QrsComplex {
                q_amplitude: beat::Q_AMPLITUDE,
                r_amplitude: beat::R_AMPLITUDE,
                s_amplitude: beat::S_AMPLITUDE,
                duration: beat::QRS_DURATION,
                offset: beat::QRS_OFFSET,
            },
            t: Bump::new(beat::T_AMPLITUDE, beat::T_DURATION, beat::T_OFFSET),
        }
    }

    /// Re-entrant tachycardia hides atrial activity inside the QRS
    pub fn buried_p() -> Self {
        Self {
            p: Bump::new(0.0, beat::P_DURATION, beat::P_OFFSET),
            ..Self::standard()
        }
    }

    /// Sinus beat with a late, broad T-wave
    pub fn long_qt() -> Self {
        Self {
            t: Bump::new(beat::T_AMPLITUDE, beat::LONG_QT_T_DURATION, beat::LONG_QT_T_OFFSET),
            ..Self::standard()
        }
    }

    pub fn at(&self, phase: f64) -> f64 {
        self.p.at(phase) + self.qrs.at(phase) + self.t.at(phase)
    }
}

/// Fill the base trace for `rhythm`. Only chaotic rhythms read from `rng`.
pub fn synthesize<R: Rng + ?Sized>(
    rhythm: Rhythm,
    rate_bpm: i32,
    timeline: &Timeline,
    rng: &mut R,
) -> Vec<f64> {
    let rate = effective_rate(rate_bpm);
    match rhythm {
        Rhythm::Normal | Rhythm::Bradycardia | Rhythm::Tachycardia => {
            organized(&BeatShape::standard(), rate, timeline)
        }
        Rhythm::SupraventricularTachycardia => organized(&BeatShape::buried_p(), rate, timeline),
        Rhythm::AtrialFibrillation => atrial_fibrillation(rate, timeline, rng),
        Rhythm::VentricularTachycardia => ventricular_tachycardia(rate, timeline, rng),
        Rhythm::VentricularFibrillation => ventricular_fibrillation(timeline, rng),
        Rhythm::Asystole => asystole(timeline, rng),
        Rhythm::Torsades => torsades(rate, timeline, rng),
        Rhythm::CompleteHeartBlock => complete_heart_block(rate, timeline),
    }
}

fn organized(shape: &BeatShape, rate: f64, timeline: &Timeline) -> Vec<f64> {
    let interval = timeline.beat_interval(rate);
    (0..timeline.total_samples)
        .map(|i| shape.at(beat_phase(i, interval)))
        .collect()
}

fn atrial_fibrillation<R: Rng + ?Sized>(rate: f64, timeline: &Timeline, rng: &mut R) -> Vec<f64> {
    let n = timeline.total_samples;
    let interval = timeline.beat_interval(rate);
    let shape = BeatShape {
        p: Bump::new(0.0, beat::P_DURATION, beat::P_OFFSET),
        qrs: BeatShape::standard().qrs.scaled(tuning::AFIB_QRS_SCALE),
        t: Bump::new(beat::T_AMPLITUDE * 0.7, beat::T_DURATION, beat::T_OFFSET),
    };

    let noise = tuning::AFIB_NOISE_AMPLITUDE;
    let mut signal: Vec<f64> = (0..n).map(|_| rng.gen_range(-noise..=noise)).collect();

    // Irregularly irregular ventricular response
    let jitter = tuning::AFIB_INTERVAL_JITTER;
    let mut onset = rng.gen_range(0.0..interval);
    while onset < n as f64 {
        let start = onset.floor() as usize;
        let end = ((onset + interval).ceil() as usize).min(n);
        for (i, sample) in signal.iter_mut().enumerate().take(end).skip(start) {
            *sample += shape.at((i as f64 - onset) / interval);
        }
        onset += interval * (1.0 + rng.gen_range(-jitter..=jitter));
    }

    signal
}

fn ventricular_tachycardia<R: Rng + ?Sized>(rate: f64, timeline: &Timeline, rng: &mut R) -> Vec<f64> {
    let interval = timeline.beat_interval(rate);
    let discordant_t = Bump::new(
        -tuning::VTACH_T_AMPLITUDE,
        tuning::VTACH_T_DURATION,
        tuning::VTACH_T_OFFSET,
    );
    let noise = tuning::VTACH_NOISE_AMPLITUDE;

    (0..timeline.total_samples)
        .map(|i| {
            let phase = beat_phase(i, interval);
            wide_complex(phase) + discordant_t.at(phase) + rng.gen_range(-noise..=noise)
        })
        .collect()
}

/// Square-root upstroke then squared decay over the first part of the cycle
fn wide_complex(phase: f64) -> f64 {
    let width = tuning::VTACH_COMPLEX_WIDTH;
    let upstroke = width * tuning::VTACH_UPSTROKE_FRACTION;
    let peak = tuning::VTACH_PEAK_AMPLITUDE;

    if phase < upstroke {
        peak * (phase / upstroke).sqrt()
    } else if phase < width {
        let fall = (phase - upstroke) / (width - upstroke);
        peak * (1.0 - fall).powi(2)
    } else {
        0.0
    }
}

fn ventricular_fibrillation<R: Rng + ?Sized>(timeline: &Timeline, rng: &mut R) -> Vec<f64> {
    let noise = tuning::VFIB_NOISE_AMPLITUDE;
    (0..timeline.total_samples)
        .map(|i| {
            let t = timeline.seconds(i);
            tuning::VFIB_CARRIER_AMPLITUDE * (2.0 * PI * tuning::VFIB_CARRIER_HZ * t).sin()
                + tuning::VFIB_HARMONIC_AMPLITUDE * (2.0 * PI * tuning::VFIB_HARMONIC_HZ * t + 1.3).sin()
                + rng.gen_range(-noise..=noise)
        })
        .collect()
}

fn asystole<R: Rng + ?Sized>(timeline: &Timeline, rng: &mut R) -> Vec<f64> {
    let noise = tuning::ASYSTOLE_NOISE_AMPLITUDE;
    (0..timeline.total_samples)
        .map(|_| rng.gen_range(-noise..=noise))
        .collect()
}

fn torsades<R: Rng + ?Sized>(rate: f64, timeline: &Timeline, rng: &mut R) -> Vec<f64> {
    let n = timeline.total_samples;
    let mut signal = vec![0.0; n];

    // Long-QT sinus prelude
    let prelude_end = timeline.index_at(tuning::TORSADES_PRELUDE_SECONDS);
    let prelude_interval = timeline.beat_interval(tuning::TORSADES_PRELUDE_RATE_BPM);
    let long_qt = BeatShape::long_qt();
    for (i, sample) in signal.iter_mut().enumerate().take(prelude_end) {
        *sample = long_qt.at(beat_phase(i, prelude_interval));
    }

    // Polymorphic run with a twisting envelope
    let interval = timeline.beat_interval(rate);
    let mut cursor = prelude_end as f64;
    let mut complex = 0usize;
    while cursor < n as f64 {
        let width = interval * (1.0 + rng.gen_range(-tuning::TORSADES_WIDTH_JITTER..=tuning::TORSADES_WIDTH_JITTER));
        let shift = interval * rng.gen_range(-tuning::TORSADES_POSITION_JITTER..=tuning::TORSADES_POSITION_JITTER);
        let start = (cursor + shift).max(prelude_end as f64);

        let center = timeline.seconds((start + width / 2.0) as usize) - tuning::TORSADES_PRELUDE_SECONDS;
        let twist = (2.0 * PI * center / tuning::TORSADES_TWIST_CYCLE_SECONDS).sin();
        let envelope = tuning::TORSADES_MIN_ENVELOPE + (1.0 - tuning::TORSADES_MIN_ENVELOPE) * twist.abs();
        let amplitude = tuning::TORSADES_PEAK_AMPLITUDE * envelope * twist.signum();

        let first = start.floor() as usize;
        let last = ((start + width).ceil() as usize).min(n);
        for (i, sample) in signal.iter_mut().enumerate().take(last).skip(first) {
            let u = (i as f64 - start) / width;
            if !(0.0..1.0).contains(&u) {
                continue;
            }
            let deflection = if complex % 2 == 0 {
                (PI * u).sin()
            } else {
                (1.0 - (2.0 * u - 1.0).abs()).powf(1.5)
            };
            *sample += amplitude * deflection;
        }

        cursor += interval;
        complex += 1;
    }

    // Large spikes and short fibrillatory bursts
    let mut burst_remaining = 0usize;
    for sample in signal.iter_mut().skip(prelude_end) {
        if rng.gen_bool(tuning::TORSADES_SPIKE_PROBABILITY) {
            *sample += rng.gen_range(-tuning::TORSADES_SPIKE_AMPLITUDE..=tuning::TORSADES_SPIKE_AMPLITUDE);
        }
        if burst_remaining > 0 {
            *sample += rng.gen_range(-tuning::TORSADES_BURST_AMPLITUDE..=tuning::TORSADES_BURST_AMPLITUDE);
            burst_remaining -= 1;
        } else if rng.gen_bool(tuning::TORSADES_BURST_PROBABILITY) {
            burst_remaining =
                rng.gen_range(tuning::TORSADES_BURST_MIN_SAMPLES..=tuning::TORSADES_BURST_MAX_SAMPLES);
        }
    }

    signal
}

fn complete_heart_block(rate: f64, timeline: &Timeline) -> Vec<f64> {
    let atrial_interval = timeline.beat_interval(tuning::CHB_ATRIAL_RATE_BPM);
    let ventricular_interval = timeline.beat_interval(rate);

    let p = Bump::new(beat::P_AMPLITUDE, beat::P_DURATION, beat::P_OFFSET);
    let escape = QrsComplex {
        q_amplitude: beat::Q_AMPLITUDE * 0.5,
        r_amplitude: beat::R_AMPLITUDE * 0.8,
        s_amplitude: beat::S_AMPLITUDE * 1.5,
        duration: tuning::CHB_QRS_DURATION,
        offset: tuning::CHB_QRS_OFFSET,
    };
    let t = Bump::new(-beat::T_AMPLITUDE * 0.8, tuning::CHB_T_DURATION, tuning::CHB_T_OFFSET);

    (0..timeline.total_samples)
        .map(|i| {
            let atrial = beat_phase(i, atrial_interval);
            let ventricular = beat_phase(i, ventricular_interval);
            p.at(atrial) + escape.at(ventricular) + t.at(ventricular)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn timeline() -> Timeline {
        Timeline::new(250, 2500)
    }

    #[test]
    fn test_beat_interval_and_zero_rate() {
        let tl = timeline();
        assert_eq!(tl.beat_interval(75.0), 200.0);
        assert_eq!(tl.beat_interval(0.0), 15000.0);
        assert_eq!(effective_rate(0), 1.0);
        assert_eq!(effective_rate(-40), 1.0);
        assert_eq!(effective_rate(320), 320.0);
        assert_eq!(effective_rate(i32::MAX), synthesis::MAX_EFFECTIVE_RATE_BPM);
        assert!((tl.beat_interval(f64::MAX) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_beat_phase_wraps() {
        assert_eq!(beat_phase(0, 200.0), 0.0);
        assert_eq!(beat_phase(100, 200.0), 0.5);
        assert_eq!(beat_phase(200, 200.0), 0.0);
        assert!(beat_phase(214, 214.2857) < 1.0);
    }

    #[test]
    fn test_every_model_fills_the_buffer() {
        let tl = timeline();
        let mut rng = StdRng::seed_from_u64(11);
        for rhythm in Rhythm::ALL {
            for rate in [0, 1, 75, 320] {
                let trace = synthesize(rhythm, rate, &tl, &mut rng);
                assert_eq!(trace.len(), 2500, "{} @ {}", rhythm, rate);
                assert!(trace.iter().all(|v| v.is_finite()), "{} @ {}", rhythm, rate);
            }
        }
    }

    #[test]
    fn test_wide_complex_shape() {
        let width = tuning::VTACH_COMPLEX_WIDTH;
        let upstroke = width * tuning::VTACH_UPSTROKE_FRACTION;
        assert_eq!(wide_complex(0.0), 0.0);
        assert!((wide_complex(upstroke) - tuning::VTACH_PEAK_AMPLITUDE).abs() < 1e-9);
        assert_eq!(wide_complex(width), 0.0);
        // Square-root rise is above the linear ramp
        assert!(wide_complex(upstroke / 4.0) > tuning::VTACH_PEAK_AMPLITUDE / 4.0);
    }

    #[test]
    fn test_svt_has_no_p_wave() {
        let shape = BeatShape::buried_p();
        let p_mid = beat::P_OFFSET + beat::P_DURATION / 2.0;
        assert_eq!(shape.at(p_mid), 0.0);
        assert!(BeatShape::standard().at(p_mid) > 4.9);
    }

    #[test]
    fn test_long_qt_delays_t_wave() {
        let normal_t_peak = beat::T_OFFSET + beat::T_DURATION / 2.0;
        let long_t_peak = beat::LONG_QT_T_OFFSET + beat::LONG_QT_T_DURATION / 2.0;
        assert!(long_t_peak > normal_t_peak);
        assert!((BeatShape::long_qt().at(long_t_peak) - beat::T_AMPLITUDE).abs() < 1e-6);
    }

    #[test]
    fn test_torsades_prelude_is_organized() {
        let tl = timeline();
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        let first = synthesize(Rhythm::Torsades, 220, &tl, &mut a);
        let second = synthesize(Rhythm::Torsades, 220, &tl, &mut b);

        let prelude = tl.index_at(tuning::TORSADES_PRELUDE_SECONDS);
        assert_eq!(prelude, 500);
        assert_eq!(first[..prelude], second[..prelude]);
        assert_ne!(first[prelude..], second[prelude..]);
    }

    #[test]
    fn test_torsades_polarity_twists() {
        let tl = timeline();
        let mut rng = StdRng::seed_from_u64(5);
        let trace = synthesize(Rhythm::Torsades, 220, &tl, &mut rng);

        let run = &trace[500..];
        let max = run.iter().cloned().fold(f64::MIN, f64::max);
        let min = run.iter().cloned().fold(f64::MAX, f64::min);
        assert!(max > 15.0, "max {}", max);
        assert!(min < -15.0, "min {}", min);
    }

    #[test]
    fn test_complete_heart_block_dissociation() {
        let tl = timeline();
        let mut rng = StdRng::seed_from_u64(0);
        let trace = synthesize(Rhythm::CompleteHeartBlock, 35, &tl, &mut rng);

        // P-waves keep marching every 200 samples; some land on a
        // ventricular complex and are masked
        let p_mid = ((beat::P_OFFSET + beat::P_DURATION / 2.0) * 200.0) as usize;
        let atrial_peaks = (0..12)
            .filter(|k| {
                let i = k * 200 + p_mid;
                trace[i] > 3.0
            })
            .count();
        assert!(atrial_peaks >= 6, "only {} visible P-waves", atrial_peaks);

        // More atrial than ventricular beats
        let ventricular_beats = (2500.0 / tl.beat_interval(35.0)).ceil() as usize;
        assert!(atrial_peaks > ventricular_beats);
    }
}
