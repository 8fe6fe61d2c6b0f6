// src/analysis.rs
//! Amplitude statistics and R-peak rate estimation over generated leads

use crate::synthesis::LeadChannel;
use serde::Serialize;

/// Fraction of the largest upward deflection an R-peak must exceed
const PEAK_THRESHOLD_FRACTION: f64 = 0.5;
/// Deflections smaller than this are treated as baseline noise
const MIN_PEAK_DEVIATION: f64 = 5.0;
/// No two R-peaks closer than this
const REFRACTORY_SECONDS: f64 = 0.15;

/// Summary of one lead relative to its baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceStats {
    pub min_amplitude: f64,
    pub max_amplitude: f64,
    /// Largest absolute distance from the baseline
    pub peak_deviation: f64,
    pub rms_deviation: f64,
}

impl TraceStats {
    pub fn from_channel(channel: &LeadChannel, baseline: f64) -> Self {
        if channel.is_empty() {
            return Self {
                min_amplitude: baseline,
                max_amplitude: baseline,
                peak_deviation: 0.0,
                rms_deviation: 0.0,
            };
        }

        let mut min_amplitude = f64::MAX;
        let mut max_amplitude = f64::MIN;
        let mut peak_deviation = 0.0f64;
        let mut energy = 0.0;
        for amplitude in channel.amplitudes() {
            let deviation = amplitude - baseline;
            min_amplitude = min_amplitude.min(amplitude);
            max_amplitude = max_amplitude.max(amplitude);
            peak_deviation = peak_deviation.max(deviation.abs());
            energy += deviation * deviation;
        }

        Self {
            min_amplitude,
            max_amplitude,
            peak_deviation,
            rms_deviation: (energy / channel.len() as f64).sqrt(),
        }
    }

    pub fn peak_to_peak(&self) -> f64 {
        self.max_amplitude - self.min_amplitude
    }
}

/// Indices of upward R-peaks. Amplitudes are stored inverted, so an
/// upward deflection is `baseline - amplitude`.
pub fn detect_r_peaks(channel: &LeadChannel, sampling_rate_hz: u32, baseline: f64) -> Vec<usize> {
    let upward: Vec<f64> = channel.amplitudes().map(|a| baseline - a).collect();
    let tallest = upward.iter().cloned().fold(0.0f64, f64::max);
    if tallest < MIN_PEAK_DEVIATION {
        return Vec::new();
    }

    let threshold = tallest * PEAK_THRESHOLD_FRACTION;
    let refractory = (REFRACTORY_SECONDS * sampling_rate_hz as f64).round().max(1.0) as usize;

    let mut peaks: Vec<usize> = Vec::new();
    for i in 1..upward.len().saturating_sub(1) {
        let is_local_max = upward[i] > upward[i - 1] && upward[i] >= upward[i + 1];
        if !is_local_max || upward[i] < threshold {
            continue;
        }
        match peaks.last() {
            Some(&last) if i - last < refractory => {
                // Keep the taller of two peaks inside the refractory period
                if upward[i] > upward[last] {
                    if let Some(slot) = peaks.last_mut() {
                        *slot = i;
                    }
                }
            }
            _ => peaks.push(i),
        }
    }
    peaks
}

/// Mean ventricular rate from R-R intervals, `None` with fewer than two peaks
pub fn estimate_rate_bpm(channel: &LeadChannel, sampling_rate_hz: u32, baseline: f64) -> Option<f64> {
    let peaks = detect_r_peaks(channel, sampling_rate_hz, baseline);
    if peaks.len() < 2 {
        return None;
    }
    let span = (peaks[peaks.len() - 1] - peaks[0]) as f64;
    let mean_rr = span / (peaks.len() - 1) as f64;
    Some(60.0 * sampling_rate_hz as f64 / mean_rr)
}

/// Spread of R-R intervals in samples; high for irregular rhythms
pub fn rr_interval_spread(peaks: &[usize]) -> Option<f64> {
    if peaks.len() < 3 {
        return None;
    }
    let intervals: Vec<f64> = peaks.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
    let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
    let variance = intervals.iter().map(|rr| (rr - mean).powi(2)).sum::<f64>() / intervals.len() as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::{Lead, SamplePoint};

    fn channel(values: &[f64]) -> LeadChannel {
        LeadChannel {
            lead: Lead::II,
            samples: values
                .iter()
                .enumerate()
                .map(|(index, &amplitude)| SamplePoint { index, amplitude })
                .collect(),
        }
    }

    #[test]
    fn test_stats_relative_to_baseline() {
        let stats = TraceStats::from_channel(&channel(&[50.0, 40.0, 50.0, 56.0]), 50.0);
        assert_eq!(stats.min_amplitude, 40.0);
        assert_eq!(stats.max_amplitude, 56.0);
        assert_eq!(stats.peak_deviation, 10.0);
        assert_eq!(stats.peak_to_peak(), 16.0);
        assert!((stats.rms_deviation - (136.0f64 / 4.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_channel_stats() {
        let stats = TraceStats::from_channel(&channel(&[]), 50.0);
        assert_eq!(stats.peak_deviation, 0.0);
    }

    #[test]
    fn test_detects_periodic_spikes() {
        let mut values = vec![50.0; 1000];
        for k in 0..5 {
            values[100 + k * 200] = 20.0;
        }
        let ch = channel(&values);
        assert_eq!(detect_r_peaks(&ch, 250, 50.0), vec![100, 300, 500, 700, 900]);
        let rate = estimate_rate_bpm(&ch, 250, 50.0).unwrap();
        assert!((rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_trace_has_no_rate() {
        let ch = channel(&vec![50.3; 500]);
        assert!(detect_r_peaks(&ch, 250, 50.0).is_empty());
        assert_eq!(estimate_rate_bpm(&ch, 250, 50.0), None);
    }

    #[test]
    fn test_rr_spread() {
        assert_eq!(rr_interval_spread(&[0, 100]), None);
        assert_eq!(rr_interval_spread(&[0, 100, 200, 300]), Some(0.0));
        assert!(rr_interval_spread(&[0, 80, 200, 260]).unwrap() > 20.0);
    }
}
