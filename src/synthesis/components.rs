//! Closed-form P, QRS and T deflections evaluated at a beat phase
//! Location: src/synthesis/components.rs

use std::f64::consts::PI;

/// Half-sine bump occupying `[offset, offset + duration)` of the beat cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bump {
    pub amplitude: f64,
    pub duration: f64,
    pub offset: f64,
}

/// Tri-phasic ventricular depolarization: negative Q, positive R, negative S
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrsComplex {
    pub q_amplitude: f64,
    pub r_amplitude: f64,
    pub s_amplitude: f64,
    pub duration: f64,
    pub offset: f64,
}

// Segment boundaries inside the QRS window, as fractions of its duration
const Q_END: f64 = 0.25;
const R_END: f64 = 0.75;

impl Bump {
    pub const fn new(amplitude: f64, duration: f64, offset: f64) -> Self {
        Self { amplitude, duration, offset }
    }

    /// Amplitude at `phase`, zero outside the window
    pub fn at(&self, phase: f64) -> f64 {
        half_sine(phase, self.amplitude, self.duration, self.offset)
    }
}

impl QrsComplex {
    pub fn at(&self, phase: f64) -> f64 {
        qrs_complex(
            phase,
            self.q_amplitude,
            self.r_amplitude,
            self.s_amplitude,
            self.duration,
            self.offset,
        )
    }

    /// Same shape with every deflection scaled by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            q_amplitude: self.q_amplitude * factor,
            r_amplitude: self.r_amplitude * factor,
            s_amplitude: self.s_amplitude * factor,
            ..*self
        }
    }
}

/// Atrial depolarization
pub fn p_wave(phase: f64, amplitude: f64, duration: f64, offset: f64) -> f64 {
    half_sine(phase, amplitude, duration, offset)
}

/// Ventricular repolarization
pub fn t_wave(phase: f64, amplitude: f64, duration: f64, offset: f64) -> f64 {
    half_sine(phase, amplitude, duration, offset)
}

/// Ventricular depolarization. Each segment is a half-sine lobe so the
/// complex is continuous and returns to zero at both ends.
pub fn qrs_complex(
    phase: f64,
    q_amplitude: f64,
    r_amplitude: f64,
    s_amplitude: f64,
    duration: f64,
    offset: f64,
) -> f64 {
    let Some(t) = local_position(phase, duration, offset) else {
        return 0.0;
    };

    if t < Q_END {
        -q_amplitude * (PI * t / Q_END).sin()
    } else if t < R_END {
        r_amplitude * (PI * (t - Q_END) / (R_END - Q_END)).sin()
    } else {
        -s_amplitude * (PI * (t - R_END) / (1.0 - R_END)).sin()
    }
}

fn half_sine(phase: f64, amplitude: f64, duration: f64, offset: f64) -> f64 {
    match local_position(phase, duration, offset) {
        Some(t) => amplitude * (PI * t).sin(),
        None => 0.0,
    }
}

/// Position within a window normalized to [0, 1), or `None` outside it
fn local_position(phase: f64, duration: f64, offset: f64) -> Option<f64> {
    if duration <= 0.0 || phase < offset || phase >= offset + duration {
        return None;
    }
    Some((phase - offset) / duration)
}
