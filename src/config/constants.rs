// src/config/constants.rs
//! System-wide configuration constants

/// Sample buffer constants
pub mod synthesis {
    pub const DEFAULT_SAMPLING_RATE_HZ: u32 = 250;
    pub const DEFAULT_DURATION_SECONDS: u32 = 10;
    pub const MIN_SAMPLING_RATE_HZ: u32 = 50;
    pub const MAX_SAMPLING_RATE_HZ: u32 = 2000;
    pub const MIN_DURATION_SECONDS: u32 = 1;
    pub const MAX_DURATION_SECONDS: u32 = 120;

    /// Isoelectric line in draw units; stored amplitudes are `baseline - signal`
    pub const DEFAULT_BASELINE: f64 = 50.0;

    /// Substituted for rates <= 0 in beat interval arithmetic
    pub const MIN_EFFECTIVE_RATE_BPM: f64 = 1.0;

    /// Ceiling for beat interval arithmetic; keeps per-beat loops bounded
    pub const MAX_EFFECTIVE_RATE_BPM: f64 = 600.0;

    pub const LEAD_COUNT: usize = 12;
}

/// Standard beat shape, expressed as fractions of one beat cycle
pub mod beat {
    pub const P_AMPLITUDE: f64 = 5.0;
    pub const P_DURATION: f64 = 0.09;
    pub const P_OFFSET: f64 = 0.10;

    pub const Q_AMPLITUDE: f64 = 4.0;
    pub const R_AMPLITUDE: f64 = 35.0;
    pub const S_AMPLITUDE: f64 = 8.0;
    pub const QRS_DURATION: f64 = 0.08;
    pub const QRS_OFFSET: f64 = 0.24;

    pub const T_AMPLITUDE: f64 = 9.0;
    pub const T_DURATION: f64 = 0.16;
    pub const T_OFFSET: f64 = 0.42;

    /// Prolonged repolarization used ahead of torsades
    pub const LONG_QT_T_DURATION: f64 = 0.30;
    pub const LONG_QT_T_OFFSET: f64 = 0.50;
}

/// Per-rhythm model tuning
pub mod rhythm {
    pub const AFIB_NOISE_AMPLITUDE: f64 = 1.5;
    pub const AFIB_INTERVAL_JITTER: f64 = 0.35;
    pub const AFIB_QRS_SCALE: f64 = 0.9;

    pub const VTACH_PEAK_AMPLITUDE: f64 = 30.0;
    pub const VTACH_COMPLEX_WIDTH: f64 = 0.45;
    pub const VTACH_UPSTROKE_FRACTION: f64 = 0.4;
    pub const VTACH_T_AMPLITUDE: f64 = 10.0;
    pub const VTACH_T_OFFSET: f64 = 0.55;
    pub const VTACH_T_DURATION: f64 = 0.30;
    pub const VTACH_NOISE_AMPLITUDE: f64 = 1.0;

    pub const VFIB_CARRIER_HZ: f64 = 5.0;
    pub const VFIB_CARRIER_AMPLITUDE: f64 = 10.0;
    pub const VFIB_HARMONIC_HZ: f64 = 2.3;
    pub const VFIB_HARMONIC_AMPLITUDE: f64 = 4.0;
    pub const VFIB_NOISE_AMPLITUDE: f64 = 8.0;

    pub const ASYSTOLE_NOISE_AMPLITUDE: f64 = 0.5;

    pub const TORSADES_PRELUDE_SECONDS: f64 = 2.0;
    pub const TORSADES_PRELUDE_RATE_BPM: f64 = 60.0;
    pub const TORSADES_TWIST_CYCLE_SECONDS: f64 = 2.5;
    pub const TORSADES_PEAK_AMPLITUDE: f64 = 32.0;
    pub const TORSADES_MIN_ENVELOPE: f64 = 0.2;
    pub const TORSADES_WIDTH_JITTER: f64 = 0.25;
    pub const TORSADES_POSITION_JITTER: f64 = 0.15;
    pub const TORSADES_SPIKE_PROBABILITY: f64 = 0.004;
    pub const TORSADES_SPIKE_AMPLITUDE: f64 = 25.0;
    pub const TORSADES_BURST_PROBABILITY: f64 = 0.002;
    pub const TORSADES_BURST_MIN_SAMPLES: usize = 25;
    pub const TORSADES_BURST_MAX_SAMPLES: usize = 60;
    pub const TORSADES_BURST_AMPLITUDE: f64 = 6.0;

    pub const CHB_ATRIAL_RATE_BPM: f64 = 75.0;
    pub const CHB_QRS_DURATION: f64 = 0.16;
    pub const CHB_QRS_OFFSET: f64 = 0.05;
    pub const CHB_T_OFFSET: f64 = 0.30;
    pub const CHB_T_DURATION: f64 = 0.20;
}

/// Strip-chart rendering constants
pub mod render {
    /// Visible window is `total_samples / WINDOW_DIVISOR`
    pub const DEFAULT_WINDOW_DIVISOR: usize = 5;
    pub const DEFAULT_CANVAS_WIDTH: f64 = 300.0;
    pub const DEFAULT_CANVAS_HEIGHT: f64 = 100.0;
    pub const MIN_WINDOW_DIVISOR: usize = 1;
    pub const MAX_WINDOW_DIVISOR: usize = 50;
}

/// Playback timer constants
pub mod playback {
    pub const DEFAULT_TICK_PERIOD_MS: u64 = 20;
    pub const MIN_TICK_PERIOD_MS: u64 = 1;
    pub const MAX_TICK_PERIOD_MS: u64 = 1000;
    pub const DEFAULT_MIN_RATE_BPM: i32 = 0;
    pub const DEFAULT_MAX_RATE_BPM: i32 = 320;
    pub const CURSOR_WRAP_PERCENT: f64 = 100.0;
}

/// Configuration file locations
pub mod paths {
    pub const DEFAULT_CONFIG_FILE: &str = "ekg.toml";
    pub const LOCAL_CONFIG_FILE: &str = "ekg.local.toml";
    pub const ENV_PREFIX: &str = "EKG_";
}
