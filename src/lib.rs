//! EKG-Core: procedural 12-lead EKG waveform synthesis and strip-chart playback
//!
//! This library generates synthetic, physiologically plausible electrocardiogram
//! traces for training simulators. It features:
//!
//! - Ten rhythm models, from normal sinus to torsades de pointes
//! - A single base trace projected onto all 12 standard leads
//! - Sliding-window strip rendering driven by a percent cursor
//! - Play / pause / reset playback with a timer-driven cursor
//! - TOML configuration with environment overrides
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ekg_core::config::SimulatorSettings;
//! use ekg_core::simulation::SimulationState;
//! use ekg_core::synthesis::{Lead, Rhythm};
//!
//! let mut state = SimulationState::new(SimulatorSettings::default());
//! state.select_rhythm(Rhythm::AtrialFibrillation);
//! state.play();
//! for _ in 0..50 {
//!     state.tick();
//! }
//!
//! let strip = state.visible_window(Lead::II);
//! println!("{}", strip.to_path_data());
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod render;
pub mod simulation;
pub mod synthesis;

// Re-export commonly used types for convenience
pub use config::{ConfigLoader, SimulatorSettings};
pub use error::{EkgError, EkgResult};
pub use render::{StripRenderer, StripWindow};
pub use simulation::{PlaybackState, SimulationState};
pub use synthesis::{generate, Lead, LeadChannel, LeadSet, Rhythm, SamplePoint, WaveformSynthesizer};

#[cfg(feature = "animation")]
pub use simulation::SimulatorView;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Procedural 12-lead EKG waveform synthesis".to_string(),
        rhythms: Rhythm::ALL.iter().map(|r| r.id().to_string()).collect(),
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// Identifiers of the supported rhythms
    pub rhythms: Vec<String>,
}
