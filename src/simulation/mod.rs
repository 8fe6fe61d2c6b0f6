// src/simulation/mod.rs
//! Simulator view state and playback

pub mod state;

#[cfg(feature = "animation")]
pub mod animator;

pub use state::{PlaybackState, SimulationState};

#[cfg(feature = "animation")]
pub use animator::{Animator, SharedSimulation, SimulatorView};
