//! Procedural 12-lead waveform synthesis
//! Location: src/synthesis/mod.rs

pub mod components;
pub mod generator;
pub mod leads;
pub mod models;
pub mod rhythm;

pub use generator::{generate, LeadChannel, LeadSet, SamplePoint, WaveformSynthesizer};
pub use leads::Lead;
pub use rhythm::{Rhythm, RhythmProfile};
