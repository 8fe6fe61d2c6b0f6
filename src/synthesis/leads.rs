//! The twelve derived leads and their projection multipliers
//! Location: src/synthesis/leads.rs

use crate::config::constants::synthesis::LEAD_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 12 standard EKG leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lead {
    I,
    II,
    III,
    #[serde(rename = "aVR")]
    AVR,
    #[serde(rename = "aVL")]
    AVL,
    #[serde(rename = "aVF")]
    AVF,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
}

impl Lead {
    /// All leads in conventional display order
    pub const ALL: [Lead; LEAD_COUNT] = [
        Lead::I,
        Lead::II,
        Lead::III,
        Lead::AVR,
        Lead::AVL,
        Lead::AVF,
        Lead::V1,
        Lead::V2,
        Lead::V3,
        Lead::V4,
        Lead::V5,
        Lead::V6,
    ];

    /// Position in `Lead::ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Signed scaling applied to the base amplitude. Lead II is the reference;
    /// aVR and the right precordials see the main vector head-on and invert.
    pub fn multiplier(self) -> f64 {
        match self {
            Lead::I => 0.7,
            Lead::II => 1.0,
            Lead::III => 0.5,
            Lead::AVR => -0.8,
            Lead::AVL => 0.4,
            Lead::AVF => 0.75,
            Lead::V1 => -0.6,
            Lead::V2 => -0.3,
            Lead::V3 => 0.4,
            Lead::V4 => 1.1,
            Lead::V5 => 1.0,
            Lead::V6 => 0.8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Lead::I => "I",
            Lead::II => "II",
            Lead::III => "III",
            Lead::AVR => "aVR",
            Lead::AVL => "aVL",
            Lead::AVF => "aVF",
            Lead::V1 => "V1",
            Lead::V2 => "V2",
            Lead::V3 => "V3",
            Lead::V4 => "V4",
            Lead::V5 => "V5",
            Lead::V6 => "V6",
        }
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<Lead> {
        Lead::ALL
            .into_iter()
            .find(|lead| lead.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
