//! Rhythm enumeration and static reference profiles
//! Location: src/synthesis/rhythm.rs

use crate::error::EkgError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Closed set of rhythms the synthesizer can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rhythm {
    #[default]
    Normal,
    Bradycardia,
    Tachycardia,
    SupraventricularTachycardia,
    AtrialFibrillation,
    VentricularTachycardia,
    VentricularFibrillation,
    Asystole,
    Torsades,
    CompleteHeartBlock,
}

/// Immutable descriptor shown next to the strip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RhythmProfile {
    pub rhythm: Rhythm,
    pub id: &'static str,
    pub name: &'static str,
    pub default_rate_bpm: i32,
    pub pathophysiology: &'static str,
    pub ekg_characteristics: &'static str,
    pub differential_diagnosis: &'static str,
    pub protocol: &'static str,
}

impl Rhythm {
    pub const ALL: [Rhythm; 10] = [
        Rhythm::Normal,
        Rhythm::Bradycardia,
        Rhythm::Tachycardia,
        Rhythm::SupraventricularTachycardia,
        Rhythm::AtrialFibrillation,
        Rhythm::VentricularTachycardia,
        Rhythm::VentricularFibrillation,
        Rhythm::Asystole,
        Rhythm::Torsades,
        Rhythm::CompleteHeartBlock,
    ];

    /// Canonical identifier
    pub fn id(self) -> &'static str {
        match self {
            Rhythm::Normal => "normal",
            Rhythm::Bradycardia => "bradycardia",
            Rhythm::Tachycardia => "tachycardia",
            Rhythm::SupraventricularTachycardia => "svt",
            Rhythm::AtrialFibrillation => "afib",
            Rhythm::VentricularTachycardia => "vtach",
            Rhythm::VentricularFibrillation => "vfib",
            Rhythm::Asystole => "asystole",
            Rhythm::Torsades => "torsades",
            Rhythm::CompleteHeartBlock => "complete_heart_block",
        }
    }

    pub fn default_rate_bpm(self) -> i32 {
        self.profile().default_rate_bpm
    }

    /// Whether generation draws from the random source
    pub fn is_chaotic(self) -> bool {
        matches!(
            self,
            Rhythm::AtrialFibrillation
                | Rhythm::VentricularTachycardia
                | Rhythm::VentricularFibrillation
                | Rhythm::Asystole
                | Rhythm::Torsades
        )
    }

    /// Lenient lookup used by UI selections: unknown ids draw normal sinus
    pub fn from_id(id: &str) -> Rhythm {
        match id.parse() {
            Ok(rhythm) => rhythm,
            Err(_) => {
                warn!(id, "unknown rhythm identifier, falling back to normal sinus");
                Rhythm::Normal
            }
        }
    }

    pub fn profile(self) -> RhythmProfile {
        match self {
            Rhythm::Normal => RhythmProfile {
                rhythm: self,
                id: self.id(),
                name: "Normal Sinus Rhythm",
                default_rate_bpm: 75,
                pathophysiology: "The sinoatrial node fires regularly and each impulse is conducted through the AV node to both ventricles.",
                ekg_characteristics: "Rate 60-100, regular R-R intervals, upright P before every QRS, PR 0.12-0.20 s, narrow QRS.",
                differential_diagnosis: "Sinus arrhythmia, ectopic atrial rhythm.",
                protocol: "No treatment required.",
            },
            Rhythm::Bradycardia => RhythmProfile {
                rhythm: self,
                id: self.id(),
                name: "Sinus Bradycardia",
                default_rate_bpm: 45,
                pathophysiology: "Slowed sinoatrial firing from vagal tone, medication, hypothyroidism or conduction disease.",
                ekg_characteristics: "Rate below 60 with otherwise normal P, PR and QRS morphology.",
                differential_diagnosis: "Second-degree AV block, junctional rhythm, complete heart block.",
                protocol: "Treat only if symptomatic: atropine, then pacing or chronotropic infusion.",
            },
            Rhythm::Tachycardia => RhythmProfile {
                rhythm: self,
                id: self.id(),
                name: "Sinus Tachycardia",
                default_rate_bpm: 130,
                pathophysiology: "Accelerated sinoatrial firing in response to fever, pain, hypovolemia or stimulants.",
                ekg_characteristics: "Rate above 100, regular, normal P before each narrow QRS.",
                differential_diagnosis: "SVT, atrial flutter with 2:1 block.",
                protocol: "Identify and treat the underlying cause.",
            },
            Rhythm::SupraventricularTachycardia => RhythmProfile {
                rhythm: self,
                id: self.id(),
                name: "Supraventricular Tachycardia",
                default_rate_bpm: 180,
                pathophysiology: "A re-entrant circuit at or above the AV node drives the ventricles very rapidly.",
                ekg_characteristics: "Rate 150-250, regular, narrow QRS, P waves buried or retrograde.",
                differential_diagnosis: "Sinus tachycardia, atrial flutter, WPW orthodromic tachycardia.",
                protocol: "Vagal maneuvers, adenosine, synchronized cardioversion if unstable.",
            },
            Rhythm::AtrialFibrillation => RhythmProfile {
                rhythm: self,
                id: self.id(),
                name: "Atrial Fibrillation",
                default_rate_bpm: 110,
                pathophysiology: "Disorganized atrial activity from multiple re-entrant wavelets; the AV node conducts irregularly.",
                ekg_characteristics: "Irregularly irregular R-R intervals, no discernible P waves, fibrillatory baseline.",
                differential_diagnosis: "Multifocal atrial tachycardia, atrial flutter with variable block.",
                protocol: "Rate or rhythm control and stroke-risk assessment for anticoagulation.",
            },
            Rhythm::VentricularTachycardia => RhythmProfile {
                rhythm: self,
                id: self.id(),
                name: "Ventricular Tachycardia",
                default_rate_bpm: 170,
                pathophysiology: "A ventricular focus or scar-related circuit overrides normal conduction.",
                ekg_characteristics: "Rate 120-250, wide bizarre QRS, T waves opposite to the QRS, AV dissociation.",
                differential_diagnosis: "SVT with aberrancy, pre-excited tachycardia.",
                protocol: "Pulseless: defibrillate per ACLS. With pulse: amiodarone or synchronized cardioversion.",
            },
            Rhythm::VentricularFibrillation => RhythmProfile {
                rhythm: self,
                id: self.id(),
                name: "Ventricular Fibrillation",
                default_rate_bpm: 300,
                pathophysiology: "Chaotic ventricular depolarization produces no effective contraction or cardiac output.",
                ekg_characteristics: "No identifiable P, QRS or T; irregular undulations of varying amplitude.",
                differential_diagnosis: "Artifact, polymorphic VT.",
                protocol: "Immediate CPR and defibrillation, epinephrine and amiodarone per ACLS.",
            },
            Rhythm::Asystole => RhythmProfile {
                rhythm: self,
                id: self.id(),
                name: "Asystole",
                default_rate_bpm: 0,
                pathophysiology: "Absence of ventricular electrical activity; cardiac standstill.",
                ekg_characteristics: "Flat line with only minimal baseline wander.",
                differential_diagnosis: "Fine VF, disconnected leads, low gain.",
                protocol: "CPR and epinephrine; confirm in two leads. Not a shockable rhythm.",
            },
            Rhythm::Torsades => RhythmProfile {
                rhythm: self,
                id: self.id(),
                name: "Torsades de Pointes",
                default_rate_bpm: 220,
                pathophysiology: "Early afterdepolarizations on a prolonged QT trigger polymorphic ventricular tachycardia.",
                ekg_characteristics: "Preceding long QT, then QRS amplitude twisting around the baseline in cycles.",
                differential_diagnosis: "Polymorphic VT with normal QT, ventricular fibrillation.",
                protocol: "Magnesium sulfate, correct electrolytes, stop QT-prolonging drugs, defibrillate if pulseless.",
            },
            Rhythm::CompleteHeartBlock => RhythmProfile {
                rhythm: self,
                id: self.id(),
                name: "Complete Heart Block",
                default_rate_bpm: 35,
                pathophysiology: "No atrial impulses reach the ventricles; a slow escape pacemaker drives them independently.",
                ekg_characteristics: "Regular P waves and regular wide escape QRS complexes with no fixed PR relationship.",
                differential_diagnosis: "Second-degree AV block, junctional escape, sinus bradycardia.",
                protocol: "Transcutaneous pacing, then permanent pacemaker.",
            },
        }
    }
}

impl FromStr for Rhythm {
    type Err = EkgError;

    /// Strict lookup accepting canonical ids and common aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(|c: char| c == '-' || c == ' ', "_");
        let rhythm = match normalized.as_str() {
            "normal" | "nsr" | "normal_sinus" | "sinus" => Rhythm::Normal,
            "bradycardia" | "brady" | "sinus_bradycardia" => Rhythm::Bradycardia,
            "tachycardia" | "tachy" | "sinus_tachycardia" => Rhythm::Tachycardia,
            "svt" | "supraventricular_tachycardia" => Rhythm::SupraventricularTachycardia,
            "afib" | "atrial_fibrillation" => Rhythm::AtrialFibrillation,
            "vtach" | "ventricular_tachycardia" => Rhythm::VentricularTachycardia,
            "vfib" | "ventricular_fibrillation" => Rhythm::VentricularFibrillation,
            "asystole" => Rhythm::Asystole,
            "torsades" | "torsades_de_pointes" => Rhythm::Torsades,
            "complete_heart_block" | "chb" | "third_degree_block" => Rhythm::CompleteHeartBlock,
            _ => return Err(EkgError::UnknownRhythm(s.to_string())),
        };
        Ok(rhythm)
    }
}

impl fmt::Display for Rhythm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for rhythm in Rhythm::ALL {
            assert_eq!(rhythm.id().parse::<Rhythm>().unwrap(), rhythm);
            assert_eq!(rhythm.profile().id, rhythm.id());
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("Atrial Fibrillation".parse::<Rhythm>().unwrap(), Rhythm::AtrialFibrillation);
        assert_eq!("torsades-de-pointes".parse::<Rhythm>().unwrap(), Rhythm::Torsades);
        assert_eq!("NSR".parse::<Rhythm>().unwrap(), Rhythm::Normal);
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        let err = "wenckebach".parse::<Rhythm>().unwrap_err();
        assert!(matches!(err, EkgError::UnknownRhythm(id) if id == "wenckebach"));
    }

    #[test]
    fn test_lenient_lookup_falls_back() {
        assert_eq!(Rhythm::from_id("not_a_rhythm"), Rhythm::Normal);
        assert_eq!(Rhythm::from_id("vfib"), Rhythm::VentricularFibrillation);
    }

    #[test]
    fn test_default_rates_within_input_range() {
        for rhythm in Rhythm::ALL {
            let rate = rhythm.default_rate_bpm();
            assert!((0..=320).contains(&rate), "{} default rate {}", rhythm, rate);
        }
        assert_eq!(Rhythm::Asystole.default_rate_bpm(), 0);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Rhythm::CompleteHeartBlock).unwrap();
        assert_eq!(json, "\"complete_heart_block\"");
    }
}
