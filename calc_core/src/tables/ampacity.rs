//! # Conductor Ampacity
//!
//! NEC Table 310.16: allowable ampacities of insulated conductors rated up to
//! 2000 V, not more than three current-carrying conductors in a raceway,
//! cable, or earth, based on 30°C ambient.
//!
//! Also carries the 240.4(D) small-conductor overcurrent limits and the
//! 240.6(A) standard overcurrent device ratings.

use serde::{Deserialize, Serialize};

use super::awg::{ConductorMaterial, WireGauge};

/// Insulation temperature rating (Table 310.16 column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TemperatureRating {
    /// 60°C (TW, UF)
    #[serde(rename = "60")]
    C60,
    /// 75°C (THW, THWN, XHHW, USE)
    #[serde(rename = "75")]
    #[default]
    C75,
    /// 90°C (THHN, XHHW-2, THWN-2)
    #[serde(rename = "90")]
    C90,
}

impl TemperatureRating {
    /// All ratings for UI selection
    pub const ALL: [TemperatureRating; 3] = [TemperatureRating::C60, TemperatureRating::C75, TemperatureRating::C90];

    /// Column index into the ampacity tables
    fn column(&self) -> usize {
        match self {
            TemperatureRating::C60 => 0,
            TemperatureRating::C75 => 1,
            TemperatureRating::C90 => 2,
        }
    }

    /// Rating in °C
    pub fn celsius(&self) -> f64 {
        match self {
            TemperatureRating::C60 => 60.0,
            TemperatureRating::C75 => 75.0,
            TemperatureRating::C90 => 90.0,
        }
    }

    /// Serialized key
    pub fn key(&self) -> &'static str {
        match self {
            TemperatureRating::C60 => "60",
            TemperatureRating::C75 => "75",
            TemperatureRating::C90 => "90",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            TemperatureRating::C60 => "60°C (TW, UF)",
            TemperatureRating::C75 => "75°C (THWN, XHHW)",
            TemperatureRating::C90 => "90°C (THHN, THWN-2)",
        }
    }
}

/// Copper ampacities [60°C, 75°C, 90°C]; 0 = no table entry
const COPPER: [[u16; 3]; 23] = [
    [0, 0, 14],       // 18
    [0, 0, 18],       // 16
    [15, 20, 25],     // 14
    [20, 25, 30],     // 12
    [30, 35, 40],     // 10
    [40, 50, 55],     // 8
    [55, 65, 75],     // 6
    [70, 85, 95],     // 4
    [85, 100, 115],   // 3
    [95, 115, 130],   // 2
    [110, 130, 145],  // 1
    [125, 150, 170],  // 1/0
    [145, 175, 195],  // 2/0
    [165, 200, 225],  // 3/0
    [195, 230, 260],  // 4/0
    [215, 255, 290],  // 250
    [240, 285, 320],  // 300
    [260, 310, 350],  // 350
    [280, 335, 380],  // 400
    [320, 380, 430],  // 500
    [350, 420, 475],  // 600
    [400, 475, 535],  // 750
    [455, 545, 615],  // 1000
];

/// Aluminum / copper-clad aluminum ampacities [60°C, 75°C, 90°C]
const ALUMINUM: [[u16; 3]; 23] = [
    [0, 0, 0],        // 18
    [0, 0, 0],        // 16
    [0, 0, 0],        // 14
    [15, 20, 25],     // 12
    [25, 30, 35],     // 10
    [35, 40, 45],     // 8
    [40, 50, 55],     // 6
    [55, 65, 75],     // 4
    [65, 75, 85],     // 3
    [75, 90, 100],    // 2
    [85, 100, 115],   // 1
    [100, 120, 135],  // 1/0
    [115, 135, 150],  // 2/0
    [130, 155, 175],  // 3/0
    [150, 180, 205],  // 4/0
    [170, 205, 230],  // 250
    [195, 230, 260],  // 300
    [210, 250, 280],  // 350
    [225, 270, 305],  // 400
    [260, 310, 350],  // 500
    [285, 340, 385],  // 600
    [320, 385, 435],  // 750
    [375, 445, 500],  // 1000
];

/// Allowable ampacity per NEC Table 310.16.
///
/// Returns `None` when the table has no entry for the combination
/// (e.g. 18 AWG at 75°C or aluminum smaller than 12 AWG).
pub fn ampacity(gauge: WireGauge, material: ConductorMaterial, rating: TemperatureRating) -> Option<f64> {
    let table = match material {
        ConductorMaterial::Copper => &COPPER,
        ConductorMaterial::Aluminum => &ALUMINUM,
    };
    match table[gauge as usize][rating.column()] {
        0 => None,
        a => Some(f64::from(a)),
    }
}

/// Small-conductor overcurrent limit per NEC 240.4(D).
pub fn small_conductor_limit(gauge: WireGauge, material: ConductorMaterial) -> Option<f64> {
    match (material, gauge) {
        (ConductorMaterial::Copper, WireGauge::Awg18) => Some(7.0),
        (ConductorMaterial::Copper, WireGauge::Awg16) => Some(10.0),
        (ConductorMaterial::Copper, WireGauge::Awg14) => Some(15.0),
        (ConductorMaterial::Copper, WireGauge::Awg12) => Some(20.0),
        (ConductorMaterial::Copper, WireGauge::Awg10) => Some(30.0),
        (ConductorMaterial::Aluminum, WireGauge::Awg12) => Some(15.0),
        (ConductorMaterial::Aluminum, WireGauge::Awg10) => Some(25.0),
        _ => None,
    }
}

/// Standard ampere ratings for fuses and inverse time circuit breakers, NEC 240.6(A)
pub const STANDARD_OCPD_RATINGS: [u32; 38] = [
    10, 15, 20, 25, 30, 35, 40, 45, 50, 60, 70, 80, 90, 100, 110, 125, 150, 175, 200, 225, 250, 300,
    350, 400, 450, 500, 600, 700, 800, 1000, 1200, 1600, 2000, 2500, 3000, 4000, 5000, 6000,
];

/// Smallest standard OCPD rating at or above `amps`
pub fn next_standard_ocpd(amps: f64) -> Option<u32> {
    STANDARD_OCPD_RATINGS
        .iter()
        .copied()
        .find(|r| f64::from(*r) >= amps - 1e-9)
}

/// Largest standard OCPD rating not exceeding `amps`
pub fn largest_standard_ocpd_not_exceeding(amps: f64) -> Option<u32> {
    STANDARD_OCPD_RATINGS
        .iter()
        .copied()
        .filter(|r| f64::from(*r) <= amps + 1e-9)
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copper_ampacity() {
        assert_eq!(ampacity(WireGauge::Awg12, ConductorMaterial::Copper, TemperatureRating::C60), Some(20.0));
        assert_eq!(ampacity(WireGauge::Awg12, ConductorMaterial::Copper, TemperatureRating::C90), Some(30.0));
        assert_eq!(ampacity(WireGauge::Awg4_0, ConductorMaterial::Copper, TemperatureRating::C75), Some(230.0));
        assert_eq!(ampacity(WireGauge::Kcmil500, ConductorMaterial::Copper, TemperatureRating::C75), Some(380.0));
    }

    #[test]
    fn test_aluminum_ampacity() {
        assert_eq!(ampacity(WireGauge::Awg2, ConductorMaterial::Aluminum, TemperatureRating::C75), Some(90.0));
        assert_eq!(ampacity(WireGauge::Awg14, ConductorMaterial::Aluminum, TemperatureRating::C75), None);
    }

    #[test]
    fn test_missing_entries() {
        assert_eq!(ampacity(WireGauge::Awg18, ConductorMaterial::Copper, TemperatureRating::C75), None);
        assert_eq!(ampacity(WireGauge::Awg18, ConductorMaterial::Copper, TemperatureRating::C90), Some(14.0));
    }

    #[test]
    fn test_small_conductor_limits() {
        assert_eq!(small_conductor_limit(WireGauge::Awg12, ConductorMaterial::Copper), Some(20.0));
        assert_eq!(small_conductor_limit(WireGauge::Awg8, ConductorMaterial::Copper), None);
    }

    #[test]
    fn test_standard_ocpd() {
        assert_eq!(next_standard_ocpd(20.0), Some(20));
        assert_eq!(next_standard_ocpd(20.1), Some(25));
        assert_eq!(next_standard_ocpd(101.0), Some(110));
        assert_eq!(largest_standard_ocpd_not_exceeding(96.0), Some(90));
        assert_eq!(largest_standard_ocpd_not_exceeding(5.0), None);
        assert_eq!(next_standard_ocpd(7000.0), None);
    }
}
