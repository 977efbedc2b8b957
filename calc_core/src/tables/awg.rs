//! American Wire Gauge Data
//!
//! Conductor sizes from 18 AWG through 1000 kcmil with their cross-section
//! and DC resistance per NEC Chapter 9, Table 8.
//!
//! ## Resistance Basis
//!
//! Table 8 lists DC resistance at 75°C for uncoated stranded conductors.
//! Other temperatures use the Table 8 note:
//!
//! ```text
//! R2 = R1 × [1 + α(T2 − 75)]     α_Cu = 0.00323, α_Al = 0.00330
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::units::CircularMils;

/// Temperature coefficient of resistance for copper (per °C)
pub const ALPHA_COPPER: f64 = 0.00323;

/// Temperature coefficient of resistance for aluminum (per °C)
pub const ALPHA_ALUMINUM: f64 = 0.00330;

/// Reference temperature of the Table 8 resistances (°C)
pub const TABLE_8_REFERENCE_C: f64 = 75.0;

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConductorMaterial {
    #[default]
    Copper,
    Aluminum,
}

impl ConductorMaterial {
    /// All materials for UI selection
    pub const ALL: [ConductorMaterial; 2] = [ConductorMaterial::Copper, ConductorMaterial::Aluminum];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Copper",
            ConductorMaterial::Aluminum => "Aluminum",
        }
    }

    /// Serialized key (as used in forms and share links)
    pub fn key(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "copper",
            ConductorMaterial::Aluminum => "aluminum",
        }
    }

    /// Temperature coefficient α
    pub fn alpha(&self) -> f64 {
        match self {
            ConductorMaterial::Copper => ALPHA_COPPER,
            ConductorMaterial::Aluminum => ALPHA_ALUMINUM,
        }
    }
}

/// Standard conductor size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum WireGauge {
    #[serde(rename = "18")]
    Awg18,
    #[serde(rename = "16")]
    Awg16,
    #[serde(rename = "14")]
    Awg14,
    #[serde(rename = "12")]
    #[default]
    Awg12,
    #[serde(rename = "10")]
    Awg10,
    #[serde(rename = "8")]
    Awg8,
    #[serde(rename = "6")]
    Awg6,
    #[serde(rename = "4")]
    Awg4,
    #[serde(rename = "3")]
    Awg3,
    #[serde(rename = "2")]
    Awg2,
    #[serde(rename = "1")]
    Awg1,
    #[serde(rename = "1/0")]
    Awg1_0,
    #[serde(rename = "2/0")]
    Awg2_0,
    #[serde(rename = "3/0")]
    Awg3_0,
    #[serde(rename = "4/0")]
    Awg4_0,
    #[serde(rename = "250")]
    Kcmil250,
    #[serde(rename = "300")]
    Kcmil300,
    #[serde(rename = "350")]
    Kcmil350,
    #[serde(rename = "400")]
    Kcmil400,
    #[serde(rename = "500")]
    Kcmil500,
    #[serde(rename = "600")]
    Kcmil600,
    #[serde(rename = "750")]
    Kcmil750,
    #[serde(rename = "1000")]
    Kcmil1000,
}

/// One row of Chapter 9 Table 8: (size, area cmil, Cu Ω/kft, Al Ω/kft)
struct Table8Row(WireGauge, f64, f64, f64);

const TABLE_8: [Table8Row; 23] = [
    Table8Row(WireGauge::Awg18, 1_620.0, 7.95, 13.1),
    Table8Row(WireGauge::Awg16, 2_580.0, 4.99, 8.21),
    Table8Row(WireGauge::Awg14, 4_110.0, 3.14, 5.17),
    Table8Row(WireGauge::Awg12, 6_530.0, 1.98, 3.25),
    Table8Row(WireGauge::Awg10, 10_380.0, 1.24, 2.04),
    Table8Row(WireGauge::Awg8, 16_510.0, 0.778, 1.28),
    Table8Row(WireGauge::Awg6, 26_240.0, 0.491, 0.808),
    Table8Row(WireGauge::Awg4, 41_740.0, 0.308, 0.508),
    Table8Row(WireGauge::Awg3, 52_620.0, 0.245, 0.403),
    Table8Row(WireGauge::Awg2, 66_360.0, 0.194, 0.319),
    Table8Row(WireGauge::Awg1, 83_690.0, 0.154, 0.253),
    Table8Row(WireGauge::Awg1_0, 105_600.0, 0.122, 0.201),
    Table8Row(WireGauge::Awg2_0, 133_100.0, 0.0967, 0.159),
    Table8Row(WireGauge::Awg3_0, 167_800.0, 0.0766, 0.126),
    Table8Row(WireGauge::Awg4_0, 211_600.0, 0.0608, 0.100),
    Table8Row(WireGauge::Kcmil250, 250_000.0, 0.0515, 0.0847),
    Table8Row(WireGauge::Kcmil300, 300_000.0, 0.0429, 0.0707),
    Table8Row(WireGauge::Kcmil350, 350_000.0, 0.0367, 0.0605),
    Table8Row(WireGauge::Kcmil400, 400_000.0, 0.0321, 0.0529),
    Table8Row(WireGauge::Kcmil500, 500_000.0, 0.0258, 0.0424),
    Table8Row(WireGauge::Kcmil600, 600_000.0, 0.0214, 0.0353),
    Table8Row(WireGauge::Kcmil750, 750_000.0, 0.0171, 0.0282),
    Table8Row(WireGauge::Kcmil1000, 1_000_000.0, 0.0129, 0.0212),
];

impl WireGauge {
    /// All sizes, smallest to largest
    pub const ALL: [WireGauge; 23] = [
        WireGauge::Awg18,
        WireGauge::Awg16,
        WireGauge::Awg14,
        WireGauge::Awg12,
        WireGauge::Awg10,
        WireGauge::Awg8,
        WireGauge::Awg6,
        WireGauge::Awg4,
        WireGauge::Awg3,
        WireGauge::Awg2,
        WireGauge::Awg1,
        WireGauge::Awg1_0,
        WireGauge::Awg2_0,
        WireGauge::Awg3_0,
        WireGauge::Awg4_0,
        WireGauge::Kcmil250,
        WireGauge::Kcmil300,
        WireGauge::Kcmil350,
        WireGauge::Kcmil400,
        WireGauge::Kcmil500,
        WireGauge::Kcmil600,
        WireGauge::Kcmil750,
        WireGauge::Kcmil1000,
    ];

    /// Sizes used for building and branch-circuit wiring (14 AWG and larger)
    pub fn building_wire() -> impl Iterator<Item = WireGauge> {
        Self::ALL.into_iter().filter(|g| *g >= WireGauge::Awg14)
    }

    fn row(&self) -> &'static Table8Row {
        // ALL and TABLE_8 share ordering, so the discriminant indexes the table
        &TABLE_8[*self as usize]
    }

    /// Conductor area in circular mils
    pub fn circular_mils(&self) -> CircularMils {
        CircularMils(self.row().1)
    }

    /// Bare conductor diameter in inches (d = √cmil / 1000)
    pub fn diameter_in(&self) -> f64 {
        self.row().1.sqrt() / 1000.0
    }

    /// DC resistance at 75°C in ohms per 1000 ft
    pub fn resistance_ohms_per_kft(&self, material: ConductorMaterial) -> f64 {
        match material {
            ConductorMaterial::Copper => self.row().2,
            ConductorMaterial::Aluminum => self.row().3,
        }
    }

    /// DC resistance at an arbitrary conductor temperature in ohms per 1000 ft
    pub fn resistance_at(&self, material: ConductorMaterial, temperature_c: f64) -> f64 {
        self.resistance_ohms_per_kft(material) * (1.0 + material.alpha() * (temperature_c - TABLE_8_REFERENCE_C))
    }

    /// Serialized key (as used in forms and share links): "12", "1/0", "250"
    pub fn key(&self) -> &'static str {
        match self {
            WireGauge::Awg18 => "18",
            WireGauge::Awg16 => "16",
            WireGauge::Awg14 => "14",
            WireGauge::Awg12 => "12",
            WireGauge::Awg10 => "10",
            WireGauge::Awg8 => "8",
            WireGauge::Awg6 => "6",
            WireGauge::Awg4 => "4",
            WireGauge::Awg3 => "3",
            WireGauge::Awg2 => "2",
            WireGauge::Awg1 => "1",
            WireGauge::Awg1_0 => "1/0",
            WireGauge::Awg2_0 => "2/0",
            WireGauge::Awg3_0 => "3/0",
            WireGauge::Awg4_0 => "4/0",
            WireGauge::Kcmil250 => "250",
            WireGauge::Kcmil300 => "300",
            WireGauge::Kcmil350 => "350",
            WireGauge::Kcmil400 => "400",
            WireGauge::Kcmil500 => "500",
            WireGauge::Kcmil600 => "600",
            WireGauge::Kcmil750 => "750",
            WireGauge::Kcmil1000 => "1000",
        }
    }

    /// True for the kcmil sizes (250 and larger)
    pub fn is_kcmil(&self) -> bool {
        *self >= WireGauge::Kcmil250
    }

    /// Display name for UI ("12 AWG", "250 kcmil")
    pub fn display_name(&self) -> String {
        if self.is_kcmil() {
            format!("{} kcmil", self.key())
        } else {
            format!("{} AWG", self.key())
        }
    }

    /// Smallest size whose area is at least `cmil`
    pub fn smallest_with_area(cmil: f64) -> Option<WireGauge> {
        Self::ALL.into_iter().find(|g| g.circular_mils().0 >= cmil)
    }
}

impl fmt::Display for WireGauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl FromStr for WireGauge {
    type Err = CalcError;

    /// Accepts "12", "12 AWG", "#12", "1/0", "0", "00", "250", "250 kcmil", "250mcm"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .trim_start_matches('#')
            .replace("kcmil", "")
            .replace("mcm", "")
            .replace("awg", "")
            .split_whitespace()
            .collect();

        let key = match normalized.as_str() {
            "0" => "1/0",
            "00" => "2/0",
            "000" => "3/0",
            "0000" => "4/0",
            other => other,
        };

        Self::ALL
            .into_iter()
            .find(|g| g.key() == key)
            .ok_or_else(|| CalcError::invalid_input("gauge", s, "Unknown conductor size"))
    }
}

impl FromStr for ConductorMaterial {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "copper" | "cu" => Ok(ConductorMaterial::Copper),
            "aluminum" | "aluminium" | "al" => Ok(ConductorMaterial::Aluminum),
            _ => Err(CalcError::invalid_input("material", s, "Expected copper or aluminum")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for (i, g) in WireGauge::ALL.iter().enumerate() {
            assert_eq!(TABLE_8[i].0, *g);
        }
    }

    #[test]
    fn test_12_awg() {
        let g = WireGauge::Awg12;
        assert_eq!(g.circular_mils().0, 6530.0);
        assert_eq!(g.resistance_ohms_per_kft(ConductorMaterial::Copper), 1.98);
        assert_eq!(g.resistance_ohms_per_kft(ConductorMaterial::Aluminum), 3.25);
        // √6530 / 1000 ≈ 0.0808"
        assert!((g.diameter_in() - 0.0808).abs() < 0.0001);
    }

    #[test]
    fn test_resistance_temperature_adjustment() {
        let g = WireGauge::Awg10;
        let at_75 = g.resistance_at(ConductorMaterial::Copper, 75.0);
        assert_eq!(at_75, 1.24);
        // 1.24 × (1 + 0.00323 × (20 − 75)) = 1.0197
        let at_20 = g.resistance_at(ConductorMaterial::Copper, 20.0);
        assert!((at_20 - 1.0197).abs() < 0.001);
    }

    #[test]
    fn test_parse() {
        assert_eq!("12".parse::<WireGauge>().unwrap(), WireGauge::Awg12);
        assert_eq!("#12 AWG".parse::<WireGauge>().unwrap(), WireGauge::Awg12);
        assert_eq!("00".parse::<WireGauge>().unwrap(), WireGauge::Awg2_0);
        assert_eq!("250 kcmil".parse::<WireGauge>().unwrap(), WireGauge::Kcmil250);
        assert_eq!("500MCM".parse::<WireGauge>().unwrap(), WireGauge::Kcmil500);
        assert!("13".parse::<WireGauge>().is_err());
        assert_eq!("Al".parse::<ConductorMaterial>().unwrap(), ConductorMaterial::Aluminum);
    }

    #[test]
    fn test_ordering_and_area_search() {
        assert!(WireGauge::Awg14 < WireGauge::Awg12);
        assert!(WireGauge::Awg4_0 < WireGauge::Kcmil250);
        assert_eq!(WireGauge::smallest_with_area(10_000.0), Some(WireGauge::Awg10));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&WireGauge::Awg1_0).unwrap();
        assert_eq!(json, "\"1/0\"");
        let g: WireGauge = serde_json::from_str("\"250\"").unwrap();
        assert_eq!(g, WireGauge::Kcmil250);
        assert_eq!(g.display_name(), "250 kcmil");
    }
}
