//! # Raceway Fill Data
//!
//! - Chapter 9 Table 1: percent of cross-section permitted for conductors
//! - Chapter 9 Table 4: internal area by raceway type and trade size
//! - Chapter 9 Table 5: approximate area of insulated conductors

use serde::{Deserialize, Serialize};

use super::awg::WireGauge;

/// Raceway type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConduitType {
    /// Electrical metallic tubing
    #[default]
    Emt,
    /// Rigid PVC conduit, Schedule 40
    Pvc40,
    /// Rigid metal conduit
    Rmc,
}

impl ConduitType {
    pub const ALL: [ConduitType; 3] = [ConduitType::Emt, ConduitType::Pvc40, ConduitType::Rmc];

    pub fn key(&self) -> &'static str {
        match self {
            ConduitType::Emt => "emt",
            ConduitType::Pvc40 => "pvc40",
            ConduitType::Rmc => "rmc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConduitType::Emt => "EMT",
            ConduitType::Pvc40 => "PVC Schedule 40",
            ConduitType::Rmc => "Rigid Metal Conduit",
        }
    }
}

/// Raceway trade size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum TradeSize {
    #[serde(rename = "1/2")]
    #[default]
    Half,
    #[serde(rename = "3/4")]
    ThreeQuarter,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "1-1/4")]
    OneAndQuarter,
    #[serde(rename = "1-1/2")]
    OneAndHalf,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "2-1/2")]
    TwoAndHalf,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "3-1/2")]
    ThreeAndHalf,
    #[serde(rename = "4")]
    Four,
}

impl TradeSize {
    /// All trade sizes, smallest to largest
    pub const ALL: [TradeSize; 10] = [
        TradeSize::Half,
        TradeSize::ThreeQuarter,
        TradeSize::One,
        TradeSize::OneAndQuarter,
        TradeSize::OneAndHalf,
        TradeSize::Two,
        TradeSize::TwoAndHalf,
        TradeSize::Three,
        TradeSize::ThreeAndHalf,
        TradeSize::Four,
    ];

    /// Serialized key
    pub fn key(&self) -> &'static str {
        match self {
            TradeSize::Half => "1/2",
            TradeSize::ThreeQuarter => "3/4",
            TradeSize::One => "1",
            TradeSize::OneAndQuarter => "1-1/4",
            TradeSize::OneAndHalf => "1-1/2",
            TradeSize::Two => "2",
            TradeSize::TwoAndHalf => "2-1/2",
            TradeSize::Three => "3",
            TradeSize::ThreeAndHalf => "3-1/2",
            TradeSize::Four => "4",
        }
    }

    pub fn display_name(&self) -> String {
        format!("{}\"", self.key())
    }
}

/// Table 4 total internal area (in²), indexed [type][trade size]
const INTERNAL_AREA: [[f64; 10]; 3] = [
    // EMT
    [0.304, 0.533, 0.864, 1.496, 2.036, 3.356, 5.858, 8.846, 11.545, 14.753],
    // PVC Schedule 40
    [0.285, 0.508, 0.832, 1.453, 1.986, 3.291, 4.695, 7.268, 9.737, 12.554],
    // RMC
    [0.314, 0.549, 0.887, 1.526, 2.071, 3.408, 4.866, 7.499, 10.010, 12.882],
];

/// Total internal area of a raceway (in²)
pub fn internal_area_in2(conduit: ConduitType, size: TradeSize) -> f64 {
    INTERNAL_AREA[conduit as usize][size as usize]
}

/// Conductor insulation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Insulation {
    /// THHN / THWN / THWN-2
    #[default]
    Thhn,
    /// XHHW / XHHW-2
    Xhhw,
}

impl Insulation {
    pub const ALL: [Insulation; 2] = [Insulation::Thhn, Insulation::Xhhw];

    pub fn key(&self) -> &'static str {
        match self {
            Insulation::Thhn => "thhn",
            Insulation::Xhhw => "xhhw",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Insulation::Thhn => "THHN/THWN-2",
            Insulation::Xhhw => "XHHW-2",
        }
    }
}

/// Table 5 approximate areas (in²), [THHN, XHHW]; 0.0 = not listed
const CONDUCTOR_AREA: [[f64; 2]; 23] = [
    [0.0055, 0.0],    // 18 (TFFN)
    [0.0072, 0.0],    // 16 (TFFN)
    [0.0097, 0.0139], // 14
    [0.0133, 0.0181], // 12
    [0.0211, 0.0243], // 10
    [0.0366, 0.0437], // 8
    [0.0507, 0.0590], // 6
    [0.0824, 0.0814], // 4
    [0.0973, 0.0962], // 3
    [0.1158, 0.1146], // 2
    [0.1562, 0.1534], // 1
    [0.1855, 0.1825], // 1/0
    [0.2223, 0.2190], // 2/0
    [0.2679, 0.2642], // 3/0
    [0.3237, 0.3197], // 4/0
    [0.3970, 0.3904], // 250
    [0.4608, 0.4536], // 300
    [0.5242, 0.5166], // 350
    [0.5863, 0.5782], // 400
    [0.7073, 0.6984], // 500
    [0.8676, 0.8709], // 600
    [1.0496, 1.0532], // 750
    [1.3478, 1.3623], // 1000
];

/// Approximate area of one insulated conductor (in²)
pub fn conductor_area_in2(gauge: WireGauge, insulation: Insulation) -> Option<f64> {
    let area = CONDUCTOR_AREA[gauge as usize][insulation as usize];
    if area > 0.0 {
        Some(area)
    } else {
        None
    }
}

/// Maximum percent fill for the number of conductors (Chapter 9 Table 1)
pub fn fill_limit_pct(conductor_count: u32) -> f64 {
    match conductor_count {
        0 | 1 => 53.0,
        2 => 31.0,
        _ => 40.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_area() {
        assert_eq!(internal_area_in2(ConduitType::Emt, TradeSize::Half), 0.304);
        assert_eq!(internal_area_in2(ConduitType::Pvc40, TradeSize::One), 0.832);
        assert_eq!(internal_area_in2(ConduitType::Rmc, TradeSize::Four), 12.882);
    }

    #[test]
    fn test_conductor_area() {
        assert_eq!(conductor_area_in2(WireGauge::Awg12, Insulation::Thhn), Some(0.0133));
        assert_eq!(conductor_area_in2(WireGauge::Awg18, Insulation::Xhhw), None);
    }

    #[test]
    fn test_fill_limits() {
        assert_eq!(fill_limit_pct(1), 53.0);
        assert_eq!(fill_limit_pct(2), 31.0);
        assert_eq!(fill_limit_pct(9), 40.0);
    }

    #[test]
    fn test_trade_size_serialization() {
        let json = serde_json::to_string(&TradeSize::OneAndQuarter).unwrap();
        assert_eq!(json, "\"1-1/4\"");
    }
}
