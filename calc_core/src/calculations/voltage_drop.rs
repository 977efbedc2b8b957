//! # Voltage Drop Calculation
//!
//! Voltage lost along a run of conductors, using the NEC Chapter 9 Table 8
//! resistance for the selected size and material.
//!
//! ## Formulas
//!
//! ```text
//! Single-phase / DC:  VD = (2 × L × I × R) / 1000
//! Three-phase:        VD = (√3 × L × I × R) / 1000
//! ```
//!
//! where L is the one-way length in feet, I the load current, and R the
//! resistance in Ω/1000 ft divided by the number of parallel sets.
//!
//! The default 3% limit follows the 210.19(A) informational note for branch
//! circuits (5% combined feeder + branch).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::voltage_drop::{calculate, VoltageDropInput};
//! use calc_core::tables::{ConductorMaterial, WireGauge};
//!
//! let input = VoltageDropInput {
//!     gauge: WireGauge::Awg12,
//!     material: ConductorMaterial::Copper,
//!     length: 100.0,
//!     current_a: 20.0,
//!     voltage_v: 120.0,
//!     ..Default::default()
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.voltage_drop_pct - 6.6).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::{ConductorMaterial, WireGauge};

use super::{LengthUnit, Phase, SummaryRow};

/// Input parameters for a voltage drop check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Garage feeder",
///   "phase": "single",
///   "material": "copper",
///   "gauge": "12",
///   "length": 100.0,
///   "length_unit": "ft",
///   "current_a": 20.0,
///   "voltage_v": 120.0,
///   "parallel_sets": 1,
///   "max_drop_pct": 3.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoltageDropInput {
    /// User label (e.g., "Garage feeder")
    pub label: String,

    /// Circuit type
    pub phase: Phase,

    /// Conductor material
    pub material: ConductorMaterial,

    /// Conductor size
    pub gauge: WireGauge,

    /// One-way circuit length
    pub length: f64,

    /// Unit of `length`
    pub length_unit: LengthUnit,

    /// Load current in amperes
    pub current_a: f64,

    /// Source voltage (line-to-line for three-phase)
    pub voltage_v: f64,

    /// Number of conductors in parallel per phase
    pub parallel_sets: u32,

    /// Maximum acceptable drop in percent of source voltage
    pub max_drop_pct: f64,
}

impl Default for VoltageDropInput {
    fn default() -> Self {
        VoltageDropInput {
            label: String::new(),
            phase: Phase::SinglePhase,
            material: ConductorMaterial::Copper,
            gauge: WireGauge::Awg12,
            length: 100.0,
            length_unit: LengthUnit::Feet,
            current_a: 20.0,
            voltage_v: 120.0,
            parallel_sets: 1,
            max_drop_pct: 3.0,
        }
    }
}

impl VoltageDropInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.length <= 0.0 {
            return Err(CalcError::invalid_input("length", self.length.to_string(), "Length must be positive"));
        }
        if self.current_a <= 0.0 {
            return Err(CalcError::invalid_input("current_a", self.current_a.to_string(), "Current must be positive"));
        }
        if self.voltage_v <= 0.0 {
            return Err(CalcError::invalid_input("voltage_v", self.voltage_v.to_string(), "Voltage must be positive"));
        }
        if self.parallel_sets == 0 {
            return Err(CalcError::invalid_input("parallel_sets", "0", "At least one conductor set is required"));
        }
        if self.max_drop_pct <= 0.0 || self.max_drop_pct > 100.0 {
            return Err(CalcError::invalid_input(
                "max_drop_pct",
                self.max_drop_pct.to_string(),
                "Limit must be between 0 and 100 percent",
            ));
        }
        Ok(())
    }

    /// One-way length in feet
    pub fn length_ft(&self) -> f64 {
        self.length_unit.to_feet(self.length)
    }
}

/// Results from a voltage drop check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropResult {
    /// Voltage lost in the conductors (V)
    pub voltage_drop_v: f64,

    /// Drop as a percent of source voltage
    pub voltage_drop_pct: f64,

    /// Voltage available at the load (V)
    pub load_voltage_v: f64,

    /// Effective resistance per 1000 ft after paralleling (Ω)
    pub resistance_ohms_per_kft: f64,

    /// Conductor area (cmil, single conductor)
    pub circular_mils: f64,

    /// One-way length used in the calculation (ft)
    pub length_ft: f64,

    /// Applied limit (%)
    pub limit_pct: f64,

    /// Whether the drop is within the limit
    pub within_limit: bool,

    /// Smallest conductor of the same material that meets the limit
    pub min_gauge_for_limit: Option<WireGauge>,
}

impl VoltageDropResult {
    /// Rows for printable summaries
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let mut rows = vec![
            SummaryRow::new("Voltage drop", format!("{:.2}", self.voltage_drop_v), "V"),
            SummaryRow::new("Voltage drop", format!("{:.2}", self.voltage_drop_pct), "%"),
            SummaryRow::new("Voltage at load", format!("{:.1}", self.load_voltage_v), "V"),
            SummaryRow::new("Resistance", format!("{:.4}", self.resistance_ohms_per_kft), "Ω/kft"),
            SummaryRow::new(
                "Within limit",
                format!("{} ({:.1}% max)", if self.within_limit { "Yes" } else { "No" }, self.limit_pct),
                "",
            ),
        ];
        if let Some(g) = self.min_gauge_for_limit {
            rows.push(SummaryRow::new("Minimum size for limit", g.display_name(), ""));
        }
        rows
    }
}

/// Voltage drop in volts for one conductor size.
pub(crate) fn drop_volts(
    phase: Phase,
    gauge: WireGauge,
    material: ConductorMaterial,
    length_ft: f64,
    current_a: f64,
    parallel_sets: u32,
) -> f64 {
    let r = gauge.resistance_ohms_per_kft(material) / f64::from(parallel_sets.max(1));
    phase.drop_multiplier() * length_ft * current_a * r / 1000.0
}

/// Calculate voltage drop.
///
/// # Returns
///
/// * `Ok(VoltageDropResult)` - Calculation results
/// * `Err(CalcError)` - If inputs are invalid
pub fn calculate(input: &VoltageDropInput) -> CalcResult<VoltageDropResult> {
    input.validate()?;

    let length_ft = input.length_ft();
    let voltage_drop_v = drop_volts(
        input.phase,
        input.gauge,
        input.material,
        length_ft,
        input.current_a,
        input.parallel_sets,
    );
    let voltage_drop_pct = voltage_drop_v / input.voltage_v * 100.0;

    let min_gauge_for_limit = WireGauge::ALL.into_iter().find(|g| {
        let vd = drop_volts(input.phase, *g, input.material, length_ft, input.current_a, input.parallel_sets);
        vd / input.voltage_v * 100.0 <= input.max_drop_pct
    });

    Ok(VoltageDropResult {
        voltage_drop_v,
        voltage_drop_pct,
        load_voltage_v: input.voltage_v - voltage_drop_v,
        resistance_ohms_per_kft: input.gauge.resistance_ohms_per_kft(input.material) / f64::from(input.parallel_sets),
        circular_mils: input.gauge.circular_mils().0,
        length_ft,
        limit_pct: input.max_drop_pct,
        within_limit: voltage_drop_pct <= input.max_drop_pct,
        min_gauge_for_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch_circuit() -> VoltageDropInput {
        VoltageDropInput {
            label: "Test".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_textbook_single_phase() {
        // 12 AWG Cu, 100 ft, 20 A, 120 V: VD = 2 × 100 × 20 × 1.98 / 1000 = 7.92 V
        let result = calculate(&branch_circuit()).unwrap();
        assert!((result.voltage_drop_v - 7.92).abs() < 1e-9);
        assert!((result.voltage_drop_pct - 6.6).abs() < 1e-9);
        assert!((result.load_voltage_v - 112.08).abs() < 1e-9);
        assert!(!result.within_limit);
    }

    #[test]
    fn test_min_gauge_for_limit() {
        // 3% of 120 V = 3.6 V → R ≤ 0.9 Ω/kft → 8 AWG (0.778)
        let result = calculate(&branch_circuit()).unwrap();
        assert_eq!(result.min_gauge_for_limit, Some(WireGauge::Awg8));
    }

    #[test]
    fn test_three_phase() {
        let input = VoltageDropInput {
            phase: Phase::ThreePhase,
            gauge: WireGauge::Awg2,
            length: 200.0,
            current_a: 100.0,
            voltage_v: 480.0,
            ..branch_circuit()
        };
        let result = calculate(&input).unwrap();
        // √3 × 200 × 100 × 0.194 / 1000 = 6.72 V
        assert!((result.voltage_drop_v - 6.7204).abs() < 0.001);
        assert!(result.within_limit);
    }

    #[test]
    fn test_parallel_sets_and_meters() {
        let input = VoltageDropInput {
            length: 30.48,
            length_unit: LengthUnit::Meters,
            parallel_sets: 2,
            ..branch_circuit()
        };
        let result = calculate(&input).unwrap();
        assert!((result.length_ft - 100.0).abs() < 1e-9);
        assert!((result.voltage_drop_v - 3.96).abs() < 1e-9);
    }

    #[test]
    fn test_aluminum() {
        let input = VoltageDropInput {
            material: ConductorMaterial::Aluminum,
            ..branch_circuit()
        };
        let result = calculate(&input).unwrap();
        assert!((result.voltage_drop_v - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = branch_circuit();
        input.current_a = 0.0;
        assert!(matches!(calculate(&input), Err(CalcError::InvalidInput { .. })));

        let mut input = branch_circuit();
        input.parallel_sets = 0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let input: VoltageDropInput = serde_json::from_str(r#"{"gauge": "10", "phase": "three"}"#).unwrap();
        assert_eq!(input.gauge, WireGauge::Awg10);
        assert_eq!(input.phase, Phase::ThreePhase);
        assert_eq!(input.voltage_v, 120.0);
    }
}
