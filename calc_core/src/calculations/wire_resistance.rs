//! # Wire Resistance Calculation
//!
//! Conductor resistance at operating temperature, from the NEC Chapter 9
//! Table 8 values at 75°C:
//!
//! ```text
//! R_T = R_75 × [1 + α (T − 75)]
//! R_total = R_T × L / 1000          (L doubled for a round trip)
//! P_loss  = I² × R_total
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::{ConductorMaterial, WireGauge};
use crate::units::{Amps, Ohms, Watts};

use super::{LengthUnit, SummaryRow};

/// Input parameters for wire resistance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireResistanceInput {
    /// User label
    pub label: String,

    /// Conductor size
    pub gauge: WireGauge,

    /// Conductor material
    pub material: ConductorMaterial,

    /// Conductor length
    pub length: f64,

    /// Unit of `length`
    pub length_unit: LengthUnit,

    /// Conductor temperature (°C)
    pub temperature_c: f64,

    /// Treat `length` as one-way and count both conductors
    pub round_trip: bool,

    /// Optional current for I²R loss (A); zero skips the loss figures
    pub current_a: f64,
}

impl Default for WireResistanceInput {
    fn default() -> Self {
        WireResistanceInput {
            label: String::new(),
            gauge: WireGauge::Awg12,
            material: ConductorMaterial::Copper,
            length: 100.0,
            length_unit: LengthUnit::Feet,
            temperature_c: 75.0,
            round_trip: false,
            current_a: 0.0,
        }
    }
}

impl WireResistanceInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.length <= 0.0 {
            return Err(CalcError::invalid_input("length", self.length.to_string(), "Length must be positive"));
        }
        if !(-50.0..=250.0).contains(&self.temperature_c) {
            return Err(CalcError::invalid_input(
                "temperature_c",
                self.temperature_c.to_string(),
                "Temperature must be between -50 and 250 °C",
            ));
        }
        if self.current_a < 0.0 {
            return Err(CalcError::invalid_input("current_a", self.current_a.to_string(), "Current cannot be negative"));
        }
        Ok(())
    }
}

/// Results from the resistance calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireResistanceResult {
    /// Resistance per 1000 ft at the given temperature (Ω)
    pub ohms_per_kft: f64,

    /// Total conductor length used (ft)
    pub conductor_length_ft: f64,

    /// Total resistance (Ω)
    pub total_ohms: f64,

    /// Voltage drop across the conductor at `current_a` (V)
    pub voltage_drop_v: Option<f64>,

    /// I²R loss at `current_a` (W)
    pub power_loss_w: Option<f64>,

    /// Conductor area (cmil)
    pub circular_mils: f64,

    /// Bare conductor diameter (in)
    pub diameter_in: f64,
}

impl WireResistanceResult {
    /// Rows for printable summaries
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let mut rows = vec![
            SummaryRow::new("Resistance", format!("{:.4}", self.ohms_per_kft), "Ω/kft"),
            SummaryRow::new("Conductor length", format!("{:.1}", self.conductor_length_ft), "ft"),
            SummaryRow::new("Total resistance", format!("{:.4}", self.total_ohms), "Ω"),
            SummaryRow::new("Area", format!("{:.0}", self.circular_mils), "cmil"),
            SummaryRow::new("Diameter", format!("{:.4}", self.diameter_in), "in"),
        ];
        if let (Some(vd), Some(loss)) = (self.voltage_drop_v, self.power_loss_w) {
            rows.push(SummaryRow::new("Voltage drop", format!("{vd:.2}"), "V"));
            rows.push(SummaryRow::new("Power loss", format!("{loss:.1}"), "W"));
        }
        rows
    }
}

/// Calculate conductor resistance.
pub fn calculate(input: &WireResistanceInput) -> CalcResult<WireResistanceResult> {
    input.validate()?;

    let ohms_per_kft = input.gauge.resistance_at(input.material, input.temperature_c);
    let one_way_ft = input.length_unit.to_feet(input.length);
    let conductor_length_ft = if input.round_trip { 2.0 * one_way_ft } else { one_way_ft };
    let total = Ohms(ohms_per_kft * conductor_length_ft / 1000.0);

    let (voltage_drop_v, power_loss_w) = if input.current_a > 0.0 {
        let current = Amps(input.current_a);
        let loss = Watts(current.0 * current.0 * total.0);
        (Some(current.0 * total.0), Some(loss.value()))
    } else {
        (None, None)
    };

    Ok(WireResistanceResult {
        ohms_per_kft,
        conductor_length_ft,
        total_ohms: total.value(),
        voltage_drop_v,
        power_loss_w,
        circular_mils: input.gauge.circular_mils().0,
        diameter_in: input.gauge.diameter_in(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_value_at_75c() {
        let result = calculate(&WireResistanceInput::default()).unwrap();
        assert!((result.ohms_per_kft - 1.98).abs() < 1e-12);
        assert!((result.total_ohms - 0.198).abs() < 1e-12);
        assert_eq!(result.power_loss_w, None);
    }

    #[test]
    fn test_round_trip_with_current() {
        let input = WireResistanceInput {
            round_trip: true,
            current_a: 20.0,
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        assert!((result.total_ohms - 0.396).abs() < 1e-12);
        // Matches the single-phase voltage drop formula: 7.92 V
        assert!((result.voltage_drop_v.unwrap() - 7.92).abs() < 1e-9);
        assert!((result.power_loss_w.unwrap() - 158.4).abs() < 1e-9);
    }

    #[test]
    fn test_cold_aluminum() {
        let input = WireResistanceInput {
            gauge: WireGauge::Awg4_0,
            material: ConductorMaterial::Aluminum,
            temperature_c: 20.0,
            length: 1000.0,
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        // 0.100 × (1 + 0.0033 × −55) = 0.08185
        assert!((result.total_ohms - 0.08185).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_temperature() {
        let input = WireResistanceInput {
            temperature_c: 400.0,
            ..Default::default()
        };
        assert!(calculate(&input).is_err());
    }
}
