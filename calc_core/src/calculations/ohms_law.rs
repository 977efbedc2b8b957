//! # Ohm's Law
//!
//! Given any two of voltage, current, resistance, and power, derive the
//! other two from `V = I × R` and `P = V × I`.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Amps, Ohms, Volts, Watts};

use super::SummaryRow;

/// Input parameters for Ohm's law. Unknown quantities are left at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OhmsLawInput {
    /// User label
    pub label: String,
    /// Voltage (V)
    pub voltage_v: f64,
    /// Current (A)
    pub current_a: f64,
    /// Resistance (Ω)
    pub resistance_ohms: f64,
    /// Power (W)
    pub power_w: f64,
}

impl OhmsLawInput {
    fn known(&self) -> [(&'static str, f64); 4] {
        [
            ("voltage_v", self.voltage_v),
            ("current_a", self.current_a),
            ("resistance_ohms", self.resistance_ohms),
            ("power_w", self.power_w),
        ]
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in self.known() {
            if value < 0.0 || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Value must be zero or positive"));
            }
        }
        Ok(())
    }
}

/// All four quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhmsLawResult {
    pub voltage: Volts,
    pub current: Amps,
    pub resistance: Ohms,
    pub power: Watts,
}

impl OhmsLawResult {
    /// Rows for printable summaries
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        vec![
            SummaryRow::new("Voltage", format!("{:.3}", self.voltage.0), "V"),
            SummaryRow::new("Current", format!("{:.3}", self.current.0), "A"),
            SummaryRow::new("Resistance", format!("{:.3}", self.resistance.0), "Ω"),
            SummaryRow::new("Power", format!("{:.3}", self.power.0), "W"),
        ]
    }
}

/// Solve Ohm's law from two known quantities.
///
/// # Errors
///
/// `NoSolution` unless exactly two quantities are above zero.
pub fn calculate(input: &OhmsLawInput) -> CalcResult<OhmsLawResult> {
    input.validate()?;

    let given = |x: f64| (x > 0.0).then_some(x);
    let (v, i, r, p) = match (
        given(input.voltage_v),
        given(input.current_a),
        given(input.resistance_ohms),
        given(input.power_w),
    ) {
        (Some(v), Some(i), None, None) => (v, i, v / i, v * i),
        (Some(v), None, Some(r), None) => (v, v / r, r, v * v / r),
        (Some(v), None, None, Some(p)) => (v, p / v, v * v / p, p),
        (None, Some(i), Some(r), None) => (i * r, i, r, i * i * r),
        (None, Some(i), None, Some(p)) => (p / i, i, p / (i * i), p),
        (None, None, Some(r), Some(p)) => ((p * r).sqrt(), (p / r).sqrt(), r, p),
        _ => {
            return Err(CalcError::no_solution(
                "Ohm's Law",
                "Enter exactly two of voltage, current, resistance, and power",
            ))
        }
    };

    Ok(OhmsLawResult {
        voltage: Volts(v),
        current: Amps(i),
        resistance: Ohms(r),
        power: Watts(p),
    })
}
