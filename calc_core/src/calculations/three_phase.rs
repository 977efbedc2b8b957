//! # Three-Phase Power Calculation
//!
//! Balanced three-phase relationships using line-to-line voltage:
//!
//! ```text
//! kVA  = √3 × V × I / 1000
//! kW   = kVA × PF
//! kVAR = √(kVA² − kW²)
//! I    = kW × 1000 / (√3 × V × PF)
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Kilowatts, KiloVoltAmps};

use super::{validate_power_factor, SummaryRow, SQRT_3};

/// What the user knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThreePhaseMode {
    /// Known real power, solve for line current
    #[default]
    CurrentFromPower,
    /// Known line current, solve for power
    PowerFromCurrent,
}

impl ThreePhaseMode {
    pub const ALL: [ThreePhaseMode; 2] = [ThreePhaseMode::CurrentFromPower, ThreePhaseMode::PowerFromCurrent];

    pub fn key(&self) -> &'static str {
        match self {
            ThreePhaseMode::CurrentFromPower => "current_from_power",
            ThreePhaseMode::PowerFromCurrent => "power_from_current",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThreePhaseMode::CurrentFromPower => "kW → amps",
            ThreePhaseMode::PowerFromCurrent => "Amps → kW",
        }
    }
}

/// Input parameters for three-phase power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreePhaseInput {
    /// User label
    pub label: String,

    /// Which quantity to solve for
    pub mode: ThreePhaseMode,

    /// Line-to-line voltage
    pub voltage_v: f64,

    /// Power factor (0, 1]
    pub power_factor: f64,

    /// Real power (kW), used by `CurrentFromPower`
    pub power_kw: f64,

    /// Line current (A), used by `PowerFromCurrent`
    pub current_a: f64,
}

impl Default for ThreePhaseInput {
    fn default() -> Self {
        ThreePhaseInput {
            label: String::new(),
            mode: ThreePhaseMode::CurrentFromPower,
            voltage_v: 480.0,
            power_factor: 0.9,
            power_kw: 10.0,
            current_a: 0.0,
        }
    }
}

impl ThreePhaseInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.voltage_v <= 0.0 {
            return Err(CalcError::invalid_input("voltage_v", self.voltage_v.to_string(), "Voltage must be positive"));
        }
        validate_power_factor(self.power_factor)?;
        match self.mode {
            ThreePhaseMode::CurrentFromPower if self.power_kw <= 0.0 => Err(CalcError::invalid_input(
                "power_kw",
                self.power_kw.to_string(),
                "Power must be positive",
            )),
            ThreePhaseMode::PowerFromCurrent if self.current_a <= 0.0 => Err(CalcError::invalid_input(
                "current_a",
                self.current_a.to_string(),
                "Current must be positive",
            )),
            _ => Ok(()),
        }
    }
}

/// Results from three-phase power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreePhaseResult {
    /// Line current (A)
    pub current_a: f64,
    /// Real power (kW)
    pub power_kw: f64,
    /// Apparent power (kVA)
    pub apparent_kva: f64,
    /// Reactive power (kVAR)
    pub reactive_kvar: f64,
    /// Line-to-neutral voltage (V)
    pub line_to_neutral_v: f64,
}

impl ThreePhaseResult {
    /// Rows for printable summaries
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        vec![
            SummaryRow::new("Line current", format!("{:.2}", self.current_a), "A"),
            SummaryRow::new("Real power", format!("{:.2}", self.power_kw), "kW"),
            SummaryRow::new("Apparent power", format!("{:.2}", self.apparent_kva), "kVA"),
            SummaryRow::new("Reactive power", format!("{:.2}", self.reactive_kvar), "kVAR"),
            SummaryRow::new("Line-to-neutral voltage", format!("{:.1}", self.line_to_neutral_v), "V"),
        ]
    }
}

/// Calculate three-phase power quantities.
pub fn calculate(input: &ThreePhaseInput) -> CalcResult<ThreePhaseResult> {
    input.validate()?;

    let (current_a, kva) = match input.mode {
        ThreePhaseMode::CurrentFromPower => {
            let kva = Kilowatts(input.power_kw).to_kva(input.power_factor);
            (kva.0 * 1000.0 / (SQRT_3 * input.voltage_v), kva)
        }
        ThreePhaseMode::PowerFromCurrent => {
            let kva = KiloVoltAmps(SQRT_3 * input.voltage_v * input.current_a / 1000.0);
            (input.current_a, kva)
        }
    };
    let kw = kva.to_kilowatts(input.power_factor);

    Ok(ThreePhaseResult {
        current_a,
        power_kw: kw.value(),
        apparent_kva: kva.value(),
        reactive_kvar: (kva.0 * kva.0 - kw.0 * kw.0).max(0.0).sqrt(),
        line_to_neutral_v: input.voltage_v / SQRT_3,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_from_power() {
        // 10 kW / (√3 × 480 × 0.9) = 13.36 A
        let result = calculate(&ThreePhaseInput::default()).unwrap();
        assert!((result.current_a - 13.365).abs() < 0.01);
        assert!((result.apparent_kva - 11.111).abs() < 0.001);
        assert!((result.line_to_neutral_v - 277.1).abs() < 0.1);
    }

    #[test]
    fn test_power_from_current() {
        let input = ThreePhaseInput {
            mode: ThreePhaseMode::PowerFromCurrent,
            voltage_v: 208.0,
            power_factor: 0.85,
            current_a: 100.0,
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        assert!((result.apparent_kva - 36.027).abs() < 0.01);
        assert!((result.power_kw - 30.623).abs() < 0.01);
        assert!((result.reactive_kvar - 18.98).abs() < 0.01);
    }

    #[test]
    fn test_unity_power_factor_has_no_reactive_power() {
        let input = ThreePhaseInput {
            power_factor: 1.0,
            ..Default::default()
        };
        assert_eq!(calculate(&input).unwrap().reactive_kvar, 0.0);
    }

    #[test]
    fn test_invalid_power_factor() {
        let input = ThreePhaseInput {
            power_factor: 1.2,
            ..Default::default()
        };
        assert!(calculate(&input).is_err());
    }
}
