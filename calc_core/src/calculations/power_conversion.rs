//! # Power Conversions
//!
//! Unit conversions between apparent power, real power, heat, mechanical
//! power, and line current.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{BtuPerHour, Horsepower, KiloVoltAmps, Kilowatts};

use super::{validate_power_factor, Phase, SummaryRow, SQRT_3};

/// Which conversion to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Conversion {
    #[default]
    KvaToKw,
    KwToKva,
    KwToBtu,
    BtuToKw,
    HpToKw,
    KwToHp,
    AmpsToKva,
    KvaToAmps,
    WattsToAmps,
    AmpsToWatts,
}

impl Conversion {
    pub const ALL: [Conversion; 10] = [
        Conversion::KvaToKw,
        Conversion::KwToKva,
        Conversion::KwToBtu,
        Conversion::BtuToKw,
        Conversion::HpToKw,
        Conversion::KwToHp,
        Conversion::AmpsToKva,
        Conversion::KvaToAmps,
        Conversion::WattsToAmps,
        Conversion::AmpsToWatts,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Conversion::KvaToKw => "kva_to_kw",
            Conversion::KwToKva => "kw_to_kva",
            Conversion::KwToBtu => "kw_to_btu",
            Conversion::BtuToKw => "btu_to_kw",
            Conversion::HpToKw => "hp_to_kw",
            Conversion::KwToHp => "kw_to_hp",
            Conversion::AmpsToKva => "amps_to_kva",
            Conversion::KvaToAmps => "kva_to_amps",
            Conversion::WattsToAmps => "watts_to_amps",
            Conversion::AmpsToWatts => "amps_to_watts",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Conversion::KvaToKw => "kVA → kW",
            Conversion::KwToKva => "kW → kVA",
            Conversion::KwToBtu => "kW → BTU/hr",
            Conversion::BtuToKw => "BTU/hr → kW",
            Conversion::HpToKw => "HP → kW",
            Conversion::KwToHp => "kW → HP",
            Conversion::AmpsToKva => "Amps → kVA",
            Conversion::KvaToAmps => "kVA → amps",
            Conversion::WattsToAmps => "Watts → amps",
            Conversion::AmpsToWatts => "Amps → watts",
        }
    }

    /// (input unit, output unit)
    pub fn units(&self) -> (&'static str, &'static str) {
        match self {
            Conversion::KvaToKw => ("kVA", "kW"),
            Conversion::KwToKva => ("kW", "kVA"),
            Conversion::KwToBtu => ("kW", "BTU/hr"),
            Conversion::BtuToKw => ("BTU/hr", "kW"),
            Conversion::HpToKw => ("HP", "kW"),
            Conversion::KwToHp => ("kW", "HP"),
            Conversion::AmpsToKva => ("A", "kVA"),
            Conversion::KvaToAmps => ("kVA", "A"),
            Conversion::WattsToAmps => ("W", "A"),
            Conversion::AmpsToWatts => ("A", "W"),
        }
    }

    /// Whether the conversion depends on the circuit voltage
    pub fn needs_voltage(&self) -> bool {
        matches!(
            self,
            Conversion::AmpsToKva | Conversion::KvaToAmps | Conversion::WattsToAmps | Conversion::AmpsToWatts
        )
    }

    /// Whether the conversion depends on the power factor
    pub fn needs_power_factor(&self) -> bool {
        matches!(
            self,
            Conversion::KvaToKw | Conversion::KwToKva | Conversion::WattsToAmps | Conversion::AmpsToWatts
        )
    }
}

/// Input parameters for a power conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConversionInput {
    /// User label
    pub label: String,

    /// Conversion to perform
    pub conversion: Conversion,

    /// Quantity to convert, in the conversion's input unit
    pub value: f64,

    /// Circuit type for current conversions
    pub phase: Phase,

    /// Line-to-line voltage for current conversions
    pub voltage_v: f64,

    /// Power factor (0, 1]; ignored for DC
    pub power_factor: f64,
}

impl Default for PowerConversionInput {
    fn default() -> Self {
        PowerConversionInput {
            label: String::new(),
            conversion: Conversion::KvaToKw,
            value: 100.0,
            phase: Phase::SinglePhase,
            voltage_v: 240.0,
            power_factor: 0.8,
        }
    }
}

impl PowerConversionInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.value <= 0.0 {
            return Err(CalcError::invalid_input("value", self.value.to_string(), "Value must be positive"));
        }
        if self.conversion.needs_voltage() && self.voltage_v <= 0.0 {
            return Err(CalcError::invalid_input("voltage_v", self.voltage_v.to_string(), "Voltage must be positive"));
        }
        if self.conversion.needs_power_factor() {
            validate_power_factor(self.power_factor)?;
        }
        Ok(())
    }

    fn effective_power_factor(&self) -> f64 {
        if self.phase == Phase::Dc {
            1.0
        } else {
            self.power_factor
        }
    }
}

/// Result of a power conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerConversionResult {
    /// Converted value
    pub value: f64,
    /// Unit of `value`
    pub unit: String,
    /// Formula used, with the constants filled in
    pub formula: String,
}

impl PowerConversionResult {
    /// Rows for printable summaries
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        vec![
            SummaryRow::new("Result", format!("{:.3}", self.value), self.unit.clone()),
            SummaryRow::new("Formula", self.formula.clone(), ""),
        ]
    }
}

/// Perform a power conversion.
pub fn calculate(input: &PowerConversionInput) -> CalcResult<PowerConversionResult> {
    input.validate()?;

    let x = input.value;
    let v = input.voltage_v;
    let pf = input.effective_power_factor();
    // Volts-to-VA factor: √3 for three-phase line-to-line voltage
    let (k, k_text) = match input.phase {
        Phase::ThreePhase => (SQRT_3 * v, format!("√3 × {v} V")),
        Phase::SinglePhase | Phase::Dc => (v, format!("{v} V")),
    };

    let (value, formula) = match input.conversion {
        Conversion::KvaToKw => (KiloVoltAmps(x).to_kilowatts(pf).0, format!("kW = kVA × {pf}")),
        Conversion::KwToKva => (Kilowatts(x).to_kva(pf).0, format!("kVA = kW ÷ {pf}")),
        Conversion::KwToBtu => (BtuPerHour::from(Kilowatts(x)).0, "BTU/hr = kW × 3412.142".to_string()),
        Conversion::BtuToKw => (Kilowatts::from(BtuPerHour(x)).0, "kW = BTU/hr ÷ 3412.142".to_string()),
        Conversion::HpToKw => (Kilowatts::from(Horsepower(x)).0, "kW = HP × 0.746".to_string()),
        Conversion::KwToHp => (Horsepower::from(Kilowatts(x)).0, "HP = kW ÷ 0.746".to_string()),
        Conversion::AmpsToKva => (k * x / 1000.0, format!("kVA = {k_text} × A ÷ 1000")),
        Conversion::KvaToAmps => (x * 1000.0 / k, format!("A = kVA × 1000 ÷ ({k_text})")),
        Conversion::WattsToAmps => (x / (k * pf), format!("A = W ÷ ({k_text} × {pf})")),
        Conversion::AmpsToWatts => (k * x * pf, format!("W = {k_text} × A × {pf}")),
    };

    Ok(PowerConversionResult {
        value,
        unit: input.conversion.units().1.to_string(),
        formula,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(conversion: Conversion, value: f64) -> f64 {
        let input = PowerConversionInput {
            conversion,
            value,
            ..Default::default()
        };
        calculate(&input).unwrap().value
    }

    #[test]
    fn test_kva_kw() {
        assert!((convert(Conversion::KvaToKw, 100.0) - 80.0).abs() < 1e-9);
        assert!((convert(Conversion::KwToKva, 80.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_heat_and_mechanical() {
        assert!((convert(Conversion::KwToBtu, 10.0) - 34121.42).abs() < 1e-6);
        assert!((convert(Conversion::BtuToKw, 3412.142) - 1.0).abs() < 1e-9);
        assert!((convert(Conversion::HpToKw, 10.0) - 7.46).abs() < 1e-9);
    }

    #[test]
    fn test_three_phase_kva_from_amps() {
        let input = PowerConversionInput {
            conversion: Conversion::AmpsToKva,
            value: 100.0,
            phase: Phase::ThreePhase,
            voltage_v: 480.0,
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        assert!((result.value - 83.138).abs() < 0.001);
        assert_eq!(result.unit, "kVA");
        assert!(result.formula.contains("√3"));
    }

    #[test]
    fn test_watts_to_amps_dc_ignores_power_factor() {
        let input = PowerConversionInput {
            conversion: Conversion::WattsToAmps,
            value: 1200.0,
            phase: Phase::Dc,
            voltage_v: 120.0,
            power_factor: 0.5,
            ..Default::default()
        };
        assert!((calculate(&input).unwrap().value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_validation() {
        let input = PowerConversionInput {
            conversion: Conversion::KvaToAmps,
            voltage_v: 0.0,
            ..Default::default()
        };
        assert!(calculate(&input).is_err());

        let input = PowerConversionInput {
            power_factor: 0.0,
            ..Default::default()
        };
        assert!(calculate(&input).is_err());
    }
}
