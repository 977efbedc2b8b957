//! # Wire Size Calculation
//!
//! Selects the smallest conductor that satisfies both ampacity and voltage
//! drop for a branch circuit or feeder.
//!
//! ## Procedure
//!
//! 1. Required ampacity = load current × 1.25 for continuous loads (210.19(A))
//! 2. For each size, smallest first:
//!    - Insulation-column ampacity (Table 310.16) × ambient correction ×
//!      bundling adjustment (310.15) must carry the required ampacity
//!    - Termination-column ampacity (110.14(C)) must carry it as well
//!    - 240.4(D) small-conductor limits cap 14-10 AWG
//!    - Voltage drop at the actual load current must be within the limit
//! 3. The first size passing every check is selected. If it is larger than
//!    the size ampacity alone requires, voltage drop governs.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::wire_size::{calculate, WireSizeInput};
//! use calc_core::tables::WireGauge;
//!
//! let input = WireSizeInput { load_current_a: 16.0, length: 50.0, ..Default::default() };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.gauge, WireGauge::Awg12);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::ampacity::{ampacity, next_standard_ocpd, small_conductor_limit};
use crate::tables::correction::{adjustment_factor, temperature_correction};
use crate::tables::{ConductorMaterial, TemperatureRating, WireGauge};

use super::grounding::egc_with_upsizing;
use super::voltage_drop::drop_volts;
use super::{LengthUnit, Phase, SummaryRow};

/// Continuous loads are sized at 125% (210.19(A)(1), 215.2(A)(1))
pub const CONTINUOUS_LOAD_FACTOR: f64 = 1.25;

/// Equipment termination temperature rating (110.14(C))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TerminalRating {
    /// 60°C for circuits of 100 A or less, 75°C above
    #[default]
    Auto,
    /// Terminals rated 60°C
    #[serde(rename = "60")]
    C60,
    /// Terminals listed for 75°C
    #[serde(rename = "75")]
    C75,
}

impl TerminalRating {
    pub const ALL: [TerminalRating; 3] = [TerminalRating::Auto, TerminalRating::C60, TerminalRating::C75];

    pub fn key(&self) -> &'static str {
        match self {
            TerminalRating::Auto => "auto",
            TerminalRating::C60 => "60",
            TerminalRating::C75 => "75",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TerminalRating::Auto => "Per 110.14(C)",
            TerminalRating::C60 => "60°C terminals",
            TerminalRating::C75 => "75°C terminals",
        }
    }

    /// Ampacity column usable at the terminations for a circuit of `required_a`
    fn column(&self, required_a: f64, insulation: TemperatureRating) -> TemperatureRating {
        let terminal = match self {
            TerminalRating::Auto if required_a <= 100.0 => TemperatureRating::C60,
            TerminalRating::Auto => TemperatureRating::C75,
            TerminalRating::C60 => TemperatureRating::C60,
            TerminalRating::C75 => TemperatureRating::C75,
        };
        // Never above the insulation's own rating
        if terminal.celsius() <= insulation.celsius() {
            terminal
        } else {
            insulation
        }
    }
}

/// Which requirement set the selected size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizingConstraint {
    Ampacity,
    VoltageDrop,
}

impl SizingConstraint {
    pub fn display_name(&self) -> &'static str {
        match self {
            SizingConstraint::Ampacity => "Ampacity",
            SizingConstraint::VoltageDrop => "Voltage drop",
        }
    }
}

/// Input parameters for conductor sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireSizeInput {
    /// User label
    pub label: String,

    /// Load current in amperes
    pub load_current_a: f64,

    /// Load operates for 3 hours or more
    pub continuous: bool,

    /// Circuit type
    pub phase: Phase,

    /// Source voltage
    pub voltage_v: f64,

    /// One-way circuit length
    pub length: f64,

    /// Unit of `length`
    pub length_unit: LengthUnit,

    /// Conductor material
    pub material: ConductorMaterial,

    /// Conductor insulation temperature rating
    pub insulation_rating: TemperatureRating,

    /// Equipment termination rating
    pub terminal_rating: TerminalRating,

    /// Ambient temperature (°C)
    pub ambient_temp_c: f64,

    /// Current-carrying conductors in the raceway or cable
    pub current_carrying_conductors: u32,

    /// Maximum acceptable voltage drop (%)
    pub max_drop_pct: f64,
}

impl Default for WireSizeInput {
    fn default() -> Self {
        WireSizeInput {
            label: String::new(),
            load_current_a: 20.0,
            continuous: false,
            phase: Phase::SinglePhase,
            voltage_v: 120.0,
            length: 50.0,
            length_unit: LengthUnit::Feet,
            material: ConductorMaterial::Copper,
            insulation_rating: TemperatureRating::C90,
            terminal_rating: TerminalRating::Auto,
            ambient_temp_c: 30.0,
            current_carrying_conductors: 3,
            max_drop_pct: 3.0,
        }
    }
}

impl WireSizeInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.load_current_a <= 0.0 {
            return Err(CalcError::invalid_input(
                "load_current_a",
                self.load_current_a.to_string(),
                "Load current must be positive",
            ));
        }
        if self.voltage_v <= 0.0 {
            return Err(CalcError::invalid_input("voltage_v", self.voltage_v.to_string(), "Voltage must be positive"));
        }
        if self.length <= 0.0 {
            return Err(CalcError::invalid_input("length", self.length.to_string(), "Length must be positive"));
        }
        if self.current_carrying_conductors == 0 {
            return Err(CalcError::invalid_input(
                "current_carrying_conductors",
                "0",
                "At least one current-carrying conductor is required",
            ));
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

    /// Ampacity the conductor must carry
    pub fn required_ampacity_a(&self) -> f64 {
        if self.continuous {
            self.load_current_a * CONTINUOUS_LOAD_FACTOR
        } else {
            self.load_current_a
        }
    }
}

/// Results from conductor sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSizeResult {
    /// Selected conductor size
    pub gauge: WireGauge,

    /// Size that ampacity alone would require
    pub ampacity_gauge: WireGauge,

    /// What governed the selection
    pub governing: SizingConstraint,

    /// Required ampacity after the continuous-load factor (A)
    pub required_ampacity_a: f64,

    /// Table 310.16 ampacity of the selected size at the insulation rating (A)
    pub base_ampacity_a: f64,

    /// Ambient temperature correction factor
    pub temperature_factor: f64,

    /// Bundling adjustment factor
    pub adjustment_factor: f64,

    /// Base ampacity after correction and adjustment (A)
    pub derated_ampacity_a: f64,

    /// Ampacity at the termination temperature column (A)
    pub terminal_ampacity_a: f64,

    /// Governing ampacity of the selected size (A)
    pub allowable_ampacity_a: f64,

    /// Voltage drop with the selected size (V)
    pub voltage_drop_v: f64,

    /// Voltage drop with the selected size (%)
    pub voltage_drop_pct: f64,

    /// Next standard overcurrent device at or above the required ampacity (A)
    pub recommended_ocpd_a: Option<u32>,

    /// Equipment grounding conductor, upsized per 250.122(B) when voltage drop governs
    pub equipment_ground: Option<WireGauge>,
}

impl WireSizeResult {
    /// Rows for printable summaries
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let mut rows = vec![
            SummaryRow::new("Conductor size", self.gauge.display_name(), ""),
            SummaryRow::new("Governed by", self.governing.display_name(), ""),
            SummaryRow::new("Required ampacity", format!("{:.1}", self.required_ampacity_a), "A"),
            SummaryRow::new("Allowable ampacity", format!("{:.1}", self.allowable_ampacity_a), "A"),
            SummaryRow::new(
                "Correction × adjustment",
                format!("{:.2} × {:.2}", self.temperature_factor, self.adjustment_factor),
                "",
            ),
            SummaryRow::new("Voltage drop", format!("{:.2} ({:.2}%)", self.voltage_drop_v, self.voltage_drop_pct), "V"),
        ];
        if let Some(ocpd) = self.recommended_ocpd_a {
            rows.push(SummaryRow::new("Overcurrent protection", ocpd.to_string(), "A"));
        }
        if let Some(egc) = self.equipment_ground {
            rows.push(SummaryRow::new("Equipment ground", egc.display_name(), ""));
        }
        rows
    }
}

/// Ampacity figures for one candidate size
struct Candidate {
    gauge: WireGauge,
    base: f64,
    derated: f64,
    terminal: f64,
    allowable: f64,
}

/// Calculate the minimum conductor size.
///
/// # Returns
///
/// * `Ok(WireSizeResult)` - Selected size and supporting figures
/// * `Err(CalcError::TableLookup)` - Ambient exceeds the insulation's rating
/// * `Err(CalcError::NoSolution)` - No size up to 1000 kcmil works
pub fn calculate(input: &WireSizeInput) -> CalcResult<WireSizeResult> {
    input.validate()?;

    let required = input.required_ampacity_a();
    let temperature_factor = temperature_correction(input.ambient_temp_c, input.insulation_rating).ok_or_else(|| {
        CalcError::table_lookup(
            "NEC Table 310.15(B)(1)",
            format!("{}°C ambient for {} insulation", input.ambient_temp_c, input.insulation_rating.key()),
        )
    })?;
    let bundling = adjustment_factor(input.current_carrying_conductors);
    let terminal_column = input.terminal_rating.column(required, input.insulation_rating);
    let length_ft = input.length_unit.to_feet(input.length);

    let drop_pct = |g: WireGauge| -> f64 {
        drop_volts(input.phase, g, input.material, length_ft, input.load_current_a, 1) / input.voltage_v * 100.0
    };

    let candidates: Vec<Candidate> = WireGauge::building_wire()
        .filter_map(|gauge| {
            let base = ampacity(gauge, input.material, input.insulation_rating)?;
            let terminal = ampacity(gauge, input.material, terminal_column)?;
            let derated = base * temperature_factor * bundling;
            let mut allowable = derated.min(terminal);
            if let Some(limit) = small_conductor_limit(gauge, input.material) {
                allowable = allowable.min(limit);
            }
            Some(Candidate {
                gauge,
                base,
                derated,
                terminal,
                allowable,
            })
        })
        .collect();

    let ampacity_gauge = candidates
        .iter()
        .find(|c| c.allowable >= required)
        .map(|c| c.gauge)
        .ok_or_else(|| {
            CalcError::no_solution(
                "Wire Size",
                format!("No single conductor up to 1000 kcmil carries {required:.1} A; use parallel sets"),
            )
        })?;

    let selected = candidates
        .iter()
        .find(|c| c.allowable >= required && drop_pct(c.gauge) <= input.max_drop_pct)
        .ok_or_else(|| {
            CalcError::no_solution(
                "Wire Size",
                format!(
                    "Voltage drop exceeds {:.1}% even with 1000 kcmil; shorten the run or use parallel sets",
                    input.max_drop_pct
                ),
            )
        })?;

    let governing = if selected.gauge == ampacity_gauge {
        SizingConstraint::Ampacity
    } else {
        SizingConstraint::VoltageDrop
    };

    let voltage_drop_v = drop_volts(input.phase, selected.gauge, input.material, length_ft, input.load_current_a, 1);
    let recommended_ocpd_a = next_standard_ocpd(required);
    let equipment_ground = recommended_ocpd_a.and_then(|ocpd| {
        egc_with_upsizing(f64::from(ocpd), input.material, ampacity_gauge, selected.gauge).ok()
    });

    tracing::debug!(
        gauge = %selected.gauge,
        governing = ?governing,
        required_a = required,
        "wire size selected"
    );

    Ok(WireSizeResult {
        gauge: selected.gauge,
        ampacity_gauge,
        governing,
        required_ampacity_a: required,
        base_ampacity_a: selected.base,
        temperature_factor,
        adjustment_factor: bundling,
        derated_ampacity_a: selected.derated,
        terminal_ampacity_a: selected.terminal,
        allowable_ampacity_a: selected.allowable,
        voltage_drop_v,
        voltage_drop_pct: voltage_drop_v / input.voltage_v * 100.0,
        recommended_ocpd_a,
        equipment_ground,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch() -> WireSizeInput {
        WireSizeInput {
            label: "Test".to_string(),
            load_current_a: 16.0,
            length: 50.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_ampacity_governs() {
        // 14 AWG is limited to 15 A at 60°C terminals, so 12 AWG
        let result = calculate(&branch()).unwrap();
        assert_eq!(result.gauge, WireGauge::Awg12);
        assert_eq!(result.governing, SizingConstraint::Ampacity);
        assert_eq!(result.allowable_ampacity_a, 20.0);
        assert_eq!(result.recommended_ocpd_a, Some(20));
        assert_eq!(result.equipment_ground, Some(WireGauge::Awg12));
        // 2 × 50 × 16 × 1.98 / 1000 = 3.168 V
        assert!((result.voltage_drop_v - 3.168).abs() < 1e-9);
    }

    #[test]
    fn test_voltage_drop_governs() {
        let input = WireSizeInput { length: 150.0, ..branch() };
        let result = calculate(&input).unwrap();
        assert_eq!(result.ampacity_gauge, WireGauge::Awg12);
        assert_eq!(result.gauge, WireGauge::Awg6);
        assert_eq!(result.governing, SizingConstraint::VoltageDrop);
        assert!(result.voltage_drop_pct <= 3.0);
        // EGC grows in proportion to the ungrounded conductors (250.122(B))
        assert_eq!(result.equipment_ground, Some(WireGauge::Awg6));
    }

    #[test]
    fn test_continuous_load_with_75c_terminals() {
        let input = WireSizeInput {
            load_current_a: 40.0,
            continuous: true,
            voltage_v: 240.0,
            length: 30.0,
            terminal_rating: TerminalRating::C75,
            ..branch()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.required_ampacity_a, 50.0);
        assert_eq!(result.gauge, WireGauge::Awg8);
        assert_eq!(result.terminal_ampacity_a, 50.0);
    }

    #[test]
    fn test_derating() {
        let input = WireSizeInput {
            load_current_a: 30.0,
            voltage_v: 240.0,
            ambient_temp_c: 40.0,
            current_carrying_conductors: 6,
            ..branch()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.temperature_factor, 0.91);
        assert_eq!(result.adjustment_factor, 0.8);
        // 10 AWG: 40 × 0.728 = 29.1 A < 30 A
        assert_eq!(result.gauge, WireGauge::Awg8);
    }

    #[test]
    fn test_ambient_beyond_rating() {
        let input = WireSizeInput {
            insulation_rating: TemperatureRating::C60,
            ambient_temp_c: 60.0,
            ..branch()
        };
        assert!(matches!(calculate(&input), Err(CalcError::TableLookup { .. })));
    }

    #[test]
    fn test_no_size_fits() {
        let input = WireSizeInput {
            load_current_a: 2000.0,
            ..branch()
        };
        assert!(matches!(calculate(&input), Err(CalcError::NoSolution { .. })));
    }

    #[test]
    fn test_terminal_column_never_exceeds_insulation() {
        let col = TerminalRating::C75.column(50.0, TemperatureRating::C60);
        assert_eq!(col, TemperatureRating::C60);
        assert_eq!(TerminalRating::Auto.column(150.0, TemperatureRating::C90), TemperatureRating::C75);
    }
}
