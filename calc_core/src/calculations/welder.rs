//! # Welder Circuit Sizing
//!
//! Supply conductors and overcurrent protection for individual welders.
//!
//! - Arc welders, NEC 630.11(A) and 630.12(A)
//! - Resistance welders, NEC 630.31(A) and 630.32(A)
//!
//! Supply conductor ampacity must be at least the effective current: the
//! nameplate I1eff when marked, otherwise the rated primary current times the
//! duty-cycle multiplier. Duty cycles not listed use the next higher listed
//! value.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::ampacity::{ampacity, largest_standard_ocpd_not_exceeding, next_standard_ocpd};
use crate::tables::{ConductorMaterial, TemperatureRating, WireGauge};

use super::SummaryRow;

/// Table 630.11(A), transformer and rectifier arc welders
const ARC_TRANSFORMER: &[(f64, f64)] = &[
    (20.0, 0.45),
    (30.0, 0.55),
    (40.0, 0.63),
    (50.0, 0.71),
    (60.0, 0.78),
    (70.0, 0.84),
    (80.0, 0.89),
    (90.0, 0.95),
    (100.0, 1.00),
];

/// Table 630.11(A), motor-generator arc welders
const MOTOR_GENERATOR: &[(f64, f64)] = &[
    (20.0, 0.55),
    (30.0, 0.62),
    (40.0, 0.69),
    (50.0, 0.75),
    (60.0, 0.81),
    (70.0, 0.86),
    (80.0, 0.91),
    (90.0, 0.96),
    (100.0, 1.00),
];

/// Table 630.31(A)(2), resistance welders
const RESISTANCE: &[(f64, f64)] = &[
    (5.0, 0.22),
    (7.5, 0.27),
    (10.0, 0.32),
    (15.0, 0.39),
    (20.0, 0.45),
    (25.0, 0.50),
    (30.0, 0.55),
    (40.0, 0.63),
    (50.0, 0.71),
];

/// Welder construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WelderType {
    /// AC transformer or DC rectifier arc welder
    #[default]
    ArcTransformer,
    /// Motor-generator arc welder
    MotorGenerator,
    /// Resistance (spot, seam) welder
    Resistance,
}

impl WelderType {
    pub const ALL: [WelderType; 3] = [WelderType::ArcTransformer, WelderType::MotorGenerator, WelderType::Resistance];

    pub fn key(&self) -> &'static str {
        match self {
            WelderType::ArcTransformer => "arc_transformer",
            WelderType::MotorGenerator => "motor_generator",
            WelderType::Resistance => "resistance",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WelderType::ArcTransformer => "Arc, transformer/rectifier",
            WelderType::MotorGenerator => "Arc, motor-generator",
            WelderType::Resistance => "Resistance",
        }
    }

    fn multipliers(&self) -> &'static [(f64, f64)] {
        match self {
            WelderType::ArcTransformer => ARC_TRANSFORMER,
            WelderType::MotorGenerator => MOTOR_GENERATOR,
            WelderType::Resistance => RESISTANCE,
        }
    }

    /// Maximum OCPD as a percent of rated primary current
    pub fn max_ocpd_pct(&self) -> f64 {
        match self {
            WelderType::ArcTransformer | WelderType::MotorGenerator => 200.0,
            WelderType::Resistance => 300.0,
        }
    }

    fn reference(&self) -> &'static str {
        match self {
            WelderType::ArcTransformer | WelderType::MotorGenerator => "NEC 630.11(A), 630.12(A)",
            WelderType::Resistance => "NEC 630.31(A), 630.32(A)",
        }
    }

    /// Duty-cycle multiplier, using the next higher listed duty cycle.
    ///
    /// Resistance welders above 50% fall outside the table and use
    /// √(duty/100), the relation the listed values are derived from.
    pub fn duty_cycle_multiplier(&self, duty_cycle_pct: f64) -> f64 {
        let table = self.multipliers();
        match table.iter().find(|(duty, _)| *duty >= duty_cycle_pct - 1e-9) {
            Some((_, m)) => *m,
            None => (duty_cycle_pct / 100.0).sqrt().min(1.0),
        }
    }
}

/// Input parameters for welder sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WelderInput {
    /// User label
    pub label: String,

    /// Welder construction
    pub welder_type: WelderType,

    /// Rated primary current from the nameplate (A)
    pub rated_primary_a: f64,

    /// Rated duty cycle (%)
    pub duty_cycle_pct: f64,

    /// Nameplate I1eff (A); zero when not marked
    pub i1eff_a: f64,
}

impl Default for WelderInput {
    fn default() -> Self {
        WelderInput {
            label: String::new(),
            welder_type: WelderType::ArcTransformer,
            rated_primary_a: 50.0,
            duty_cycle_pct: 60.0,
            i1eff_a: 0.0,
        }
    }
}

impl WelderInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.rated_primary_a <= 0.0 {
            return Err(CalcError::invalid_input(
                "rated_primary_a",
                self.rated_primary_a.to_string(),
                "Rated primary current must be positive",
            ));
        }
        if self.duty_cycle_pct <= 0.0 || self.duty_cycle_pct > 100.0 {
            return Err(CalcError::invalid_input(
                "duty_cycle_pct",
                self.duty_cycle_pct.to_string(),
                "Duty cycle must be between 0 and 100%",
            ));
        }
        if self.i1eff_a < 0.0 {
            return Err(CalcError::invalid_input("i1eff_a", self.i1eff_a.to_string(), "I1eff cannot be negative"));
        }
        Ok(())
    }
}

/// Results from welder sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelderResult {
    /// Duty-cycle multiplier applied (1.0 when I1eff was used)
    pub multiplier: f64,

    /// Whether the nameplate I1eff was used
    pub used_i1eff: bool,

    /// Current the supply conductors must carry (A)
    pub effective_current_a: f64,

    /// Minimum copper supply conductor (75°C column)
    pub conductor: WireGauge,

    /// Ampacity of the selected conductor (A)
    pub conductor_ampacity_a: f64,

    /// Maximum overcurrent device rating (A)
    pub max_ocpd_a: u32,

    /// Code sections applied
    pub reference: String,
}

impl WelderResult {
    /// Rows for printable summaries
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let basis = if self.used_i1eff {
            "I1eff".to_string()
        } else {
            format!("{:.2} × rated", self.multiplier)
        };
        vec![
            SummaryRow::new("Effective current", format!("{:.1} ({basis})", self.effective_current_a), "A"),
            SummaryRow::new(
                "Supply conductor",
                format!("{} Cu ({:.0} A)", self.conductor.display_name(), self.conductor_ampacity_a),
                "",
            ),
            SummaryRow::new("Maximum OCPD", self.max_ocpd_a.to_string(), "A"),
            SummaryRow::new("Reference", self.reference.clone(), ""),
        ]
    }
}

/// Size a welder branch circuit.
pub fn calculate(input: &WelderInput) -> CalcResult<WelderResult> {
    input.validate()?;

    let (multiplier, used_i1eff, effective) = if input.i1eff_a > 0.0 {
        (1.0, true, input.i1eff_a)
    } else {
        let m = input.welder_type.duty_cycle_multiplier(input.duty_cycle_pct);
        (m, false, input.rated_primary_a * m)
    };

    let (conductor, conductor_ampacity_a) = WireGauge::building_wire()
        .filter_map(|g| {
            ampacity(g, ConductorMaterial::Copper, TemperatureRating::C75).map(|a| (g, a))
        })
        .find(|(_, a)| *a >= effective)
        .ok_or_else(|| CalcError::no_solution("Welder", format!("No conductor carries {effective:.1} A")))?;

    let floor = next_standard_ocpd(effective)
        .ok_or_else(|| CalcError::table_lookup("NEC 240.6(A)", format!("{effective:.1} A")))?;
    let ceiling = input.rated_primary_a * input.welder_type.max_ocpd_pct() / 100.0;
    let max_ocpd_a = largest_standard_ocpd_not_exceeding(ceiling).map_or(floor, |r| r.max(floor));

    tracing::debug!(
        welder = input.welder_type.key(),
        effective_a = effective,
        conductor = conductor.key(),
        max_ocpd_a,
        "sized welder circuit"
    );

    Ok(WelderResult {
        multiplier,
        used_i1eff,
        effective_current_a: effective,
        conductor,
        conductor_ampacity_a,
        max_ocpd_a,
        reference: input.welder_type.reference().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_welder_defaults() {
        // 50 A × 0.78 = 39 A → 8 AWG (50 A); OCPD 200% = 100 A
        let result = calculate(&WelderInput::default()).unwrap();
        assert!((result.effective_current_a - 39.0).abs() < 1e-9);
        assert_eq!(result.conductor, WireGauge::Awg8);
        assert_eq!(result.max_ocpd_a, 100);
    }

    #[test]
    fn test_unlisted_duty_cycle_uses_next_higher() {
        assert_eq!(WelderType::ArcTransformer.duty_cycle_multiplier(45.0), 0.71);
        assert_eq!(WelderType::MotorGenerator.duty_cycle_multiplier(15.0), 0.55);
        assert_eq!(WelderType::Resistance.duty_cycle_multiplier(12.0), 0.39);
        assert_eq!(WelderType::Resistance.duty_cycle_multiplier(3.0), 0.22);
    }

    #[test]
    fn test_resistance_welder() {
        // 100 A × 0.39 = 39 A; OCPD 300% = 300 A
        let input = WelderInput {
            welder_type: WelderType::Resistance,
            rated_primary_a: 100.0,
            duty_cycle_pct: 15.0,
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.conductor, WireGauge::Awg8);
        assert_eq!(result.max_ocpd_a, 300);
    }

    #[test]
    fn test_i1eff_overrides_multiplier() {
        let input = WelderInput {
            i1eff_a: 28.0,
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        assert!(result.used_i1eff);
        assert_eq!(result.conductor, WireGauge::Awg10);
    }

    #[test]
    fn test_ocpd_rounds_down_to_standard() {
        // 200% of 48 A = 96 A → 90 A
        let input = WelderInput {
            rated_primary_a: 48.0,
            ..Default::default()
        };
        assert_eq!(calculate(&input).unwrap().max_ocpd_a, 90);
    }

    #[test]
    fn test_ocpd_never_below_effective_current() {
        // 200% of 40 A = 80 A, but I1eff 90 A needs the next standard size up
        let input = WelderInput {
            rated_primary_a: 40.0,
            i1eff_a: 90.0,
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.max_ocpd_a, 90);
        assert_eq!(result.conductor, WireGauge::Awg3);
        assert_eq!(result.conductor_ampacity_a, 100.0);
    }

    #[test]
    fn test_resistance_welder_above_fifty_percent() {
        assert!((WelderType::Resistance.duty_cycle_multiplier(75.0) - 0.75_f64.sqrt()).abs() < 1e-12);
        assert_eq!(WelderType::Resistance.duty_cycle_multiplier(100.0), 1.0);

        // 100 A × √0.75 = 86.6 A → 3 AWG (100 A); OCPD 300% = 300 A
        let input = WelderInput {
            welder_type: WelderType::Resistance,
            rated_primary_a: 100.0,
            duty_cycle_pct: 75.0,
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        assert!((result.multiplier - 0.866_025_403_784_438_6).abs() < 1e-12);
        assert!((result.effective_current_a - 86.602_540_378_443_86).abs() < 1e-9);
        assert_eq!(result.conductor, WireGauge::Awg3);
        assert_eq!(result.max_ocpd_a, 300);
    }

    #[test]
    fn test_invalid_duty_cycle() {
        let input = WelderInput {
            duty_cycle_pct: 120.0,
            ..Default::default()
        };
        assert!(calculate(&input).is_err());
    }
}
