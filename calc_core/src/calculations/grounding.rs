//! # Grounding Conductor Sizing
//!
//! - **Equipment grounding conductor** (250.122): sized from the rating of the
//!   overcurrent device ahead of the circuit. When the ungrounded conductors
//!   are increased in size (usually for voltage drop), 250.122(B) requires the
//!   EGC to grow in proportion to their circular-mil area.
//! - **Grounding electrode conductor** (250.66): sized from the largest
//!   ungrounded service-entrance conductor, with the 250.66(A)/(B) caps for
//!   rod and concrete-encased electrodes.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::grounding::{equipment_grounding_conductor, grounding_electrode_conductor};
use crate::tables::{ConductorMaterial, WireGauge};

use super::SummaryRow;

/// Which grounding conductor is being sized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroundingKind {
    /// Equipment grounding conductor (250.122)
    #[default]
    Equipment,
    /// Grounding electrode conductor (250.66)
    Electrode,
}

impl GroundingKind {
    pub const ALL: [GroundingKind; 2] = [GroundingKind::Equipment, GroundingKind::Electrode];

    pub fn key(&self) -> &'static str {
        match self {
            GroundingKind::Equipment => "equipment",
            GroundingKind::Electrode => "electrode",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GroundingKind::Equipment => "Equipment grounding conductor",
            GroundingKind::Electrode => "Grounding electrode conductor",
        }
    }
}

/// Type of grounding electrode the GEC connects to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElectrodeType {
    /// Water pipe, building steel, ground ring, etc.
    #[default]
    Other,
    /// Rod, pipe, or plate electrode (250.66(A))
    Rod,
    /// Concrete-encased electrode (250.66(B))
    ConcreteEncased,
}

impl ElectrodeType {
    pub const ALL: [ElectrodeType; 3] = [ElectrodeType::Other, ElectrodeType::Rod, ElectrodeType::ConcreteEncased];

    pub fn key(&self) -> &'static str {
        match self {
            ElectrodeType::Other => "other",
            ElectrodeType::Rod => "rod",
            ElectrodeType::ConcreteEncased => "concrete_encased",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ElectrodeType::Other => "Water pipe / structural steel / other",
            ElectrodeType::Rod => "Rod, pipe, or plate",
            ElectrodeType::ConcreteEncased => "Concrete-encased",
        }
    }

    /// Largest GEC the electrode type can require
    fn cap(&self, material: ConductorMaterial) -> Option<WireGauge> {
        match (self, material) {
            (ElectrodeType::Rod, ConductorMaterial::Copper) => Some(WireGauge::Awg6),
            (ElectrodeType::Rod, ConductorMaterial::Aluminum) => Some(WireGauge::Awg4),
            (ElectrodeType::ConcreteEncased, ConductorMaterial::Copper) => Some(WireGauge::Awg4),
            _ => None,
        }
    }
}

/// Input parameters for grounding conductor sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundingInput {
    /// User label
    pub label: String,

    /// EGC or GEC
    pub kind: GroundingKind,

    /// Grounding conductor material
    pub material: ConductorMaterial,

    /// Overcurrent device rating ahead of the circuit (A), EGC only
    pub ocpd_rating_a: f64,

    /// Ungrounded conductor size required for ampacity, EGC only
    pub ungrounded_minimum: WireGauge,

    /// Ungrounded conductor size actually installed, EGC only
    pub ungrounded_actual: WireGauge,

    /// Largest ungrounded service-entrance conductor, GEC only
    pub service_conductor: WireGauge,

    /// Service-entrance conductor material, GEC only
    pub service_material: ConductorMaterial,

    /// Electrode type, GEC only
    pub electrode: ElectrodeType,
}

impl Default for GroundingInput {
    fn default() -> Self {
        GroundingInput {
            label: String::new(),
            kind: GroundingKind::Equipment,
            material: ConductorMaterial::Copper,
            ocpd_rating_a: 20.0,
            ungrounded_minimum: WireGauge::Awg12,
            ungrounded_actual: WireGauge::Awg12,
            service_conductor: WireGauge::Awg2_0,
            service_material: ConductorMaterial::Copper,
            electrode: ElectrodeType::Other,
        }
    }
}

impl GroundingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.kind == GroundingKind::Equipment {
            if self.ocpd_rating_a <= 0.0 {
                return Err(CalcError::invalid_input(
                    "ocpd_rating_a",
                    self.ocpd_rating_a.to_string(),
                    "Overcurrent device rating must be positive",
                ));
            }
            if self.ungrounded_actual < self.ungrounded_minimum {
                return Err(CalcError::invalid_input(
                    "ungrounded_actual",
                    self.ungrounded_actual.key(),
                    "Installed conductors cannot be smaller than the minimum size",
                ));
            }
        }
        Ok(())
    }
}

/// Results from grounding conductor sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingResult {
    /// Conductor kind sized
    pub kind: GroundingKind,

    /// Required grounding conductor size
    pub gauge: WireGauge,

    /// Size read directly from the table
    pub table_gauge: WireGauge,

    /// Circular-mil increase applied under 250.122(B)
    pub upsize_ratio: Option<f64>,

    /// Code table used
    pub reference: String,
}

impl GroundingResult {
    /// Rows for printable summaries
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let mut rows = vec![
            SummaryRow::new(self.kind.display_name(), self.gauge.display_name(), ""),
            SummaryRow::new("Table size", self.table_gauge.display_name(), ""),
        ];
        if let Some(ratio) = self.upsize_ratio {
            rows.push(SummaryRow::new("Proportional increase", format!("{ratio:.2}"), "×"));
        }
        rows.push(SummaryRow::new("Reference", self.reference.clone(), ""));
        rows
    }
}

/// EGC size including the 250.122(B) proportional increase.
pub(crate) fn egc_with_upsizing(
    ocpd_amps: f64,
    material: ConductorMaterial,
    ungrounded_minimum: WireGauge,
    ungrounded_actual: WireGauge,
) -> CalcResult<WireGauge> {
    let base = equipment_grounding_conductor(ocpd_amps, material)
        .ok_or_else(|| CalcError::table_lookup("NEC Table 250.122", format!("{ocpd_amps} A")))?;

    if ungrounded_actual <= ungrounded_minimum {
        return Ok(base);
    }

    let ratio = ungrounded_actual.circular_mils().0 / ungrounded_minimum.circular_mils().0;
    let needed = base.circular_mils().0 * ratio;
    let upsized = WireGauge::smallest_with_area(needed * (1.0 - 1e-9)).unwrap_or(WireGauge::Kcmil1000);

    // 250.122(A): never required larger than the circuit conductors
    Ok(upsized.max(base).min(ungrounded_actual))
}

/// Size a grounding conductor.
pub fn calculate(input: &GroundingInput) -> CalcResult<GroundingResult> {
    input.validate()?;

    match input.kind {
        GroundingKind::Equipment => {
            let table_gauge = equipment_grounding_conductor(input.ocpd_rating_a, input.material)
                .ok_or_else(|| CalcError::table_lookup("NEC Table 250.122", format!("{} A", input.ocpd_rating_a)))?;
            let gauge = egc_with_upsizing(
                input.ocpd_rating_a,
                input.material,
                input.ungrounded_minimum,
                input.ungrounded_actual,
            )?;
            let upsize_ratio = (input.ungrounded_actual > input.ungrounded_minimum).then(|| {
                input.ungrounded_actual.circular_mils().0 / input.ungrounded_minimum.circular_mils().0
            });
            Ok(GroundingResult {
                kind: input.kind,
                gauge,
                table_gauge,
                upsize_ratio,
                reference: "NEC 250.122".to_string(),
            })
        }
        GroundingKind::Electrode => {
            let table_gauge =
                grounding_electrode_conductor(input.service_conductor, input.service_material, input.material);
            let gauge = match input.electrode.cap(input.material) {
                Some(cap) => table_gauge.min(cap),
                None => table_gauge,
            };
            Ok(GroundingResult {
                kind: input.kind,
                gauge,
                table_gauge,
                upsize_ratio: None,
                reference: "NEC 250.66".to_string(),
            })
        }
    }
}
