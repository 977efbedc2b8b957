//! Grounding conductor sizing tables.
//!
//! - Table 250.122: minimum equipment grounding conductor by OCPD rating
//! - Table 250.66: grounding electrode conductor by largest service conductor

use super::awg::{ConductorMaterial, WireGauge};

/// (OCPD rating not exceeding, copper EGC, aluminum EGC)
const TABLE_250_122: [(u32, WireGauge, WireGauge); 17] = [
    (15, WireGauge::Awg14, WireGauge::Awg12),
    (20, WireGauge::Awg12, WireGauge::Awg10),
    (60, WireGauge::Awg10, WireGauge::Awg8),
    (100, WireGauge::Awg8, WireGauge::Awg6),
    (200, WireGauge::Awg6, WireGauge::Awg4),
    (300, WireGauge::Awg4, WireGauge::Awg2),
    (400, WireGauge::Awg3, WireGauge::Awg1),
    (500, WireGauge::Awg2, WireGauge::Awg1_0),
    (600, WireGauge::Awg1, WireGauge::Awg2_0),
    (800, WireGauge::Awg1_0, WireGauge::Awg3_0),
    (1000, WireGauge::Awg2_0, WireGauge::Awg4_0),
    (1200, WireGauge::Awg3_0, WireGauge::Kcmil250),
    (1600, WireGauge::Awg4_0, WireGauge::Kcmil350),
    (2000, WireGauge::Kcmil250, WireGauge::Kcmil400),
    (2500, WireGauge::Kcmil350, WireGauge::Kcmil600),
    (3000, WireGauge::Kcmil400, WireGauge::Kcmil600),
    (4000, WireGauge::Kcmil500, WireGauge::Kcmil750),
];

/// Minimum equipment grounding conductor size per Table 250.122.
///
/// `None` for ratings above 4000 A.
pub fn equipment_grounding_conductor(ocpd_amps: f64, material: ConductorMaterial) -> Option<WireGauge> {
    TABLE_250_122
        .iter()
        .find(|(rating, _, _)| ocpd_amps <= f64::from(*rating))
        .map(|(_, cu, al)| match material {
            ConductorMaterial::Copper => *cu,
            ConductorMaterial::Aluminum => *al,
        })
}

/// Rows of Table 250.122 for display
pub fn table_250_122_rows() -> impl Iterator<Item = (u32, WireGauge, WireGauge)> {
    TABLE_250_122.iter().copied()
}

/// Table 250.66 rows: (largest Cu service conductor, largest Al service conductor,
/// copper GEC, aluminum GEC). A row applies when the service conductor does not
/// exceed the listed size.
const TABLE_250_66: [(WireGauge, WireGauge, WireGauge, WireGauge); 6] = [
    (WireGauge::Awg2, WireGauge::Awg1_0, WireGauge::Awg8, WireGauge::Awg6),
    (WireGauge::Awg1_0, WireGauge::Awg3_0, WireGauge::Awg6, WireGauge::Awg4),
    (WireGauge::Awg3_0, WireGauge::Kcmil250, WireGauge::Awg4, WireGauge::Awg2),
    (WireGauge::Kcmil350, WireGauge::Kcmil500, WireGauge::Awg2, WireGauge::Awg1_0),
    (WireGauge::Kcmil600, WireGauge::Kcmil750, WireGauge::Awg1_0, WireGauge::Awg3_0),
    (WireGauge::Kcmil1000, WireGauge::Kcmil1000, WireGauge::Awg2_0, WireGauge::Awg4_0),
];

/// Grounding electrode conductor size per Table 250.66.
///
/// The table's final row covers service conductors over 1100 kcmil Cu /
/// 1750 kcmil Al, beyond the largest size carried here.
pub fn grounding_electrode_conductor(
    largest_service: WireGauge,
    service_material: ConductorMaterial,
    gec_material: ConductorMaterial,
) -> WireGauge {
    let row = TABLE_250_66
        .iter()
        .find(|(cu_max, al_max, _, _)| match service_material {
            ConductorMaterial::Copper => largest_service <= *cu_max,
            ConductorMaterial::Aluminum => largest_service <= *al_max,
        })
        .unwrap_or(&TABLE_250_66[TABLE_250_66.len() - 1]);

    match gec_material {
        ConductorMaterial::Copper => row.2,
        ConductorMaterial::Aluminum => row.3,
    }
}

/// Rows of Table 250.66 for display: (Cu service range, Al service range, Cu GEC, Al GEC)
pub fn table_250_66_rows() -> Vec<(String, String, WireGauge, WireGauge)> {
    let mut prev: Option<(WireGauge, WireGauge)> = None;
    TABLE_250_66
        .iter()
        .map(|(cu, al, gec_cu, gec_al)| {
            let (cu_range, al_range) = match prev {
                None => (format!("{} or smaller", cu.display_name()), format!("{} or smaller", al.display_name())),
                Some((pcu, pal)) => (
                    format!("over {} through {}", pcu.display_name(), cu.display_name()),
                    format!("over {} through {}", pal.display_name(), al.display_name()),
                ),
            };
            prev = Some((*cu, *al));
            (cu_range, al_range, *gec_cu, *gec_al)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_egc_lookup() {
        assert_eq!(equipment_grounding_conductor(20.0, ConductorMaterial::Copper), Some(WireGauge::Awg12));
        assert_eq!(equipment_grounding_conductor(30.0, ConductorMaterial::Copper), Some(WireGauge::Awg10));
        assert_eq!(equipment_grounding_conductor(100.0, ConductorMaterial::Aluminum), Some(WireGauge::Awg6));
        assert_eq!(equipment_grounding_conductor(225.0, ConductorMaterial::Copper), Some(WireGauge::Awg4));
        assert_eq!(equipment_grounding_conductor(4500.0, ConductorMaterial::Copper), None);
    }

    #[test]
    fn test_gec_lookup() {
        use ConductorMaterial::{Aluminum, Copper};
        assert_eq!(grounding_electrode_conductor(WireGauge::Awg2, Copper, Copper), WireGauge::Awg8);
        assert_eq!(grounding_electrode_conductor(WireGauge::Awg2_0, Copper, Copper), WireGauge::Awg4);
        assert_eq!(grounding_electrode_conductor(WireGauge::Awg4_0, Copper, Copper), WireGauge::Awg2);
        assert_eq!(grounding_electrode_conductor(WireGauge::Kcmil350, Aluminum, Copper), WireGauge::Awg2);
        assert_eq!(grounding_electrode_conductor(WireGauge::Kcmil750, Copper, Aluminum), WireGauge::Awg4_0);
    }

    #[test]
    fn test_250_66_rows() {
        let rows = table_250_66_rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].0, "2 AWG or smaller");
        assert!(rows[1].0.starts_with("over 2 AWG"));
    }
}
