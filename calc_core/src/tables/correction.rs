//! Ampacity correction and adjustment factors.
//!
//! - Table 310.15(B)(1): ambient temperature correction, 30°C basis
//! - Table 310.15(C)(1): more than three current-carrying conductors

use super::ampacity::TemperatureRating;

/// (upper bound of ambient range °C, [60°C, 75°C, 90°C]); 0.0 = not permitted
const AMBIENT_CORRECTION: [(f64, [f64; 3]); 16] = [
    (10.0, [1.29, 1.20, 1.15]),
    (15.0, [1.22, 1.15, 1.12]),
    (20.0, [1.15, 1.11, 1.08]),
    (25.0, [1.08, 1.05, 1.04]),
    (30.0, [1.00, 1.00, 1.00]),
    (35.0, [0.91, 0.94, 0.96]),
    (40.0, [0.82, 0.88, 0.91]),
    (45.0, [0.71, 0.82, 0.87]),
    (50.0, [0.58, 0.75, 0.82]),
    (55.0, [0.41, 0.67, 0.76]),
    (60.0, [0.0, 0.58, 0.71]),
    (65.0, [0.0, 0.47, 0.65]),
    (70.0, [0.0, 0.33, 0.58]),
    (75.0, [0.0, 0.0, 0.50]),
    (80.0, [0.0, 0.0, 0.41]),
    (85.0, [0.0, 0.0, 0.29]),
];

/// Ambient temperature correction factor.
///
/// Ranges in the table are whole degrees (e.g. 31-35°C), so the ambient is
/// rounded up before lookup. Returns `None` above the insulation's limit.
pub fn temperature_correction(ambient_c: f64, rating: TemperatureRating) -> Option<f64> {
    let col = match rating {
        TemperatureRating::C60 => 0,
        TemperatureRating::C75 => 1,
        TemperatureRating::C90 => 2,
    };
    let ambient = ambient_c.ceil();
    AMBIENT_CORRECTION
        .iter()
        .find(|(upper, _)| ambient <= *upper)
        .map(|(_, factors)| factors[col])
        .filter(|f| *f > 0.0)
}

/// Adjustment factor for more than three current-carrying conductors.
pub fn adjustment_factor(current_carrying_conductors: u32) -> f64 {
    match current_carrying_conductors {
        0..=3 => 1.00,
        4..=6 => 0.80,
        7..=9 => 0.70,
        10..=20 => 0.50,
        21..=30 => 0.45,
        31..=40 => 0.40,
        _ => 0.35,
    }
}

/// Rows of the ambient correction table for display: (range label, factors)
pub fn ambient_rows() -> Vec<(String, [Option<f64>; 3])> {
    let mut lower: Option<f64> = None;
    AMBIENT_CORRECTION
        .iter()
        .map(|(upper, factors)| {
            let label = match lower {
                None => format!("{upper:.0} or less"),
                Some(l) => format!("{:.0}-{upper:.0}", l + 1.0),
            };
            lower = Some(*upper);
            let cells = factors.map(|f| if f > 0.0 { Some(f) } else { None });
            (label, cells)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_is_unity() {
        for rating in TemperatureRating::ALL {
            assert_eq!(temperature_correction(30.0, rating), Some(1.0));
        }
    }

    #[test]
    fn test_hot_ambient() {
        assert_eq!(temperature_correction(40.0, TemperatureRating::C90), Some(0.91));
        // 40.5°C falls in the 41-45 row
        assert_eq!(temperature_correction(40.5, TemperatureRating::C75), Some(0.82));
        assert_eq!(temperature_correction(58.0, TemperatureRating::C60), None);
        assert_eq!(temperature_correction(90.0, TemperatureRating::C90), None);
    }

    #[test]
    fn test_cold_ambient() {
        assert_eq!(temperature_correction(-10.0, TemperatureRating::C60), Some(1.29));
    }

    #[test]
    fn test_adjustment() {
        assert_eq!(adjustment_factor(3), 1.0);
        assert_eq!(adjustment_factor(4), 0.8);
        assert_eq!(adjustment_factor(9), 0.7);
        assert_eq!(adjustment_factor(20), 0.5);
        assert_eq!(adjustment_factor(45), 0.35);
    }

    #[test]
    fn test_ambient_rows() {
        let rows = ambient_rows();
        assert_eq!(rows[0].0, "10 or less");
        assert_eq!(rows[5].0, "31-35");
        assert_eq!(rows[10].1[0], None);
    }
}
