//! # Unit Types
//!
//! `f64` newtypes for the electrical quantities the calculators pass around.
//! Each one serializes as a bare number and prints with its symbol, so
//! `Volts(240.0)` is `240.0` in JSON and `240 V` on screen.
//!
//! ```rust
//! use calc_core::units::{BtuPerHour, Feet, Kilowatts, Meters, Volts};
//!
//! let run_ft: Feet = Meters(30.48).into();
//! assert!((run_ft.0 - 100.0).abs() < 1e-9);
//!
//! let heat: BtuPerHour = Kilowatts(1.0).into();
//! assert!((heat.0 - 3412.142).abs() < 1e-6);
//!
//! assert_eq!(Volts(240.0).to_string(), "240 V");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Meters per foot (exact)
pub const METERS_PER_FOOT: f64 = 0.3048;

pub const BTU_PER_HR_PER_KW: f64 = 3412.142;

/// Kilowatts per mechanical horsepower
pub const KW_PER_HP: f64 = 0.746;

macro_rules! unit {
    ($(#[$doc:meta])* $name:ident, $symbol:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            pub const SYMBOL: &'static str = $symbol;

            pub fn value(self) -> f64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*} {}", p, self.0, $symbol),
                    None => write!(f, "{} {}", self.0, $symbol),
                }
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, k: f64) -> Self {
                Self(self.0 * k)
            }
        }

        impl Div<f64> for $name {
            type Output = Self;
            fn div(self, k: f64) -> Self {
                Self(self.0 / k)
            }
        }
    };
}

unit!(Volts, "V");
unit!(Amps, "A");
unit!(Ohms, "Ω");
unit!(Watts, "W");
unit!(Kilowatts, "kW");
unit!(
    /// Apparent power
    KiloVoltAmps,
    "kVA"
);
unit!(BtuPerHour, "BTU/hr");
unit!(
    /// Mechanical horsepower (746 W)
    Horsepower,
    "HP"
);
unit!(Feet, "ft");
unit!(Meters, "m");
unit!(
    /// Conductor cross-section
    CircularMils,
    "cmil"
);

impl From<Watts> for Kilowatts {
    fn from(w: Watts) -> Self {
        Kilowatts(w.0 / 1000.0)
    }
}

impl From<Kilowatts> for Watts {
    fn from(kw: Kilowatts) -> Self {
        Watts(kw.0 * 1000.0)
    }
}

impl From<Kilowatts> for BtuPerHour {
    fn from(kw: Kilowatts) -> Self {
        BtuPerHour(kw.0 * BTU_PER_HR_PER_KW)
    }
}

impl From<BtuPerHour> for Kilowatts {
    fn from(btu: BtuPerHour) -> Self {
        Kilowatts(btu.0 / BTU_PER_HR_PER_KW)
    }
}

impl From<Horsepower> for Kilowatts {
    fn from(hp: Horsepower) -> Self {
        Kilowatts(hp.0 * KW_PER_HP)
    }
}

impl From<Kilowatts> for Horsepower {
    fn from(kw: Kilowatts) -> Self {
        Horsepower(kw.0 / KW_PER_HP)
    }
}

impl KiloVoltAmps {
    /// Real power delivered at `power_factor`
    pub fn to_kilowatts(self, power_factor: f64) -> Kilowatts {
        Kilowatts(self.0 * power_factor)
    }
}

impl Kilowatts {
    /// Apparent power needed to deliver this real power at `power_factor`
    pub fn to_kva(self, power_factor: f64) -> KiloVoltAmps {
        KiloVoltAmps(self.0 / power_factor)
    }
}

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 / METERS_PER_FOOT)
    }
}

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * METERS_PER_FOOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_feet() {
        let ft: Feet = Meters(3.048).into();
        assert!((ft.0 - 10.0).abs() < 1e-9);
        let m: Meters = Feet(100.0).into();
        assert!((m.0 - 30.48).abs() < 1e-9);
    }

    #[test]
    fn test_power_conversions() {
        let kw: Kilowatts = Horsepower(10.0).into();
        assert!((kw.0 - 7.46).abs() < 1e-9);

        // one ton of cooling
        let kw: Kilowatts = BtuPerHour(12_000.0).into();
        assert!((kw.0 - 3.5168).abs() < 1e-3);

        let w: Watts = Kilowatts(1.5).into();
        assert_eq!(w.0, 1500.0);
    }

    #[test]
    fn test_kva_kw() {
        assert!((KiloVoltAmps(100.0).to_kilowatts(0.8).0 - 80.0).abs() < 1e-9);
        assert!((Kilowatts(80.0).to_kva(0.8).0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        assert!(((Volts(120.0) - Volts(7.92)).0 - 112.08).abs() < 1e-9);
        assert_eq!((Amps(10.0) * 1.25).0, 12.5);
        assert_eq!((Ohms(2.0) / 2.0).0, 1.0);
        assert_eq!((Feet(40.0) + Feet(60.0)).value(), 100.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Amps(12.5).to_string(), "12.5 A");
        assert_eq!(format!("{:.2}", Ohms(0.12345)), "0.12 Ω");
        assert_eq!(KiloVoltAmps::SYMBOL, "kVA");
    }

    #[test]
    fn test_bare_number_json() {
        let json = serde_json::to_string(&Volts(240.0)).unwrap();
        assert_eq!(json, "240.0");
        let back: Volts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Volts(240.0));
    }
}
