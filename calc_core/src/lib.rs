//! # calc_core - Electrical Reference Calculation Engine
//!
//! `calc_core` is the computational heart of Voltwise: NEC reference tables,
//! a set of small electrical calculators, and everything around them a
//! calculator page needs (form state, shareable links, printable summaries).
//! All inputs and outputs are JSON-serializable.
//!
//! Calculators are pure `calculate(&Input) -> CalcResult<Result>` functions;
//! NEC data lives in `const` tables keyed by gauge, trade size or temperature.
//! Nothing here touches the network, and only [`settings`] reads
//! files.
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::voltage_drop::{calculate, VoltageDropInput};
//!
//! // 12 AWG copper, 100 ft one way, 20 A at 120 V
//! let result = calculate(&VoltageDropInput::default()).unwrap();
//! assert!((result.voltage_drop_v - 7.92).abs() < 1e-9);
//! assert!((result.voltage_drop_pct - 6.6).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The calculators and the `CalculationItem` dispatch enum
//! - [`tables`] - NEC reference tables (Chapter 9, 310.16, 314.16, 250.122, 250.66)
//! - [`routes`] - Calculator and guide pages
//! - [`form`] - Controlled form state for a calculator
//! - [`share`] - Shareable links
//! - [`report`] / [`pdf`] - Printable summaries
//! - [`settings`] - TOML configuration
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod form;
pub mod pdf;
pub mod report;
pub mod routes;
pub mod settings;
pub mod share;
pub mod tables;
pub mod units;

pub use calculations::{CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult};
pub use form::FormState;
pub use routes::{find_route, CalculatorKind, Page};
pub use settings::Settings;
pub use share::{parse_share_url, share_url};
