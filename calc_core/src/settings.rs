//! # Site Settings
//!
//! Optional TOML configuration. Every key has a default, so an empty file
//! (or no file) is valid.
//!
//! ```toml
//! code_edition = "NEC 2023"
//!
//! [site]
//! base_url = "https://calc.example.com"
//!
//! [defaults]
//! material = "aluminum"
//! max_drop_pct = 5.0
//! ambient_temp_c = 40.0
//! insulation_rating = "75"
//!
//! [report]
//! prepared_by = "J. Smith"
//! company = "Smith Electric"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::{ConductorMaterial, TemperatureRating};

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Code edition shown on printed summaries
    pub code_edition: String,

    pub site: SiteSettings,

    pub defaults: DefaultSettings,

    pub report: ReportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            code_edition: "NEC 2023".to_string(),
            site: SiteSettings::default(),
            defaults: DefaultSettings::default(),
            report: ReportSettings::default(),
        }
    }
}

/// Public site location, used to build share links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub base_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            base_url: "https://example.com".to_string(),
        }
    }
}

/// Form defaults applied to every calculator that has the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    /// Conductor material
    pub material: ConductorMaterial,

    /// Voltage drop limit (%)
    pub max_drop_pct: f64,

    /// Ambient temperature (°C)
    pub ambient_temp_c: f64,

    /// Conductor insulation rating
    pub insulation_rating: TemperatureRating,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        DefaultSettings {
            material: ConductorMaterial::Copper,
            max_drop_pct: 3.0,
            ambient_temp_c: 30.0,
            insulation_rating: TemperatureRating::C90,
        }
    }
}

/// Printed summary header
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub prepared_by: Option<String>,
    pub company: Option<String>,
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    /// - `CalcError::SettingsFile` if the file cannot be read
    /// - `CalcError::Malformed` if the TOML is malformed
    /// - `CalcError::InvalidInput` if a value is out of range
    pub fn load(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CalcError::settings_file(path.display().to_string(), e.to_string()))?;
        let settings = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(s: &str) -> CalcResult<Self> {
        let settings: Settings =
            toml::from_str(s).map_err(|e| CalcError::malformed(format!("Invalid settings TOML: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values that the type system does not.
    pub fn validate(&self) -> CalcResult<()> {
        url::Url::parse(&self.site.base_url)
            .map_err(|e| CalcError::invalid_input("site.base_url", &self.site.base_url, e.to_string()))?;
        if self.defaults.max_drop_pct <= 0.0 || self.defaults.max_drop_pct > 100.0 {
            return Err(CalcError::invalid_input(
                "defaults.max_drop_pct",
                self.defaults.max_drop_pct.to_string(),
                "Limit must be between 0 and 100 percent",
            ));
        }
        if !(-40.0..=85.0).contains(&self.defaults.ambient_temp_c) {
            return Err(CalcError::invalid_input(
                "defaults.ambient_temp_c",
                self.defaults.ambient_temp_c.to_string(),
                "Ambient temperature must be between -40 and 85 °C",
            ));
        }
        Ok(())
    }

    /// "Prepared by" line for printed summaries
    pub fn prepared_by(&self) -> Option<String> {
        match (&self.report.prepared_by, &self.report.company) {
            (Some(name), Some(company)) => Some(format!("{name}, {company}")),
            (Some(name), None) => Some(name.clone()),
            (None, Some(company)) => Some(company.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_toml() {
        let toml_str = r#"
            [defaults]
            material = "aluminum"
            max_drop_pct = 5.0

            [report]
            prepared_by = "J. Smith"
            company = "Smith Electric"
        "#;
        let settings = Settings::from_toml_str(toml_str).unwrap();
        assert_eq!(settings.defaults.material, ConductorMaterial::Aluminum);
        assert_eq!(settings.defaults.max_drop_pct, 5.0);
        assert_eq!(settings.defaults.ambient_temp_c, 30.0);
        assert_eq!(settings.site.base_url, "https://example.com");
        assert_eq!(settings.prepared_by().as_deref(), Some("J. Smith, Smith Electric"));
    }

    #[test]
    fn test_insulation_rating_key() {
        let settings = Settings::from_toml_str("[defaults]\ninsulation_rating = \"75\"").unwrap();
        assert_eq!(settings.defaults.insulation_rating, TemperatureRating::C75);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Settings::from_toml_str("[site]\nbase_url = \"not a url\""),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            Settings::from_toml_str("[defaults]\nmax_drop_pct = 0.0"),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(Settings::from_toml_str("code_edition = ["), Err(CalcError::Malformed { .. })));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Settings::load("/nonexistent/voltwise.toml"),
            Err(CalcError::SettingsFile { .. })
        ));
    }
}
