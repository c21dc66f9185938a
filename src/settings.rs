//! Layered runtime configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `./solar-dashboard.{toml,json,yaml,...}` if present
//! 3. an explicit file passed with `--config`
//! 4. `SOLAR_DASHBOARD_<KEY>` environment variables (lists comma separated)
use crate::error::Result;
use crate::models::Region;
use crate::utils::constants::{
    ENV_PREFIX, GHI, REGIONS_KEY, SETTINGS_FILE_STEM, SUMMARY_METRICS, SUMMARY_METRICS_KEY,
    TIMESTAMP_COLUMN,
};
use crate::utils::paths::default_data_dir;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DashboardSettings {
    /// Unset means `data/` one level above the program directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    pub regions: Vec<Region>,

    #[validate(length(min = 1))]
    pub timestamp_column: String,

    #[validate(length(min = 1))]
    pub summary_metrics: Vec<String>,

    #[validate(length(min = 1))]
    pub ranking_metric: String,

    #[validate(length(min = 1))]
    pub daily_metric: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            regions: Region::ALL.to_vec(),
            timestamp_column: TIMESTAMP_COLUMN.to_string(),
            summary_metrics: SUMMARY_METRICS.iter().map(|m| m.to_string()).collect(),
            ranking_metric: GHI.to_string(),
            daily_metric: GHI.to_string(),
        }
    }
}

impl DashboardSettings {
    /// Load from all sources. `explicit` must exist when given.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with_env(explicit, Self::environment())
    }

    fn load_with_env(explicit: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name(SETTINGS_FILE_STEM).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Self = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key(REGIONS_KEY)
            .with_list_parse_key(SUMMARY_METRICS_KEY)
            .try_parsing(true)
    }

    /// Configured data directory, or the program-relative default.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::Builder;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardSettings::environment().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let settings = DashboardSettings::load_with_env(None, env(&[])).unwrap();
        assert_eq!(settings, DashboardSettings::default());
        assert_eq!(settings.regions, Region::ALL.to_vec());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "regions = [\"togo\", \"benin\"]").unwrap();
        writeln!(file, "ranking_metric = \"DNI\"").unwrap();
        writeln!(file, "data_dir = \"/srv/solar\"").unwrap();

        let settings = DashboardSettings::load_with_env(Some(file.path()), env(&[])).unwrap();

        assert_eq!(settings.regions, vec![Region::Togo, Region::Benin]);
        assert_eq!(settings.ranking_metric, "DNI");
        assert_eq!(settings.data_dir, Some(PathBuf::from("/srv/solar")));
        assert_eq!(settings.daily_metric, "GHI");
    }

    #[test]
    fn test_environment_overrides() {
        let settings = DashboardSettings::load_with_env(
            None,
            env(&[
                ("SOLAR_DASHBOARD_REGIONS", "sierra_leone,togo"),
                ("SOLAR_DASHBOARD_DAILY_METRIC", "Tamb"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.regions, vec![Region::SierraLeone, Region::Togo]);
        assert_eq!(settings.daily_metric, "Tamb");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result =
            DashboardSettings::load_with_env(Some(Path::new("/no/such/settings.toml")), env(&[]));
        assert!(matches!(result, Err(DashboardError::Settings(_))));
    }

    #[test]
    fn test_validation_rejects_empty_metric() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "ranking_metric = \"\"").unwrap();

        let result = DashboardSettings::load_with_env(Some(file.path()), env(&[]));
        assert!(matches!(result, Err(DashboardError::Validation(_))));
    }

    #[test]
    fn test_resolve_data_dir_prefers_configured() {
        let settings = DashboardSettings {
            data_dir: Some(PathBuf::from("/srv/solar")),
            ..DashboardSettings::default()
        };
        assert_eq!(settings.resolve_data_dir().unwrap(), PathBuf::from("/srv/solar"));
    }
}
