use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cleaned data for {region} could not be read at `{}`: {source}", path.display())]
    LoadFailure {
        region: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data for {region} in `{}` at line {line}: {message}", path.display())]
    ParseFailure {
        region: String,
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Required column '{column}' missing from {region} data at `{}`", path.display())]
    MissingColumn {
        region: String,
        path: PathBuf,
        column: String,
    },

    #[error("Configuration error: metric '{metric}' is not present in the table (available: {})", available.join(", "))]
    MetricNotFound {
        metric: String,
        available: Vec<String>,
    },

    #[error("Metric '{metric}' holds non-numeric value '{value}'")]
    NonNumericMetric { metric: String, value: String },

    #[error("Unknown region: '{0}'")]
    UnknownRegion(String),

    #[error("Configuration error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
