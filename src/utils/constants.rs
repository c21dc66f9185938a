/// Column names
pub const TIMESTAMP_COLUMN: &str = "Timestamp";
pub const REGION_COLUMN: &str = "country";
pub const DATE_COLUMN: &str = "Date";

/// Measurement columns every cleaned file must carry
pub const GHI: &str = "GHI";
pub const DNI: &str = "DNI";
pub const DHI: &str = "DHI";
pub const TAMB: &str = "Tamb";

pub const REQUIRED_METRICS: [&str; 4] = [GHI, DNI, DHI, TAMB];
pub const SUMMARY_METRICS: [&str; 4] = [GHI, DNI, DHI, TAMB];

/// Cell texts read as missing values, besides the empty cell
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// File naming
pub const CLEAN_FILE_SUFFIX: &str = "_clean.csv";
pub const DATA_DIR_NAME: &str = "data";

/// Export file names
pub const FILTERED_FILE: &str = "filtered.csv";
pub const SUMMARY_FILE: &str = "summary.csv";
pub const RANKING_FILE: &str = "ranking.csv";
pub const DAILY_AVERAGE_FILE: &str = "daily_average.csv";

/// Configuration
pub const SETTINGS_FILE_STEM: &str = "solar-dashboard";
pub const ENV_PREFIX: &str = "SOLAR_DASHBOARD";
pub const REGIONS_KEY: &str = "regions";
pub const SUMMARY_METRICS_KEY: &str = "summary_metrics";

/// Tukey fence multiplier for box plot whiskers
pub const WHISKER_IQR_FACTOR: f64 = 1.5;
