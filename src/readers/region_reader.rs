use crate::error::{DashboardError, Result};
use crate::models::{Record, Region};
use crate::utils::constants::{REQUIRED_METRICS, TIMESTAMP_COLUMN};
use crate::utils::cells::parse_numeric_cell;
use crate::utils::timestamp::parse_timestamp;
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::path::Path;
use tracing::warn;

/// Rows of one region's cleaned file together with its header, in file order.
#[derive(Debug, Clone)]
pub struct RegionData {
    pub region: Region,
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

/// Reads a single `<region>_clean.csv`. Any malformed row rejects the whole
/// file.
pub struct RegionReader {
    timestamp_column: String,
}

impl RegionReader {
    pub fn new() -> Self {
        Self {
            timestamp_column: TIMESTAMP_COLUMN.to_string(),
        }
    }

    pub fn with_timestamp_column(timestamp_column: &str) -> Self {
        Self {
            timestamp_column: timestamp_column.to_string(),
        }
    }

    pub fn timestamp_column(&self) -> &str {
        &self.timestamp_column
    }

    /// Read and parse the file for `region`. The file handle is closed before
    /// parsing starts.
    pub fn read_region(&self, region: Region, path: &Path) -> Result<RegionData> {
        let bytes = std::fs::read(path).map_err(|source| DashboardError::LoadFailure {
            region: region.id().to_string(),
            path: path.to_path_buf(),
            source,
        })?;

        let text = decode_text(&bytes, path);
        self.parse_region(region, path, text.as_bytes())
    }

    /// Parse already-loaded CSV content for `region`.
    pub fn parse_region(&self, region: Region, path: &Path, content: &[u8]) -> Result<RegionData> {
        let parse_failure = |line: u64, message: String| DashboardError::ParseFailure {
            region: region.id().to_string(),
            path: path.to_path_buf(),
            line,
            message,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|e| parse_failure(1, e.to_string()))?
            .clone();
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();

        let column_index = |name: &str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| DashboardError::MissingColumn {
                    region: region.id().to_string(),
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };

        let timestamp_idx = column_index(&self.timestamp_column)?;
        let mut metric_idx = [0usize; 4];
        for (slot, metric) in metric_idx.iter_mut().zip(REQUIRED_METRICS) {
            *slot = column_index(metric)?;
        }

        let mut records = Vec::new();

        for row in reader.records() {
            let row = row.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                parse_failure(line, e.to_string())
            })?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);

            let raw_ts = row.get(timestamp_idx).unwrap_or("");
            let timestamp = parse_timestamp(raw_ts).ok_or_else(|| {
                parse_failure(
                    line,
                    format!(
                        "invalid timestamp '{}' in column '{}'",
                        raw_ts, self.timestamp_column
                    ),
                )
            })?;

            let mut values = [None; 4];
            for ((value, &idx), metric) in values.iter_mut().zip(&metric_idx).zip(REQUIRED_METRICS) {
                *value = parse_numeric_cell(row.get(idx).unwrap_or("")).map_err(|raw| {
                    parse_failure(
                        line,
                        format!("non-numeric value '{}' in column '{}'", raw, metric),
                    )
                })?;
            }

            // REQUIRED_METRICS order: GHI, DNI, DHI, Tamb
            let [ghi, dni, dhi, tamb] = values;
            let mut record = Record::new(timestamp, region);
            record.ghi = ghi;
            record.dni = dni;
            record.dhi = dhi;
            record.tamb = tamb;

            for (idx, (column, value)) in columns.iter().zip(row.iter()).enumerate() {
                if idx == timestamp_idx || metric_idx.contains(&idx) {
                    continue;
                }
                record.extra.insert(column.clone(), value.to_string());
            }

            records.push(record);
        }

        Ok(RegionData {
            region,
            columns,
            records,
        })
    }
}

impl Default for RegionReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode file bytes as UTF-8 (dropping a BOM), falling back to Windows-1252.
fn decode_text<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text;
    }

    warn!(
        "{} is not valid UTF-8, decoding as Windows-1252",
        path.display()
    );
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}
