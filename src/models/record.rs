use crate::error::{DashboardError, Result};
use crate::models::Region;
use crate::utils::cells::parse_numeric_cell;
use crate::utils::constants::{DHI, DNI, GHI, TAMB};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// One timestamped measurement row. The irradiance and temperature fields are
/// typed; any other source column is carried through untouched in `extra`.
/// A missing measurement cell is stored as `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    pub region: Region,
    pub ghi: Option<f64>,
    pub dni: Option<f64>,
    pub dhi: Option<f64>,
    pub tamb: Option<f64>,
    pub extra: BTreeMap<String, String>,
}

impl Record {
    pub fn new(timestamp: NaiveDateTime, region: Region) -> Self {
        Self {
            timestamp,
            region,
            ghi: None,
            dni: None,
            dhi: None,
            tamb: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_measurements(mut self, ghi: f64, dni: f64, dhi: f64, tamb: f64) -> Self {
        self.ghi = Some(ghi);
        self.dni = Some(dni);
        self.dhi = Some(dhi);
        self.tamb = Some(tamb);
        self
    }

    pub fn with_extra(mut self, column: &str, value: &str) -> Self {
        self.extra.insert(column.to_string(), value.to_string());
        self
    }

    /// Numeric value of `metric` for this row. `Ok(None)` means the cell is
    /// missing (empty, an NA marker or non-finite) or the column is absent
    /// from this region's file.
    pub fn value(&self, metric: &str) -> Result<Option<f64>> {
        let typed = match metric {
            GHI => self.ghi,
            DNI => self.dni,
            DHI => self.dhi,
            TAMB => self.tamb,
            other => {
                let raw = self.extra.get(other).map(String::as_str).unwrap_or("");
                return parse_numeric_cell(raw).map_err(|value| DashboardError::NonNumericMetric {
                    metric: other.to_string(),
                    value,
                });
            }
        };
        Ok(typed.filter(|v| v.is_finite()))
    }

    /// Raw cell text for export, in the same form it was read.
    pub fn cell(&self, column: &str) -> String {
        let format_opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
        match column {
            GHI => format_opt(self.ghi),
            DNI => format_opt(self.dni),
            DHI => format_opt(self.dhi),
            TAMB => format_opt(self.tamb),
            other => self.extra.get(other).cloned().unwrap_or_default(),
        }
    }
}
