use crate::models::Region;
use chrono::NaiveDate;
use serde::Serialize;

/// Mean, median and sample standard deviation of one metric for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricStats {
    pub metric: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub region: Region,
    pub metrics: Vec<MetricStats>,
}

/// Per-region statistics, rows in first-appearance order of the regions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryTable {
    pub metrics: Vec<String>,
    pub rows: Vec<RegionSummary>,
}

impl SummaryTable {
    pub fn get(&self, region: Region, metric: &str) -> Option<&MetricStats> {
        self.rows
            .iter()
            .find(|row| row.region == region)
            .and_then(|row| row.metrics.iter().find(|m| m.metric == metric))
    }

    pub fn regions(&self) -> Vec<Region> {
        self.rows.iter().map(|row| row.region).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedMean {
    pub region: Region,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverage {
    pub region: Region,
    pub day: NaiveDate,
    pub mean: f64,
    pub count: usize,
}

/// Mean of one metric per (region, calendar day). Only days with at least one
/// value appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyAverageTable {
    pub metric: String,
    pub rows: Vec<DailyAverage>,
}

impl DailyAverageTable {
    pub fn rows_for(&self, region: Region) -> impl Iterator<Item = &DailyAverage> + '_ {
        self.rows.iter().filter(move |row| row.region == region)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Five-number summary plus Tukey whiskers for a box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotStats {
    pub region: Region,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: usize,
}
