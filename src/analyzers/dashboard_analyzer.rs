use crate::analyzers::{daily_average, distribution, filter, rank_by_mean, summarize};
use crate::error::Result;
use crate::models::{
    BoxPlotStats, DailyAverageTable, RankedMean, Region, SummaryTable, UnifiedTable,
};
use crate::settings::DashboardSettings;
use crate::utils::constants::{GHI, SUMMARY_METRICS};
use serde::Serialize;
use std::fmt::Write;

/// Everything the rendering side needs for one region selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub selected: Vec<Region>,
    pub rows: usize,
    pub ranking_metric: String,
    pub ranking: Vec<RankedMean>,
    pub distribution_metric: String,
    pub distribution: Vec<BoxPlotStats>,
    pub summary: SummaryTable,
    pub daily: DailyAverageTable,
}

/// Computes the derived tables for a selection using configured metrics.
pub struct DashboardAnalyzer {
    summary_metrics: Vec<String>,
    ranking_metric: String,
    daily_metric: String,
}

impl DashboardAnalyzer {
    pub fn new() -> Self {
        Self {
            summary_metrics: SUMMARY_METRICS.iter().map(|m| m.to_string()).collect(),
            ranking_metric: GHI.to_string(),
            daily_metric: GHI.to_string(),
        }
    }

    pub fn from_settings(settings: &DashboardSettings) -> Self {
        Self {
            summary_metrics: settings.summary_metrics.clone(),
            ranking_metric: settings.ranking_metric.clone(),
            daily_metric: settings.daily_metric.clone(),
        }
    }

    /// `Ok(None)` for an empty selection: nothing to display and no
    /// aggregation is run.
    pub fn analyze(
        &self,
        table: &UnifiedTable,
        selected: &[Region],
    ) -> Result<Option<DashboardView>> {
        if selected.is_empty() {
            return Ok(None);
        }

        let filtered = filter(table, selected);

        // Surface metric typos even when the selection matched no rows
        for metric in self
            .summary_metrics
            .iter()
            .chain([&self.ranking_metric, &self.daily_metric])
        {
            filtered.require_metric(metric)?;
        }

        Ok(Some(DashboardView {
            selected: selected.to_vec(),
            rows: filtered.len(),
            ranking_metric: self.ranking_metric.clone(),
            ranking: rank_by_mean(&filtered, &self.ranking_metric)?,
            distribution_metric: self.ranking_metric.clone(),
            distribution: distribution(&filtered, &self.ranking_metric)?,
            summary: summarize(&filtered, &self.summary_metrics)?,
            daily: daily_average(&filtered, &self.daily_metric)?,
        }))
    }
}

impl Default for DashboardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView {
    /// Plain-text rendering, numbers to two decimals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let names: Vec<String> = self.selected.iter().map(Region::display_name).collect();

        let _ = writeln!(out, "Selected regions: {} ({} rows)", names.join(", "), self.rows);

        let _ = writeln!(out, "\nAverage {} Ranking:", self.ranking_metric);
        for (i, entry) in self.ranking.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {:<14} {:>10.2}",
                i + 1,
                entry.region.display_name(),
                entry.mean
            );
        }

        let _ = writeln!(out, "\n{} Distribution:", self.distribution_metric);
        let _ = writeln!(
            out,
            "    {:<14} {:>10} {:>10} {:>10} {:>10} {:>10} {:>9}",
            "Region", "Min", "Q1", "Median", "Q3", "Max", "Outliers"
        );
        for stats in &self.distribution {
            let _ = writeln!(
                out,
                "    {:<14} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>9}",
                stats.region.display_name(),
                stats.min,
                stats.q1,
                stats.median,
                stats.q3,
                stats.max,
                stats.outliers
            );
        }

        let _ = writeln!(out, "\nSummary Statistics:");
        let _ = writeln!(
            out,
            "    {:<14} {:<8} {:>10} {:>10} {:>10}",
            "Region", "Metric", "Mean", "Median", "Std"
        );
        for row in &self.summary.rows {
            for stats in &row.metrics {
                let _ = writeln!(
                    out,
                    "    {:<14} {:<8} {:>10.2} {:>10.2} {:>10.2}",
                    row.region.display_name(),
                    stats.metric,
                    stats.mean,
                    stats.median,
                    stats.std
                );
            }
        }

        let _ = writeln!(out, "\nDaily Average {}:", self.daily.metric);
        for row in &self.daily.rows {
            let _ = writeln!(
                out,
                "    {:<14} {} {:>10.2}",
                row.region.display_name(),
                row.day,
                row.mean
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::Record;
    use chrono::NaiveDate;

    fn table() -> UnifiedTable {
        let ts = NaiveDate::from_ymd_opt(2021, 8, 9)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let records = vec![
            Record::new(ts, Region::Benin).with_measurements(600.0, 500.0, 100.0, 30.0),
            Record::new(ts, Region::Togo).with_measurements(400.0, 300.0, 100.0, 28.0),
        ];
        let columns = ["Timestamp", "GHI", "DNI", "DHI", "Tamb"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        UnifiedTable::from_records(columns, records)
    }

    #[test]
    fn test_empty_selection_short_circuits() {
        let analyzer = DashboardAnalyzer::new();
        assert!(analyzer.analyze(&table(), &[]).unwrap().is_none());
    }

    #[test]
    fn test_analyze_builds_every_view() {
        let analyzer = DashboardAnalyzer::new();
        let view = analyzer
            .analyze(&table(), &[Region::Togo, Region::Benin])
            .unwrap()
            .unwrap();

        assert_eq!(view.rows, 2);
        assert_eq!(view.ranking[0].region, Region::Benin);
        assert_eq!(view.summary.rows.len(), 2);
        assert_eq!(view.daily.len(), 2);
        assert_eq!(view.distribution.len(), 2);

        let text = view.render_text();
        assert!(text.contains("Togo, Benin"));
        assert!(text.contains("600.00"));
    }

    #[test]
    fn test_metric_typo_surfaces_for_unmatched_selection() {
        let mut settings = DashboardSettings::default();
        settings.daily_metric = "GHi".to_string();
        let analyzer = DashboardAnalyzer::from_settings(&settings);

        let result = analyzer.analyze(&table(), &[Region::SierraLeone]);
        assert!(matches!(result, Err(DashboardError::MetricNotFound { .. })));
    }
}
