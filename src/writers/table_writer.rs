use crate::analyzers::DashboardView;
use crate::error::Result;
use crate::models::{DailyAverageTable, FilteredTable, RankedMean, SummaryTable};
use crate::utils::constants::{
    DAILY_AVERAGE_FILE, DATE_COLUMN, FILTERED_FILE, RANKING_FILE, REGION_COLUMN, SUMMARY_FILE,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes derived tables as CSV (or JSON) for consumers outside the CLI.
pub struct TableWriter;

impl TableWriter {
    pub fn new() -> Self {
        Self
    }

    /// Filtered rows with every source column plus the region display name.
    pub fn write_filtered(&self, filtered: &FilteredTable<'_>, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(filtered.columns())?;

        for record in filtered.iter() {
            let row = filtered.columns().iter().map(|column| {
                if column == filtered.timestamp_column() {
                    record.timestamp.format(TIMESTAMP_FORMAT).to_string()
                } else if column == REGION_COLUMN {
                    record.region.display_name()
                } else {
                    record.cell(column)
                }
            });
            writer.write_record(row)?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn write_summary(&self, summary: &SummaryTable, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([REGION_COLUMN, "metric", "count", "mean", "median", "std"])?;

        for row in &summary.rows {
            for stats in &row.metrics {
                writer.write_record([
                    row.region.display_name(),
                    stats.metric.clone(),
                    stats.count.to_string(),
                    stats.mean.to_string(),
                    stats.median.to_string(),
                    stats.std.to_string(),
                ])?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    pub fn write_ranking(&self, ranking: &[RankedMean], metric: &str, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        let mean_header = format!("mean_{}", metric);
        writer.write_record(["rank", REGION_COLUMN, mean_header.as_str()])?;

        for (i, entry) in ranking.iter().enumerate() {
            writer.write_record([
                (i + 1).to_string(),
                entry.region.display_name(),
                entry.mean.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn write_daily(&self, daily: &DailyAverageTable, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([REGION_COLUMN, DATE_COLUMN, daily.metric.as_str(), "count"])?;

        for row in &daily.rows {
            writer.write_record([
                row.region.display_name(),
                row.day.to_string(),
                row.mean.to_string(),
                row.count.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn write_json<T: Serialize>(&self, value: &T, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the filtered rows and every derived table into `output_dir`.
    pub fn export_all(
        &self,
        filtered: &FilteredTable<'_>,
        view: &DashboardView,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;

        let filtered_path = output_dir.join(FILTERED_FILE);
        let summary_path = output_dir.join(SUMMARY_FILE);
        let ranking_path = output_dir.join(RANKING_FILE);
        let daily_path = output_dir.join(DAILY_AVERAGE_FILE);

        self.write_filtered(filtered, &filtered_path)?;
        self.write_summary(&view.summary, &summary_path)?;
        self.write_ranking(&view.ranking, &view.ranking_metric, &ranking_path)?;
        self.write_daily(&view.daily, &daily_path)?;

        info!("Exported {} rows to {}", filtered.len(), output_dir.display());

        Ok(vec![filtered_path, summary_path, ranking_path, daily_path])
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{filter, DashboardAnalyzer};
    use crate::models::{Record, Region, UnifiedTable};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn table() -> UnifiedTable {
        let ts = NaiveDate::from_ymd_opt(2021, 8, 9)
            .unwrap()
            .and_hms_opt(13, 30, 0)
            .unwrap();
        let records = vec![
            Record::new(ts, Region::SierraLeone)
                .with_measurements(812.5, 640.0, 210.0, 31.2)
                .with_extra("RH", "61.0"),
            Record::new(ts, Region::Benin)
                .with_measurements(700.0, 500.0, 200.0, 30.0)
                .with_extra("RH", "55.5"),
        ];
        let columns = ["Timestamp", "GHI", "DNI", "DHI", "Tamb", "RH"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        UnifiedTable::from_records(columns, records)
    }

    #[test]
    fn test_write_filtered_rows() -> Result<()> {
        let dir = TempDir::new()?;
        let table = table();
        let path = dir.path().join("filtered.csv");

        TableWriter::new().write_filtered(&filter(&table, &[Region::SierraLeone]), &path)?;

        let content = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Timestamp,GHI,DNI,DHI,Tamb,RH,country");
        assert_eq!(lines[1], "2021-08-09 13:30:00,812.5,640,210,31.2,61.0,Sierra Leone");
        assert_eq!(lines.len(), 2);
        Ok(())
    }

    #[test]
    fn test_write_filtered_uses_table_timestamp_column() -> Result<()> {
        let dir = TempDir::new()?;
        let ts = NaiveDate::from_ymd_opt(2021, 8, 9)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        let columns = ["time", "GHI", "DNI", "DHI", "Tamb"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let table = UnifiedTable::from_records(
            columns,
            vec![Record::new(ts, Region::Togo).with_measurements(5.0, 4.0, 1.0, 24.0)],
        )
        .with_timestamp_column("time");
        let path = dir.path().join("filtered.csv");

        TableWriter::new().write_filtered(&table.view(), &path)?;

        let content = std::fs::read_to_string(&path)?;
        assert_eq!(
            content.lines().collect::<Vec<_>>(),
            vec!["time,GHI,DNI,DHI,Tamb,country", "2021-08-09 06:00:00,5,4,1,24,Togo"]
        );
        Ok(())
    }

    #[test]
    fn test_export_all() -> Result<()> {
        let dir = TempDir::new()?;
        let table = table();
        let selected = [Region::Benin, Region::SierraLeone];
        let filtered = filter(&table, &selected);
        let view = DashboardAnalyzer::new().analyze(&table, &selected)?.unwrap();

        let out = dir.path().join("export");
        let written = TableWriter::new().export_all(&filtered, &view, &out)?;

        assert_eq!(written.len(), 4);
        assert!(written.iter().all(|p| p.exists()));

        let ranking = std::fs::read_to_string(out.join(RANKING_FILE))?;
        assert_eq!(
            ranking.lines().collect::<Vec<_>>(),
            vec!["rank,country,mean_GHI", "1,Sierra Leone,812.5", "2,Benin,700"]
        );

        let daily = std::fs::read_to_string(out.join(DAILY_AVERAGE_FILE))?;
        assert!(daily.starts_with("country,Date,GHI,count"));
        Ok(())
    }

    #[test]
    fn test_write_json() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("ranking.json");
        let ranking = vec![RankedMean {
            region: Region::Togo,
            mean: 12.5,
        }];

        TableWriter::new().write_json(&ranking, &path)?;

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(value[0]["region"], "togo");
        assert_eq!(value[0]["mean"], 12.5);
        Ok(())
    }
}
