use crate::analyzers::statistics;
use crate::error::Result;
use crate::models::{DailyAverage, DailyAverageTable, FilteredTable, Region};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Mean of `metric` per region per calendar day. Regions keep
/// first-appearance order, days ascend within a region. Days without any
/// value for a region produce no row.
pub fn daily_average(filtered: &FilteredTable<'_>, metric: &str) -> Result<DailyAverageTable> {
    filtered.require_metric(metric)?;

    let mut order: Vec<Region> = Vec::new();
    let mut buckets: HashMap<Region, BTreeMap<NaiveDate, Vec<f64>>> = HashMap::new();

    for record in filtered.iter() {
        if !order.contains(&record.region) {
            order.push(record.region);
        }
        if let Some(value) = record.value(metric)? {
            buckets
                .entry(record.region)
                .or_default()
                .entry(record.timestamp.date())
                .or_default()
                .push(value);
        }
    }

    let mut rows = Vec::new();
    for region in order {
        let Some(days) = buckets.remove(&region) else {
            continue;
        };
        for (day, values) in days {
            rows.push(DailyAverage {
                region,
                day,
                mean: statistics::mean(&statistics::sorted(&values)),
                count: values.len(),
            });
        }
    }

    Ok(DailyAverageTable {
        metric: metric.to_string(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::{Record, UnifiedTable};
    use chrono::NaiveDateTime;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn record(region: Region, ts: &str, ghi: f64) -> Record {
        Record::new(at(ts), region).with_measurements(ghi, 0.0, 0.0, 25.0)
    }

    fn table(records: Vec<Record>) -> UnifiedTable {
        let columns = ["Timestamp", "GHI", "DNI", "DHI", "Tamb"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        UnifiedTable::from_records(columns, records)
    }

    #[test]
    fn test_daily_means_per_region() {
        let table = table(vec![
            record(Region::Benin, "2021-08-09 06:00", 100.0),
            record(Region::Benin, "2021-08-09 12:00", 300.0),
            record(Region::Togo, "2021-08-09 12:00", 50.0),
            record(Region::Benin, "2021-08-10 12:00", 500.0),
        ]);

        let daily = daily_average(&table.view(), "GHI").unwrap();

        assert_eq!(daily.metric, "GHI");
        assert_eq!(daily.len(), 3);
        assert_eq!(daily.rows[0].region, Region::Benin);
        assert_eq!(daily.rows[0].mean, 200.0);
        assert_eq!(daily.rows[0].count, 2);
        assert_eq!(daily.rows[1].day, NaiveDate::from_ymd_opt(2021, 8, 10).unwrap());
        assert_eq!(daily.rows[2].region, Region::Togo);
    }

    #[test]
    fn test_days_without_records_are_omitted() {
        let table = table(vec![
            record(Region::SierraLeone, "2021-10-30 23:59", 1.0),
            record(Region::SierraLeone, "2021-11-01 00:00", 3.0),
        ]);

        let daily = daily_average(&table.view(), "GHI").unwrap();
        let days: Vec<String> = daily
            .rows_for(Region::SierraLeone)
            .map(|row| row.day.to_string())
            .collect();

        assert_eq!(days, vec!["2021-10-30", "2021-11-01"]);
    }

    #[test]
    fn test_unknown_metric() {
        let table = table(vec![record(Region::Benin, "2021-08-09 06:00", 1.0)]);
        assert!(matches!(
            daily_average(&table.view(), "Irradiance"),
            Err(DashboardError::MetricNotFound { .. })
        ));
    }
}
