use crate::analyzers::selection::{group_values, require_metrics};
use crate::analyzers::statistics::{self, describe};
use crate::error::Result;
use crate::models::{FilteredTable, MetricStats, RankedMean, RegionSummary, SummaryTable};
use std::cmp::Ordering;

/// Mean, median and sample standard deviation of each metric per region.
/// Rows follow the regions' first appearance in `filtered`. Every metric is
/// checked before anything is computed.
pub fn summarize<S: AsRef<str>>(
    filtered: &FilteredTable<'_>,
    metrics: &[S],
) -> Result<SummaryTable> {
    require_metrics(filtered, metrics)?;

    let mut rows: Vec<RegionSummary> = Vec::new();

    for metric in metrics {
        let metric = metric.as_ref();
        for (region, values) in group_values(filtered, metric)? {
            let stats = describe(&values);
            let entry = MetricStats {
                metric: metric.to_string(),
                count: stats.count,
                mean: stats.mean,
                median: stats.median,
                std: stats.std,
            };

            match rows.iter_mut().find(|row| row.region == region) {
                Some(row) => row.metrics.push(entry),
                None => rows.push(RegionSummary {
                    region,
                    metrics: vec![entry],
                }),
            }
        }
    }

    Ok(SummaryTable {
        metrics: metrics.iter().map(|m| m.as_ref().to_string()).collect(),
        rows,
    })
}

/// Regions ordered by descending mean of `metric`. Equal means keep
/// first-appearance order; a region without any value sorts last.
pub fn rank_by_mean(filtered: &FilteredTable<'_>, metric: &str) -> Result<Vec<RankedMean>> {
    let mut ranking: Vec<RankedMean> = group_values(filtered, metric)?
        .into_iter()
        .map(|(region, values)| RankedMean {
            region,
            mean: statistics::mean(&statistics::sorted(&values)),
        })
        .collect();

    ranking.sort_by(|a, b| descending_nan_last(a.mean, b.mean));
    Ok(ranking)
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}
