use crate::analyzers::selection::group_values;
use crate::analyzers::statistics::{quantile, sorted};
use crate::error::Result;
use crate::models::{BoxPlotStats, FilteredTable};
use crate::utils::constants::WHISKER_IQR_FACTOR;

/// Box plot figures of `metric` per region, in first-appearance order.
/// Whiskers reach the furthest observation within 1.5 IQR of the quartiles.
pub fn distribution(filtered: &FilteredTable<'_>, metric: &str) -> Result<Vec<BoxPlotStats>> {
    let stats = group_values(filtered, metric)?
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(region, values)| {
            let sorted = sorted(&values);
            let q1 = quantile(&sorted, 0.25);
            let q3 = quantile(&sorted, 0.75);
            let iqr = q3 - q1;
            let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
            let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

            let inside = sorted.iter().filter(|&&v| v >= low_fence && v <= high_fence);
            let lower_whisker = inside.clone().next().copied().unwrap_or(q1);
            let upper_whisker = inside.last().copied().unwrap_or(q3);
            let outliers = sorted
                .iter()
                .filter(|&&v| v < low_fence || v > high_fence)
                .count();

            BoxPlotStats {
                region,
                count: sorted.len(),
                min: sorted[0],
                q1,
                median: quantile(&sorted, 0.5),
                q3,
                max: sorted[sorted.len() - 1],
                lower_whisker,
                upper_whisker,
                outliers,
            }
        })
        .collect();

    Ok(stats)
}
