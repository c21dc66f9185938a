use crate::error::Result;
use crate::models::{FilteredTable, Region, UnifiedTable};
use std::collections::HashMap;

/// Rows whose region is in `selected`, in table order. An empty selection
/// yields an empty view.
pub fn filter<'a>(table: &'a UnifiedTable, selected: &[Region]) -> FilteredTable<'a> {
    let records = table
        .records()
        .iter()
        .filter(|record| selected.contains(&record.region))
        .collect();
    FilteredTable::new(table, records)
}

/// Distinct regions of `table` in order of first appearance. These are the
/// selectable options, and the default selection.
pub fn available_regions(table: &UnifiedTable) -> Vec<Region> {
    let mut regions = Vec::new();
    for record in table.records() {
        if !regions.contains(&record.region) {
            regions.push(record.region);
        }
    }
    regions
}

/// Map user-facing names (display names or ids) back to regions. Duplicates
/// are dropped, first occurrence wins.
pub fn resolve_selection<S: AsRef<str>>(names: &[S]) -> Result<Vec<Region>> {
    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        if name.trim().is_empty() {
            continue;
        }
        let region = Region::parse(name)?;
        if !selected.contains(&region) {
            selected.push(region);
        }
    }
    Ok(selected)
}

/// Values of `metric` grouped by region in first-appearance order. Empty
/// cells are skipped.
pub(crate) fn group_values(
    filtered: &FilteredTable<'_>,
    metric: &str,
) -> Result<Vec<(Region, Vec<f64>)>> {
    filtered.require_metric(metric)?;

    let mut groups: Vec<(Region, Vec<f64>)> = Vec::new();
    let mut index: HashMap<Region, usize> = HashMap::new();

    for record in filtered.iter() {
        let slot = *index.entry(record.region).or_insert_with(|| {
            groups.push((record.region, Vec::new()));
            groups.len() - 1
        });
        if let Some(value) = record.value(metric)? {
            groups[slot].1.push(value);
        }
    }

    Ok(groups)
}

/// Fail on the first metric that is not a column of the table.
pub(crate) fn require_metrics<S: AsRef<str>>(
    filtered: &FilteredTable<'_>,
    metrics: &[S],
) -> Result<()> {
    metrics
        .iter()
        .try_for_each(|metric| filtered.require_metric(metric.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use chrono::NaiveDate;

    fn table() -> UnifiedTable {
        let ts = NaiveDate::from_ymd_opt(2022, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let records = vec![
            Record::new(ts, Region::Togo).with_measurements(1.0, 0.0, 0.0, 0.0),
            Record::new(ts, Region::Benin).with_measurements(2.0, 0.0, 0.0, 0.0),
            Record::new(ts, Region::Togo).with_measurements(3.0, 0.0, 0.0, 0.0),
            Record::new(ts, Region::SierraLeone).with_measurements(4.0, 0.0, 0.0, 0.0),
        ];
        let columns = ["Timestamp", "GHI", "DNI", "DHI", "Tamb"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        UnifiedTable::from_records(columns, records)
    }

    #[test]
    fn test_filter_keeps_selected_rows_in_order() {
        let table = table();
        let filtered = filter(&table, &[Region::Togo, Region::SierraLeone]);

        let ghi: Vec<Option<f64>> = filtered.iter().map(|r| r.ghi).collect();
        assert_eq!(ghi, vec![Some(1.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_filter_is_additive_over_disjoint_selections() {
        let table = table();
        let a = filter(&table, &[Region::Togo]).len();
        let b = filter(&table, &[Region::Benin, Region::SierraLeone]).len();
        assert_eq!(a + b, filter(&table, &Region::ALL).len());
        assert_eq!(a + b, table.len());
    }

    #[test]
    fn test_empty_selection_is_empty() {
        let table = table();
        let filtered = filter(&table, &[]);
        assert!(filtered.is_empty());
        assert_eq!(filtered.columns(), table.columns());
    }

    #[test]
    fn test_available_regions_first_appearance() {
        assert_eq!(
            available_regions(&table()),
            vec![Region::Togo, Region::Benin, Region::SierraLeone]
        );
    }

    #[test]
    fn test_resolve_selection() {
        let selected = resolve_selection(&["Sierra Leone", "togo", "Togo", " "]).unwrap();
        assert_eq!(selected, vec![Region::SierraLeone, Region::Togo]);
        assert!(resolve_selection(&["Ghana"]).is_err());
    }

    #[test]
    fn test_group_values_skips_missing_cells() {
        let table = table();
        let groups = group_values(&table.view(), "GHI").unwrap();
        assert_eq!(groups[0], (Region::Togo, vec![1.0, 3.0]));
        assert_eq!(groups.len(), 3);
    }
}
