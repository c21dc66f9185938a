use crate::error::Result;
use crate::models::{Region, UnifiedTable};
use crate::readers::{RegionData, RegionReader};
use crate::utils::constants::CLEAN_FILE_SUFFIX;
use crate::utils::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Reads every configured region's cleaned file and concatenates them into a
/// [`UnifiedTable`]. A single unreadable or malformed file fails the whole
/// load; no partial table is ever returned.
pub struct DatasetLoader {
    data_dir: PathBuf,
    reader: RegionReader,
}

impl DatasetLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            reader: RegionReader::new(),
        }
    }

    pub fn with_timestamp_column(mut self, timestamp_column: &str) -> Self {
        self.reader = RegionReader::with_timestamp_column(timestamp_column);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// `<data_dir>/<region id>_clean.csv`
    pub fn region_path(&self, region: Region) -> PathBuf {
        self.data_dir
            .join(format!("{}{}", region.id(), CLEAN_FILE_SUFFIX))
    }

    pub fn load(&self, regions: &[Region]) -> Result<UnifiedTable> {
        self.load_with_progress(regions, None)
    }

    /// Load `regions` in order. Rows keep region-then-file order.
    pub fn load_with_progress(
        &self,
        regions: &[Region],
        progress: Option<&ProgressReporter>,
    ) -> Result<UnifiedTable> {
        let mut loaded: Vec<RegionData> = Vec::with_capacity(regions.len());

        for &region in regions {
            if loaded.iter().any(|data| data.region == region) {
                warn!("Region {} listed more than once, loading it once", region.id());
                continue;
            }

            let path = self.region_path(region);
            if let Some(p) = progress {
                p.set_message(&format!("Reading {} data...", region.display_name()));
            }
            debug!("Reading {} from {}", region.id(), path.display());

            let data = self.reader.read_region(region, &path)?;
            info!(
                "Loaded {} rows for {} from {}",
                data.records.len(),
                region.display_name(),
                path.display()
            );
            loaded.push(data);
        }

        let table = merge_regions(loaded, self.reader.timestamp_column());

        if let Some(p) = progress {
            p.finish_with_message(&format!(
                "Loaded {} rows from {} regions",
                table.len(),
                regions.len()
            ));
        }

        Ok(table)
    }
}

/// Concatenate per-region data in the given order.
fn merge_regions(loaded: Vec<RegionData>, timestamp_column: &str) -> UnifiedTable {
    let mut table = UnifiedTable::new().with_timestamp_column(timestamp_column);
    for data in loaded {
        table.append(&data.columns, data.records);
    }
    table
}
