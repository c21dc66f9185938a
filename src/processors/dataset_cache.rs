use crate::error::Result;
use crate::models::{Region, UnifiedTable};
use crate::processors::DatasetLoader;
use crate::utils::progress::ProgressReporter;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

/// Memoised [`DatasetLoader`] result. The table is reused for as long as the
/// region list is unchanged and no region file has a new modification time.
/// Failed loads are never cached.
pub struct DatasetCache {
    loader: DatasetLoader,
    regions: Vec<Region>,
    entry: Option<CacheEntry>,
}

struct CacheEntry {
    fingerprint: Vec<Option<SystemTime>>,
    table: Arc<UnifiedTable>,
}

impl DatasetCache {
    pub fn new(loader: DatasetLoader, regions: Vec<Region>) -> Self {
        Self {
            loader,
            regions,
            entry: None,
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&mut self) -> Result<Arc<UnifiedTable>> {
        self.get_with_progress(None)
    }

    pub fn get_with_progress(
        &mut self,
        progress: Option<&ProgressReporter>,
    ) -> Result<Arc<UnifiedTable>> {
        let fingerprint = self.fingerprint();

        if let Some(entry) = &self.entry {
            if entry.fingerprint == fingerprint {
                debug!("Dataset cache hit ({} rows)", entry.table.len());
                return Ok(Arc::clone(&entry.table));
            }
            debug!("Region files changed, reloading dataset");
        }

        self.entry = None;
        let table = Arc::new(self.loader.load_with_progress(&self.regions, progress)?);
        self.entry = Some(CacheEntry {
            fingerprint,
            table: Arc::clone(&table),
        });
        Ok(table)
    }

    /// Replace the region list; drops the cached table if it differs.
    pub fn set_regions(&mut self, regions: Vec<Region>) {
        if regions != self.regions {
            self.regions = regions;
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn is_cached(&self) -> bool {
        self.entry.is_some()
    }

    fn fingerprint(&self) -> Vec<Option<SystemTime>> {
        self.regions
            .iter()
            .map(|&region| {
                std::fs::metadata(self.loader.region_path(region))
                    .and_then(|meta| meta.modified())
                    .ok()
            })
            .collect()
    }
}
