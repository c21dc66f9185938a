pub mod aggregates;
pub mod record;
pub mod region;
pub mod table;

pub use aggregates::{
    BoxPlotStats, DailyAverage, DailyAverageTable, MetricStats, RankedMean, RegionSummary,
    SummaryTable,
};
pub use record::Record;
pub use region::Region;
pub use table::{FilteredTable, UnifiedTable};
