pub mod dashboard_analyzer;
pub mod daily;
pub mod distribution;
pub mod selection;
pub mod statistics;
pub mod summary;

pub use daily::daily_average;
pub use dashboard_analyzer::{DashboardAnalyzer, DashboardView};
pub use distribution::distribution;
pub use selection::{available_regions, filter, resolve_selection};
pub use summary::{rank_by_mean, summarize};
