pub mod cells;
pub mod constants;
pub mod naming;
pub mod paths;
pub mod progress;
pub mod timestamp;

pub use cells::parse_numeric_cell;
pub use constants::*;
pub use naming::{display_name, normalize_key, title_case};
pub use paths::{data_dir_for, default_data_dir};
pub use progress::ProgressReporter;
pub use timestamp::parse_timestamp;
