pub mod region_reader;

pub use region_reader::{RegionData, RegionReader};
