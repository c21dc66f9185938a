pub mod dataset_cache;
pub mod dataset_loader;

pub use dataset_cache::DatasetCache;
pub use dataset_loader::DatasetLoader;
