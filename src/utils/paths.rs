use crate::error::Result;
use crate::utils::constants::DATA_DIR_NAME;
use std::path::{Path, PathBuf};

/// Default data directory: `data/` one level above the directory holding the
/// running executable, independent of the current working directory.
pub fn default_data_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let exe_dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(data_dir_for(exe_dir))
}

/// Data directory relative to a program directory.
pub fn data_dir_for(program_dir: &Path) -> PathBuf {
    program_dir.join("..").join(DATA_DIR_NAME)
}
