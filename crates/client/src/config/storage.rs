//! Storage Config

use std::path::PathBuf;

use clap::Args;
use gryadka::favorites::FileStore;

/// Local persistence settings.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Directory holding locally persisted data such as favorites
    #[arg(long, env = "GRYADKA_DATA_DIR", default_value = ".gryadka")]
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Favorites store inside the data directory.
    pub fn favorites_store(&self) -> FileStore {
        FileStore::in_dir(&self.data_dir)
    }
}
