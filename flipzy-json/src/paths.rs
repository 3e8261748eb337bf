use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const STORE_FILE_NAME: &str = "vocabulary_cards.json";
pub const BACKUPS_DIR_NAME: &str = "backups";

pub fn data_root() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("com", "flipzy", "Flipzy") {
        pd.data_dir().to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// Store file and backups directory under `root`.
pub fn store_files_in(root: &Path) -> (PathBuf, PathBuf) {
    (root.join(STORE_FILE_NAME), root.join(BACKUPS_DIR_NAME))
}

pub fn default_store_files() -> (PathBuf, PathBuf) {
    store_files_in(&data_root())
}
