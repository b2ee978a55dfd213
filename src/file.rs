//! Config file discovery and loading.
//!
//! Each [`SearchPath`] resolves to a directory, checked for `{dir}/{file_name}`.
//! Missing directories and files are skipped; other I/O errors propagate.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::UconfError;
use crate::types::{SearchMode, SearchPath};

/// Resolve a search path to a directory. `None` if it cannot be determined
/// on this system (e.g. no home directory).
pub fn resolve_search_path(sp: &SearchPath, app_name: &str) -> Option<PathBuf> {
    match sp {
        SearchPath::Platform => {
            directories::ProjectDirs::from("", "", app_name).map(|p| p.config_dir().to_path_buf())
        }
        SearchPath::Home(subdir) => {
            directories::UserDirs::new().map(|u| u.home_dir().join(subdir))
        }
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) => Some(p.clone()),
    }
}

/// Read the config files found along `search_paths`, in priority-ascending
/// order. In [`SearchMode::FirstMatch`] at most one file is returned: the one
/// from the highest-priority directory that has it.
pub fn load_config_files(
    search_paths: &[SearchPath],
    file_name: &str,
    app_name: &str,
    mode: SearchMode,
) -> Result<Vec<(PathBuf, String)>, UconfError> {
    let candidates: Vec<PathBuf> = search_paths
        .iter()
        .filter_map(|sp| resolve_search_path(sp, app_name))
        .map(|dir| dir.join(file_name))
        .collect();

    let mut found = Vec::new();
    match mode {
        SearchMode::Merge => {
            for path in candidates {
                if let Some(content) = read_if_exists(&path)? {
                    found.push((path, content));
                }
            }
        }
        SearchMode::FirstMatch => {
            for path in candidates.into_iter().rev() {
                if let Some(content) = read_if_exists(&path)? {
                    found.push((path, content));
                    break;
                }
            }
        }
    }
    Ok(found)
}

fn read_if_exists(path: &Path) -> Result<Option<String>, UconfError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), "found config file");
            Ok(Some(content))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file");
            Ok(None)
        }
        Err(e) => Err(UconfError::IoError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
