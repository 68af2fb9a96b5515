//! Reads article records from the input directory.

use super::{ArticleRecord, FeedError};
use crate::debug;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Load every record in `dir` whose file name ends with `suffix`.
///
/// Only the top level of `dir` is scanned. Files are read in file-name order
/// so repeated runs see records in the same sequence. The first unreadable
/// or malformed file aborts the load.
pub fn load_records(dir: &Path, suffix: &str) -> Result<Vec<ArticleRecord>, FeedError> {
    let files = collect_record_files(dir, suffix)?;
    debug!("input"; "{} candidate files in {}", files.len(), dir.display());

    files.into_iter().map(|path| read_record(&path)).collect()
}

/// Matching regular files in `dir`, sorted by name.
fn collect_record_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, FeedError> {
    let entries = fs::read_dir(dir).map_err(FeedError::io(dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(FeedError::io(dir))?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix));
        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Parse one JSON object file into a record.
fn read_record(path: &Path) -> Result<ArticleRecord, FeedError> {
    let content = fs::read_to_string(path).map_err(FeedError::io(path))?;
    let mut record: ArticleRecord =
        serde_json::from_str(&content).map_err(|source| FeedError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    record.source = Some(path.to_path_buf());

    debug!("input"; "read {}", path.display());
    Ok(record)
}
