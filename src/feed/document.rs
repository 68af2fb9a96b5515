//! Reading and writing the feed document on disk.
//!
//! The file is replaced whole on every write. Nothing here locks it, so
//! callers must not run two writers against the same path at once.

use super::FeedError;
use rss::Channel;
use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufReader, ErrorKind},
    path::{Path, PathBuf},
};

/// Parse the feed at `path`, or `None` if there is no file yet.
pub fn read_channel(path: &Path) -> Result<Option<Channel>, FeedError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(FeedError::io(path)(e)),
    };

    Channel::read_from(BufReader::new(file))
        .map(Some)
        .map_err(|source| FeedError::Document {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize `channel` to `path`, creating parent directories.
///
/// Writes a sibling temporary file first and renames it into place.
pub fn write_channel(channel: &Channel, path: &Path) -> Result<(), FeedError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(FeedError::io(parent))?;
    }

    let xml = channel.write_to(Vec::new()).map_err(FeedError::Serialize)?;

    let tmp = temp_path(path);
    let result = fs::write(&tmp, xml)
        .map_err(FeedError::io(&tmp))
        .and_then(|()| fs::rename(&tmp, path).map_err(FeedError::io(path)));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// `feed.xml` -> `.feed.xml.tmp` in the same directory.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}
