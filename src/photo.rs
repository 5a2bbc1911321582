// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Photo loading.
//!
//! Photos are attached to places as raw bytes. The user picks a file by path;
//! [`PhotoHolder::load`] reads it, with a size limit so an accidental pick of
//! a huge file does not bloat the database.

use std::{fs, io, path::Path};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub(crate) enum PhotoError {
    #[error("{path} is empty")]
    Empty { path: String },

    #[error("{path} is {size} bytes, the limit is {limit}")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub(crate) struct PhotoHolder {
    max_bytes: u64,
}

impl PhotoHolder {
    pub(crate) fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Reads the selected file.
    ///
    /// A selection that no longer exists yields `Ok(None)`.
    pub(crate) fn load(&self, selection: &Path) -> Result<Option<Vec<u8>>, PhotoError> {
        let path = selection.display().to_string();

        let metadata = match fs::metadata(selection) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(PhotoError::Read { path, source }),
        };

        let size = metadata.len();
        if size > self.max_bytes {
            return Err(PhotoError::TooLarge {
                path,
                size,
                limit: self.max_bytes,
            });
        }

        let bytes = fs::read(selection).map_err(|source| PhotoError::Read {
            path: path.clone(),
            source,
        })?;

        if bytes.is_empty() {
            return Err(PhotoError::Empty { path });
        }

        debug!(%path, size = bytes.len(), "photo loaded");
        Ok(Some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn loads_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beach.jpg");
        fs::write(&path, [0xff, 0xd8, 0xff]).unwrap();

        let photo = PhotoHolder::new(1024).load(&path).unwrap();

        assert_eq!(photo, Some(vec![0xff, 0xd8, 0xff]));
    }

    #[test]
    fn missing_selection_is_none() {
        let dir = tempfile::tempdir().unwrap();

        let photo = PhotoHolder::new(1024).load(&dir.path().join("gone.jpg")).unwrap();

        assert_eq!(photo, None);
    }

    #[test]
    fn rejects_empty_and_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.png");
        let large = dir.path().join("large.png");
        fs::write(&empty, b"").unwrap();
        fs::write(&large, vec![7u8; 64]).unwrap();

        let holder = PhotoHolder::new(32);

        assert_matches!(holder.load(&empty), Err(PhotoError::Empty { .. }));
        assert_matches!(
            holder.load(&large),
            Err(PhotoError::TooLarge { size: 64, limit: 32, .. })
        );
    }

    #[test]
    fn directories_cannot_be_read() {
        let dir = tempfile::tempdir().unwrap();

        assert_matches!(
            PhotoHolder::new(u64::MAX).load(dir.path()),
            Err(PhotoError::Read { .. })
        );
    }
}
