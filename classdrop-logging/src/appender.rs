// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};
use std::{env, ffi::OsStr, path::Path};
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};

const DEFAULT_LOG_FILE_STEM: &str = "classdrop";

/// When log files are rotated and how many of them are kept around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rotation {
    /// A log file is rotated once it grows past this size.
    pub(crate) max_bytes: usize,
    /// Rotated files beyond this count get compressed.
    pub(crate) uncompressed_files: usize,
    /// Oldest files are deleted beyond this count.
    pub(crate) max_files: usize,
}

impl Rotation {
    /// Limits from the builder settings. The total always leaves room for the uncompressed files.
    pub(crate) fn new(
        max_bytes: usize,
        uncompressed_files: usize,
        compressed_files: Option<usize>,
        default_max_files: usize,
    ) -> Self {
        let max_files = match compressed_files {
            Some(compressed) => compressed + uncompressed_files,
            None => std::cmp::max(uncompressed_files, default_max_files),
        };
        Self {
            max_bytes,
            uncompressed_files,
            max_files,
        }
    }
}

/// Non blocking writer into `<dir>/<binary name>.log`, rotated by size.
///
/// The most recent file keeps its name so it can be followed with `tail -f`.
pub(crate) fn file_rotater(dir: &Path, rotation: Rotation) -> (NonBlocking, WorkerGuard) {
    let file_stem = env::current_exe()
        .ok()
        .and_then(|path| {
            path.file_stem()
                .map(OsStr::to_string_lossy)
                .map(|stem| stem.into_owned())
        })
        .unwrap_or_else(|| DEFAULT_LOG_FILE_STEM.to_string());

    let writer = FileRotate::new(
        dir.join(format!("{file_stem}.log")),
        AppendTimestamp::default(FileLimit::MaxFiles(rotation.max_files)),
        ContentLimit::BytesSurpassed(rotation.max_bytes),
        Compression::OnRotate(rotation.uncompressed_files),
        #[cfg(unix)]
        None,
    );

    // block instead of dropping lines
    NonBlockingBuilder::default().lossy(false).finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_files_cover_compressed_and_uncompressed() {
        let rotation = Rotation::new(1024, 10, Some(5), 1000);
        assert_eq!(rotation.max_files, 15);

        let rotation = Rotation::new(1024, 10, None, 1000);
        assert_eq!(rotation.max_files, 1000);

        let rotation = Rotation::new(1024, 2000, None, 1000);
        assert_eq!(rotation.max_files, 2000);
    }
}
