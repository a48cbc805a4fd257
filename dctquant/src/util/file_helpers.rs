// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use crate::util::tracing_wrappers::*;

fn temporary_sibling(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output path {} has no file name", path.display()),
        )
    })?;
    let mut tmp_name = OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(format!(".{}.tmp", std::process::id()));
    Ok(path.with_file_name(tmp_name))
}

/// Writes `path` through a temporary file in the same directory, which is renamed
/// into place once `write` succeeds. Missing parent directories are created.
///
/// If `write` (or flushing, syncing or renaming) fails, the temporary file is
/// removed and nothing is left at `path`.
pub fn write_atomically<T, E: From<io::Error>>(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> Result<T, E>,
) -> Result<T, E> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = temporary_sibling(path)?;
    trace!("writing {} through {}", path.display(), tmp_path.display());

    let result = File::create(&tmp_path).map_err(E::from).and_then(|file| {
        let mut writer = BufWriter::new(file);
        let value = write(&mut writer)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(value)
    });

    if result.is_err() {
        // The temporary file may not exist if creating it failed.
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
