// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Self-update: version comparison and binary replacement

use crate::infrastructure::constants::{BACKUP_TIME_FORMAT, BINARY_MODE};
use crate::shared::error::{AddonsError, Result};
use chrono::{DateTime, TimeZone};
use semver::Version;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Source of released plug-in versions.
#[async_trait::async_trait]
pub trait VersionUpdater: Send + Sync {
    /// Tag of the latest release, e.g. `v0.6.0`.
    async fn latest_version(&self) -> Result<String>;

    /// Plug-in binary from the latest release for this platform.
    async fn latest_plugin_binary(&self) -> Result<Vec<u8>>;
}

/// Parse a version leniently: surrounding whitespace, a leading `v` and a
/// missing minor or patch component are accepted.
pub fn parse_tolerant(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    let split = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, rest) = trimmed.split_at(split);

    let mut parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    while parts.len() < 3 {
        parts.push("0");
    }

    Version::parse(&format!("{}{}", parts.join("."), rest)).ok()
}

/// Whether `current` needs no update to reach `latest`. An unparsable
/// current version (e.g. `dev`) is never up to date; an unparsable latest
/// version always is.
pub fn up_to_date(current: &str, latest: &str) -> bool {
    let Some(current) = parse_tolerant(current) else {
        return false;
    };

    match parse_tolerant(latest) {
        Some(latest) => latest <= current,
        None => true,
    }
}

/// Path the running binary is moved to while it is being replaced.
pub fn backup_path<Tz>(bin: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut name = OsString::from(bin.as_os_str());
    name.push("_");
    name.push(now.format(BACKUP_TIME_FORMAT).to_string());
    PathBuf::from(name)
}

/// Replace `bin` with `data`, keeping a timestamped backup until the new
/// file is written. A failed write restores the backup; a failed restore is
/// logged and the write error is returned.
pub fn replace_binary(bin: &Path, data: &[u8], backup: &Path) -> Result<()> {
    swap_binary(bin, backup, |path| write_executable(path, data))
}

fn swap_binary<W>(bin: &Path, backup: &Path, write: W) -> Result<()>
where
    W: FnOnce(&Path) -> std::io::Result<()>,
{
    debug!(bin = %bin.display(), backup = %backup.display(), "backing up binary");

    fs::rename(bin, backup).map_err(|e| {
        AddonsError::Update(format!("backing up binary {}: {}", bin.display(), e))
    })?;

    if let Err(e) = write(bin) {
        if let Err(restore) = fs::rename(backup, bin) {
            error!(bin = %bin.display(), error = %restore, "restoring binary");
        }

        return Err(AddonsError::Update(format!(
            "writing to file {}: {}",
            bin.display(),
            e
        )));
    }

    fs::remove_file(backup).map_err(|e| {
        AddonsError::Update(format!("cleaning up old binary {}: {}", backup.display(), e))
    })
}

fn write_executable(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(BINARY_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}
