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

//! The OCM CLI's own configuration file (`ocm.json`), written by `ocm login`

use crate::infrastructure::constants::{
    DEFAULT_CLIENT_ID, DEFAULT_OCM_URL, DEFAULT_TOKEN_URL, OCM_CONFIG_DIR, OCM_CONFIG_ENV,
    OCM_CONFIG_FILE,
};
use crate::shared::error::{AddonsError, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcmConfig {
    pub access_token: String,
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub url: String,
    pub pager: String,
    pub scopes: Vec<String>,
    pub insecure: bool,
}

impl OcmConfig {
    /// Load from `$OCM_CONFIG`, or the user config directory. A missing file
    /// yields an empty config.
    pub fn load() -> Result<Self> {
        let path = resolve_path(std::env::var_os(OCM_CONFIG_ENV), dirs::config_dir())
            .ok_or_else(|| AddonsError::config_error("unable to determine OCM config location"))?;

        if !path.exists() {
            debug!(path = %path.display(), "OCM config file not found");
            return Ok(Self::default());
        }

        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = read_to_string(path).map_err(|e| {
            AddonsError::config_error(format!("reading {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            AddonsError::config_error(format!("parsing {}: {}", path.display(), e))
        })
    }

    /// No credentials of any kind are present.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_empty()
            && self.refresh_token.is_empty()
            && self.client_secret.is_empty()
    }

    pub fn url(&self) -> &str {
        or_default(&self.url, DEFAULT_OCM_URL)
    }

    pub fn token_url(&self) -> &str {
        or_default(&self.token_url, DEFAULT_TOKEN_URL)
    }

    pub fn client_id(&self) -> &str {
        or_default(&self.client_id, DEFAULT_CLIENT_ID)
    }

    pub fn pager(&self) -> Option<&str> {
        (!self.pager.is_empty()).then_some(self.pager.as_str())
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

fn resolve_path(env: Option<OsString>, config_dir: Option<PathBuf>) -> Option<PathBuf> {
    match env.filter(|v| !v.is_empty()) {
        Some(path) => Some(PathBuf::from(path)),
        None => config_dir.map(|d| d.join(OCM_CONFIG_DIR).join(OCM_CONFIG_FILE)),
    }
}
