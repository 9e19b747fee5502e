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

//! Settings owned by the plug-in itself

use crate::infrastructure::constants::{
    DEFAULT_PAGE_SIZE, GITHUB_API_URL, GITHUB_ORGANIZATION, GITHUB_REPOSITORY, MAX_PAGE_SIZE,
    PLUGIN_BINARY, PLUGIN_CONFIG_DIR, PLUGIN_CONFIG_ENV, PLUGIN_CONFIG_FILE,
};
use crate::shared::error::{AddonsError, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

/// Plug-in settings, read from `$OCM_ADDONS_CONFIG` or
/// `<config dir>/ocm-addons/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Directory of `<team>/<product>.yaml` notification files merged over
    /// the built-in set.
    pub notifications_dir: Option<PathBuf>,
    pub page_size: usize,
    /// Pager command, used when `ocm.json` sets none.
    pub pager: Option<String>,
    pub github: GithubConf,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            notifications_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
            pager: None,
            github: GithubConf::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConf {
    pub api_url: String,
    pub organization: String,
    pub repository: String,
    pub binary: String,
}

impl Default for GithubConf {
    fn default() -> Self {
        Self {
            api_url: GITHUB_API_URL.to_string(),
            organization: GITHUB_ORGANIZATION.to_string(),
            repository: GITHUB_REPOSITORY.to_string(),
            binary: PLUGIN_BINARY.to_string(),
        }
    }
}

impl PluginConfig {
    /// Load the plug-in config. A missing default file yields defaults; a
    /// file named by `$OCM_ADDONS_CONFIG` must exist.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(PLUGIN_CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Self::from_path(Path::new(&path));
        }

        match dirs::config_dir() {
            Some(dir) => {
                let path = dir.join(PLUGIN_CONFIG_DIR).join(PLUGIN_CONFIG_FILE);
                if path.exists() {
                    Self::from_path(&path)
                } else {
                    Ok(Self::default())
                }
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = read_to_string(path).map_err(|e| {
            AddonsError::config_error(format!("reading {}: {}", path.display(), e))
        })?;

        let conf: Self = toml::from_str(&content)?;
        conf.validate()?;

        Ok(conf)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(AddonsError::config_error("page_size must be at least 1"));
        }

        if self.page_size > MAX_PAGE_SIZE {
            return Err(AddonsError::config_error(format!(
                "page_size must be at most {}",
                MAX_PAGE_SIZE
            )));
        }

        if let Some(dir) = &self.notifications_dir {
            if !dir.is_dir() {
                return Err(AddonsError::config_error(format!(
                    "notifications_dir {} is not a directory",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 100\n\n[github]\norganization = \"my-fork\"\n").unwrap();

        let conf = PluginConfig::from_path(&path).unwrap();
        assert_eq!(conf.page_size, 100);
        assert_eq!(conf.github.organization, "my-fork");
        assert_eq!(conf.github.repository, GITHUB_REPOSITORY);
        assert_eq!(conf.github.binary, PLUGIN_BINARY);
        assert!(conf.notifications_dir.is_none());
    }

    #[test]
    fn test_notifications_dir_must_exist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "notifications_dir = \"/definitely/not/here\"\n").unwrap();
        assert!(matches!(
            PluginConfig::from_path(&path),
            Err(AddonsError::Config(_))
        ));

        std::fs::write(
            &path,
            format!("notifications_dir = {:?}\n", dir.path().display().to_string()),
        )
        .unwrap();
        assert!(PluginConfig::from_path(&path).is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 0\n").unwrap();

        assert!(PluginConfig::from_path(&path).is_err());
    }

    #[test]
    fn test_page_size_above_server_limit_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 500\n").unwrap();

        let err = PluginConfig::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("at most 100"));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = \"many\"\n").unwrap();

        assert!(matches!(
            PluginConfig::from_path(&path),
            Err(AddonsError::TomlParse(_))
        ));
    }
}
