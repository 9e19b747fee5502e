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

//! GitHub releases as a [`VersionUpdater`]

use crate::domain::config::GithubConf;
use crate::domain::update::VersionUpdater;
use crate::infrastructure::constants::USER_AGENT;
use crate::shared::error::{AddonsError, Result};
use flate2::read::GzDecoder;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};
use url::Url;

#[derive(Debug, Clone, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    assets: Vec<Asset>,
}

#[derive(Debug, Clone, Deserialize)]
struct Asset {
    name: String,
    /// API URL of the asset; downloads need `Accept: application/octet-stream`.
    url: String,
}

pub struct GitHubClient {
    client: Client,
    api_url: Url,
    organization: String,
    repository: String,
    binary: String,
}

impl GitHubClient {
    pub fn new(conf: &GithubConf) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Self::with_client(client, conf)
    }

    pub fn with_client(client: Client, conf: &GithubConf) -> Result<Self> {
        Ok(Self {
            client,
            api_url: Url::parse(&conf.api_url)?,
            organization: conf.organization.clone(),
            repository: conf.repository.clone(),
            binary: conf.binary.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        trace!(url = %url, "requesting");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(AddonsError::Update(format!(
                "GET {} returned {}: {}",
                url,
                status.as_u16(),
                String::from_utf8_lossy(&body).trim()
            )));
        }

        serde_json::from_slice(&body).map_err(|e| AddonsError::decode(url.as_str(), e))
    }

    async fn latest_release(&self) -> Result<Release> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| AddonsError::config_error(format!("invalid GitHub URL '{}'", self.api_url)))?
            .pop_if_empty()
            .extend([
                "repos",
                self.organization.as_str(),
                self.repository.as_str(),
                "releases",
                "latest",
            ]);

        self.get_json(url).await
    }

    async fn download(&self, asset: &Asset) -> Result<Vec<u8>> {
        debug!(asset = %asset.name, "downloading release asset");

        let response = self
            .client
            .get(&asset.url)
            .header(ACCEPT, "application/octet-stream")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AddonsError::Update(format!(
                "downloading {} returned {}",
                asset.name,
                status.as_u16()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait::async_trait]
impl VersionUpdater for GitHubClient {
    async fn latest_version(&self) -> Result<String> {
        Ok(self.latest_release().await?.tag_name)
    }

    async fn latest_plugin_binary(&self) -> Result<Vec<u8>> {
        let release = self.latest_release().await?;
        let suffix = target_suffix();

        let asset = release
            .assets
            .iter()
            .find(|a| matches_target_binary(&a.name, &self.binary, &suffix))
            .ok_or_else(|| {
                AddonsError::Update(format!(
                    "release {} has no asset matching {}*{}",
                    release.tag_name, self.binary, suffix
                ))
            })?;

        let archive = self.download(asset).await?;
        extract_binary(&archive, &self.binary)
    }
}

/// GOOS-style name of the running OS.
pub fn target_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

/// GOARCH-style name of the running architecture.
pub fn target_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    }
}

/// `_<os>_<arch>.tar.gz` for the running platform.
pub fn target_suffix() -> String {
    format!("_{}_{}.tar.gz", target_os(), target_arch())
}

pub fn matches_target_binary(name: &str, binary: &str, suffix: &str) -> bool {
    name.starts_with(binary) && name.ends_with(suffix)
}

/// Pull the entry named `binary` out of a gzipped tarball.
pub fn extract_binary(archive: &[u8], binary: &str) -> Result<Vec<u8>> {
    let mut tar = tar::Archive::new(GzDecoder::new(archive));

    for entry in tar.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();

        if path == Path::new(binary) || path.strip_prefix("./").is_ok_and(|p| p == Path::new(binary))
        {
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;
            return Ok(data);
        }
    }

    Err(AddonsError::Update(format!(
        "binary '{}' not found in release archive",
        binary
    )))
}
