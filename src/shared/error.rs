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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, AddonsError>;

#[derive(Error, Debug)]
pub enum AddonsError {
    #[error("OCM API error ({status}): {code}: {reason}")]
    Api {
        status: u16,
        code: String,
        reason: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("decoding response from '{endpoint}': {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("notification not found: {team}/{product}/{id}")]
    NotificationNotFound {
        team: String,
        product: String,
        id: String,
    },

    #[error("Notification config error: {0}")]
    Notification(String),

    #[error("Update error: {0}")]
    Update(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AddonsError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::Config(context.into())
    }

    pub fn no_configuration_loaded() -> Self {
        Self::Config("no configuration loaded; run 'ocm login' first".to_string())
    }

    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Self::InvalidArgument(context.into())
    }

    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn notification_not_found(
        team: impl Into<String>,
        product: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self::NotificationNotFound {
            team: team.into(),
            product: product.into(),
            id: id.into(),
        }
    }

    /// True for errors returned by the remote API with a 404 status.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = AddonsError::Api {
            status: 403,
            code: "CLUSTERS-MGMT-403".to_string(),
            reason: "forbidden".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "OCM API error (403): CLUSTERS-MGMT-403: forbidden"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_detection() {
        let err = AddonsError::Api {
            status: 404,
            code: "CLUSTERS-MGMT-404".to_string(),
            reason: "missing".to_string(),
        };
        assert!(err.is_not_found());
    }
}
