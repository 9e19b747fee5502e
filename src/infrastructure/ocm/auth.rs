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

//! OpenID Connect token exchange against the SSO token endpoint

use crate::domain::config::OcmConfig;
use crate::shared::error::{AddonsError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, trace};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    RefreshToken,
    ClientCredentials,
    StoredAccessToken,
}

/// Pick how a bearer token is obtained from `config`.
pub fn select_grant(config: &OcmConfig) -> Option<Grant> {
    if !config.refresh_token.is_empty() {
        Some(Grant::RefreshToken)
    } else if !config.client_secret.is_empty() {
        Some(Grant::ClientCredentials)
    } else if !config.access_token.is_empty() {
        Some(Grant::StoredAccessToken)
    } else {
        None
    }
}

/// Obtain a bearer token: refresh token first, then client credentials,
/// then the stored access token as-is.
pub async fn acquire_token(client: &Client, config: &OcmConfig) -> Result<String> {
    let grant = select_grant(config).ok_or_else(AddonsError::no_configuration_loaded)?;

    debug!(?grant, token_url = %config.token_url(), "acquiring access token");

    let mut form = vec![("client_id", config.client_id().to_string())];

    match grant {
        Grant::StoredAccessToken => return Ok(config.access_token.clone()),
        Grant::RefreshToken => {
            form.push(("grant_type", "refresh_token".to_string()));
            form.push(("refresh_token", config.refresh_token.clone()));
            if !config.client_secret.is_empty() {
                form.push(("client_secret", config.client_secret.clone()));
            }
        }
        Grant::ClientCredentials => {
            form.push(("grant_type", "client_credentials".to_string()));
            form.push(("client_secret", config.client_secret.clone()));
            let scope = if config.scopes.is_empty() {
                "openid".to_string()
            } else {
                config.scopes.join(" ")
            };
            form.push(("scope", scope));
        }
    }

    let response = client.post(config.token_url()).form(&form).send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    trace!(%status, bytes = body.len(), "token endpoint responded");

    if !status.is_success() {
        return Err(AddonsError::config_error(format!(
            "token exchange failed ({}): {}; run 'ocm login' again",
            status.as_u16(),
            String::from_utf8_lossy(&body).trim()
        )));
    }

    let token: TokenResponse = serde_json::from_slice(&body)
        .map_err(|e| AddonsError::decode(config.token_url(), e))?;

    Ok(token.access_token)
}
