//! Authenticated OCM session shared by the remote commands

use crate::domain::addon::AddonPager;
use crate::domain::cluster::ClusterPager;
use crate::domain::config::{OcmConfig, PluginConfig};
use crate::infrastructure::constants::USER_AGENT;
use crate::infrastructure::ocm::auth::acquire_token;
use crate::infrastructure::ocm::{OcmClient, OcmConnection};
use crate::shared::error::{AddonsError, Result};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info_span, Span};

pub struct Session {
    ocm: OcmConfig,
    plugin: PluginConfig,
    conn: Arc<dyn OcmConnection>,
    span: Span,
}

impl Session {
    /// Load both config files and log in.
    pub async fn new() -> Result<Self> {
        let ocm = OcmConfig::load()?;
        let plugin = PluginConfig::load()?;

        Self::from_config(ocm, plugin).await
    }

    pub async fn from_config(ocm: OcmConfig, plugin: PluginConfig) -> Result<Self> {
        if ocm.is_empty() {
            return Err(AddonsError::no_configuration_loaded());
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(ocm.insecure)
            .build()?;

        let token = acquire_token(&client, &ocm).await?;
        let conn = OcmClient::with_client(client, ocm.url(), token)?;

        Ok(Self::with_connection(ocm, plugin, Arc::new(conn)))
    }

    pub fn with_connection(
        ocm: OcmConfig,
        plugin: PluginConfig,
        conn: Arc<dyn OcmConnection>,
    ) -> Self {
        let span = info_span!("session", ocm_url = %ocm.url());
        span.in_scope(|| debug!(page_size = plugin.page_size, "session started"));

        Self {
            ocm,
            plugin,
            conn,
            span,
        }
    }

    pub fn conn(&self) -> Arc<dyn OcmConnection> {
        Arc::clone(&self.conn)
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn plugin(&self) -> &PluginConfig {
        &self.plugin
    }

    pub fn page_size(&self) -> usize {
        self.plugin.page_size
    }

    /// Pager command from `ocm.json`, falling back to the plug-in config.
    pub fn pager(&self) -> Option<&str> {
        self.ocm.pager().or(self.plugin.pager.as_deref())
    }

    pub fn clusters(&self) -> ClusterPager {
        ClusterPager::retrieve(self.conn(), self.span.clone()).with_page_size(self.page_size())
    }

    pub fn addons(&self) -> AddonPager {
        AddonPager::retrieve(self.conn(), self.span.clone()).with_page_size(self.page_size())
    }
}
