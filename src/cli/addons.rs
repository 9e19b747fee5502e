//! `list` and `installations`

use crate::cli::options::OutputOptions;
use crate::cli::output::emit;
use crate::cli::session::Session;
use crate::domain::addon::Addon;
use crate::domain::cluster::{Cluster, Subscription};
use crate::infrastructure::constants::{COLUMNS_ADDON_LIST, COLUMNS_INSTALLATIONS};
use crate::shared::row::normalize;
use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Only list add-ons whose name or ID contains this text
    #[arg(long, default_value = "")]
    pub search: String,

    /// Comma separated list of columns to display
    #[arg(long, default_value = COLUMNS_ADDON_LIST)]
    pub columns: String,

    #[command(flatten)]
    pub output: OutputOptions,
}

impl ListCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let session = Session::new().await.context("starting session")?;
        let mut table = self.output.renderer(&self.columns);

        let mut addons = session.addons().search_by_name_or_id(&self.search);

        addons
            .for_each(async |mut addon: Addon| {
                addon
                    .with_version()
                    .await
                    .context("retrieving addon version")?;

                table.write(&addon);
                Ok::<(), anyhow::Error>(())
            })
            .await?;

        emit(&table.render(), session.pager()).context("writing table")
    }
}

#[derive(Parser, Debug, Clone)]
pub struct InstallationsCommand {
    /// Only show installations whose add-on name or ID contains this text
    #[arg(value_name = "SEARCH", default_value = "")]
    pub search: String,

    /// Comma separated list of columns to display
    #[arg(long, default_value = COLUMNS_INSTALLATIONS)]
    pub columns: String,

    #[command(flatten)]
    pub output: OutputOptions,
}

impl InstallationsCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let session = Session::new().await.context("starting session")?;
        let mut table = self.output.renderer(&self.columns);
        let fetch_subscription = needs_subscription(table.columns());

        let mut clusters = session.clusters();

        clusters
            .for_each(async |mut cluster: Cluster| {
                if fetch_subscription {
                    cluster
                        .with_subscription()
                        .await
                        .context("retrieving subscription")?;
                }

                cluster
                    .with_addon_installations()
                    .await
                    .with_context(|| format!("retrieving installations for cluster {}", cluster.id()))?;

                for install in cluster.take_addon_installations().matching(&self.search) {
                    table.write(&install);
                }

                Ok::<(), anyhow::Error>(())
            })
            .await?;

        emit(&table.render(), session.pager()).context("writing table")
    }
}

/// Whether any of `columns` shows a cluster subscription field.
fn needs_subscription(columns: &[String]) -> bool {
    Subscription::FIELDS
        .iter()
        .map(|field| format!("cluster_{}", normalize(field)))
        .any(|column| columns.contains(&column))
}
