//! `update` and `version`

use crate::cli::display::StatusIcon;
use crate::cli::prompt::confirm;
use crate::domain::config::PluginConfig;
use crate::domain::update::{backup_path, replace_binary, up_to_date, VersionUpdater};
use crate::infrastructure::scm::GitHubClient;
use crate::shared::version::{long_version, version};
use anyhow::Context;
use chrono::Local;
use clap::Parser;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    UpToDate { current: String },
    Declined { latest: String },
    Updated { from: String, to: String },
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateCommand {}

impl UpdateCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let plugin = PluginConfig::load().context("loading plug-in config")?;
        let updater = GitHubClient::new(&plugin.github).context("creating release client")?;
        let bin = std::env::current_exe().context("locating running binary")?;

        let outcome = update_plugin(&updater, &version(), &bin, confirm).await?;

        match outcome {
            UpdateOutcome::UpToDate { current } => {
                println!("{} already up to date ({})", StatusIcon::SUCCESS, current)
            }
            UpdateOutcome::Declined { latest } => {
                println!("{} update to {} cancelled", StatusIcon::WARNING, latest)
            }
            UpdateOutcome::Updated { from, to } => {
                println!("{} updated from {} to {}", StatusIcon::SUCCESS, from, to)
            }
        }

        Ok(())
    }
}

/// Replace `bin` with the latest release when it is newer than `current`
/// and `ask` agrees.
pub async fn update_plugin<F>(
    updater: &dyn VersionUpdater,
    current: &str,
    bin: &Path,
    ask: F,
) -> anyhow::Result<UpdateOutcome>
where
    F: FnOnce(&str) -> std::io::Result<bool>,
{
    let latest = updater
        .latest_version()
        .await
        .context("retrieving latest version")?;

    if up_to_date(current, &latest) {
        return Ok(UpdateOutcome::UpToDate {
            current: current.to_string(),
        });
    }

    let question = format!("Update from {} to {}?", current, latest);
    if !ask(&question).context("reading answer")? {
        return Ok(UpdateOutcome::Declined { latest });
    }

    println!("{} downloading {}", StatusIcon::PENDING, latest);

    let data = updater
        .latest_plugin_binary()
        .await
        .context("downloading latest release")?;

    let backup = backup_path(bin, &Local::now());
    replace_binary(bin, &data, &backup).context("replacing plug-in binary")?;

    info!(from = %current, to = %latest, bin = %bin.display(), "plug-in updated");

    Ok(UpdateOutcome::Updated {
        from: current.to_string(),
        to: latest,
    })
}

#[derive(Parser, Debug, Clone)]
pub struct VersionCommand {
    /// Also print commit, build date and builder
    #[arg(long)]
    pub long: bool,
}

impl VersionCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        if self.long {
            println!("{}", long_version());
        } else {
            println!("{}", version());
        }
        Ok(())
    }
}
