// CLI command definitions

use super::addons::{InstallationsCommand, ListCommand};
use super::cluster::ClusterCommand;
use super::notify::NotifyCommand;
use super::update::{UpdateCommand, VersionCommand};
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "ocm-addons",
    bin_name = "ocm addons",
    about = "Inspect add-ons and their installations on OCM clusters",
    long_about = "An OCM CLI plug-in for listing add-ons, inspecting cluster and installation state, \
                  reading cluster service logs and sending customer notifications"
)]
pub struct CliArgs {
    /// Increase log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Inspect clusters (info, events)
    Cluster(ClusterCommand),

    /// List add-on installations across all clusters
    Installations(InstallationsCommand),

    /// List add-ons
    List(ListCommand),

    /// Send a customer notification to clusters, or list notifications
    #[command(visible_aliases = ["notification", "notifications"])]
    Notify(NotifyCommand),

    /// Update the plug-in to the latest release
    Update(UpdateCommand),

    /// Print the plug-in version
    Version(VersionCommand),
}

impl Commands {
    pub async fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Cluster(cmd) => cmd.execute().await,
            Commands::Installations(cmd) => cmd.execute().await,
            Commands::List(cmd) => cmd.execute().await,
            Commands::Notify(cmd) => cmd.execute().await,
            Commands::Update(cmd) => cmd.execute().await,
            Commands::Version(cmd) => cmd.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_verbosity_is_global_and_counted() {
        let args = CliArgs::parse_from(["ocm-addons", "list", "-vvv"]);
        assert_eq!(args.verbosity, 3);

        let args = CliArgs::parse_from(["ocm-addons", "version"]);
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn test_notify_aliases() {
        for alias in ["notify", "notification", "notifications"] {
            let args = CliArgs::parse_from(["ocm-addons", alias, "list"]);
            assert!(matches!(args.command, Commands::Notify(_)));
        }
    }
}
