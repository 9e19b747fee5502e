pub mod addons;
pub mod cluster;
pub mod commands;
pub mod display;
pub mod notify;
pub mod options;
pub mod output;
pub mod prompt;
pub mod session;
pub mod update;

pub use self::commands::{CliArgs, Commands};
pub use self::session::Session;
