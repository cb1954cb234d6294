//! Command-line interface for YusMov.

mod commands;

use clap::{Parser, Subcommand};

/// YusMov - movie catalog REST API
#[derive(Parser)]
#[command(name = "yusmov")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    #[command(alias = "web")]
    Serve,

    /// Replace the movie collection with the demo catalog
    Seed,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

impl Commands {
    /// `init` writes the default file and must work even when an existing
    /// one does not parse.
    #[must_use]
    pub const fn needs_config(self) -> bool {
        !matches!(self, Self::Init)
    }
}

impl Cli {
    #[must_use]
    pub fn needs_config(&self) -> bool {
        self.command.is_none_or(Commands::needs_config)
    }
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["yusmov"]).unwrap();
        assert_eq!(cli.command, None);
        assert!(cli.needs_config());
    }

    #[test]
    fn test_init_skips_config_loading() {
        let cli = Cli::try_parse_from(["yusmov", "init"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Init));
        assert!(!cli.needs_config());
    }

    #[test]
    fn test_seed_and_web_alias_need_config() {
        let seed = Cli::try_parse_from(["yusmov", "seed"]).unwrap();
        assert!(seed.needs_config());

        let web = Cli::try_parse_from(["yusmov", "web"]).unwrap();
        assert_eq!(web.command, Some(Commands::Serve));
        assert!(web.needs_config());
    }
}
