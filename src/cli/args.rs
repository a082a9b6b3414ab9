//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Adom blog compiler CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: adom.toml)
    #[arg(short = 'C', long, default_value = "adom.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the site for production
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Start development server with file watching
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable file watching for auto-rebuild
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Include draft pages in the build (serve always keeps drafts)
    #[arg(short, long)]
    pub drafts: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_alias() {
        let cli = Cli::try_parse_from(["adom", "b", "--clean"]).unwrap();
        assert!(cli.is_build());
        match cli.command {
            Commands::Build { build_args } => assert!(build_args.clean),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_serve_watch_flag_variants() {
        let cli = Cli::try_parse_from(["adom", "serve", "--watch", "false"]).unwrap();
        match cli.command {
            Commands::Serve { watch, .. } => assert_eq!(watch, Some(false)),
            _ => unreachable!(),
        }

        let cli = Cli::try_parse_from(["adom", "serve", "-w"]).unwrap();
        match cli.command {
            Commands::Serve { watch, .. } => assert_eq!(watch, Some(true)),
            _ => unreachable!(),
        }

        let cli = Cli::try_parse_from(["adom", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { watch, .. } => assert_eq!(watch, None),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_serve_port_and_interface() {
        let cli =
            Cli::try_parse_from(["adom", "s", "-p", "3000", "-i", "0.0.0.0"]).unwrap();
        match cli.command {
            Commands::Serve {
                port, interface, ..
            } => {
                assert_eq!(port, Some(3000));
                assert_eq!(interface, Some("0.0.0.0".parse().unwrap()));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_global_config_option() {
        let cli = Cli::try_parse_from(["adom", "-C", "other.toml", "build"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }
}
