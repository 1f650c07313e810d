//! CLI argument definitions

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;
use topic_labeler_domain::CommunityId;

/// topic-labeler: label citation-network communities with LLM-generated topics
#[derive(Parser, Debug)]
#[command(name = "topic-labeler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe one community from its hub and authority titles
    Label(LabelArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show status
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["papers", "file"])))]
pub struct LabelArgs {
    /// Identifier of the community (integer or text)
    #[arg(long)]
    pub community_id: CommunityId,

    /// Listing of hub and authority titles
    #[arg(long)]
    pub papers: Option<String>,

    /// File containing the listing (use - for stdin)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the rendered prompt and exit without contacting the provider
    #[arg(long)]
    pub print_prompt: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("topic-labeler").chain(args.iter().copied()))
    }

    #[test]
    fn test_label_requires_an_input_source() {
        let err = parse(&["label", "--community-id", "1"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_label_rejects_both_input_sources() {
        let err = parse(&["label", "--community-id", "1", "--papers", "x", "--file", "-"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_label_accepts_stdin_file() {
        let cli = parse(&["label", "--community-id", "1", "--file", "-"]).unwrap();
        match cli.command {
            Commands::Label(args) => assert_eq!(args.file, Some(PathBuf::from("-"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
