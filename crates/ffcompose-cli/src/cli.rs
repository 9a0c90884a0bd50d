use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "ffcompose developers",
    version,
    about = "ffcompose - validate, compare and assemble unit-aware force-field parameter fragments.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether the handlers two fragments share could be merged.
    Check(CheckArgs),
    /// Assemble fragments into one force field and report the handler order.
    Merge(MergeArgs),
    /// Print the attribute declarations of the supported potentials.
    Schema(SchemaArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// First fragment (TOML).
    #[arg(required = true, value_name = "PATH")]
    pub first: PathBuf,

    /// Second fragment (TOML).
    #[arg(required = true, value_name = "PATH")]
    pub second: PathBuf,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Fragments to assemble, in order.
    #[arg(required = true, num_args(1..), value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Keep the earlier handler when a later one cannot be merged into it,
    /// instead of failing.
    #[arg(long)]
    pub keep_existing: bool,
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Only print the potential with this tag.
    #[arg(value_name = "TAG")]
    pub tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn merge_parses_files_and_policy_flag() {
        let cli = Cli::try_parse_from(["ffcompose", "-vv", "merge", "a.toml", "b.toml", "--keep-existing"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Merge(args) => {
                assert_eq!(args.files, vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]);
                assert!(args.keep_existing);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn check_requires_two_fragments() {
        assert!(Cli::try_parse_from(["ffcompose", "check", "a.toml"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["ffcompose", "-q", "-v", "schema"]).is_err());
    }
}
