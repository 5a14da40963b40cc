//! Command-line interface for git-highlights
//!
//! Provides the `git-highlights` root command plus `completions` and
//! `config` subcommands. Invoked without a subcommand it prints its long help.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{ColorMode, LoadedSettings, Settings};
use crate::error::HighlightsError;

mod completions;
mod config;

/// Binary and root command name.
pub const NAME: &str = "git-highlights";

pub const ABOUT: &str = "Generate weekly engineering hightlights from Git/GitHub";

pub const LONG_ABOUT: &str = "git-highlights analyzes merged PRs and generates meeting-ready markdown summaries of the week's work.";

#[derive(Parser, Debug)]
#[command(name = NAME, version, about = ABOUT, long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// When to color log output
    #[arg(long, value_enum, value_name = "WHEN", global = true)]
    color: Option<ColorMode>,

    /// Path to config file (git-highlights.toml or .git-highlights.yml)
    #[arg(short = 'c', long, value_name = "FILE", global = true, env = "GIT_HIGHLIGHTS_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a shell completion script
    Completions(completions::CompletionsArgs),

    /// Show the effective configuration
    Config(config::ConfigArgs),
}

/// Run against the process arguments.
pub fn run() -> Result<()> {
    run_from(std::env::args_os())
}

pub fn run_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => return handle_parse_error(err),
    };

    let cwd = std::env::current_dir()?;
    let loaded = load_config(&cwd, cli.config.as_deref())?;
    let overrides = CliOverrides {
        log_level: cli.verbose.then(|| "debug".to_string()),
        color: cli.color,
    };
    let settings = merge_cli_with_config(loaded.settings, overrides);
    init_tracing(&settings)?;
    debug!(source = ?loaded.source, log_level = %settings.log_level, "settings resolved");

    match cli.command {
        None => {
            let help = Cli::command().render_long_help().to_string();
            write_stdout(help.as_bytes())?;
            Ok(())
        }
        Some(Commands::Completions(args)) => completions::run(args),
        Some(Commands::Config(args)) => {
            config::run(args, &LoadedSettings { settings, source: loaded.source })
        }
    }
}

/// Write a returned error the way the binary reports it: `Error: <message>`.
///
/// Causes attached with `anyhow::Context` follow the message, separated by `: `.
pub fn report_error(err: &anyhow::Error, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Error: {err:#}")
}

fn handle_parse_error(err: clap::Error) -> Result<()> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            err.print()?;
            Ok(())
        }
        _ => Err(HighlightsError::Usage(usage_message(&err)).into()),
    }
}

/// Clap's diagnostic on one line, without its own `error: ` prefix.
///
/// A headline ending in `:` is followed by an indented list (missing
/// arguments, for instance); those items are joined onto it up to the blank
/// line that precedes the usage block.
fn usage_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let mut lines = rendered.lines();
    let first_line = lines.next().unwrap_or_default().trim();
    let headline = first_line.strip_prefix("error: ").unwrap_or(first_line);
    if !headline.ends_with(':') {
        return headline.to_string();
    }

    let items: Vec<&str> = lines
        .take_while(|line| !line.trim().is_empty())
        .map(str::trim)
        .collect();
    if items.is_empty() {
        headline.to_string()
    } else {
        format!("{headline} {}", items.join(", "))
    }
}

/// Write command output to stdout.
fn write_stdout(bytes: &[u8]) -> crate::error::Result<()> {
    write_output(&mut std::io::stdout().lock(), bytes)
}

fn write_output(out: &mut impl Write, bytes: &[u8]) -> crate::error::Result<()> {
    out.write_all(bytes)?;
    out.flush()?;
    Ok(())
}

fn init_tracing(settings: &Settings) -> crate::error::Result<()> {
    // RUST_LOG in the environment always takes precedence over the configured level.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(&settings.log_level)?,
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(settings.color.use_ansi()))
        .with(filter)
        .try_init();
    Ok(())
}

fn configured_filter(level: &str) -> crate::error::Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| HighlightsError::LogFilter {
        level: level.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use similar_asserts::assert_eq;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn root_command_metadata() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "git-highlights");
        assert_eq!(
            cmd.get_about().map(ToString::to_string).as_deref(),
            Some("Generate weekly engineering hightlights from Git/GitHub")
        );
        assert_eq!(
            cmd.get_long_about().map(ToString::to_string).as_deref(),
            Some(
                "git-highlights analyzes merged PRs and generates meeting-ready markdown \
                 summaries of the week's work."
            )
        );
    }

    #[test]
    fn bare_invocation_has_no_subcommand() {
        let cli = Cli::try_parse_from(["git-highlights"]).expect("parses");
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(cli.color.is_none());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["git-highlights", "config", "--verbose", "--color", "never"])
            .expect("parses");
        assert!(matches!(cli.command, Some(Commands::Config(_))));
        assert!(cli.verbose);
        assert_eq!(cli.color, Some(ColorMode::Never));
    }

    #[test]
    fn usage_message_drops_clap_prefix() {
        let err = Cli::try_parse_from(["git-highlights", "--bogus"]).expect_err("unknown flag");
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(usage_message(&err), "unexpected argument '--bogus' found");
    }

    #[test]
    fn usage_message_lists_missing_arguments() {
        let err = Cli::try_parse_from(["git-highlights", "completions"]).expect_err("no shell");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(
            usage_message(&err),
            "the following required arguments were not provided: <SHELL>"
        );
    }

    #[test]
    fn usage_message_keeps_single_line_errors() {
        let err = Cli::try_parse_from(["git-highlights", "completions", "tcsh"])
            .expect_err("unknown shell");
        assert!(usage_message(&err).starts_with("invalid value 'tcsh' for '<SHELL>'"));
        assert!(!usage_message(&err).contains("Usage:"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_are_io_errors() {
        let err = write_output(&mut ClosedPipe, b"_git-highlights() {}\n").expect_err("closed");
        assert!(matches!(err, HighlightsError::Io(_)));
        assert!(err.to_string().starts_with("IO error: "));
    }

    #[test]
    fn write_output_passes_bytes_through() {
        let mut out = Vec::new();
        write_output(&mut out, b"# source: defaults\n").expect("write");
        assert_eq!(out.as_slice(), b"# source: defaults\n".as_slice());
    }

    #[test]
    fn parse_errors_become_usage_errors() {
        let err = run_from(["git-highlights", "--bogus"]).expect_err("unknown flag");
        assert!(matches!(err.downcast_ref::<HighlightsError>(), Some(HighlightsError::Usage(_))));
    }

    #[test]
    fn report_error_formats_single_message() {
        let mut out = Vec::new();
        report_error(&anyhow!("no merged pull requests"), &mut out).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "Error: no merged pull requests\n");
    }

    #[test]
    fn report_error_appends_context_chain() {
        let err = anyhow!("connection refused").context("fetching pull requests");
        let mut out = Vec::new();
        report_error(&err, &mut out).expect("write");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "Error: fetching pull requests: connection refused\n"
        );
    }

    #[test]
    fn configured_filter_accepts_directives() {
        assert!(configured_filter("warn").is_ok());
        assert!(configured_filter("git_highlights=debug,info").is_ok());
    }

    #[test]
    fn configured_filter_rejects_unknown_level() {
        let err = configured_filter("git_highlights=loud").expect_err("bad level");
        assert!(err.to_string().starts_with("invalid log level 'git_highlights=loud': "));
    }
}
