//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tcalc: a calculator that keeps a transcript of everything you evaluate
#[derive(Parser, Debug)]
#[command(name = "tcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run (defaults to `tui`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand to run, falling back to the terminal UI
    #[must_use]
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui)
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive terminal UI with keypad (default)
    Tui,

    /// Line-oriented calculator reading expressions from stdin
    Repl(ReplArgs),

    /// Evaluate expressions and print the transcript
    Eval(EvalArgs),
}

/// Arguments for the repl command
#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplArgs {
    /// Skip the banner
    #[arg(long)]
    pub no_banner: bool,
}

/// Arguments for the eval command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EvalArgs {
    /// Expressions, evaluated in order
    #[arg(required = true, num_args = 1..)]
    pub expressions: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Exit non-zero if any expression records an error
    #[arg(long)]
    pub strict: bool,

    /// Also write the transcript to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// `>>> expr` then the result
    #[default]
    Text,
    /// JSON array of entries
    Json,
}

impl From<FormatArg> for crate::config::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, OutputFormat};

    mod cli_tests {
        use super::*;

        #[test]
        fn test_no_subcommand_defaults_to_tui() {
            let cli = Cli::parse_from(["tcalc"]);
            assert!(cli.command.is_none());
            assert_eq!(cli.command_or_default(), Commands::Tui);
        }

        #[test]
        fn test_parse_tui() {
            let cli = Cli::parse_from(["tcalc", "tui"]);
            assert_eq!(cli.command, Some(Commands::Tui));
        }

        #[test]
        fn test_parse_repl_no_banner() {
            let cli = Cli::parse_from(["tcalc", "repl", "--no-banner"]);
            if let Some(Commands::Repl(args)) = cli.command {
                assert!(args.no_banner);
            } else {
                panic!("expected Repl command");
            }
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = Cli::parse_from(["tcalc", "repl", "-vv", "--color", "never"]);
            assert_eq!(cli.verbose, 2);
            assert_eq!(cli.color, ColorArg::Never);
        }

        #[test]
        fn test_quiet_flag() {
            let cli = Cli::parse_from(["tcalc", "-q", "eval", "1"]);
            assert!(cli.quiet);
        }
    }

    mod eval_args_tests {
        use super::*;

        #[test]
        fn test_parse_eval_defaults() {
            let cli = Cli::parse_from(["tcalc", "eval", "2+2", "1/0"]);
            if let Some(Commands::Eval(args)) = cli.command {
                assert_eq!(args.expressions, vec!["2+2", "1/0"]);
                assert_eq!(args.format, FormatArg::Text);
                assert!(!args.strict);
                assert!(args.output.is_none());
            } else {
                panic!("expected Eval command");
            }
        }

        #[test]
        fn test_parse_eval_options() {
            let cli = Cli::parse_from([
                "tcalc", "eval", "2+2", "--format", "json", "--strict", "-o", "out.json",
            ]);
            if let Some(Commands::Eval(args)) = cli.command {
                assert_eq!(args.format, FormatArg::Json);
                assert!(args.strict);
                assert_eq!(args.output, Some(PathBuf::from("out.json")));
            } else {
                panic!("expected Eval command");
            }
        }

        #[test]
        fn test_eval_requires_expression() {
            assert!(Cli::try_parse_from(["tcalc", "eval"]).is_err());
        }

        #[test]
        fn test_unknown_format_rejected() {
            assert!(Cli::try_parse_from(["tcalc", "eval", "1", "--format", "tap"]).is_err());
        }
    }

    mod conversion_tests {
        use super::*;

        #[test]
        fn test_color_arg_conversion() {
            assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
            assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        }

        #[test]
        fn test_format_arg_conversion() {
            assert_eq!(OutputFormat::from(FormatArg::Text), OutputFormat::Text);
            assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
        }
    }
}
