//! tcalc: command-line front end for `transcript-calc`
//!
//! Three ways in: the keypad TUI, a stdin repl, and one-shot `eval`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
pub mod repl;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, FormatArg, ReplArgs};
pub use config::{CliConfig, ColorChoice, OutputFormat, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{summary, TranscriptPrinter};
pub use repl::Repl;

use std::io::Write;
use transcript_calc::core::transcript::Transcript;
use transcript_calc::session::Session;

/// Build configuration from parsed arguments
#[must_use]
pub fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let mut config = CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.into());

    match &cli.command {
        Some(Commands::Eval(args)) => config = config.with_format(args.format.into()),
        Some(Commands::Repl(args)) => config = config.with_banner(!args.no_banner),
        Some(Commands::Tui) | None => {}
    }
    config
}

/// Evaluate every expression through one session
#[must_use]
pub fn evaluate_all(expressions: &[String]) -> Transcript {
    let mut session = Session::new();
    for expr in expressions {
        session.set_input(expr.as_str());
        session.submit();
    }
    session.transcript().clone()
}

/// Render a transcript in the configured format
pub fn render_transcript(
    transcript: &Transcript,
    config: &CliConfig,
    use_color: bool,
) -> CliResult<String> {
    match config.format {
        OutputFormat::Json => Ok(format!("{}\n", transcript.to_json()?)),
        OutputFormat::Text => {
            let mut out = Vec::new();
            TranscriptPrinter::new(use_color).write_transcript(&mut out, transcript)?;
            String::from_utf8(out).map_err(|e| CliError::config(e.to_string()))
        }
    }
}

/// The `eval` command
pub fn run_eval<W: Write>(args: &EvalArgs, config: &CliConfig, out: &mut W) -> CliResult<()> {
    let transcript = evaluate_all(&args.expressions);
    out.write_all(render_transcript(&transcript, config, config.use_color())?.as_bytes())?;

    if let Some(path) = &args.output {
        std::fs::write(path, render_transcript(&transcript, config, false)?)?;
        tracing::info!(path = %path.display(), "transcript written");
    }
    if config.verbosity.is_verbose() {
        eprintln!("{}", summary(&transcript));
    }

    let failed = transcript.iter().filter(|e| e.is_error()).count();
    if args.strict && failed > 0 {
        return Err(CliError::strict_failure(failed, transcript.len()));
    }
    Ok(())
}
