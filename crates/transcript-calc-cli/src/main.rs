//! tcalc: terminal calculator with a transcript
//!
//! ## Usage
//!
//! ```bash
//! tcalc                          # Keypad TUI
//! echo "2+2" | tcalc repl        # Line-oriented, reads stdin
//! tcalc eval "1/3" "sqrt(2)"     # One shot, prints the transcript
//! tcalc eval "1/0" --strict      # Exit code reflects errors
//! ```

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::debug;
use transcript_calc::tui::{self, CalculatorApp};
use transcript_calc_cli::logging::{self, LogTarget};
use transcript_calc_cli::{
    build_config, run_eval, Cli, CliConfig, CliError, CliResult, Commands, Repl, TranscriptPrinter,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    let command = cli.command_or_default();

    let target = match command {
        Commands::Tui => LogTarget::Screen,
        Commands::Repl(_) | Commands::Eval(_) => LogTarget::Lines,
    };
    logging::init(config.verbosity, target)?;
    debug!(?command, ?config, "starting");

    match command {
        Commands::Tui => run_tui(),
        Commands::Repl(_) => run_repl(&config),
        Commands::Eval(args) => run_eval(&args, &config, &mut io::stdout().lock()),
    }
}

fn run_tui() -> CliResult<()> {
    if !io::stdout().is_terminal() {
        return Err(CliError::terminal(
            "the TUI needs a terminal; use `tcalc repl` or `tcalc eval` instead",
        ));
    }
    let mut app = CalculatorApp::new();
    tui::run(&mut app).map_err(|e| CliError::terminal(e.to_string()))
}

fn run_repl(config: &CliConfig) -> CliResult<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let printer = TranscriptPrinter::new(config.use_color());
    let mut stdout = io::stdout().lock();

    if interactive && config.banner && !config.verbosity.is_quiet() {
        printer.write_banner(&mut stdout)?;
    }
    let mut repl = Repl::new(printer, interactive);
    repl.run(stdin.lock(), &mut stdout)?;
    stdout.flush()?;
    debug!(entries = repl.transcript().len(), "repl finished");
    Ok(())
}
