//! Purpose: `doubler` CLI entry point.
//! Role: Binary crate root; parses args, runs the pipeline, prints one JSON line on stdout.
//! Invariants: Stdout carries exactly one JSON object per invocation, flushed before exit.
//! Invariants: Exit status is 0 unless `--exit-code` is set; then it follows `to_exit_code`.
//! Invariants: Diagnostics go to stderr through `tracing`, filtered by `DOUBLER_LOG`.
use std::ffi::OsString;
use std::io::{self, Write};

use clap::{Parser, error::ErrorKind as ClapErrorKind};
use tracing_subscriber::EnvFilter;

use doubler::response::error_message;
use doubler::{Error, ErrorKind, OutputRecord, process, render_line, to_exit_code};

const LOG_ENV: &str = "DOUBLER_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "doubler",
    version,
    about = "Double the \"value\" field of a JSON object and print the result as JSON",
    long_about = None,
    after_help = r#"EXAMPLES
  $ doubler '{"value": 5}'
  {"processedResult":10,"message":"Hello from Rust!"}
  $ doubler 'not-json'
  {"error":"invalid JSON input: expected ident at line 1 column 2"}

Errors are reported on stdout as {"error": "..."}; the exit status stays 0
unless --exit-code is given. Set DOUBLER_LOG=debug for diagnostics on stderr."#
)]
struct Cli {
    #[arg(
        long,
        help = "Exit with a non-zero status when the result is an error"
    )]
    exit_code: bool,
    #[arg(
        value_name = "JSON",
        allow_negative_numbers = true,
        help = "Input object, e.g. '{\"value\": 5}'"
    )]
    input: Option<String>,
    #[arg(hide = true)]
    extra: Vec<String>,
}

fn main() {
    init_tracing();
    std::process::exit(run(std::env::args_os()));
}

fn run<I>(args: I) -> i32
where
    I: IntoIterator<Item = OsString>,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let exit_code = exit_code_requested(&args);
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                if let Err(io_err) = err.print() {
                    tracing::error!(error = %io_err, "failed to write help");
                    return to_exit_code(ErrorKind::Io);
                }
                return 0;
            }
            _ => {
                let usage = Error::new(ErrorKind::Usage).with_message(clap_error_summary(&err));
                return emit(&Err(usage), exit_code);
            }
        },
    };

    if !cli.extra.is_empty() {
        tracing::debug!(count = cli.extra.len(), "ignoring extra arguments");
    }

    let result = process(cli.input.as_deref());
    if let Err(err) = &result {
        tracing::debug!(kind = ?err.kind(), "request failed");
    }
    emit(&result, cli.exit_code)
}

// Usage errors happen before clap has parsed `--exit-code`, so look for it in the raw args.
fn exit_code_requested(args: &[OsString]) -> bool {
    args.iter()
        .skip(1)
        .take_while(|arg| *arg != "--")
        .any(|arg| *arg == "--exit-code")
}

fn emit(result: &Result<OutputRecord, Error>, exit_code: bool) -> i32 {
    let line = render_line(result);
    if let Err(err) = write_line(&line) {
        tracing::error!(error = %error_message(&err), "failed to write response");
        return to_exit_code(err.kind());
    }
    match result {
        Err(err) if exit_code => to_exit_code(err.kind()),
        _ => 0,
    }
}

fn write_line(line: &str) -> Result<(), Error> {
    let mut out = io::stdout().lock();
    writeln!(out, "{line}")
        .and_then(|()| out.flush())
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write stdout")
                .with_source(err)
        })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
