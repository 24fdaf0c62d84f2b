//! `ica-detect` CLI entrypoint.
//!
//! Detects the latest Citrix ICA Client Red Hat RPM release and prints its
//! version, checksum, and download URL. Only the release goes to stdout;
//! logs and diagnostics go to stderr.

use clap::Parser;
use ica_detect_cli::cli::Cli;
use ica_detect_cli::config::DetectorConfig;
use ica_detect_cli::error::Result;
use ica_detect_cli::fetch::HttpFetcher;
use ica_detect_cli::output::render;
use ica_detect_cli::pipeline::{PageSource, run_detection};
use std::error::Error;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stderr = std::io::stderr();
    let run_result = run(&cli);
    let exit_code = exit_code_for_run_result(run_result, &mut std::io::stdout(), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Install the stderr logger; `RUST_LOG` takes precedence over `-v`/`-q`.
fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

/// Detect the release and render it, without writing anything.
fn run(cli: &Cli) -> Result<String> {
    let file_config = DetectorConfig::resolve(cli.config.as_deref())?;
    let config = cli.apply_overrides(file_config).validate()?;
    let source = cli
        .input
        .clone()
        .map_or_else(|| PageSource::Url(config.page_url.clone()), PageSource::File);
    let fetcher = HttpFetcher::new(config.user_agent.as_str(), config.timeout());
    let release = run_detection(&config, &source, &fetcher)?;
    Ok(render(&release, cli.output_format())?)
}

fn exit_code_for_run_result(
    result: Result<String>,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32 {
    match result {
        Ok(rendered) => {
            if writeln!(stdout, "{rendered}").is_err() {
                return 1;
            }
            0
        }
        Err(err) => {
            write_stderr_line(stderr, format!("ERROR: {err}"));
            let mut source = err.source();
            while let Some(cause) = source {
                write_stderr_line(stderr, format!("  caused by: {cause}"));
                source = cause.source();
            }
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
