#![warn(clippy::uninlined_format_args)]

mod bootstrap;

use bootstrap::{AppConfig, init_logging};
use fairshare_application::{Ledger, ProcessError};
use std::{borrow::Cow, env, fs, process};

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let Some(path) = env::args().nth(1) else {
        return Err("Usage: fairshare-interpreter <ledger.json>".into());
    };

    let config = AppConfig::from_env()?;
    let source =
        fs::read_to_string(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;
    let ledger = parse_ledger(&source)?;

    tracing::debug!(
        path = %path,
        tolerance = %config.tolerance.bound(),
        check_invariants = config.check_invariants,
        "Ledger loaded"
    );

    let report = config.processor().process(&ledger).map_err(describe)?;
    let output = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("Failed to render settlement: {err}"))?;
    println!("{output}");

    Ok(())
}

fn parse_ledger(source: &str) -> CliResult<Ledger> {
    serde_json::from_str(source).map_err(|err| format!("Invalid ledger JSON: {err}").into())
}

fn describe(err: ProcessError) -> Cow<'static, str> {
    match err {
        ProcessError::Balance(err) => format!("Cannot compute balances: {err}").into(),
        ProcessError::Invariant(err) => format!("Rounding check failed: {err}").into(),
    }
}
