use fairshare_application::LedgerProcessor;
use fairshare_domain::{Money, Tolerance};
use rust_decimal::Decimal;
use std::{borrow::Cow, env, str::FromStr};
use tracing_subscriber::EnvFilter;

const TOLERANCE_VAR: &str = "FAIRSHARE_TOLERANCE";
const CHECK_INVARIANTS_VAR: &str = "FAIRSHARE_CHECK_INVARIANTS";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Runtime settings read from the environment (and an optional `.env` file).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub tolerance: Tolerance,
    pub check_invariants: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Cow<'static, str>> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Cow<'static, str>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tolerance = match lookup(TOLERANCE_VAR) {
            Some(raw) => parse_tolerance(&raw)?,
            None => Tolerance::default(),
        };
        let check_invariants = match lookup(CHECK_INVARIANTS_VAR) {
            Some(raw) => parse_flag(&raw)?,
            None => false,
        };

        Ok(Self {
            tolerance,
            check_invariants,
        })
    }

    pub fn processor(&self) -> LedgerProcessor {
        LedgerProcessor::new()
            .with_tolerance(self.tolerance)
            .with_invariant_checks(self.check_invariants)
    }
}

fn parse_tolerance(raw: &str) -> Result<Tolerance, Cow<'static, str>> {
    let value = Decimal::from_str(raw.trim())
        .map_err(|err| format!("{TOLERANCE_VAR} must be a decimal amount ('{raw}'): {err}"))?;
    if value.is_sign_negative() {
        return Err(format!("{TOLERANCE_VAR} must not be negative (found {value})").into());
    }
    Ok(Tolerance::new(Money::from_decimal(value)))
}

fn parse_flag(raw: &str) -> Result<bool, Cow<'static, str>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => {
            Err(format!("{CHECK_INVARIANTS_VAR} must be a boolean flag (found '{other}')").into())
        }
    }
}

/// Initialize logging and tracing
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
