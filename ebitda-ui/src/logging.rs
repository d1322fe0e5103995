//! Log setup for the tutor binary.
//!
//! Events go to stderr, so they never interleave with the screen on stdout,
//! and to a log file when one is given at startup. The level filter sits in
//! a reload layer so the `log` command can change it mid-session.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    reload,
    util::SubscriberInitExt,
};

static LEVEL: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Local time of day with milliseconds, e.g. `14:03:27.118`.
struct ClockTime;

impl FormatTime for ClockTime {
    fn format_time(
        &self,
        w: &mut Writer<'_>,
    ) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S%.3f"))
    }
}

fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| anyhow!("invalid log level '{directive}': {e}"))
}

/// Changes the active log filter at runtime.
///
/// Accepts a bare level ("error", "warn", "info", "debug", "trace") or any
/// EnvFilter directive such as `ebitda_core=debug`.
pub fn set_log_level(directive: &str) -> Result<()> {
    let handle = LEVEL.get().context("logging not yet initialized")?;
    handle
        .reload(parse_filter(directive)?)
        .context("filter reload failed")
}

/// Installs the global subscriber. Call once at startup.
///
/// The level comes from `RUST_LOG` when set, otherwise `default_level`.
/// When `log_file` is given it is opened for appending and receives the
/// same events as stderr, without colour.
///
/// # Errors
///
/// Fails when `default_level` is not a valid filter, the log file cannot be
/// opened, or a global subscriber is already installed.
pub fn init_logging(
    default_level: &str,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(default_level)?,
    };

    let file = log_file
        .map(|path| {
            File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))
        })
        .transpose()?;

    let (filter, handle) = reload::Layer::new(filter);

    let stderr_layer = fmt::layer()
        .with_timer(ClockTime)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = file.map(|file| {
        fmt::layer()
            .with_timer(ClockTime)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global logger is already installed")?;

    let _ = LEVEL.set(handle);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    // One test owns the global subscriber so there is no init race.
    #[test]
    fn file_logging_and_runtime_level() {
        let err = init_logging("info", Some(Path::new("/definitely/not/here/ebitda.log")))
            .unwrap_err();
        assert!(err.to_string().contains("cannot open log file"));
        assert!(set_log_level("debug").is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        init_logging("warn", Some(&path)).unwrap();

        assert!(set_log_level("ebitda_core=notalevel").is_err());
        set_log_level("debug").unwrap();
        tracing::debug!(target: "ebitda_ui", "level raised");

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("level raised"));
        assert!(init_logging("info", None).is_err());
    }
}
