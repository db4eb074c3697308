//! Log output for wezterm-settings.
//!
//! Every `log::info!()` etc. is routed to `wezterm_settings.log` in the
//! system temp directory, so stdout stays clean for command output. When
//! `RUST_LOG` is set, records are mirrored to stderr as well.
//!
//! Level precedence: `--log-level`, then `RUST_LOG`, then the settings file
//! (applied later through [`set_log_level`]).

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl LogBridge {
    fn write_raw(&self, msg: &str) {
        let mut file = self.file.lock();
        if file.is_none() {
            *file = open_log_file();
            if let Some(f) = file.as_mut() {
                let _ = f.write_all(session_header().as_bytes());
            }
        }
        if let Some(f) = file.as_mut() {
            let _ = f.write_all(msg.as_bytes());
            let _ = f.flush();
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            &get_timestamp(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        if self.mirror_stderr {
            eprint!("{line}");
        }
        self.write_raw(&line);
    }

    fn flush(&self) {
        if let Some(f) = self.file.lock().as_mut() {
            let _ = f.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();
static CLI_OVERRIDE: OnceLock<bool> = OnceLock::new();

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("wezterm_settings.log")
}

fn open_log_file() -> Option<File> {
    // Failure to open is silent; logging must never break a command
    OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(log_path())
        .ok()
}

fn session_header() -> String {
    format!(
        "{}\nwezterm-settings session started at {}\n{}\n",
        "=".repeat(80),
        get_timestamp(),
        "=".repeat(80)
    )
}

fn get_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

fn format_line(timestamp: &str, level: log::Level, target: &str, msg: &str) -> String {
    let level_str = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    format!("[{}] [{}] [{}] {}\n", timestamp, level_str, target, msg)
}

fn env_level() -> Option<LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    // Only a bare level is honoured; per-target directives fall back to debug
    Some(value.trim().parse().unwrap_or(LevelFilter::Debug))
}

/// Install the bridge as the global logger.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let env = env_level();
    let bridge = BRIDGE.get_or_init(|| LogBridge {
        file: Mutex::new(None),
        mirror_stderr: env.is_some(),
    });
    if log::set_logger(bridge).is_err() {
        return;
    }
    let _ = CLI_OVERRIDE.set(cli_level.is_some() || env.is_some());
    log::set_max_level(cli_level.or(env).unwrap_or(LevelFilter::Off));
}

/// Apply the level from the settings file, unless the command line or
/// `RUST_LOG` already chose one.
pub fn set_log_level(level: LevelFilter) {
    if CLI_OVERRIDE.get().copied().unwrap_or(false) {
        return;
    }
    log::set_max_level(level);
}
