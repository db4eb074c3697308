use anyhow::Result;
use clap::Parser;
use tokio::runtime::Runtime;
use wezterm_settings::cli::{self, Cli};
use wezterm_settings::settings::ToolSettings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Route all log::info!() etc. to the log file in the temp directory.
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then settings (applied below).
    wezterm_settings::debug::init_log_bridge(cli.log_level.map(|l| l.to_level_filter()));

    let settings_path = ToolSettings::settings_path();
    let settings = match ToolSettings::load_from(&settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("wezterm-settings: warning: {e:#}, using defaults");
            ToolSettings::default()
        }
    };
    wezterm_settings::debug::set_log_level(settings.log_level.to_level_filter());

    log::info!("Starting wezterm-settings {}", wezterm_settings::VERSION);

    let runtime = Runtime::new()?;
    let mut stdout = std::io::stdout();
    let result = runtime.block_on(cli::run(cli, &settings, &settings_path, &mut stdout));

    match result {
        Ok(0) => Ok(()),
        // Non-zero exit: use process::exit so the shell sees the correct exit code
        Ok(code) => {
            drop(runtime);
            std::process::exit(code);
        }
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("wezterm-settings: error: {e:#}");
            std::process::exit(1);
        }
    }
}
