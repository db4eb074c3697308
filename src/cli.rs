//! Command-line interface for wezterm-settings.

use crate::font_enumerator::SystemFonts;
use crate::session::{EditingSession, load_blocking};
use crate::settings::{LogLevel, ToolSettings};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use wezterm_settings_config::{
    AppearanceConfig, ConfigModule, FontEnumerator, LoadResult, SaveReport, SyncOrchestrator,
    SyncState, builtin_color_schemes, list_backdrop_images, search_color_schemes, validate,
};

/// Edit WezTerm appearance settings kept as modular Lua files
#[derive(Parser)]
#[command(name = "wezterm-settings")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// WezTerm configuration directory (overrides the settings file and WezTerm's search order)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log level for the log file (overrides RUST_LOG and the settings file)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

impl From<LogLevelArg> for LogLevel {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Off => LogLevel::Off,
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the module files and report what was found
    Show,

    /// Print the loaded settings as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate a JSON settings file and write it out as Lua modules
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Validate a JSON settings file without writing anything
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Overwrite the modules with default settings (existing files are backed up)
    Reset,

    /// Snapshot every existing module file now
    Backup,

    /// List snapshots, oldest first
    Backups,

    /// Copy a snapshot back over its module file
    Restore {
        /// Snapshot id, as printed by `backups`
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Create wezterm.lua requiring the modules, if it does not exist
    Init,

    /// List installed monospace font families
    Fonts,

    /// List built-in color schemes, optionally filtered
    Schemes {
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },

    /// List background images in a directory (defaults to the configured images dir)
    Backdrops {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Show the tool's own settings, or change and save them
    Settings {
        /// Always use this WezTerm configuration directory
        #[arg(long, value_name = "DIR", conflicts_with = "unset_config_dir")]
        set_config_dir: Option<PathBuf>,

        /// Go back to WezTerm's own directory search
        #[arg(long)]
        unset_config_dir: bool,

        /// Log file verbosity used when neither RUST_LOG nor --log-level is given
        #[arg(long, value_enum, value_name = "LEVEL")]
        set_log_level: Option<LogLevelArg>,

        /// Whether saving creates wezterm.lua when it is missing
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        create_entrypoint: Option<bool>,
    },
}

/// Run a parsed command, writing its output to `out`. Returns the exit code.
///
/// `settings` were loaded from `settings_path`, which the `settings`
/// command writes back to.
pub async fn run(
    cli: Cli,
    settings: &ToolSettings,
    settings_path: &Path,
    out: &mut (dyn Write + Send),
) -> Result<i32> {
    // Resolved per command so `settings` still works when no directory can be found
    let resolver = settings.resolver(cli.config_dir.as_deref());
    let open = || -> Result<SyncOrchestrator> {
        let orchestrator = SyncOrchestrator::from_resolver(resolver.as_ref())?;
        log::info!(
            "Using configuration directory {}",
            orchestrator.config_dir().display()
        );
        Ok(orchestrator)
    };

    match cli.command {
        Commands::Show => {
            let orchestrator = open()?;
            let loaded = load_blocking(orchestrator.clone()).await?;
            print_load(out, &orchestrator, &loaded)?;
            Ok(0)
        }
        Commands::Export { output } => {
            let loaded = load_blocking(open()?).await?;
            let json = loaded.config.to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, format!("{json}\n"))
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    writeln!(out, "Exported to {}", path.display())?;
                }
                None => writeln!(out, "{json}")?,
            }
            Ok(0)
        }
        Commands::Import { file } => {
            let config = read_model(&file)?;
            let (mut session, _) = EditingSession::open(open()?).await?;
            session.replace(config);
            save_session(out, &mut session, settings).await
        }
        Commands::Check { file } => {
            let config = read_model(&file)?;
            let errors = validate(&config);
            if errors.is_empty() {
                writeln!(out, "{}: valid", file.display())?;
                return Ok(0);
            }
            for error in &errors {
                writeln!(out, "{error}")?;
            }
            Ok(1)
        }
        Commands::Reset => {
            let (mut session, _) = EditingSession::open(open()?).await?;
            session.reset_to_defaults();
            save_session(out, &mut session, settings).await
        }
        Commands::Backup => {
            let report = open()?.create_backup_now();
            if report.records.is_empty() && report.is_success() {
                writeln!(out, "No module files to back up")?;
            }
            for record in &report.records {
                writeln!(out, "Created {}", record.id)?;
            }
            for (module, error) in &report.module_errors {
                writeln!(out, "error: {module}: {error}")?;
            }
            Ok(if report.is_success() { 0 } else { 1 })
        }
        Commands::Backups => {
            let records = open()?.list_backups()?;
            if records.is_empty() {
                writeln!(out, "No backups")?;
            }
            for record in &records {
                writeln!(
                    out,
                    "{}  {}  {}",
                    record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                    file_label(&record.target_file),
                    record.id
                )?;
            }
            Ok(0)
        }
        Commands::Restore { id } => {
            let record = open()?.restore_backup(&id)?;
            writeln!(
                out,
                "Restored {} from {}",
                record.target_file.display(),
                record.id
            )?;
            Ok(0)
        }
        Commands::Init => {
            let orchestrator = open()?;
            if orchestrator.ensure_entrypoint()? {
                writeln!(out, "Created {}", entrypoint_label(&orchestrator))?;
            } else {
                writeln!(out, "{} already exists", entrypoint_label(&orchestrator))?;
            }
            Ok(0)
        }
        Commands::Fonts => {
            let families =
                tokio::task::spawn_blocking(|| SystemFonts::load().list_monospace_families())
                    .await
                    .context("Font enumeration task panicked")?;
            for family in families {
                writeln!(out, "{family}")?;
            }
            Ok(0)
        }
        Commands::Schemes { query } => {
            let schemes = match query.as_deref() {
                Some(query) => search_color_schemes(query),
                None => builtin_color_schemes(),
            };
            for scheme in schemes {
                writeln!(out, "{:<12} {}", scheme.category, scheme.name)?;
            }
            Ok(0)
        }
        Commands::Backdrops { dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => {
                    let loaded = load_blocking(open()?).await?;
                    PathBuf::from(loaded.config.backdrop.images_dir)
                }
            };
            if dir.as_os_str().is_empty() {
                writeln!(out, "No images directory configured")?;
                return Ok(1);
            }
            for image in list_backdrop_images(&dir)? {
                writeln!(out, "{}", image.filename)?;
            }
            Ok(0)
        }
        Commands::Settings {
            set_config_dir,
            unset_config_dir,
            set_log_level,
            create_entrypoint,
        } => {
            let mut updated = settings.clone();
            if let Some(dir) = set_config_dir {
                updated.config_dir = Some(dir);
            }
            if unset_config_dir {
                updated.config_dir = None;
            }
            if let Some(level) = set_log_level {
                updated.log_level = level.into();
            }
            if let Some(create) = create_entrypoint {
                updated.create_entrypoint = create;
            }
            if updated != *settings {
                updated
                    .save_to(settings_path)
                    .with_context(|| format!("Failed to save {}", settings_path.display()))?;
                log::info!("Saved settings to {}", settings_path.display());
                writeln!(out, "Saved {}", settings_path.display())?;
            }
            print_settings(out, &updated)?;
            Ok(0)
        }
    }
}

fn print_settings(out: &mut dyn Write, settings: &ToolSettings) -> Result<()> {
    match &settings.config_dir {
        Some(dir) => writeln!(out, "config_dir: {}", dir.display())?,
        None => writeln!(out, "config_dir: (WezTerm search order)")?,
    }
    writeln!(out, "log_level: {}", settings.log_level.display_name())?;
    writeln!(out, "create_entrypoint: {}", settings.create_entrypoint)?;
    Ok(())
}

fn read_model(path: &Path) -> Result<AppearanceConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    AppearanceConfig::from_json(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

async fn save_session(
    out: &mut (dyn Write + Send),
    session: &mut EditingSession,
    settings: &ToolSettings,
) -> Result<i32> {
    let report = session.save().await?;
    print_save(out, &report)?;
    if !report.is_success() {
        return Ok(1);
    }
    if settings.create_entrypoint && session.orchestrator().ensure_entrypoint()? {
        writeln!(out, "Created {}", entrypoint_label(session.orchestrator()))?;
    }
    Ok(0)
}

fn print_load(out: &mut dyn Write, orchestrator: &SyncOrchestrator, loaded: &LoadResult) -> Result<()> {
    writeln!(out, "Configuration directory: {}", orchestrator.config_dir().display())?;
    for module in ConfigModule::all() {
        let status = if loaded.existed[module.index()] {
            "present"
        } else {
            "missing (defaults)"
        };
        writeln!(out, "  {:<16} {}", module.file_name(), status)?;
    }
    for (module, error) in &loaded.module_errors {
        writeln!(out, "error: {module}: {error}")?;
    }
    if loaded.diagnostics.is_empty() {
        writeln!(out, "No diagnostics")?;
    } else {
        writeln!(out, "{} diagnostic(s):", loaded.diagnostics.len())?;
        for diagnostic in &loaded.diagnostics {
            writeln!(out, "  {diagnostic}")?;
        }
    }
    let errors = validate(&loaded.config);
    for error in &errors {
        writeln!(out, "invalid: {error}")?;
    }
    Ok(())
}

fn print_save(out: &mut dyn Write, report: &SaveReport) -> Result<()> {
    if report.state == SyncState::Invalid {
        writeln!(out, "Not saved, {} validation error(s):", report.validation_errors.len())?;
        for error in &report.validation_errors {
            writeln!(out, "  {error}")?;
        }
        return Ok(());
    }
    for record in &report.backups_created {
        writeln!(out, "Backed up {}", record.id)?;
    }
    for path in &report.files_written {
        writeln!(out, "Wrote {}", path.display())?;
    }
    for module in &report.unchanged {
        writeln!(out, "Unchanged {module}")?;
    }
    for (module, error) in &report.module_errors {
        writeln!(out, "error: {module}: {error}")?;
    }
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn entrypoint_label(orchestrator: &SyncOrchestrator) -> String {
    orchestrator
        .config_dir()
        .join(wezterm_settings_config::module::ENTRYPOINT_FILE)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn run_args(args: &[&str], settings: &ToolSettings) -> (i32, String) {
        let settings_dir = tempdir().unwrap();
        run_with_settings_file(args, settings, &settings_dir.path().join("settings.yaml")).await
    }

    async fn run_with_settings_file(
        args: &[&str],
        settings: &ToolSettings,
        settings_path: &Path,
    ) -> (i32, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let code = run(cli, settings, settings_path, &mut out).await.unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    fn no_entrypoint() -> ToolSettings {
        ToolSettings {
            create_entrypoint: false,
            ..ToolSettings::default()
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wezterm-settings",
            "show",
            "--config-dir",
            "/tmp/wez",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Show));
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/wez")));
        assert_eq!(
            cli.log_level.map(LogLevelArg::to_level_filter),
            Some(log::LevelFilter::Debug)
        );
    }

    #[test]
    fn test_restore_requires_id() {
        assert!(Cli::try_parse_from(["wezterm-settings", "restore"]).is_err());
    }

    #[tokio::test]
    async fn test_show_on_empty_directory() {
        let dir = tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let (code, out) = run_args(
            &["wezterm-settings", "--config-dir", dir_arg, "show"],
            &no_entrypoint(),
        )
        .await;
        assert_eq!(code, 0);
        assert!(out.contains("colors.lua"));
        assert!(out.contains("missing (defaults)"));
        assert!(out.contains("No diagnostics"));
    }

    #[tokio::test]
    async fn test_import_invalid_writes_nothing() {
        let dir = tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let json = dir.path().join("settings.json");
        std::fs::write(&json, r#"{"window": {"window_background_opacity": 1.5}}"#).unwrap();

        let (code, out) = run_args(
            &["wezterm-settings", "--config-dir", dir_arg, "import", json.to_str().unwrap()],
            &no_entrypoint(),
        )
        .await;
        assert_eq!(code, 1);
        assert!(out.contains("window.window_background_opacity"));
        assert!(!dir.path().join("appearance.lua").exists());
    }

    #[tokio::test]
    async fn test_reset_then_export_roundtrips() {
        let dir = tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let (code, out) = run_args(
            &["wezterm-settings", "--config-dir", dir_arg, "reset"],
            &ToolSettings::default(),
        )
        .await;
        assert_eq!(code, 0);
        assert!(out.contains("Wrote"));
        assert!(dir.path().join("wezterm.lua").exists());

        let exported = dir.path().join("export.json");
        let (code, _) = run_args(
            &[
                "wezterm-settings",
                "--config-dir",
                dir_arg,
                "export",
                "--output",
                exported.to_str().unwrap(),
            ],
            &no_entrypoint(),
        )
        .await;
        assert_eq!(code, 0);
        let json = std::fs::read_to_string(&exported).unwrap();
        assert_eq!(
            AppearanceConfig::from_json(&json).unwrap(),
            AppearanceConfig::default()
        );

        let (code, out) = run_args(
            &["wezterm-settings", "--config-dir", dir_arg, "check", exported.to_str().unwrap()],
            &no_entrypoint(),
        )
        .await;
        assert_eq!(code, 0);
        assert!(out.contains("valid"));
    }

    #[tokio::test]
    async fn test_schemes_filter() {
        let dir = tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let (code, out) = run_args(
            &["wezterm-settings", "--config-dir", dir_arg, "schemes", "dracula"],
            &no_entrypoint(),
        )
        .await;
        assert_eq!(code, 0);
        assert!(out.contains("Dracula"));
        assert!(!out.contains("Nord"));
    }

    #[tokio::test]
    async fn test_backdrops_without_configured_dir() {
        let dir = tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let (code, out) = run_args(
            &["wezterm-settings", "--config-dir", dir_arg, "backdrops"],
            &no_entrypoint(),
        )
        .await;
        assert_eq!(code, 1);
        assert!(out.contains("No images directory configured"));
    }

    #[tokio::test]
    async fn test_settings_command_persists_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        let wez_dir = dir.path().join("wez");

        let (code, out) =
            run_with_settings_file(&["wezterm-settings", "settings"], &ToolSettings::default(), &path)
                .await;
        assert_eq!(code, 0);
        assert!(out.contains("config_dir: (WezTerm search order)"));
        assert!(out.contains("log_level: Off"));
        assert!(!path.exists());

        let (code, out) = run_with_settings_file(
            &[
                "wezterm-settings",
                "settings",
                "--set-config-dir",
                wez_dir.to_str().unwrap(),
                "--set-log-level",
                "debug",
                "--create-entrypoint",
                "false",
            ],
            &ToolSettings::default(),
            &path,
        )
        .await;
        assert_eq!(code, 0);
        assert!(out.contains("Saved"));
        assert!(out.contains("log_level: Debug"));
        let saved = ToolSettings::load_from(&path).unwrap();
        assert_eq!(saved.config_dir.as_deref(), Some(wez_dir.as_path()));
        assert_eq!(saved.log_level, LogLevel::Debug);
        assert!(!saved.create_entrypoint);

        let (code, _) = run_with_settings_file(
            &["wezterm-settings", "settings", "--unset-config-dir"],
            &saved,
            &path,
        )
        .await;
        assert_eq!(code, 0);
        let saved = ToolSettings::load_from(&path).unwrap();
        assert!(saved.config_dir.is_none());
        assert_eq!(saved.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_settings_dir_flags_conflict() {
        assert!(
            Cli::try_parse_from([
                "wezterm-settings",
                "settings",
                "--set-config-dir",
                "/tmp/wez",
                "--unset-config-dir",
            ])
            .is_err()
        );
    }

    #[tokio::test]
    async fn test_backup_reports_failed_module_and_keeps_going() {
        let dir = tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        std::fs::create_dir(dir.path().join("colors.lua")).unwrap();
        std::fs::write(dir.path().join("fonts.lua"), "config.font_size = 13\n").unwrap();

        let (code, out) = run_args(
            &["wezterm-settings", "--config-dir", dir_arg, "backup"],
            &no_entrypoint(),
        )
        .await;
        assert_eq!(code, 1);
        assert!(out.contains("Created fonts.lua."));
        assert!(out.contains("error: "));
        assert!(!out.contains("No module files"));
    }
}
