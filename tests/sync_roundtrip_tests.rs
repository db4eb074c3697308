//! Load/save cycles through the module files.

mod common;

use common::TestDir;
use wezterm_settings_config::config::{ColorsUpdate, FontsUpdate, WindowUpdate};
use wezterm_settings_config::{
    AppearanceConfig, ConfigModule, SectionUpdate, SyncOrchestrator, SyncState, default_config,
    extract_module, generate,
};

#[test]
fn test_default_config_round_trips_through_every_module() {
    let generated = generate(default_config());
    let mut merged = AppearanceConfig::default();
    for (module, text) in &generated {
        let result = extract_module(*module, Some(text.as_str()));
        assert!(
            result.diagnostics.is_empty(),
            "{module}: {:?}",
            result.diagnostics
        );
        module.merge_into(&mut merged, &result.config);
    }
    assert_eq!(merged, *default_config());
}

#[test]
fn test_load_of_nonexistent_directory_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = SyncOrchestrator::new(dir.path().join("does").join("not").join("exist"));
    let loaded = orchestrator.load();
    assert_eq!(loaded.config, *default_config());
    assert_eq!(loaded.existed, [false; ConfigModule::COUNT]);
    assert!(loaded.diagnostics.is_empty());
    assert!(loaded.module_errors.is_empty());
}

#[test]
fn test_save_load_save_is_idempotent() {
    let t = TestDir::new();
    let mut config = default_config().clone();
    config
        .apply(SectionUpdate::Fonts(FontsUpdate::Family("Fira \"Code\"\tNerd".to_string())))
        .unwrap();
    config
        .apply(SectionUpdate::Window(WindowUpdate::Opacity(0.85)))
        .unwrap();
    config
        .apply(SectionUpdate::Colors(ColorsUpdate::Ansi {
            index: 3,
            color: "#abcdef".to_string(),
        }))
        .unwrap();

    let first = t.orchestrator.save(&config);
    assert_eq!(first.state, SyncState::Done);
    assert_eq!(first.files_written.len(), ConfigModule::COUNT);
    let texts: Vec<String> = ConfigModule::all().iter().map(|&m| t.read(m)).collect();

    let loaded = t.orchestrator.load();
    assert!(loaded.diagnostics.is_empty());
    assert_eq!(loaded.existed, [true; ConfigModule::COUNT]);
    assert_eq!(loaded.config, config);

    let second = t.orchestrator.save(&loaded.config);
    assert_eq!(second.state, SyncState::Done);
    assert!(second.files_written.is_empty());
    assert!(second.backups_created.is_empty());
    assert_eq!(second.unchanged.len(), ConfigModule::COUNT);
    let again: Vec<String> = ConfigModule::all().iter().map(|&m| t.read(m)).collect();
    assert_eq!(texts, again);
}

#[test]
fn test_out_of_range_opacity_writes_nothing() {
    let t = TestDir::new();
    let mut config = default_config().clone();
    config.window.window_background_opacity = 1.5;

    let report = t.orchestrator.save(&config);
    assert_eq!(report.state, SyncState::Invalid);
    assert_eq!(report.validation_errors.len(), 1);
    assert_eq!(
        report.validation_errors[0].field_path,
        "window.window_background_opacity"
    );
    assert!(report.files_written.is_empty());
    assert!(std::fs::read_dir(t.path()).unwrap().next().is_none());
}

#[test]
fn test_invalid_hex_reports_exact_path() {
    let t = TestDir::new();
    let mut config = default_config().clone();
    config.colors.tab_bar.active_tab.bg_color = "blue".to_string();
    config.colors.ansi[3] = "#12345".to_string();

    let errors = t.orchestrator.validate(&config);
    let paths: Vec<&str> = errors.iter().map(|e| e.field_path.as_str()).collect();
    assert!(paths.contains(&"colors.ansi[3]"));
    assert!(paths.contains(&"colors.tab_bar.active_tab.bg_color"));
}

#[test]
fn test_palette_of_wrong_length_is_rejected() {
    let mut config = default_config().clone();
    config.colors.brights.pop();
    let errors = wezterm_settings_config::validate(&config);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field_path, "colors.brights");
}

#[test]
fn test_hand_edited_module_keeps_defaults_and_reports() {
    let t = TestDir::new();
    t.write(
        ConfigModule::Colors,
        r##"local wezterm = require("wezterm")
local M = {}

function M.apply_to_config(config)
  config.colors = {}
  config.colors.foreground = "#111111"
  config.colors.foreground = "#222222" -- my favourite
  config.colors.ansi = { "#000000", "#111111" }
  config.colors.background = wezterm.color.parse("#000")
  config.leader = { key = "a", mods = "CTRL" }
end

return M
"##,
    );

    let loaded = t.orchestrator.load();
    assert!(loaded.existed[ConfigModule::Colors.index()]);
    assert_eq!(loaded.config.colors.foreground, "#222222");
    assert_eq!(loaded.config.colors.ansi, default_config().colors.ansi);
    assert_eq!(loaded.config.colors.background, default_config().colors.background);

    let paths: Vec<&str> = loaded
        .diagnostics
        .iter()
        .map(|d| d.field_path.as_str())
        .collect();
    assert_eq!(paths, vec!["colors.ansi", "colors.background"]);
}

#[test]
fn test_save_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("wezterm");
    let orchestrator = SyncOrchestrator::new(&nested);
    let report = orchestrator.save(default_config());
    assert!(report.is_success());
    for module in ConfigModule::all() {
        assert!(nested.join(module.file_name()).is_file());
    }
}

#[test]
fn test_entrypoint_is_created_once() {
    let t = TestDir::new();
    assert!(t.orchestrator.ensure_entrypoint().unwrap());
    let entry = t.path().join("wezterm.lua");
    std::fs::write(&entry, "return {}\n").unwrap();
    assert!(!t.orchestrator.ensure_entrypoint().unwrap());
    assert_eq!(std::fs::read_to_string(&entry).unwrap(), "return {}\n");
}

#[test]
fn test_colors_constructor_survives_save() {
    let t = TestDir::new();
    t.write(
        ConfigModule::Colors,
        r##"function M.apply_to_config(config)
  config.colors = {
    foreground = "#c0c0c0",
    tab_bar = { inactive_tab = { bg_color = "#101010", fg_color = "#808080" } },
  }
end
"##,
    );

    let loaded = t.orchestrator.load();
    assert!(loaded.diagnostics.is_empty(), "{:?}", loaded.diagnostics);
    assert_eq!(loaded.config.colors.foreground, "#c0c0c0");

    let report = t.orchestrator.save(&loaded.config);
    assert!(report.is_success());
    assert_eq!(report.backups_created.len(), 1);

    let reloaded = t.orchestrator.load();
    assert!(reloaded.diagnostics.is_empty());
    assert_eq!(reloaded.config.colors.foreground, "#c0c0c0");
    assert_eq!(reloaded.config.colors.tab_bar.inactive_tab.bg_color, "#101010");
    assert_eq!(reloaded.config, loaded.config);
}
