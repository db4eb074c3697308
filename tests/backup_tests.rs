//! Snapshots, retention, restore and per-module failure handling.

mod common;

use common::TestDir;
use std::fs;
use wezterm_settings_config::config::FontsUpdate;
use wezterm_settings_config::{
    ConfigModule, RETENTION, SectionUpdate, SyncError, SyncState, default_config,
};

#[test]
fn test_retention_keeps_newest_snapshots() {
    let t = TestDir::new();
    let mut config = default_config().clone();
    let mut created = Vec::new();

    // First save creates the file; each later save snapshots it first
    for i in 0..=RETENTION + 1 {
        config
            .apply(SectionUpdate::Fonts(FontsUpdate::Size(10.0 + i as f32)))
            .unwrap();
        let report = t.orchestrator.save(&config);
        assert!(report.is_success());
        created.extend(report.backups_created.into_iter().map(|r| r.id));
    }

    assert_eq!(created.len(), RETENTION + 1);
    let remaining: Vec<String> = t
        .orchestrator
        .list_backups()
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(remaining.len(), RETENTION);
    assert_eq!(remaining, created[1..].to_vec());
    assert!(!remaining.contains(&created[0]));
    assert_eq!(t.backup_files(), remaining);
}

#[test]
fn test_restore_brings_back_previous_text() {
    let t = TestDir::new();
    let mut config = default_config().clone();
    assert!(t.orchestrator.save(&config).is_success());
    let original = t.read(ConfigModule::Fonts);

    config
        .apply(SectionUpdate::Fonts(FontsUpdate::Family("Hack".to_string())))
        .unwrap();
    let report = t.orchestrator.save(&config);
    assert_eq!(report.backups_created.len(), 1);
    assert_ne!(t.read(ConfigModule::Fonts), original);

    let id = report.backups_created[0].id.clone();
    let record = t.orchestrator.restore_backup(&id).unwrap();
    assert_eq!(record.target_file, t.module_path(ConfigModule::Fonts));
    assert_eq!(t.read(ConfigModule::Fonts), original);
    assert_eq!(t.orchestrator.load().config.fonts.family, default_config().fonts.family);
}

#[test]
fn test_restore_rejects_path_like_ids() {
    let t = TestDir::new();
    assert!(t.orchestrator.restore_backup("../fonts.lua").is_err());
    assert!(t.orchestrator.restore_backup("nested/fonts.lua.bak").is_err());
    assert!(t.orchestrator.restore_backup("fonts.lua.20260101-000000-000-000.bak").is_err());
}

#[test]
fn test_backup_now_snapshots_existing_files_only() {
    let t = TestDir::new();
    let report = t.orchestrator.create_backup_now();
    assert!(report.is_success());
    assert!(report.records.is_empty());

    t.write(ConfigModule::Colors, "config.colors.foreground = \"#ffffff\"\n");
    let records = t.orchestrator.create_backup_now().records;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].target_file, t.module_path(ConfigModule::Colors));
    assert_eq!(
        fs::read_to_string(&records[0].snapshot_path).unwrap(),
        "config.colors.foreground = \"#ffffff\"\n"
    );
}

#[test]
fn test_one_failing_module_does_not_block_the_others() {
    let t = TestDir::new();
    // A directory where fonts.lua should be cannot be read, backed up or replaced
    fs::create_dir(t.module_path(ConfigModule::Fonts)).unwrap();

    let loaded = t.orchestrator.load();
    assert_eq!(loaded.module_errors.len(), 1);
    assert_eq!(loaded.module_errors[0].0, ConfigModule::Fonts);
    assert_eq!(loaded.config.fonts, default_config().fonts);

    let report = t.orchestrator.save(&loaded.config);
    assert_eq!(report.state, SyncState::PartialFailure);
    assert_eq!(report.module_errors.len(), 1);
    let (module, error) = &report.module_errors[0];
    assert_eq!(*module, ConfigModule::Fonts);
    assert!(matches!(error, SyncError::Backup { .. }));

    assert_eq!(report.files_written.len(), ConfigModule::COUNT - 1);
    for module in [ConfigModule::Colors, ConfigModule::Appearance, ConfigModule::Backdrop] {
        assert!(t.module_path(module).is_file());
    }
    assert!(t.module_path(ConfigModule::Fonts).is_dir());
}
