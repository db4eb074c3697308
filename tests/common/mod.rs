//! Shared integration test helpers for wezterm-settings.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::TestDir;
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wezterm_settings_config::{ConfigModule, SyncOrchestrator};

/// A temporary WezTerm config directory with an orchestrator pointed at it.
///
/// Keep the value alive for the whole test; dropping it removes the directory.
pub struct TestDir {
    pub dir: TempDir,
    pub orchestrator: SyncOrchestrator,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let orchestrator = SyncOrchestrator::new(dir.path());
        Self { dir, orchestrator }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn module_path(&self, module: ConfigModule) -> PathBuf {
        self.orchestrator.module_path(module)
    }

    pub fn read(&self, module: ConfigModule) -> String {
        fs::read_to_string(self.module_path(module)).expect("read module")
    }

    pub fn write(&self, module: ConfigModule, text: &str) {
        fs::write(self.module_path(module), text).expect("write module");
    }

    /// Snapshot file names currently in `backups/`, sorted.
    pub fn backup_files(&self) -> Vec<String> {
        let dir = self.path().join("backups");
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
