//! Load/save orchestration over the four module files.
//!
//! `save` runs a small state machine:
//!
//! ```text
//! Idle -> Validating -> Invalid
//!                    -> BackingUp -> Writing -> Done | PartialFailure
//! ```
//!
//! Validation failures stop before any file is touched. After that each
//! module is handled on its own: a failed backup skips that module's write,
//! a failed write is reported, and neither rolls back modules that already
//! succeeded.

use crate::atomic::{create_new_with, write_atomic};
use crate::backup::{BackupManager, BackupRecord};
use crate::config::{AppearanceConfig, default_config};
use crate::error::SyncError;
use crate::lua::{ParseDiagnostic, entrypoint_text, extract_module, generate_module};
use crate::module::{ConfigModule, ENTRYPOINT_FILE};
use crate::paths::PathResolver;
use crate::validate::{ValidationError, validate};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

/// One lock per config directory, shared by every orchestrator in the process.
static DIR_LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn dir_lock(dir: &Path) -> Arc<Mutex<()>> {
    let key = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    DIR_LOCKS.lock().entry(key).or_default().clone()
}

/// Where a save ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Validating,
    /// Validation failed; nothing was written
    Invalid,
    BackingUp,
    Writing,
    /// Every module was written or already up to date
    Done,
    /// At least one module failed; the others were still written
    PartialFailure,
}

#[derive(Debug)]
pub struct LoadResult {
    pub config: AppearanceConfig,
    pub diagnostics: Vec<ParseDiagnostic>,
    /// Indexed by [`ConfigModule::index`]
    pub existed: [bool; ConfigModule::COUNT],
    /// Modules that could not be read and kept their defaults
    pub module_errors: Vec<(ConfigModule, SyncError)>,
}

#[derive(Debug)]
pub struct SaveReport {
    pub state: SyncState,
    pub files_written: Vec<PathBuf>,
    pub backups_created: Vec<BackupRecord>,
    pub module_errors: Vec<(ConfigModule, SyncError)>,
    pub validation_errors: Vec<ValidationError>,
    /// Modules whose text already matched; they were neither backed up nor rewritten
    pub unchanged: Vec<ConfigModule>,
}

/// Outcome of [`SyncOrchestrator::create_backup_now`]. One module failing
/// does not stop the others from being snapshotted.
#[derive(Debug, Default)]
pub struct BackupReport {
    pub records: Vec<BackupRecord>,
    pub module_errors: Vec<(ConfigModule, SyncError)>,
}

impl BackupReport {
    pub fn is_success(&self) -> bool {
        self.module_errors.is_empty()
    }
}

impl SaveReport {
    fn new() -> Self {
        Self {
            state: SyncState::Idle,
            files_written: Vec::new(),
            backups_created: Vec::new(),
            module_errors: Vec::new(),
            validation_errors: Vec::new(),
            unchanged: Vec::new(),
        }
    }

    fn transition(&mut self, state: SyncState) {
        log::debug!("save: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub fn is_success(&self) -> bool {
        self.state == SyncState::Done
    }
}

/// Keeps an in-memory model and the module files of one directory in step.
#[derive(Debug, Clone)]
pub struct SyncOrchestrator {
    config_dir: PathBuf,
    backups: BackupManager,
}

impl SyncOrchestrator {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let backups = BackupManager::new(&config_dir);
        Self {
            config_dir,
            backups,
        }
    }

    pub fn from_resolver(resolver: &dyn PathResolver) -> Result<Self, SyncError> {
        Ok(Self::new(resolver.base_directory()?))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn module_path(&self, module: ConfigModule) -> PathBuf {
        self.config_dir.join(module.file_name())
    }

    /// Read every module and merge the sections each one owns.
    ///
    /// Missing files are not errors. Unreadable files are reported per module
    /// and leave that module's sections at their defaults.
    pub fn load(&self) -> LoadResult {
        let lock = dir_lock(&self.config_dir);
        let _guard = lock.lock();

        let mut result = LoadResult {
            config: default_config().clone(),
            diagnostics: Vec::new(),
            existed: [false; ConfigModule::COUNT],
            module_errors: Vec::new(),
        };

        for module in ConfigModule::all() {
            let path = self.module_path(module);
            let text = match fs::read(&path) {
                Ok(bytes) => {
                    let (text, damage) = decode(module, bytes);
                    result.diagnostics.extend(damage);
                    Some(text)
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(e) => {
                    log::warn!("Could not read {}: {e}", path.display());
                    result.existed[module.index()] = true;
                    result.module_errors.push((module, SyncError::io(&path, e)));
                    continue;
                }
            };
            let parsed = extract_module(module, text.as_deref());
            module.merge_into(&mut result.config, &parsed.config);
            result.existed[module.index()] = parsed.existed;
            result.diagnostics.extend(parsed.diagnostics);
        }

        log::info!(
            "Loaded settings from {} ({} diagnostics, {} unreadable modules)",
            self.config_dir.display(),
            result.diagnostics.len(),
            result.module_errors.len()
        );
        result
    }

    pub fn validate(&self, config: &AppearanceConfig) -> Vec<ValidationError> {
        validate(config)
    }

    /// Validate, back up and write every module.
    pub fn save(&self, config: &AppearanceConfig) -> SaveReport {
        let lock = dir_lock(&self.config_dir);
        let _guard = lock.lock();
        let mut report = SaveReport::new();

        report.transition(SyncState::Validating);
        report.validation_errors = validate(config);
        if !report.validation_errors.is_empty() {
            log::warn!(
                "Save aborted: {} validation errors",
                report.validation_errors.len()
            );
            report.transition(SyncState::Invalid);
            return report;
        }

        if let Err(e) = fs::create_dir_all(&self.config_dir) {
            log::warn!("Could not create {}: {e}", self.config_dir.display());
        }

        for module in ConfigModule::all() {
            let path = self.module_path(module);
            let text = generate_module(module, config);
            if fs::read_to_string(&path).is_ok_and(|existing| existing == text) {
                report.unchanged.push(module);
                continue;
            }

            report.transition(SyncState::BackingUp);
            match self.backups.backup_before_write(&path) {
                Ok(Some(record)) => report.backups_created.push(record),
                Ok(None) => {}
                Err(source) => {
                    log::warn!("Skipping {module}: backup failed: {source}");
                    report
                        .module_errors
                        .push((module, SyncError::Backup { path, source }));
                    continue;
                }
            }

            report.transition(SyncState::Writing);
            match write_atomic(&path, text.as_bytes()) {
                Ok(()) => report.files_written.push(path),
                Err(e) => {
                    log::warn!("Writing {} failed: {e}", path.display());
                    report.module_errors.push((module, SyncError::io(&path, e)));
                }
            }
        }

        if report.module_errors.is_empty() {
            report.transition(SyncState::Done);
        } else {
            report.transition(SyncState::PartialFailure);
        }
        log::info!(
            "Saved settings to {}: {} written, {} unchanged, {} failed",
            self.config_dir.display(),
            report.files_written.len(),
            report.unchanged.len(),
            report.module_errors.len()
        );
        report
    }

    /// Snapshot every existing module file without writing anything.
    pub fn create_backup_now(&self) -> BackupReport {
        let lock = dir_lock(&self.config_dir);
        let _guard = lock.lock();

        let mut report = BackupReport::default();
        for module in ConfigModule::all() {
            let path = self.module_path(module);
            match self.backups.backup_before_write(&path) {
                Ok(Some(record)) => report.records.push(record),
                Ok(None) => {}
                Err(source) => {
                    log::warn!("Backup of {module} failed: {source}");
                    report.module_errors.push((module, SyncError::Backup { path, source }));
                }
            }
        }
        report
    }

    /// All snapshots, oldest first.
    pub fn list_backups(&self) -> Result<Vec<BackupRecord>, SyncError> {
        Ok(self.backups.list_all()?)
    }

    /// Copy a snapshot back over its module file. The current file is not
    /// backed up first.
    pub fn restore_backup(&self, id: &str) -> Result<BackupRecord, SyncError> {
        let lock = dir_lock(&self.config_dir);
        let _guard = lock.lock();
        Ok(self.backups.restore(id)?)
    }

    /// Create `wezterm.lua` if it does not exist. Returns whether it was created.
    pub fn ensure_entrypoint(&self) -> Result<bool, SyncError> {
        let lock = dir_lock(&self.config_dir);
        let _guard = lock.lock();

        let path = self.config_dir.join(ENTRYPOINT_FILE);
        fs::create_dir_all(&self.config_dir).map_err(|e| SyncError::io(&self.config_dir, e))?;
        let created = create_new_with(&path, |file| file.write_all(entrypoint_text().as_bytes()))
            .map_err(|e| SyncError::io(&path, e))?;
        if created {
            log::info!("Created {}", path.display());
        }
        Ok(created)
    }
}

/// Module text with any invalid UTF-8 replaced, plus one diagnostic naming
/// the first damaged line.
fn decode(module: ConfigModule, bytes: Vec<u8>) -> (String, Option<ParseDiagnostic>) {
    let error = match String::from_utf8(bytes) {
        Ok(text) => return (text, None),
        Err(e) => e,
    };
    let valid = error.utf8_error().valid_up_to();
    let bytes = error.into_bytes();
    let start = bytes[..valid].iter().rposition(|&b| b == b'\n').map_or(0, |n| n + 1);
    let end = bytes[valid..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |n| valid + n);
    let line = bytes[..valid].iter().filter(|&&b| b == b'\n').count() + 1;
    log::warn!(
        "{}:{line}: not valid UTF-8, decoding with replacement characters",
        module.file_name()
    );
    let diagnostic = ParseDiagnostic {
        field_path: module.file_name().to_string(),
        raw_fragment: String::from_utf8_lossy(&bytes[start..end]).trim().to_string(),
        reason: "not valid UTF-8; invalid bytes were replaced".to_string(),
        line,
    };
    (String::from_utf8_lossy(&bytes).into_owned(), Some(diagnostic))
}
