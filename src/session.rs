//! An editing session: the working model, the last persisted snapshot, and
//! the orchestrator that moves between them.
//!
//! File I/O is synchronous in the engine; the async helpers here push it onto
//! tokio's blocking pool so callers on a runtime never stall.

use anyhow::{Context, Result};
use wezterm_settings_config::{
    AppearanceConfig, ConfigModule, LoadResult, ParseDiagnostic, SaveReport, SectionUpdate,
    SyncOrchestrator, SyncState, UpdateError, ValidationError, default_config, generate_module,
};

/// Load on tokio's blocking pool.
pub async fn load_blocking(orchestrator: SyncOrchestrator) -> Result<LoadResult> {
    tokio::task::spawn_blocking(move || orchestrator.load())
        .await
        .context("Load task panicked")
}

/// Save on tokio's blocking pool.
pub async fn save_blocking(
    orchestrator: SyncOrchestrator,
    config: AppearanceConfig,
) -> Result<SaveReport> {
    tokio::task::spawn_blocking(move || orchestrator.save(&config))
        .await
        .context("Save task panicked")
}

pub struct EditingSession {
    orchestrator: SyncOrchestrator,
    config: AppearanceConfig,
    /// What the files on disk are known to contain
    saved: AppearanceConfig,
    diagnostics: Vec<ParseDiagnostic>,
}

impl EditingSession {
    /// Load the directory and start editing what was found.
    pub async fn open(orchestrator: SyncOrchestrator) -> Result<(Self, LoadResult)> {
        let loaded = load_blocking(orchestrator.clone()).await?;
        let session = Self {
            orchestrator,
            config: loaded.config.clone(),
            saved: loaded.config.clone(),
            diagnostics: loaded.diagnostics.clone(),
        };
        Ok((session, loaded))
    }

    pub fn orchestrator(&self) -> &SyncOrchestrator {
        &self.orchestrator
    }

    pub fn config(&self) -> &AppearanceConfig {
        &self.config
    }

    /// Diagnostics from the most recent load.
    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    /// Apply one edit. A rejected edit leaves the model untouched.
    pub fn apply(&mut self, update: SectionUpdate) -> Result<(), UpdateError> {
        let mut next = self.config.clone();
        next.apply(update)?;
        self.config = next;
        Ok(())
    }

    /// Swap in a whole model, as for an import.
    pub fn replace(&mut self, config: AppearanceConfig) {
        self.config = config;
    }

    pub fn reset_to_defaults(&mut self) {
        self.config = default_config().clone();
    }

    /// Modules whose generated text would differ from what is on disk.
    pub fn dirty_modules(&self) -> Vec<ConfigModule> {
        ConfigModule::all()
            .into_iter()
            .filter(|&m| generate_module(m, &self.config) != generate_module(m, &self.saved))
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty_modules().is_empty()
    }

    pub fn validation_errors(&self) -> Vec<ValidationError> {
        self.orchestrator.validate(&self.config)
    }

    /// Save the working model. Modules that reached disk (or already matched
    /// it) stop being dirty; failed ones stay dirty.
    pub async fn save(&mut self) -> Result<SaveReport> {
        let report = save_blocking(self.orchestrator.clone(), self.config.clone()).await?;
        match report.state {
            SyncState::Done => self.saved = self.config.clone(),
            SyncState::PartialFailure => {
                for module in ConfigModule::all() {
                    let written = report
                        .files_written
                        .contains(&self.orchestrator.module_path(module));
                    if written || report.unchanged.contains(&module) {
                        module.merge_into(&mut self.saved, &self.config);
                    }
                }
            }
            _ => {}
        }
        Ok(report)
    }

    /// Throw away unsaved edits and reread the files.
    pub async fn reload(&mut self) -> Result<LoadResult> {
        let loaded = load_blocking(self.orchestrator.clone()).await?;
        self.config = loaded.config.clone();
        self.saved = loaded.config.clone();
        self.diagnostics = loaded.diagnostics.clone();
        Ok(loaded)
    }
}
