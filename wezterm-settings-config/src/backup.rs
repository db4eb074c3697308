//! Snapshots of module files taken before they are overwritten.
//!
//! Snapshots live in `<config dir>/backups/` and are named
//! `<file name>.<YYYYmmdd-HHMMSS-mmm>-<seq>.bak`. The timestamp and sequence
//! are fixed width, so sorting names sorts snapshots oldest-first. The
//! snapshot file name doubles as its id.
//!
//! Stamps are UTC. A new snapshot always sorts after every existing one of
//! the same target, even when the clock has gone backwards or a snapshot
//! carries a future stamp.

use crate::atomic::copy_atomic;
use crate::error::BackupError;
use chrono::{NaiveDateTime, SubsecRound, TimeDelta, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Snapshots kept per target file.
pub const RETENTION: usize = 3;

/// Directory under the config dir holding snapshots.
pub const BACKUP_DIR: &str = "backups";

const EXTENSION: &str = ".bak";
const STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    /// Snapshot file name
    pub id: String,
    /// The file this snapshot restores to
    pub target_file: PathBuf,
    pub snapshot_path: PathBuf,
    /// UTC time the snapshot was taken
    pub timestamp: NaiveDateTime,
}

/// Takes, lists, prunes and restores snapshots for one config directory.
#[derive(Debug, Clone)]
pub struct BackupManager {
    config_dir: PathBuf,
    backup_dir: PathBuf,
    retention: usize,
}

impl BackupManager {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let backup_dir = config_dir.join(BACKUP_DIR);
        Self {
            config_dir,
            backup_dir,
            retention: RETENTION,
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Snapshot `target` if it exists, then prune old snapshots of it.
    ///
    /// Returns `Ok(None)` when there is nothing to back up. A failed prune is
    /// logged and does not undo the snapshot.
    pub fn backup_before_write(&self, target: &Path) -> Result<Option<BackupRecord>, BackupError> {
        match fs::metadata(target) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BackupError::io(target, e)),
        }
        let file_name = target
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| BackupError::NoFileName(target.to_path_buf()))?;

        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| BackupError::io(&self.backup_dir, e))?;

        let existing = self.list(file_name)?;
        let (taken_at, seq) = next_slot(
            Utc::now().naive_utc().trunc_subsecs(3),
            existing.last().and_then(|r| Some((r.timestamp, seq_of(&r.id)?))),
        );
        let stamp = taken_at.format("%Y%m%d-%H%M%S-%3f");
        let snapshot_path = self
            .backup_dir
            .join(format!("{file_name}.{stamp}-{seq:03}{EXTENSION}"));

        // Copied under a temp name so a failed copy never looks like a snapshot
        copy_atomic(target, &snapshot_path).map_err(|e| BackupError::io(&snapshot_path, e))?;
        let record = self
            .record_for(&snapshot_path)
            .ok_or_else(|| BackupError::NoFileName(snapshot_path.clone()))?;
        log::info!(
            "Backed up {} to {}",
            target.display(),
            snapshot_path.display()
        );

        if let Err(e) = self.prune(file_name, &record.id) {
            log::warn!("Failed to prune old backups of {file_name}: {e}");
        }
        Ok(Some(record))
    }

    /// Delete the oldest snapshots of `file_name` beyond the retention limit.
    /// `keep` is never deleted.
    fn prune(&self, file_name: &str, keep: &str) -> Result<(), BackupError> {
        let records = self.list(file_name)?;
        let excess = records.len().saturating_sub(self.retention);
        for record in records.into_iter().filter(|r| r.id != keep).take(excess) {
            fs::remove_file(&record.snapshot_path)
                .map_err(|e| BackupError::io(&record.snapshot_path, e))?;
            log::debug!("Pruned backup {}", record.id);
        }
        Ok(())
    }

    /// Snapshots of one target file, oldest first.
    pub fn list(&self, file_name: &str) -> Result<Vec<BackupRecord>, BackupError> {
        let mut records: Vec<BackupRecord> = self
            .list_all()?
            .into_iter()
            .filter(|r| r.target_file.file_name().and_then(|n| n.to_str()) == Some(file_name))
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    /// Every snapshot in the directory, oldest first.
    pub fn list_all(&self) -> Result<Vec<BackupRecord>, BackupError> {
        let entries = match fs::read_dir(&self.backup_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(BackupError::io(&self.backup_dir, e)),
        };
        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BackupError::io(&self.backup_dir, e))?;
            if let Some(record) = self.record_for(&entry.path()) {
                records.push(record);
            }
        }
        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    /// Resolve a snapshot id.
    pub fn find(&self, id: &str) -> Result<BackupRecord, BackupError> {
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return Err(BackupError::InvalidId(id.to_string()));
        }
        let path = self.backup_dir.join(id);
        if !path.is_file() {
            return Err(BackupError::NotFound(id.to_string()));
        }
        self.record_for(&path)
            .ok_or_else(|| BackupError::InvalidId(id.to_string()))
    }

    /// Copy a snapshot back over its target atomically.
    pub fn restore(&self, id: &str) -> Result<BackupRecord, BackupError> {
        let record = self.find(id)?;
        copy_atomic(&record.snapshot_path, &record.target_file)
            .map_err(|e| BackupError::io(&record.target_file, e))?;
        log::info!(
            "Restored {} from backup {}",
            record.target_file.display(),
            record.id
        );
        Ok(record)
    }

    /// Parse a snapshot path; `None` for anything not named like a snapshot.
    fn record_for(&self, path: &Path) -> Option<BackupRecord> {
        let id = path.file_name()?.to_str()?;
        let (target, stamp) = id.strip_suffix(EXTENSION)?.rsplit_once('.')?;
        let (stamp, seq) = stamp.rsplit_once('-')?;
        let (stamp, millis) = stamp.rsplit_once('-')?;
        if target.is_empty() || seq.len() != 3 || !seq.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let millis: i64 = millis.parse().ok().filter(|_| millis.len() == 3)?;
        let timestamp = NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()?
            + TimeDelta::milliseconds(millis);
        Some(BackupRecord {
            id: id.to_string(),
            target_file: self.config_dir.join(target),
            snapshot_path: path.to_path_buf(),
            timestamp,
        })
    }
}

const MAX_SEQ: u32 = 999;

/// Sequence number of a snapshot id.
fn seq_of(id: &str) -> Option<u32> {
    let (_, seq) = id.strip_suffix(EXTENSION)?.rsplit_once('-')?;
    seq.parse().ok()
}

/// Stamp and sequence for a new snapshot, given the newest existing one.
fn next_slot(now: NaiveDateTime, newest: Option<(NaiveDateTime, u32)>) -> (NaiveDateTime, u32) {
    match newest {
        Some((stamp, seq)) if stamp >= now => {
            if seq < MAX_SEQ {
                (stamp, seq + 1)
            } else {
                (stamp + TimeDelta::milliseconds(1), 0)
            }
        }
        _ => (now, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_target_is_noop() {
        let dir = tempdir().unwrap();
        let manager = BackupManager::new(dir.path());
        let record = manager
            .backup_before_write(&dir.path().join("colors.lua"))
            .unwrap();
        assert!(record.is_none());
        assert!(!manager.backup_dir().exists());
    }

    #[test]
    fn test_backup_copies_content() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("colors.lua");
        fs::write(&target, "-- v1").unwrap();
        let manager = BackupManager::new(dir.path());

        let record = manager.backup_before_write(&target).unwrap().unwrap();
        assert!(record.id.starts_with("colors.lua."));
        assert!(record.id.ends_with("-000.bak"));
        assert_eq!(record.target_file, target);
        assert_eq!(fs::read_to_string(&record.snapshot_path).unwrap(), "-- v1");
    }

    #[test]
    fn test_retention_keeps_newest_three() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("fonts.lua");
        let manager = BackupManager::new(dir.path());

        let mut ids = Vec::new();
        for i in 0..5 {
            fs::write(&target, format!("-- v{i}")).unwrap();
            ids.push(manager.backup_before_write(&target).unwrap().unwrap().id);
        }

        let kept: Vec<String> = manager
            .list("fonts.lua")
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(kept, ids[2..].to_vec());
        let newest = manager.list("fonts.lua").unwrap().pop().unwrap();
        assert_eq!(fs::read_to_string(newest.snapshot_path).unwrap(), "-- v4");
    }

    #[test]
    fn test_retention_is_per_target() {
        let dir = tempdir().unwrap();
        let manager = BackupManager::new(dir.path());
        for name in ["colors.lua", "fonts.lua"] {
            let target = dir.path().join(name);
            fs::write(&target, name).unwrap();
            for _ in 0..4 {
                manager.backup_before_write(&target).unwrap();
            }
        }
        assert_eq!(manager.list("colors.lua").unwrap().len(), 3);
        assert_eq!(manager.list("fonts.lua").unwrap().len(), 3);
        assert_eq!(manager.list_all().unwrap().len(), 6);
    }

    #[test]
    fn test_find_rejects_traversal() {
        let dir = tempdir().unwrap();
        let manager = BackupManager::new(dir.path());
        for id in ["../colors.lua", "a/b.bak", "a\\b.bak", ""] {
            assert!(matches!(manager.find(id), Err(BackupError::InvalidId(_))), "{id}");
        }
        assert!(matches!(
            manager.find("colors.lua.20260101-000000-000-000.bak"),
            Err(BackupError::NotFound(_))
        ));
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let dir = tempdir().unwrap();
        let manager = BackupManager::new(dir.path());
        fs::create_dir_all(manager.backup_dir()).unwrap();
        fs::write(manager.backup_dir().join("notes.txt"), "x").unwrap();
        fs::write(manager.backup_dir().join("colors.lua.bak"), "x").unwrap();
        assert!(manager.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_restore_overwrites_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("backdrop.lua");
        fs::write(&target, "original").unwrap();
        let manager = BackupManager::new(dir.path());
        let record = manager.backup_before_write(&target).unwrap().unwrap();

        fs::write(&target, "edited").unwrap();
        let restored = manager.restore(&record.id).unwrap();

        assert_eq!(restored, record);
        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
    }

    #[test]
    fn test_timestamp_is_parsed_from_name() {
        let dir = tempdir().unwrap();
        let manager = BackupManager::new(dir.path());
        fs::create_dir_all(manager.backup_dir()).unwrap();
        let id = "appearance.lua.20260314-091502-250-001.bak";
        fs::write(manager.backup_dir().join(id), "x").unwrap();

        let record = manager.find(id).unwrap();
        assert_eq!(record.target_file, dir.path().join("appearance.lua"));
        assert_eq!(
            record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            "2026-03-14 09:15:02.250"
        );
    }

    #[test]
    fn test_new_snapshot_sorts_after_future_stamps() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("fonts.lua");
        fs::write(&target, "-- current").unwrap();
        let manager = BackupManager::new(dir.path());
        fs::create_dir_all(manager.backup_dir()).unwrap();
        for i in 1..=3 {
            let id = format!("fonts.lua.20991231-235959-00{i}-000.bak");
            fs::write(manager.backup_dir().join(id), "-- skewed").unwrap();
        }

        let record = manager.backup_before_write(&target).unwrap().unwrap();
        assert_eq!(record.id, "fonts.lua.20991231-235959-003-001.bak");
        assert_eq!(fs::read_to_string(&record.snapshot_path).unwrap(), "-- current");

        let kept = manager.list("fonts.lua").unwrap();
        assert_eq!(kept.len(), RETENTION);
        assert_eq!(kept.last(), Some(&record));
        assert!(!manager.backup_dir().join("fonts.lua.20991231-235959-001-000.bak").exists());
    }

    #[test]
    fn test_next_slot() {
        let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.3f").unwrap();
        let now = at("2026-10-18 12:00:00.000");
        assert_eq!(next_slot(now, None), (now, 0));
        assert_eq!(next_slot(now, Some((at("2026-10-18 11:00:00.000"), 7))), (now, 0));
        assert_eq!(next_slot(now, Some((now, 4))), (now, 5));
        let later = at("2026-10-18 13:00:00.000");
        assert_eq!(next_slot(now, Some((later, MAX_SEQ))), (at("2026-10-18 13:00:00.001"), 0));
    }

    #[test]
    fn test_failed_copy_leaves_no_snapshot() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("colors.lua");
        fs::create_dir(&target).unwrap();
        let manager = BackupManager::new(dir.path());

        assert!(manager.backup_before_write(&target).is_err());
        let leftovers: Vec<_> = fs::read_dir(manager.backup_dir()).unwrap().collect();
        assert!(leftovers.is_empty());
    }
}
