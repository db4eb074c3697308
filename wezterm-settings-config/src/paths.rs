//! Locating the WezTerm configuration directory.

use crate::error::SyncError;
use std::path::PathBuf;

/// Supplies the directory the module files live in.
pub trait PathResolver: Send + Sync {
    fn base_directory(&self) -> Result<PathBuf, SyncError>;
}

/// A fixed directory, e.g. from `--config-dir`.
#[derive(Debug, Clone)]
pub struct FixedPathResolver(pub PathBuf);

impl PathResolver for FixedPathResolver {
    fn base_directory(&self) -> Result<PathBuf, SyncError> {
        Ok(self.0.clone())
    }
}

/// Follows WezTerm's own search order:
///
/// 1. the parent of `$WEZTERM_CONFIG_FILE`, when that directory exists
/// 2. `$XDG_CONFIG_HOME/wezterm`
/// 3. `~/.config/wezterm`
/// 4. `~/.wezterm` (Windows)
///
/// The first existing candidate wins; when none exists the first candidate
/// is returned and created on the first save.
#[derive(Debug, Clone, Default)]
pub struct WeztermPathResolver {
    pub config_file: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl WeztermPathResolver {
    /// Read the environment and home directory of the current process.
    pub fn from_env() -> Self {
        Self {
            config_file: std::env::var_os("WEZTERM_CONFIG_FILE").map(PathBuf::from),
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            home: dirs::home_dir(),
        }
    }

    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(xdg) = &self.xdg_config_home {
            candidates.push(xdg.join("wezterm"));
        }
        if let Some(home) = &self.home {
            candidates.push(home.join(".config").join("wezterm"));
            if cfg!(windows) {
                candidates.push(home.join(".wezterm"));
            }
        }
        candidates
    }
}

impl PathResolver for WeztermPathResolver {
    fn base_directory(&self) -> Result<PathBuf, SyncError> {
        if let Some(file) = &self.config_file
            && let Some(parent) = file.parent()
            && parent.is_dir()
        {
            return Ok(parent.to_path_buf());
        }
        let candidates = self.candidates();
        if let Some(existing) = candidates.iter().find(|c| c.is_dir()) {
            return Ok(existing.clone());
        }
        candidates.into_iter().next().ok_or_else(|| {
            SyncError::PathResolution("no home directory or XDG_CONFIG_HOME".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_file_parent_wins() {
        let dir = tempdir().unwrap();
        let resolver = WeztermPathResolver {
            config_file: Some(dir.path().join("wezterm.lua")),
            xdg_config_home: Some(PathBuf::from("/nonexistent-xdg")),
            home: None,
        };
        assert_eq!(resolver.base_directory().unwrap(), dir.path());
    }

    #[test]
    fn test_first_existing_candidate() {
        let home = tempdir().unwrap();
        std::fs::create_dir_all(home.path().join(".config").join("wezterm")).unwrap();
        let resolver = WeztermPathResolver {
            config_file: Some(PathBuf::from("/nonexistent/wezterm.lua")),
            xdg_config_home: Some(home.path().join("xdg")),
            home: Some(home.path().to_path_buf()),
        };
        assert_eq!(
            resolver.base_directory().unwrap(),
            home.path().join(".config").join("wezterm")
        );
    }

    #[test]
    fn test_falls_back_to_first_candidate() {
        let home = tempdir().unwrap();
        let resolver = WeztermPathResolver {
            config_file: None,
            xdg_config_home: Some(home.path().join("xdg")),
            home: Some(home.path().to_path_buf()),
        };
        assert_eq!(
            resolver.base_directory().unwrap(),
            home.path().join("xdg").join("wezterm")
        );
    }

    #[test]
    fn test_no_candidates_is_an_error() {
        let resolver = WeztermPathResolver::default();
        assert!(matches!(
            resolver.base_directory(),
            Err(SyncError::PathResolution(_))
        ));
    }
}
