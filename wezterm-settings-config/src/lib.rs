//! Settings engine for WezTerm appearance configuration.
//!
//! Keeps a structured settings model and a set of hand-editable Lua modules
//! in step across load/edit/save cycles:
//!
//! - [`config`]: the appearance model, its defaults and typed updates
//! - [`validate`]: rule checks that gate every save
//! - [`lua`]: extraction from and generation of module text
//! - [`backup`]: snapshots before overwrite, with retention
//! - [`sync`]: the load/save orchestrator
//! - [`paths`], [`fonts`], [`backdrops`], [`schemes`]: services and catalogues for editors

mod atomic;
pub mod backdrops;
pub mod backup;
pub mod config;
pub mod defaults;
pub mod error;
pub mod fonts;
pub mod lua;
pub mod module;
pub mod paths;
pub mod schemes;
pub mod sync;
pub mod types;
pub mod validate;

// Re-export main types for convenience
pub use backdrops::{BackdropImage, list_backdrop_images};
pub use backup::{BackupManager, BackupRecord, RETENTION};
pub use config::{AppearanceConfig, SectionUpdate, default_config};
pub use error::{BackupError, SyncError, UpdateError};
pub use fonts::FontEnumerator;
pub use lua::{ParseDiagnostic, ParseResult, entrypoint_text, extract_module, generate, generate_module};
pub use module::ConfigModule;
pub use paths::{FixedPathResolver, PathResolver, WeztermPathResolver};
pub use schemes::{ColorSchemeInfo, builtin_color_schemes, search_color_schemes};
pub use sync::{BackupReport, LoadResult, SaveReport, SyncOrchestrator, SyncState};
pub use validate::{ValidationError, is_valid_hex_color, validate};
