//! Reading and writing the Lua module files.
//!
//! - [`grammar`]: statement scanner for the closed assignment grammar
//! - [`extract`]: text to model, with diagnostics
//! - [`generate`]: model to canonical text

pub mod extract;
pub mod generate;
pub mod grammar;

pub use extract::extract_module;
pub use generate::{entrypoint_text, generate, generate_module};

use crate::config::AppearanceConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A known field whose value could not be recovered. Advisory only; the
/// field keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDiagnostic {
    pub field_path: String,
    pub raw_fragment: String,
    pub reason: String,
    /// 1-based line of the assignment
    pub line: usize,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {}: {} (`{}`)",
            self.line, self.field_path, self.reason, self.raw_fragment
        )
    }
}

/// Result of extracting one module.
///
/// Only the sections owned by the module carry recovered values; the rest
/// are defaults.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub config: AppearanceConfig,
    pub diagnostics: Vec<ParseDiagnostic>,
    /// False when the file was missing
    pub existed: bool,
}
