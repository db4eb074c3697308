// Library exports for testing and potential library use
//
// The engine lives in `wezterm-settings-config`; this crate holds what a
// front-end needs around it: the log bridge, the tool's own settings file,
// an editing session and a system font enumerator.

/// Application version (root crate version).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod font_enumerator;
pub mod session;
pub mod settings;

pub use session::EditingSession;
pub use settings::{LogLevel, ToolSettings};
