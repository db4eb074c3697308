//! The appearance model: nine independent sections composed into
//! [`AppearanceConfig`].
//!
//! # Sub-modules
//!
//! - [`colors`]: `ColorScheme`, `TabBarColors`, `TabColors`
//! - [`sections`]: fonts, window, cursor, backdrop, GPU, general, command palette, visual bell
//! - [`update`]: typed per-section field updates applied by editing sessions

pub mod colors;
pub mod sections;
pub mod update;

pub use colors::{ColorScheme, TabBarColors, TabColors};
pub use sections::{
    BackdropConfig, CommandPaletteConfig, CursorConfig, FontConfig, GeneralConfig, GpuConfig,
    Hsb, Padding, VisualBellConfig, WindowConfig,
};
pub use update::{
    BackdropUpdate, ColorsUpdate, CommandPaletteUpdate, CursorUpdate, ExtraColor, FontsUpdate,
    GeneralUpdate, GpuUpdate, NamedColor, SectionUpdate, TabState, VisualBellUpdate, WindowUpdate,
};

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Every setting the editor manages.
///
/// Sections are plain values; nothing is shared between them, so a session
/// can clone and mutate freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppearanceConfig {
    pub colors: ColorScheme,
    pub fonts: FontConfig,
    pub window: WindowConfig,
    pub cursor: CursorConfig,
    pub backdrop: BackdropConfig,
    pub gpu: GpuConfig,
    pub general: GeneralConfig,
    pub command_palette: CommandPaletteConfig,
    pub visual_bell: VisualBellConfig,
}

impl AppearanceConfig {
    /// Pretty JSON for export. Enum values use their Lua spelling.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse an exported model; missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

static DEFAULT_CONFIG: LazyLock<AppearanceConfig> = LazyLock::new(AppearanceConfig::default);

/// The process-wide default configuration.
///
/// Built once and never mutated; sessions start from `default_config().clone()`.
pub fn default_config() -> &'static AppearanceConfig {
    &DEFAULT_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_shared_and_equal_to_default() {
        let a = default_config();
        let b = default_config();
        assert!(std::ptr::eq(a, b));
        assert_eq!(*a, AppearanceConfig::default());
    }

    #[test]
    fn test_default_values() {
        let config = default_config();
        assert_eq!(config.fonts.family, "JetBrainsMono Nerd Font");
        assert_eq!(config.fonts.size, 12.0);
        assert_eq!(config.colors.ansi.len(), 8);
        assert_eq!(config.colors.brights.len(), 8);
        assert_eq!(config.window.window_padding.bottom, 7.5);
        assert_eq!(config.cursor.cursor_blink_rate, 650);
        assert!(config.backdrop.images.is_empty());
        assert_eq!(config.backdrop.current_index, 0);
        assert_eq!(config.colors.tab_bar.new_tab_hover.italic, Some(true));
    }

    #[test]
    fn test_partial_json_uses_defaults_for_missing_fields() {
        let json = r#"{ "fonts": { "size": 16.0 }, "window": { "tab_max_width": 40 } }"#;
        let config = AppearanceConfig::from_json(json).unwrap();
        assert_eq!(config.fonts.size, 16.0);
        assert_eq!(config.fonts.family, "JetBrainsMono Nerd Font");
        assert_eq!(config.window.tab_max_width, 40);
        assert_eq!(config.colors, ColorScheme::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = default_config().clone();
        config.colors.scheme = Some("Catppuccin Mocha".to_string());
        config.backdrop.images = vec!["a.png".to_string(), "b.png".to_string()];
        let json = config.to_json().unwrap();
        let back = AppearanceConfig::from_json(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_enum_spelling_is_rejected_by_json() {
        let json = r#"{ "window": { "window_decorations": "FANCY" } }"#;
        assert!(AppearanceConfig::from_json(json).is_err());
    }
}
