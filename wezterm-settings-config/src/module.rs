//! The four on-disk Lua modules and which sections each one owns.

use crate::config::AppearanceConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// File name of the entrypoint that requires the modules.
pub const ENTRYPOINT_FILE: &str = "wezterm.lua";

/// One output module file.
///
/// Ownership is disjoint: every section of [`AppearanceConfig`] is written
/// by exactly one module and read back from that module only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigModule {
    Colors,
    Fonts,
    Appearance,
    Backdrop,
}

impl ConfigModule {
    pub const COUNT: usize = 4;

    pub fn all() -> [ConfigModule; Self::COUNT] {
        [
            ConfigModule::Colors,
            ConfigModule::Fonts,
            ConfigModule::Appearance,
            ConfigModule::Backdrop,
        ]
    }

    /// Position in [`ConfigModule::all`], used to index `existed` flags.
    pub fn index(self) -> usize {
        match self {
            ConfigModule::Colors => 0,
            ConfigModule::Fonts => 1,
            ConfigModule::Appearance => 2,
            ConfigModule::Backdrop => 3,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ConfigModule::Colors => "colors.lua",
            ConfigModule::Fonts => "fonts.lua",
            ConfigModule::Appearance => "appearance.lua",
            ConfigModule::Backdrop => "backdrop.lua",
        }
    }

    /// Name used in `require("...")` from the entrypoint.
    pub fn require_name(self) -> &'static str {
        match self {
            ConfigModule::Colors => "colors",
            ConfigModule::Fonts => "fonts",
            ConfigModule::Appearance => "appearance",
            ConfigModule::Backdrop => "backdrop",
        }
    }

    /// Section names owned by this module, as used in field paths.
    pub fn sections(self) -> &'static [&'static str] {
        match self {
            ConfigModule::Colors => &["colors"],
            ConfigModule::Fonts => &["fonts"],
            ConfigModule::Appearance => &[
                "window",
                "cursor",
                "gpu",
                "general",
                "command_palette",
                "visual_bell",
            ],
            ConfigModule::Backdrop => &["backdrop"],
        }
    }

    /// The module owning a dotted field path such as `window.window_padding.left`.
    pub fn owning(field_path: &str) -> Option<ConfigModule> {
        let section = field_path
            .split(['.', '['])
            .next()
            .unwrap_or(field_path);
        Self::all()
            .into_iter()
            .find(|m| m.sections().contains(&section))
    }

    /// Copy the sections this module owns from `source` into `target`.
    pub fn merge_into(self, target: &mut AppearanceConfig, source: &AppearanceConfig) {
        match self {
            ConfigModule::Colors => target.colors = source.colors.clone(),
            ConfigModule::Fonts => target.fonts = source.fonts.clone(),
            ConfigModule::Appearance => {
                target.window = source.window.clone();
                target.cursor = source.cursor.clone();
                target.gpu = source.gpu.clone();
                target.general = source.general.clone();
                target.command_palette = source.command_palette.clone();
                target.visual_bell = source.visual_bell.clone();
            }
            ConfigModule::Backdrop => target.backdrop = source.backdrop.clone(),
        }
    }
}

impl fmt::Display for ConfigModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, module) in ConfigModule::all().into_iter().enumerate() {
            assert_eq!(module.index(), i);
        }
    }

    #[test]
    fn test_owning_module() {
        assert_eq!(ConfigModule::owning("colors.ansi[3]"), Some(ConfigModule::Colors));
        assert_eq!(
            ConfigModule::owning("window.window_background_opacity"),
            Some(ConfigModule::Appearance)
        );
        assert_eq!(ConfigModule::owning("visual_bell.target"), Some(ConfigModule::Appearance));
        assert_eq!(ConfigModule::owning("backdrop.images[0]"), Some(ConfigModule::Backdrop));
        assert_eq!(ConfigModule::owning("nope.field"), None);
    }

    #[test]
    fn test_merge_copies_only_owned_sections() {
        let mut source = AppearanceConfig::default();
        source.fonts.size = 20.0;
        source.window.tab_max_width = 50;

        let mut target = AppearanceConfig::default();
        ConfigModule::Fonts.merge_into(&mut target, &source);
        assert_eq!(target.fonts.size, 20.0);
        assert_eq!(target.window.tab_max_width, 25);
    }
}
