//! `ColorScheme`: the palette written to the colors module.

use serde::{Deserialize, Serialize};

/// Background/foreground pair for one tab state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabColors {
    pub bg_color: String,
    pub fg_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

impl TabColors {
    pub fn new(bg_color: &str, fg_color: &str) -> Self {
        Self {
            bg_color: bg_color.to_string(),
            fg_color: fg_color.to_string(),
            italic: None,
        }
    }
}

/// Colors of the retro/fancy tab bar (`colors.tab_bar`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabBarColors {
    pub background: String,
    pub active_tab: TabColors,
    pub inactive_tab: TabColors,
    pub inactive_tab_hover: TabColors,
    pub new_tab: TabColors,
    pub new_tab_hover: TabColors,
}

impl TabBarColors {
    /// The five tab states with their Lua key, in emission order.
    pub fn pairs(&self) -> [(&'static str, &TabColors); 5] {
        [
            ("active_tab", &self.active_tab),
            ("inactive_tab", &self.inactive_tab),
            ("inactive_tab_hover", &self.inactive_tab_hover),
            ("new_tab", &self.new_tab),
            ("new_tab_hover", &self.new_tab_hover),
        ]
    }

    /// Mutable access to a tab state by its Lua key.
    pub fn pair_mut(&mut self, key: &str) -> Option<&mut TabColors> {
        match key {
            "active_tab" => Some(&mut self.active_tab),
            "inactive_tab" => Some(&mut self.inactive_tab),
            "inactive_tab_hover" => Some(&mut self.inactive_tab_hover),
            "new_tab" => Some(&mut self.new_tab),
            "new_tab_hover" => Some(&mut self.new_tab_hover),
            _ => None,
        }
    }
}

impl Default for TabBarColors {
    fn default() -> Self {
        Self {
            background: crate::defaults::tab_bar_background(),
            active_tab: crate::defaults::active_tab(),
            inactive_tab: crate::defaults::inactive_tab(),
            inactive_tab_hover: crate::defaults::inactive_tab_hover(),
            new_tab: crate::defaults::new_tab(),
            new_tab_hover: crate::defaults::new_tab_hover(),
        }
    }
}

/// Terminal palette.
///
/// `ansi` and `brights` are plain vectors rather than arrays so that a
/// hand-edited file with the wrong number of entries can be represented and
/// reported by the validator instead of being silently truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    /// Name of a WezTerm built-in scheme (`color_scheme`). WezTerm gives it
    /// precedence over the custom colors below.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    pub foreground: String,
    pub background: String,
    pub cursor_bg: String,
    pub cursor_border: String,
    pub cursor_fg: String,
    pub selection_bg: String,
    pub selection_fg: String,

    /// ANSI colors 0-7
    pub ansi: Vec<String>,
    /// Bright ANSI colors 8-15
    pub brights: Vec<String>,

    pub tab_bar: TabBarColors,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_bell: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrollbar_thumb: Option<String>,
    /// Pane split line color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<String>,
}

impl ColorScheme {
    /// The seven named colors with their Lua key, in emission order.
    pub fn named(&self) -> [(&'static str, &String); 7] {
        [
            ("foreground", &self.foreground),
            ("background", &self.background),
            ("cursor_bg", &self.cursor_bg),
            ("cursor_border", &self.cursor_border),
            ("cursor_fg", &self.cursor_fg),
            ("selection_bg", &self.selection_bg),
            ("selection_fg", &self.selection_fg),
        ]
    }

    /// The optional extra colors with their Lua key, in emission order.
    pub fn extras(&self) -> [(&'static str, Option<&String>); 3] {
        [
            ("visual_bell", self.visual_bell.as_ref()),
            ("scrollbar_thumb", self.scrollbar_thumb.as_ref()),
            ("split", self.split.as_ref()),
        ]
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            scheme: None,
            foreground: crate::defaults::foreground(),
            background: crate::defaults::background(),
            cursor_bg: crate::defaults::cursor_bg(),
            cursor_border: crate::defaults::cursor_border(),
            cursor_fg: crate::defaults::cursor_fg(),
            selection_bg: crate::defaults::selection_bg(),
            selection_fg: crate::defaults::selection_fg(),
            ansi: crate::defaults::ansi(),
            brights: crate::defaults::brights(),
            tab_bar: TabBarColors::default(),
            visual_bell: None,
            scrollbar_thumb: None,
            split: None,
        }
    }
}
