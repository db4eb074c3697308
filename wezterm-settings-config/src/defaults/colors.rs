//! Default color palette (Catppuccin-flavoured dark scheme).

use crate::config::TabColors;

pub fn foreground() -> String {
    "#cdd6f4".to_string()
}

pub fn background() -> String {
    "#1f1f28".to_string()
}

pub fn cursor_bg() -> String {
    "#f5e0dc".to_string()
}

pub fn cursor_border() -> String {
    "#f5e0dc".to_string()
}

pub fn cursor_fg() -> String {
    "#11111b".to_string()
}

pub fn selection_bg() -> String {
    "#585b70".to_string()
}

pub fn selection_fg() -> String {
    "#cdd6f4".to_string()
}

/// Normal ANSI colors 0-7 (Windows Terminal "Campbell" values)
pub fn ansi() -> Vec<String> {
    [
        "#0C0C0C", "#C50F1F", "#13A10E", "#C19C00", "#0037DA", "#881798", "#3A96DD", "#CCCCCC",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

/// Bright ANSI colors 8-15
pub fn brights() -> Vec<String> {
    [
        "#767676", "#E74856", "#16C60C", "#F9F1A5", "#3B78FF", "#B4009E", "#61D6D6", "#F2F2F2",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

// Tab bar colors

pub fn tab_bar_background() -> String {
    "#11111b".to_string()
}

pub fn active_tab() -> TabColors {
    TabColors::new("#585b70", "#cdd6f4")
}

pub fn inactive_tab() -> TabColors {
    TabColors::new("#313244", "#bac2de")
}

pub fn inactive_tab_hover() -> TabColors {
    TabColors::new("#313244", "#cdd6f4")
}

pub fn new_tab() -> TabColors {
    TabColors::new("#1f1f28", "#cdd6f4")
}

pub fn new_tab_hover() -> TabColors {
    TabColors {
        italic: Some(true),
        ..TabColors::new("#181825", "#cdd6f4")
    }
}

// Command palette / backdrop

pub fn command_palette_fg() -> String {
    "#cdd6f4".to_string()
}

pub fn command_palette_bg() -> String {
    "#1e1e2e".to_string()
}

pub fn focus_color() -> String {
    "#1f1f28".to_string()
}
