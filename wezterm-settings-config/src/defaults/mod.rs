//! Default value functions for the appearance model.
//!
//! Each sub-module groups related `default_*` free functions used by the
//! `Default` impls of the config sections. Everything is re-exported here so
//! callers only need `crate::defaults::*`.

mod colors;
mod font;
mod misc;
mod window;

// ── Colors ─────────────────────────────────────────────────────────────────
pub use colors::{
    active_tab, ansi, background, brights, command_palette_bg, command_palette_fg, cursor_bg,
    cursor_border, cursor_fg, focus_color, foreground, inactive_tab, inactive_tab_hover, new_tab,
    new_tab_hover, selection_bg, selection_fg, tab_bar_background,
};

// ── Fonts ──────────────────────────────────────────────────────────────────
pub use font::{command_palette_font_size, font_family, font_size, freetype_target};

// ── Window ─────────────────────────────────────────────────────────────────
pub use window::{inactive_pane_hsb, tab_max_width, window_opacity, window_padding};

// ── Cursor, GPU, backdrop, general ─────────────────────────────────────────
pub use misc::{
    animation_fps, bell_fade_in_ms, bell_fade_out_ms, cursor_blink_rate, initial_cols,
    initial_rows, max_fps, overlay_opacity, scrollback_lines,
};
