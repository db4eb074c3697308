//! Rule checks over an [`AppearanceConfig`].
//!
//! [`validate`] never stops at the first problem: it walks every section and
//! returns the full list so an editor can flag all fields at once. An empty
//! list means the model is safe to write.

use crate::config::{AppearanceConfig, TabColors};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Number of entries required in `colors.ansi` and `colors.brights`.
pub const PALETTE_LEN: usize = 8;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})$").expect("hex color regex is valid")
});

/// A single rule violation. Blocks saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted path such as `colors.ansi[3]` or `window.window_padding.left`
    pub field_path: String,
    pub message: String,
    pub offending_value: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (got {})",
            self.field_path, self.message, self.offending_value
        )
    }
}

/// `#rgb` or `#rrggbb`.
pub fn is_valid_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

#[derive(Default)]
struct Checker {
    errors: Vec<ValidationError>,
}

impl Checker {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>, value: impl fmt::Display) {
        self.errors.push(ValidationError {
            field_path: path.into(),
            message: message.into(),
            offending_value: value.to_string(),
        });
    }

    fn color(&mut self, path: impl Into<String>, value: &str) {
        if !is_valid_hex_color(value) {
            self.push(path, "must be a hex color like #rrggbb or #rgb", format!("{value:?}"));
        }
    }

    fn palette(&mut self, path: &str, values: &[String]) {
        if values.len() != PALETTE_LEN {
            self.push(
                path,
                format!("must contain exactly {PALETTE_LEN} colors"),
                format!("{} entries", values.len()),
            );
        }
        for (i, value) in values.iter().enumerate() {
            self.color(format!("{path}[{i}]"), value);
        }
    }

    fn tab(&mut self, path: &str, tab: &TabColors) {
        self.color(format!("{path}.bg_color"), &tab.bg_color);
        self.color(format!("{path}.fg_color"), &tab.fg_color);
    }

    fn float(&mut self, path: impl Into<String>, value: f32, min: f32, max: f32) {
        // NaN fails both comparisons, so test the accepted range positively
        if !(value >= min && value <= max) {
            self.push(path, format!("must be between {min} and {max}"), value);
        }
    }

    fn non_negative(&mut self, path: impl Into<String>, value: f32) {
        if !(value.is_finite() && value >= 0.0) {
            self.push(path, "must be a finite number >= 0", value);
        }
    }

    fn int(&mut self, path: impl Into<String>, value: u32, min: u32, max: u32) {
        if !(min..=max).contains(&value) {
            self.push(path, format!("must be between {min} and {max}"), value);
        }
    }

    fn non_empty(&mut self, path: impl Into<String>, value: &str) {
        if value.trim().is_empty() {
            self.push(path, "must not be empty", format!("{value:?}"));
        }
    }
}

/// Check every rule and return all violations.
pub fn validate(config: &AppearanceConfig) -> Vec<ValidationError> {
    let mut c = Checker::default();

    let colors = &config.colors;
    for (key, value) in colors.named() {
        c.color(format!("colors.{key}"), value);
    }
    c.palette("colors.ansi", &colors.ansi);
    c.palette("colors.brights", &colors.brights);
    c.color("colors.tab_bar.background", &colors.tab_bar.background);
    for (key, tab) in colors.tab_bar.pairs() {
        c.tab(&format!("colors.tab_bar.{key}"), tab);
    }
    for (key, value) in colors.extras() {
        if let Some(value) = value {
            c.color(format!("colors.{key}"), value);
        }
    }
    if let Some(scheme) = &colors.scheme {
        c.non_empty("colors.scheme", scheme);
    }

    let fonts = &config.fonts;
    c.non_empty("fonts.family", &fonts.family);
    c.float("fonts.size", fonts.size, 6.0, 72.0);

    let window = &config.window;
    for (side, value) in window.window_padding.sides() {
        c.non_negative(format!("window.window_padding.{side}"), value);
    }
    c.float(
        "window.window_background_opacity",
        window.window_background_opacity,
        0.0,
        1.0,
    );
    c.int("window.tab_max_width", window.tab_max_width, 1, 100);
    for (name, value) in window.inactive_pane_hsb.components() {
        c.float(format!("window.inactive_pane_hsb.{name}"), value, 0.0, 1.0);
    }

    let cursor = &config.cursor;
    c.int("cursor.cursor_blink_rate", cursor.cursor_blink_rate, 0, 5000);
    c.int("cursor.animation_fps", cursor.animation_fps, 1, 240);

    let backdrop = &config.backdrop;
    for (i, image) in backdrop.images.iter().enumerate() {
        c.non_empty(format!("backdrop.images[{i}]"), image);
    }
    let index_ok = if backdrop.images.is_empty() {
        backdrop.current_index == 0
    } else {
        backdrop.current_index < backdrop.images.len()
    };
    if !index_ok {
        c.push(
            "backdrop.current_index",
            format!(
                "must index into images (0..{})",
                backdrop.images.len().max(1)
            ),
            backdrop.current_index,
        );
    }
    c.float("backdrop.overlay_opacity", backdrop.overlay_opacity, 0.0, 1.0);
    c.color("backdrop.focus_color", &backdrop.focus_color);

    c.int("gpu.max_fps", config.gpu.max_fps, 1, 240);

    let general = &config.general;
    c.int(
        "general.scrollback_lines",
        general.scrollback_lines,
        0,
        1_000_000_000,
    );
    c.int("general.initial_rows", general.initial_rows, 1, 1000);
    c.int("general.initial_cols", general.initial_cols, 1, 1000);

    let palette = &config.command_palette;
    c.color("command_palette.fg_color", &palette.fg_color);
    c.color("command_palette.bg_color", &palette.bg_color);
    c.float("command_palette.font_size", palette.font_size, 6.0, 72.0);

    let bell = &config.visual_bell;
    c.int("visual_bell.fade_in_duration_ms", bell.fade_in_duration_ms, 0, 10_000);
    c.int("visual_bell.fade_out_duration_ms", bell.fade_out_duration_ms, 0, 10_000);

    c.errors
}
