//! The non-color sections of [`AppearanceConfig`](super::AppearanceConfig).

use crate::types::{
    AudibleBell, CloseConfirmation, CursorStyle, EaseFunction, ExitBehavior, FontWeight,
    FreetypeTarget, FrontEnd, PowerPreference, VisualBellTarget, WindowDecorations,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Fonts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub family: String,
    /// Point size
    pub size: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freetype_load_target: Option<FreetypeTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freetype_render_target: Option<FreetypeTarget>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: crate::defaults::font_family(),
            size: crate::defaults::font_size(),
            weight: None,
            freetype_load_target: crate::defaults::freetype_target(),
            freetype_render_target: crate::defaults::freetype_target(),
        }
    }
}

// ============================================================================
// Window
// ============================================================================

/// `window_padding` in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    /// Sides with their Lua key, in emission order.
    pub fn sides(&self) -> [(&'static str, f32); 4] {
        [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ]
    }
}

/// `inactive_pane_hsb` multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl Hsb {
    /// Components with their Lua key, in emission order.
    pub fn components(&self) -> [(&'static str, f32); 3] {
        [
            ("hue", self.hue),
            ("saturation", self.saturation),
            ("brightness", self.brightness),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub window_padding: Padding,
    /// 0.0 = fully transparent, 1.0 = opaque
    pub window_background_opacity: f32,
    pub window_decorations: WindowDecorations,
    pub enable_tab_bar: bool,
    pub hide_tab_bar_if_only_one_tab: bool,
    pub use_fancy_tab_bar: bool,
    /// Maximum tab title width in cells
    pub tab_max_width: u32,
    pub show_tab_index_in_tab_bar: bool,
    pub inactive_pane_hsb: Hsb,
    pub window_close_confirmation: CloseConfirmation,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_padding: crate::defaults::window_padding(),
            window_background_opacity: crate::defaults::window_opacity(),
            window_decorations: WindowDecorations::IntegratedButtonsResize,
            enable_tab_bar: true,
            hide_tab_bar_if_only_one_tab: false,
            use_fancy_tab_bar: true,
            tab_max_width: crate::defaults::tab_max_width(),
            show_tab_index_in_tab_bar: false,
            inactive_pane_hsb: crate::defaults::inactive_pane_hsb(),
            window_close_confirmation: CloseConfirmation::NeverPrompt,
        }
    }
}

// ============================================================================
// Cursor
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub default_cursor_style: CursorStyle,
    /// Blink interval in milliseconds (0 disables blinking)
    pub cursor_blink_rate: u32,
    pub cursor_blink_ease_in: EaseFunction,
    pub cursor_blink_ease_out: EaseFunction,
    pub animation_fps: u32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            default_cursor_style: CursorStyle::BlinkingBlock,
            cursor_blink_rate: crate::defaults::cursor_blink_rate(),
            cursor_blink_ease_in: EaseFunction::EaseOut,
            cursor_blink_ease_out: EaseFunction::EaseOut,
            animation_fps: crate::defaults::animation_fps(),
        }
    }
}

// ============================================================================
// Backdrop
// ============================================================================

/// Background image rotation.
///
/// `images` order is the cycle order; `current_index` points into it and is 0
/// when the list is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub enabled: bool,
    pub images_dir: String,
    pub images: Vec<String>,
    pub current_index: usize,
    /// Solid color shown in "focus mode" and used for the overlay
    pub focus_color: String,
    pub overlay_opacity: f32,
    pub random_on_start: bool,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            images_dir: String::new(),
            images: Vec::new(),
            current_index: 0,
            focus_color: crate::defaults::focus_color(),
            overlay_opacity: crate::defaults::overlay_opacity(),
            random_on_start: false,
        }
    }
}

// ============================================================================
// GPU
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    pub front_end: FrontEnd,
    pub webgpu_power_preference: PowerPreference,
    pub max_fps: u32,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            front_end: FrontEnd::WebGpu,
            webgpu_power_preference: PowerPreference::HighPerformance,
            max_fps: crate::defaults::max_fps(),
        }
    }
}

// ============================================================================
// General
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub automatically_reload_config: bool,
    pub scrollback_lines: u32,
    pub initial_rows: u32,
    pub initial_cols: u32,
    pub exit_behavior: ExitBehavior,
    pub audible_bell: AudibleBell,
    pub enable_scroll_bar: bool,
    pub switch_to_last_active_tab_when_closing_tab: bool,
    pub adjust_window_size_when_changing_font_size: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            automatically_reload_config: true,
            scrollback_lines: crate::defaults::scrollback_lines(),
            initial_rows: crate::defaults::initial_rows(),
            initial_cols: crate::defaults::initial_cols(),
            exit_behavior: ExitBehavior::CloseOnCleanExit,
            audible_bell: AudibleBell::Disabled,
            enable_scroll_bar: false,
            switch_to_last_active_tab_when_closing_tab: true,
            adjust_window_size_when_changing_font_size: true,
        }
    }
}

// ============================================================================
// Command palette
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandPaletteConfig {
    pub fg_color: String,
    pub bg_color: String,
    pub font_size: f32,
}

impl Default for CommandPaletteConfig {
    fn default() -> Self {
        Self {
            fg_color: crate::defaults::command_palette_fg(),
            bg_color: crate::defaults::command_palette_bg(),
            font_size: crate::defaults::command_palette_font_size(),
        }
    }
}

// ============================================================================
// Visual bell
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualBellConfig {
    pub fade_in_duration_ms: u32,
    pub fade_out_duration_ms: u32,
    pub fade_in_function: EaseFunction,
    pub fade_out_function: EaseFunction,
    pub target: VisualBellTarget,
}

impl Default for VisualBellConfig {
    fn default() -> Self {
        Self {
            fade_in_duration_ms: crate::defaults::bell_fade_in_ms(),
            fade_out_duration_ms: crate::defaults::bell_fade_out_ms(),
            fade_in_function: EaseFunction::EaseIn,
            fade_out_function: EaseFunction::EaseOut,
            target: VisualBellTarget::BackgroundColor,
        }
    }
}
