//! Typed, exhaustive field updates for each section.
//!
//! An editing surface describes a change as a [`SectionUpdate`] and hands it
//! to [`AppearanceConfig::apply`]. Every variant names a real field with its
//! real type, so an update can never target a field that does not exist.
//! Index-based updates report out-of-range indices instead of ignoring them.

use super::{AppearanceConfig, ColorScheme, Hsb, Padding, TabColors};
use crate::error::UpdateError;
use crate::types::{
    AudibleBell, CloseConfirmation, CursorStyle, EaseFunction, ExitBehavior, FontWeight,
    FreetypeTarget, FrontEnd, PowerPreference, VisualBellTarget, WindowDecorations,
};

/// One of the seven named palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Foreground,
    Background,
    CursorBg,
    CursorBorder,
    CursorFg,
    SelectionBg,
    SelectionFg,
}

/// One of the five tab bar states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    Active,
    Inactive,
    InactiveHover,
    New,
    NewHover,
}

/// Optional palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraColor {
    VisualBell,
    ScrollbarThumb,
    Split,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColorsUpdate {
    /// Select (or clear) a WezTerm built-in scheme by name
    Scheme(Option<String>),
    Named(NamedColor, String),
    Ansi { index: usize, color: String },
    Bright { index: usize, color: String },
    TabBarBackground(String),
    Tab(TabState, TabColors),
    Extra(ExtraColor, Option<String>),
    /// Replace the whole palette, e.g. after picking a theme
    Replace(Box<ColorScheme>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FontsUpdate {
    Family(String),
    Size(f32),
    Weight(Option<FontWeight>),
    LoadTarget(Option<FreetypeTarget>),
    RenderTarget(Option<FreetypeTarget>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowUpdate {
    Padding(Padding),
    Opacity(f32),
    Decorations(WindowDecorations),
    EnableTabBar(bool),
    HideTabBarIfOnlyOneTab(bool),
    UseFancyTabBar(bool),
    TabMaxWidth(u32),
    ShowTabIndex(bool),
    InactivePaneHsb(Hsb),
    CloseConfirmation(CloseConfirmation),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CursorUpdate {
    Style(CursorStyle),
    BlinkRate(u32),
    BlinkEaseIn(EaseFunction),
    BlinkEaseOut(EaseFunction),
    AnimationFps(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackdropUpdate {
    Enabled(bool),
    ImagesDir(String),
    /// Replace the image list; the current index is reset to 0
    Images(Vec<String>),
    AddImage(String),
    RemoveImage(usize),
    MoveImage { from: usize, to: usize },
    CurrentIndex(usize),
    /// Advance to the next image, wrapping around
    CycleForward,
    /// Go back to the previous image, wrapping around
    CycleBack,
    FocusColor(String),
    OverlayOpacity(f32),
    RandomOnStart(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GpuUpdate {
    FrontEnd(FrontEnd),
    PowerPreference(PowerPreference),
    MaxFps(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneralUpdate {
    AutomaticallyReloadConfig(bool),
    ScrollbackLines(u32),
    InitialRows(u32),
    InitialCols(u32),
    ExitBehavior(ExitBehavior),
    AudibleBell(AudibleBell),
    EnableScrollBar(bool),
    SwitchToLastActiveTabWhenClosingTab(bool),
    AdjustWindowSizeWhenChangingFontSize(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandPaletteUpdate {
    FgColor(String),
    BgColor(String),
    FontSize(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum VisualBellUpdate {
    FadeInDurationMs(u32),
    FadeOutDurationMs(u32),
    FadeInFunction(EaseFunction),
    FadeOutFunction(EaseFunction),
    Target(VisualBellTarget),
}

/// A single field change, tagged by the section it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionUpdate {
    Colors(ColorsUpdate),
    Fonts(FontsUpdate),
    Window(WindowUpdate),
    Cursor(CursorUpdate),
    Backdrop(BackdropUpdate),
    Gpu(GpuUpdate),
    General(GeneralUpdate),
    CommandPalette(CommandPaletteUpdate),
    VisualBell(VisualBellUpdate),
}

fn palette_slot<'a>(
    list: &'a mut [String],
    field: &'static str,
    index: usize,
) -> Result<&'a mut String, UpdateError> {
    let len = list.len();
    list.get_mut(index)
        .ok_or(UpdateError::IndexOutOfRange { field, index, len })
}

impl AppearanceConfig {
    /// Apply one typed update in place.
    ///
    /// Values are stored as given; range and format checks are the
    /// validator's job so the UI can show every problem at once.
    pub fn apply(&mut self, update: SectionUpdate) -> Result<(), UpdateError> {
        match update {
            SectionUpdate::Colors(u) => self.apply_colors(u)?,
            SectionUpdate::Fonts(u) => {
                let f = &mut self.fonts;
                match u {
                    FontsUpdate::Family(v) => f.family = v,
                    FontsUpdate::Size(v) => f.size = v,
                    FontsUpdate::Weight(v) => f.weight = v,
                    FontsUpdate::LoadTarget(v) => f.freetype_load_target = v,
                    FontsUpdate::RenderTarget(v) => f.freetype_render_target = v,
                }
            }
            SectionUpdate::Window(u) => {
                let w = &mut self.window;
                match u {
                    WindowUpdate::Padding(v) => w.window_padding = v,
                    WindowUpdate::Opacity(v) => w.window_background_opacity = v,
                    WindowUpdate::Decorations(v) => w.window_decorations = v,
                    WindowUpdate::EnableTabBar(v) => w.enable_tab_bar = v,
                    WindowUpdate::HideTabBarIfOnlyOneTab(v) => w.hide_tab_bar_if_only_one_tab = v,
                    WindowUpdate::UseFancyTabBar(v) => w.use_fancy_tab_bar = v,
                    WindowUpdate::TabMaxWidth(v) => w.tab_max_width = v,
                    WindowUpdate::ShowTabIndex(v) => w.show_tab_index_in_tab_bar = v,
                    WindowUpdate::InactivePaneHsb(v) => w.inactive_pane_hsb = v,
                    WindowUpdate::CloseConfirmation(v) => w.window_close_confirmation = v,
                }
            }
            SectionUpdate::Cursor(u) => {
                let c = &mut self.cursor;
                match u {
                    CursorUpdate::Style(v) => c.default_cursor_style = v,
                    CursorUpdate::BlinkRate(v) => c.cursor_blink_rate = v,
                    CursorUpdate::BlinkEaseIn(v) => c.cursor_blink_ease_in = v,
                    CursorUpdate::BlinkEaseOut(v) => c.cursor_blink_ease_out = v,
                    CursorUpdate::AnimationFps(v) => c.animation_fps = v,
                }
            }
            SectionUpdate::Backdrop(u) => self.apply_backdrop(u)?,
            SectionUpdate::Gpu(u) => {
                let g = &mut self.gpu;
                match u {
                    GpuUpdate::FrontEnd(v) => g.front_end = v,
                    GpuUpdate::PowerPreference(v) => g.webgpu_power_preference = v,
                    GpuUpdate::MaxFps(v) => g.max_fps = v,
                }
            }
            SectionUpdate::General(u) => {
                let g = &mut self.general;
                match u {
                    GeneralUpdate::AutomaticallyReloadConfig(v) => {
                        g.automatically_reload_config = v
                    }
                    GeneralUpdate::ScrollbackLines(v) => g.scrollback_lines = v,
                    GeneralUpdate::InitialRows(v) => g.initial_rows = v,
                    GeneralUpdate::InitialCols(v) => g.initial_cols = v,
                    GeneralUpdate::ExitBehavior(v) => g.exit_behavior = v,
                    GeneralUpdate::AudibleBell(v) => g.audible_bell = v,
                    GeneralUpdate::EnableScrollBar(v) => g.enable_scroll_bar = v,
                    GeneralUpdate::SwitchToLastActiveTabWhenClosingTab(v) => {
                        g.switch_to_last_active_tab_when_closing_tab = v
                    }
                    GeneralUpdate::AdjustWindowSizeWhenChangingFontSize(v) => {
                        g.adjust_window_size_when_changing_font_size = v
                    }
                }
            }
            SectionUpdate::CommandPalette(u) => {
                let p = &mut self.command_palette;
                match u {
                    CommandPaletteUpdate::FgColor(v) => p.fg_color = v,
                    CommandPaletteUpdate::BgColor(v) => p.bg_color = v,
                    CommandPaletteUpdate::FontSize(v) => p.font_size = v,
                }
            }
            SectionUpdate::VisualBell(u) => {
                let b = &mut self.visual_bell;
                match u {
                    VisualBellUpdate::FadeInDurationMs(v) => b.fade_in_duration_ms = v,
                    VisualBellUpdate::FadeOutDurationMs(v) => b.fade_out_duration_ms = v,
                    VisualBellUpdate::FadeInFunction(v) => b.fade_in_function = v,
                    VisualBellUpdate::FadeOutFunction(v) => b.fade_out_function = v,
                    VisualBellUpdate::Target(v) => b.target = v,
                }
            }
        }
        Ok(())
    }

    fn apply_colors(&mut self, update: ColorsUpdate) -> Result<(), UpdateError> {
        let c = &mut self.colors;
        match update {
            ColorsUpdate::Scheme(v) => c.scheme = v,
            ColorsUpdate::Named(which, v) => {
                let slot = match which {
                    NamedColor::Foreground => &mut c.foreground,
                    NamedColor::Background => &mut c.background,
                    NamedColor::CursorBg => &mut c.cursor_bg,
                    NamedColor::CursorBorder => &mut c.cursor_border,
                    NamedColor::CursorFg => &mut c.cursor_fg,
                    NamedColor::SelectionBg => &mut c.selection_bg,
                    NamedColor::SelectionFg => &mut c.selection_fg,
                };
                *slot = v;
            }
            ColorsUpdate::Ansi { index, color } => {
                *palette_slot(&mut c.ansi, "colors.ansi", index)? = color
            }
            ColorsUpdate::Bright { index, color } => {
                *palette_slot(&mut c.brights, "colors.brights", index)? = color
            }
            ColorsUpdate::TabBarBackground(v) => c.tab_bar.background = v,
            ColorsUpdate::Tab(state, v) => {
                let slot = match state {
                    TabState::Active => &mut c.tab_bar.active_tab,
                    TabState::Inactive => &mut c.tab_bar.inactive_tab,
                    TabState::InactiveHover => &mut c.tab_bar.inactive_tab_hover,
                    TabState::New => &mut c.tab_bar.new_tab,
                    TabState::NewHover => &mut c.tab_bar.new_tab_hover,
                };
                *slot = v;
            }
            ColorsUpdate::Extra(which, v) => match which {
                ExtraColor::VisualBell => c.visual_bell = v,
                ExtraColor::ScrollbarThumb => c.scrollbar_thumb = v,
                ExtraColor::Split => c.split = v,
            },
            ColorsUpdate::Replace(scheme) => *c = *scheme,
        }
        Ok(())
    }

    fn apply_backdrop(&mut self, update: BackdropUpdate) -> Result<(), UpdateError> {
        let b = &mut self.backdrop;
        let len = b.images.len();
        // An imported model may carry any index; never step from past the end
        let current = b.current_index.min(len.saturating_sub(1));
        match update {
            BackdropUpdate::Enabled(v) => b.enabled = v,
            BackdropUpdate::ImagesDir(v) => b.images_dir = v,
            BackdropUpdate::Images(v) => {
                b.images = v;
                b.current_index = 0;
            }
            BackdropUpdate::AddImage(v) => b.images.push(v),
            BackdropUpdate::RemoveImage(index) => {
                if index >= len {
                    return Err(UpdateError::IndexOutOfRange {
                        field: "backdrop.images",
                        index,
                        len,
                    });
                }
                b.images.remove(index);
                b.current_index = if current > index || current >= b.images.len() {
                    current.saturating_sub(1)
                } else {
                    current
                };
            }
            BackdropUpdate::MoveImage { from, to } => {
                if from >= len || to >= len {
                    return Err(UpdateError::IndexOutOfRange {
                        field: "backdrop.images",
                        index: from.max(to),
                        len,
                    });
                }
                let current = b.images[current].clone();
                let image = b.images.remove(from);
                b.images.insert(to, image);
                // Keep pointing at the same image
                if let Some(pos) = b.images.iter().position(|i| *i == current) {
                    b.current_index = pos;
                }
            }
            BackdropUpdate::CurrentIndex(index) => {
                if index >= len && !(index == 0 && len == 0) {
                    return Err(UpdateError::IndexOutOfRange {
                        field: "backdrop.current_index",
                        index,
                        len,
                    });
                }
                b.current_index = index;
            }
            BackdropUpdate::CycleForward => {
                if len > 0 {
                    b.current_index = (current + 1) % len;
                }
            }
            BackdropUpdate::CycleBack => {
                if len > 0 {
                    b.current_index = (current + len - 1) % len;
                }
            }
            BackdropUpdate::FocusColor(v) => b.focus_color = v,
            BackdropUpdate::OverlayOpacity(v) => b.overlay_opacity = v,
            BackdropUpdate::RandomOnStart(v) => b.random_on_start = v,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_images(n: usize) -> AppearanceConfig {
        let mut config = AppearanceConfig::default();
        config.backdrop.images = (0..n).map(|i| format!("img{i}.png")).collect();
        config
    }

    #[test]
    fn test_apply_named_color_and_palette_slot() {
        let mut config = AppearanceConfig::default();
        config
            .apply(SectionUpdate::Colors(ColorsUpdate::Named(
                NamedColor::Foreground,
                "#ffffff".to_string(),
            )))
            .unwrap();
        config
            .apply(SectionUpdate::Colors(ColorsUpdate::Ansi {
                index: 7,
                color: "#eeeeee".to_string(),
            }))
            .unwrap();
        assert_eq!(config.colors.foreground, "#ffffff");
        assert_eq!(config.colors.ansi[7], "#eeeeee");
    }

    #[test]
    fn test_palette_index_out_of_range_is_reported() {
        let mut config = AppearanceConfig::default();
        let err = config
            .apply(SectionUpdate::Colors(ColorsUpdate::Bright {
                index: 8,
                color: "#000000".to_string(),
            }))
            .unwrap_err();
        assert_eq!(
            err,
            UpdateError::IndexOutOfRange {
                field: "colors.brights",
                index: 8,
                len: 8
            }
        );
    }

    #[test]
    fn test_window_opacity_is_stored_without_clamping() {
        let mut config = AppearanceConfig::default();
        config
            .apply(SectionUpdate::Window(WindowUpdate::Opacity(1.5)))
            .unwrap();
        assert_eq!(config.window.window_background_opacity, 1.5);
    }

    #[test]
    fn test_backdrop_cycle_wraps() {
        let mut config = with_images(3);
        config
            .apply(SectionUpdate::Backdrop(BackdropUpdate::CycleBack))
            .unwrap();
        assert_eq!(config.backdrop.current_index, 2);
        config
            .apply(SectionUpdate::Backdrop(BackdropUpdate::CycleForward))
            .unwrap();
        assert_eq!(config.backdrop.current_index, 0);
    }

    #[test]
    fn test_backdrop_cycle_on_empty_list_is_noop() {
        let mut config = with_images(0);
        config
            .apply(SectionUpdate::Backdrop(BackdropUpdate::CycleForward))
            .unwrap();
        assert_eq!(config.backdrop.current_index, 0);
    }

    #[test]
    fn test_backdrop_remove_keeps_index_valid() {
        let mut config = with_images(3);
        config.backdrop.current_index = 2;
        config
            .apply(SectionUpdate::Backdrop(BackdropUpdate::RemoveImage(2)))
            .unwrap();
        assert_eq!(config.backdrop.current_index, 1);

        config
            .apply(SectionUpdate::Backdrop(BackdropUpdate::RemoveImage(0)))
            .unwrap();
        assert_eq!(config.backdrop.images, vec!["img1.png".to_string()]);
        assert_eq!(config.backdrop.current_index, 0);

        config
            .apply(SectionUpdate::Backdrop(BackdropUpdate::RemoveImage(0)))
            .unwrap();
        assert!(config.backdrop.images.is_empty());
        assert_eq!(config.backdrop.current_index, 0);
    }

    #[test]
    fn test_backdrop_move_follows_current_image() {
        let mut config = with_images(3);
        config.backdrop.current_index = 0;
        config
            .apply(SectionUpdate::Backdrop(BackdropUpdate::MoveImage { from: 0, to: 2 }))
            .unwrap();
        assert_eq!(config.backdrop.images[2], "img0.png");
        assert_eq!(config.backdrop.current_index, 2);
    }

    #[test]
    fn test_backdrop_current_index_rejects_out_of_range() {
        let mut config = with_images(2);
        assert!(
            config
                .apply(SectionUpdate::Backdrop(BackdropUpdate::CurrentIndex(2)))
                .is_err()
        );
        let mut empty = with_images(0);
        assert!(
            empty
                .apply(SectionUpdate::Backdrop(BackdropUpdate::CurrentIndex(0)))
                .is_ok()
        );
    }

    #[test]
    fn test_backdrop_steps_from_out_of_range_index() {
        let mut config = with_images(2);
        config.backdrop.current_index = usize::MAX;
        config
            .apply(SectionUpdate::Backdrop(BackdropUpdate::CycleForward))
            .unwrap();
        assert_eq!(config.backdrop.current_index, 0);

        config.backdrop.current_index = usize::MAX;
        config
            .apply(SectionUpdate::Backdrop(BackdropUpdate::CycleBack))
            .unwrap();
        assert_eq!(config.backdrop.current_index, 0);

        let mut config = with_images(3);
        config.backdrop.current_index = 10;
        config
            .apply(SectionUpdate::Backdrop(BackdropUpdate::RemoveImage(0)))
            .unwrap();
        assert_eq!(config.backdrop.current_index, 1);
        assert!(config.backdrop.current_index < config.backdrop.images.len());
    }
}
