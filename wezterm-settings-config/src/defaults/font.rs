//! Default values for font settings.

use crate::types::FreetypeTarget;

pub fn font_family() -> String {
    "JetBrainsMono Nerd Font".to_string()
}

pub fn font_size() -> f32 {
    12.0
}

pub fn freetype_target() -> Option<FreetypeTarget> {
    Some(FreetypeTarget::Normal)
}

pub fn command_palette_font_size() -> f32 {
    14.0
}
