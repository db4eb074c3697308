//! Default values for window settings.

use crate::config::{Hsb, Padding};

pub fn window_padding() -> Padding {
    Padding {
        left: 0.0,
        right: 0.0,
        top: 10.0,
        bottom: 7.5,
    }
}

pub fn window_opacity() -> f32 {
    1.0 // Fully opaque by default
}

pub fn tab_max_width() -> u32 {
    25
}

/// No dimming of inactive panes
pub fn inactive_pane_hsb() -> Hsb {
    Hsb {
        hue: 1.0,
        saturation: 1.0,
        brightness: 1.0,
    }
}
