//! Default values for cursor, GPU, backdrop, and general behaviour.

pub fn cursor_blink_rate() -> u32 {
    650 // ms
}

pub fn animation_fps() -> u32 {
    120
}

pub fn max_fps() -> u32 {
    120
}

pub fn overlay_opacity() -> f32 {
    0.96
}

pub fn scrollback_lines() -> u32 {
    3500
}

pub fn initial_rows() -> u32 {
    24
}

pub fn initial_cols() -> u32 {
    80
}

pub fn bell_fade_in_ms() -> u32 {
    75
}

pub fn bell_fade_out_ms() -> u32 {
    150
}
