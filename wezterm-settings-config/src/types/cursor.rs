//! Cursor shape and animation easing.

lua_enum! {
    /// `default_cursor_style` value
    CursorStyle {
        SteadyBlock => "SteadyBlock", "Steady block",
        BlinkingBlock => "BlinkingBlock", "Blinking block",
        SteadyUnderline => "SteadyUnderline", "Steady underline",
        BlinkingUnderline => "BlinkingUnderline", "Blinking underline",
        SteadyBar => "SteadyBar", "Steady bar",
        BlinkingBar => "BlinkingBar", "Blinking bar",
    }
}

lua_enum! {
    /// Easing curve used by cursor blink and visual bell animations
    EaseFunction {
        Linear => "Linear", "Linear",
        EaseIn => "EaseIn", "Ease in",
        EaseOut => "EaseOut", "Ease out",
        EaseInOut => "EaseInOut", "Ease in/out",
        /// No interpolation: jump straight to the end value
        Constant => "Constant", "Constant",
    }
}
