//! Window chrome enumerations.

lua_enum! {
    /// `window_decorations` value
    WindowDecorations {
        Full => "FULL", "Full (title bar + border)",
        Resize => "RESIZE", "Resizable border only",
        None => "NONE", "None",
        Title => "TITLE", "Title bar only",
        /// Fancy tab bar with integrated window buttons
        IntegratedButtonsResize => "INTEGRATED_BUTTONS|RESIZE", "Integrated buttons",
    }
}

lua_enum! {
    /// `window_close_confirmation` value
    CloseConfirmation {
        AlwaysPrompt => "AlwaysPrompt", "Always prompt",
        NeverPrompt => "NeverPrompt", "Never prompt",
    }
}
