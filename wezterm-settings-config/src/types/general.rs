//! Behavioural enumerations for the general and visual bell sections.

lua_enum! {
    /// What happens to a pane when its program exits (`exit_behavior`)
    ExitBehavior {
        Close => "Close", "Close",
        CloseOnCleanExit => "CloseOnCleanExit", "Close on clean exit",
        Hold => "Hold", "Hold open",
    }
}

lua_enum! {
    /// `audible_bell` value
    AudibleBell {
        SystemBeep => "SystemBeep", "System beep",
        Disabled => "Disabled", "Disabled",
    }
}

lua_enum! {
    /// Which color the visual bell animates (`visual_bell.target`)
    VisualBellTarget {
        BackgroundColor => "BackgroundColor", "Background color",
        CursorColor => "CursorColor", "Cursor color",
    }
}
