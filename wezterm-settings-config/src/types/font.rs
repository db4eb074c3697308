//! Font weight and FreeType rendering targets.

lua_enum! {
    /// Font weight passed to `wezterm.font { weight = ... }`
    FontWeight {
        Thin => "Thin", "Thin",
        ExtraLight => "ExtraLight", "Extra Light",
        Light => "Light", "Light",
        Regular => "Regular", "Regular",
        Medium => "Medium", "Medium",
        DemiBold => "DemiBold", "Demi Bold",
        Bold => "Bold", "Bold",
        ExtraBold => "ExtraBold", "Extra Bold",
        Black => "Black", "Black",
    }
}

lua_enum! {
    /// FreeType hinting / antialiasing target
    ///
    /// Used for both `freetype_load_target` and `freetype_render_target`.
    FreetypeTarget {
        Normal => "Normal", "Normal",
        /// Lighter hinting, closer to macOS rendering
        Light => "Light", "Light",
        /// Monochrome, no antialiasing
        Mono => "Mono", "Monochrome",
        /// Subpixel rendering for horizontal LCD panels
        HorizontalLcd => "HorizontalLcd", "Horizontal LCD",
    }
}
