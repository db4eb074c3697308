//! GPU front end selection.

lua_enum! {
    /// Rendering backend (`front_end`)
    FrontEnd {
        WebGpu => "WebGpu", "WebGPU",
        OpenGL => "OpenGL", "OpenGL",
        /// CPU rasterizer, for machines without usable GPU drivers
        Software => "Software", "Software",
    }
}

lua_enum! {
    /// GPU power preference for adapter selection (`webgpu_power_preference`)
    ///
    /// Only honoured by the WebGpu front end.
    PowerPreference {
        /// Prefer integrated GPU - saves battery
        LowPower => "LowPower", "Low Power (Integrated GPU)",
        /// Prefer discrete GPU - maximum performance
        HighPerformance => "HighPerformance", "High Performance (Discrete GPU)",
    }
}
