//! Canonical module text from an [`AppearanceConfig`].
//!
//! Output is fully regenerated on every save in a fixed field order, so the
//! same model always produces byte-identical files. Everything emitted stays
//! inside the grammar the extractor reads, which makes
//! `extract(generate(config)) == config` hold for any valid model.

use super::grammar::quote;
use crate::config::{AppearanceConfig, Hsb, Padding, TabColors};
use crate::module::ConfigModule;
use std::collections::BTreeMap;

const HEADER: &str = "\
-- Generated by wezterm-settings.
-- Known settings are read back when the editor loads this file; anything
-- else is replaced on the next save.
";

/// Render every module.
pub fn generate(config: &AppearanceConfig) -> BTreeMap<ConfigModule, String> {
    ConfigModule::all()
        .into_iter()
        .map(|module| (module, generate_module(module, config)))
        .collect()
}

/// Render one module.
pub fn generate_module(module: ConfigModule, config: &AppearanceConfig) -> String {
    let mut out = LuaWriter::new(module);
    match module {
        ConfigModule::Colors => colors(&mut out, config),
        ConfigModule::Fonts => fonts(&mut out, config),
        ConfigModule::Appearance => appearance(&mut out, config),
        ConfigModule::Backdrop => backdrop(&mut out, config),
    }
    out.finish()
}

/// The `wezterm.lua` that wires the modules together.
pub fn entrypoint_text() -> String {
    let mut text = String::from("-- Created by wezterm-settings. This file is never overwritten.\n");
    text.push_str("local wezterm = require(\"wezterm\")\n");
    text.push_str("local config = wezterm.config_builder()\n\n");
    for module in ConfigModule::all() {
        text.push_str(&format!(
            "require({}).apply_to_config(config)\n",
            quote(module.require_name())
        ));
    }
    text.push_str("\nreturn config\n");
    text
}

/// Shortest round-trip decimal form; never uses exponent notation.
fn num(value: f32) -> String {
    format!("{value}")
}

fn str_or_nil(value: Option<&str>) -> String {
    value.map_or_else(|| "nil".to_string(), quote)
}

fn tab(t: &TabColors) -> String {
    let mut fields = format!(
        "bg_color = {}, fg_color = {}",
        quote(&t.bg_color),
        quote(&t.fg_color)
    );
    if let Some(italic) = t.italic {
        fields.push_str(&format!(", italic = {italic}"));
    }
    format!("{{ {fields} }}")
}

fn padding(p: &Padding) -> String {
    let sides: Vec<String> = p
        .sides()
        .iter()
        .map(|(name, v)| format!("{name} = {}", num(*v)))
        .collect();
    format!("{{ {} }}", sides.join(", "))
}

fn hsb(h: &Hsb) -> String {
    let parts: Vec<String> = h
        .components()
        .iter()
        .map(|(name, v)| format!("{name} = {}", num(*v)))
        .collect();
    format!("{{ {} }}", parts.join(", "))
}

struct LuaWriter {
    text: String,
    indent: usize,
}

impl LuaWriter {
    fn new(module: ConfigModule) -> Self {
        let mut text = format!("-- {}\n", module.file_name());
        text.push_str(HEADER);
        Self { text, indent: 0 }
    }

    fn line(&mut self, line: &str) {
        if !line.is_empty() {
            self.text.push_str(&"  ".repeat(self.indent));
            self.text.push_str(line);
        }
        self.text.push('\n');
    }

    fn assign(&mut self, target: &str, value: impl AsRef<str>) {
        self.line(&format!("{target} = {}", value.as_ref()));
    }

    /// A list of strings, one per line.
    fn list(&mut self, target: &str, items: &[String]) {
        if items.is_empty() {
            self.assign(target, "{}");
            return;
        }
        self.line(&format!("{target} = {{"));
        self.indent += 1;
        for item in items {
            self.line(&format!("{},", quote(item)));
        }
        self.indent -= 1;
        self.line("}");
    }

    fn open(&mut self, line: &str) {
        self.line(line);
        self.indent += 1;
    }

    fn close(&mut self, line: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.line(line);
    }

    fn finish(mut self) -> String {
        self.line("");
        self.line("return M");
        self.text
    }
}

fn colors(out: &mut LuaWriter, config: &AppearanceConfig) {
    let c = &config.colors;
    out.line("local M = {}");
    out.line("");
    out.open("function M.apply_to_config(config)");
    out.assign("config.color_scheme", str_or_nil(c.scheme.as_deref()));
    out.assign("config.colors", "{}");
    for (key, value) in c.named() {
        out.assign(&format!("config.colors.{key}"), quote(value));
    }
    out.list("config.colors.ansi", &c.ansi);
    out.list("config.colors.brights", &c.brights);
    for (key, value) in c.extras() {
        out.assign(&format!("config.colors.{key}"), str_or_nil(value.map(String::as_str)));
    }
    out.line("");
    out.assign("config.colors.tab_bar", "{}");
    out.assign("config.colors.tab_bar.background", quote(&c.tab_bar.background));
    for (key, pair) in c.tab_bar.pairs() {
        out.assign(&format!("config.colors.tab_bar.{key}"), tab(pair));
    }
    out.close("end");
}

fn fonts(out: &mut LuaWriter, config: &AppearanceConfig) {
    let f = &config.fonts;
    out.line("local wezterm = require(\"wezterm\")");
    out.line("local M = {}");
    out.line("");
    out.assign("M.font_family", quote(&f.family));
    out.assign("M.font_weight", str_or_nil(f.weight.map(|w| w.as_lua())));
    out.line("");
    out.open("function M.apply_to_config(config)");
    out.line("config.font = wezterm.font({ family = M.font_family, weight = M.font_weight })");
    out.assign("config.font_size", num(f.size));
    out.assign(
        "config.freetype_load_target",
        str_or_nil(f.freetype_load_target.map(|t| t.as_lua())),
    );
    out.assign(
        "config.freetype_render_target",
        str_or_nil(f.freetype_render_target.map(|t| t.as_lua())),
    );
    out.close("end");
}

fn appearance(out: &mut LuaWriter, config: &AppearanceConfig) {
    let w = &config.window;
    let c = &config.cursor;
    let g = &config.general;
    let p = &config.command_palette;
    let b = &config.visual_bell;

    out.line("local M = {}");
    out.line("");
    out.open("function M.apply_to_config(config)");

    out.line("-- Window");
    out.assign("config.window_padding", padding(&w.window_padding));
    out.assign("config.window_background_opacity", num(w.window_background_opacity));
    out.assign("config.window_decorations", quote(w.window_decorations.as_lua()));
    out.assign("config.enable_tab_bar", w.enable_tab_bar.to_string());
    out.assign(
        "config.hide_tab_bar_if_only_one_tab",
        w.hide_tab_bar_if_only_one_tab.to_string(),
    );
    out.assign("config.use_fancy_tab_bar", w.use_fancy_tab_bar.to_string());
    out.assign("config.tab_max_width", w.tab_max_width.to_string());
    out.assign(
        "config.show_tab_index_in_tab_bar",
        w.show_tab_index_in_tab_bar.to_string(),
    );
    out.assign("config.inactive_pane_hsb", hsb(&w.inactive_pane_hsb));
    out.assign(
        "config.window_close_confirmation",
        quote(w.window_close_confirmation.as_lua()),
    );

    out.line("");
    out.line("-- Cursor");
    out.assign("config.default_cursor_style", quote(c.default_cursor_style.as_lua()));
    out.assign("config.cursor_blink_rate", c.cursor_blink_rate.to_string());
    out.assign("config.cursor_blink_ease_in", quote(c.cursor_blink_ease_in.as_lua()));
    out.assign("config.cursor_blink_ease_out", quote(c.cursor_blink_ease_out.as_lua()));
    out.assign("config.animation_fps", c.animation_fps.to_string());

    out.line("");
    out.line("-- GPU");
    out.assign("config.front_end", quote(config.gpu.front_end.as_lua()));
    out.assign(
        "config.webgpu_power_preference",
        quote(config.gpu.webgpu_power_preference.as_lua()),
    );
    out.assign("config.max_fps", config.gpu.max_fps.to_string());

    out.line("");
    out.line("-- General");
    out.assign(
        "config.automatically_reload_config",
        g.automatically_reload_config.to_string(),
    );
    out.assign("config.scrollback_lines", g.scrollback_lines.to_string());
    out.assign("config.initial_rows", g.initial_rows.to_string());
    out.assign("config.initial_cols", g.initial_cols.to_string());
    out.assign("config.exit_behavior", quote(g.exit_behavior.as_lua()));
    out.assign("config.audible_bell", quote(g.audible_bell.as_lua()));
    out.assign("config.enable_scroll_bar", g.enable_scroll_bar.to_string());
    out.assign(
        "config.switch_to_last_active_tab_when_closing_tab",
        g.switch_to_last_active_tab_when_closing_tab.to_string(),
    );
    out.assign(
        "config.adjust_window_size_when_changing_font_size",
        g.adjust_window_size_when_changing_font_size.to_string(),
    );

    out.line("");
    out.line("-- Command palette");
    out.assign("config.command_palette_fg_color", quote(&p.fg_color));
    out.assign("config.command_palette_bg_color", quote(&p.bg_color));
    out.assign("config.command_palette_font_size", num(p.font_size));

    out.line("");
    out.line("-- Visual bell");
    out.open("config.visual_bell = {");
    out.line(&format!("fade_in_duration_ms = {},", b.fade_in_duration_ms));
    out.line(&format!("fade_out_duration_ms = {},", b.fade_out_duration_ms));
    out.line(&format!("fade_in_function = {},", quote(b.fade_in_function.as_lua())));
    out.line(&format!("fade_out_function = {},", quote(b.fade_out_function.as_lua())));
    out.line(&format!("target = {},", quote(b.target.as_lua())));
    out.close("}");
    out.close("end");
}

fn backdrop(out: &mut LuaWriter, config: &AppearanceConfig) {
    let b = &config.backdrop;
    out.line("local M = {}");
    out.line("");
    out.assign("M.enabled", b.enabled.to_string());
    out.assign("M.images_dir", quote(&b.images_dir));
    out.list("M.images", &b.images);
    out.line("-- Zero-based position in M.images");
    out.assign("M.current_index", b.current_index.to_string());
    out.assign("M.focus_color", quote(&b.focus_color));
    out.assign("M.overlay_opacity", num(b.overlay_opacity));
    out.assign("M.random_on_start", b.random_on_start.to_string());
    out.line("");
    out.open("local function image_path(name)");
    out.open("if M.images_dir == \"\" or name:sub(1, 1) == \"/\" or name:match(\"^%a:[\\\\/]\") then");
    out.line("return name");
    out.close("end");
    out.line("return M.images_dir .. \"/\" .. name");
    out.close("end");
    out.line("");
    out.open("function M.apply_to_config(config)");
    out.open("if not M.enabled or #M.images == 0 then");
    out.line("return");
    out.close("end");
    out.line("local index = M.current_index");
    out.open("if M.random_on_start then");
    out.line("index = math.random(0, #M.images - 1)");
    out.close("end");
    out.open("config.background = {");
    out.open("{");
    out.line("source = { File = image_path(M.images[index + 1]) },");
    out.close("},");
    out.open("{");
    out.line("source = { Color = M.focus_color },");
    out.line("width = \"100%\",");
    out.line("height = \"100%\",");
    out.line("opacity = M.overlay_opacity,");
    out.close("},");
    out.close("}");
    out.close("end");
}
