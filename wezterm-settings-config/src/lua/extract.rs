//! Recover a partial [`AppearanceConfig`] from one module's text.
//!
//! Each module has a fixed table of Lua keys it understands. Only the last
//! assignment to a key counts. A known key whose final value cannot be
//! converted keeps its default and yields one [`ParseDiagnostic`]; unknown
//! keys are skipped silently. A table assigned to a grouping key such as
//! `config.colors = { foreground = ... }` counts as one assignment per field,
//! and a grouping key holding anything else is diagnosed. Extraction itself
//! never fails.

use super::grammar::{self, Scalar, Statement, Value};
use super::{ParseDiagnostic, ParseResult};
use crate::config::{
    AppearanceConfig, BackdropConfig, ColorScheme, FontConfig, Hsb, Padding, TabColors,
    VisualBellConfig, default_config,
};
use crate::module::ConfigModule;
use crate::types::{
    AudibleBell, CloseConfirmation, CursorStyle, EaseFunction, ExitBehavior, FontWeight,
    FreetypeTarget, FrontEnd, PowerPreference, VisualBellTarget, WindowDecorations,
};
use crate::validate::PALETTE_LEN;
use std::collections::HashMap;

type Conv<T> = Result<T, String>;

/// Outcome of routing one statement: the model path it targets and whether
/// the value could be stored.
type Assigned = Option<(String, Conv<()>)>;

/// Extract `module` from its file text. `None` means the file does not exist,
/// which is treated exactly like an empty file.
pub fn extract_module(module: ConfigModule, text: Option<&str>) -> ParseResult {
    let mut config = default_config().clone();
    let mut diagnostics = Vec::new();

    let mut statements = Vec::new();
    for statement in grammar::statements(text.unwrap_or_default()) {
        flatten(module, statement, &mut statements);
    }
    let mut last: HashMap<&str, usize> = HashMap::new();
    for (i, statement) in statements.iter().enumerate() {
        last.insert(statement.key.as_str(), i);
    }

    for (i, statement) in statements.iter().enumerate() {
        if last.get(statement.key.as_str()) != Some(&i) {
            continue;
        }
        let Some((field_path, result)) = assign(module, &mut config, &statement.key, &statement.value)
        else {
            continue;
        };
        if let Err(reason) = result {
            log::warn!(
                "{}:{}: {} not recovered ({}), keeping default",
                module.file_name(),
                statement.line,
                field_path,
                reason
            );
            diagnostics.push(ParseDiagnostic {
                field_path,
                raw_fragment: statement.raw.clone(),
                reason,
                line: statement.line,
            });
        }
    }

    ParseResult {
        config,
        diagnostics,
        existed: text.is_some(),
    }
}

/// Keys whose value is a table of other known keys.
fn containers(module: ConfigModule) -> &'static [&'static str] {
    match module {
        ConfigModule::Colors => &["colors", "colors.tab_bar"],
        _ => &[],
    }
}

/// Split a container assignment into one statement per field, recursively.
/// Anything that is not a field constructor is passed through unchanged.
fn flatten(module: ConfigModule, statement: Statement, out: &mut Vec<Statement>) {
    if containers(module).contains(&statement.key.as_str())
        && let Some(entries) = grammar::table_entries(&statement.raw)
    {
        for entry in entries {
            let child = Statement {
                key: format!("{}.{}", statement.key, entry.name),
                value: grammar::parse_value(&entry.raw),
                raw: entry.raw,
                line: statement.line + entry.line_offset,
            };
            flatten(module, child, out);
        }
        return;
    }
    out.push(statement);
}

fn assign(module: ConfigModule, config: &mut AppearanceConfig, key: &str, value: &Value) -> Assigned {
    let routed = match module {
        ConfigModule::Colors => assign_colors(&mut config.colors, key, value),
        ConfigModule::Fonts => assign_fonts(&mut config.fonts, key, value),
        ConfigModule::Appearance => assign_appearance(config, key, value),
        ConfigModule::Backdrop => assign_backdrop(&mut config.backdrop, key, value),
    };
    routed.map(|(path, result)| {
        // Known key, value outside the grammar
        let result = if matches!(value, Value::Opaque) {
            Err("unsupported expression".to_string())
        } else {
            result
        };
        (path, result)
    })
}

// ============================================================================
// Key tables
// ============================================================================

fn assign_colors(c: &mut ColorScheme, key: &str, v: &Value) -> Assigned {
    if key == "color_scheme" {
        return Some((
            "colors.scheme".to_string(),
            optional(v, str_of).map(|s| c.scheme = s),
        ));
    }
    if containers(ConfigModule::Colors).contains(&key) {
        return Some((
            key.to_string(),
            Err(format!("expected a table of named fields, found {}", v.kind())),
        ));
    }
    let rest = key.strip_prefix("colors.")?;
    let result = match rest {
        "foreground" => string(v).map(|s| c.foreground = s),
        "background" => string(v).map(|s| c.background = s),
        "cursor_bg" => string(v).map(|s| c.cursor_bg = s),
        "cursor_border" => string(v).map(|s| c.cursor_border = s),
        "cursor_fg" => string(v).map(|s| c.cursor_fg = s),
        "selection_bg" => string(v).map(|s| c.selection_bg = s),
        "selection_fg" => string(v).map(|s| c.selection_fg = s),
        "ansi" => palette(v).map(|p| c.ansi = p),
        "brights" => palette(v).map(|p| c.brights = p),
        "visual_bell" => optional(v, str_of).map(|s| c.visual_bell = s),
        "scrollbar_thumb" => optional(v, str_of).map(|s| c.scrollbar_thumb = s),
        "split" => optional(v, str_of).map(|s| c.split = s),
        "tab_bar.background" => string(v).map(|s| c.tab_bar.background = s),
        _ => {
            let slot = rest
                .strip_prefix("tab_bar.")
                .and_then(|pair| c.tab_bar.pair_mut(pair))?;
            tab_colors(v).map(|t| *slot = t)
        }
    };
    Some((format!("colors.{rest}"), result))
}

fn assign_fonts(f: &mut FontConfig, key: &str, v: &Value) -> Assigned {
    let (path, result) = match key {
        "font_family" => ("family", string(v).map(|s| f.family = s)),
        "font_size" => ("size", scalar(v).and_then(f32_of).map(|n| f.size = n)),
        "font_weight" => (
            "weight",
            optional(v, |s| enum_of(s, FontWeight::from_lua)).map(|w| f.weight = w),
        ),
        "freetype_load_target" => (
            "freetype_load_target",
            optional(v, |s| enum_of(s, FreetypeTarget::from_lua))
                .map(|t| f.freetype_load_target = t),
        ),
        "freetype_render_target" => (
            "freetype_render_target",
            optional(v, |s| enum_of(s, FreetypeTarget::from_lua))
                .map(|t| f.freetype_render_target = t),
        ),
        _ => return None,
    };
    Some((format!("fonts.{path}"), result))
}

fn assign_appearance(config: &mut AppearanceConfig, key: &str, v: &Value) -> Assigned {
    let w = &mut config.window;
    let cur = &mut config.cursor;
    let gpu = &mut config.gpu;
    let g = &mut config.general;
    let p = &mut config.command_palette;

    let (path, result): (&str, Conv<()>) = match key {
        // window
        "window_padding" => ("window.window_padding", padding(v).map(|x| w.window_padding = x)),
        "window_background_opacity" => (
            "window.window_background_opacity",
            float(v).map(|x| w.window_background_opacity = x),
        ),
        "window_decorations" => (
            "window.window_decorations",
            enumeration(v, WindowDecorations::from_lua).map(|x| w.window_decorations = x),
        ),
        "enable_tab_bar" => ("window.enable_tab_bar", boolean(v).map(|x| w.enable_tab_bar = x)),
        "hide_tab_bar_if_only_one_tab" => (
            "window.hide_tab_bar_if_only_one_tab",
            boolean(v).map(|x| w.hide_tab_bar_if_only_one_tab = x),
        ),
        "use_fancy_tab_bar" => (
            "window.use_fancy_tab_bar",
            boolean(v).map(|x| w.use_fancy_tab_bar = x),
        ),
        "tab_max_width" => ("window.tab_max_width", integer(v).map(|x| w.tab_max_width = x)),
        "show_tab_index_in_tab_bar" => (
            "window.show_tab_index_in_tab_bar",
            boolean(v).map(|x| w.show_tab_index_in_tab_bar = x),
        ),
        "inactive_pane_hsb" => ("window.inactive_pane_hsb", hsb(v).map(|x| w.inactive_pane_hsb = x)),
        "window_close_confirmation" => (
            "window.window_close_confirmation",
            enumeration(v, CloseConfirmation::from_lua).map(|x| w.window_close_confirmation = x),
        ),

        // cursor
        "default_cursor_style" => (
            "cursor.default_cursor_style",
            enumeration(v, CursorStyle::from_lua).map(|x| cur.default_cursor_style = x),
        ),
        "cursor_blink_rate" => (
            "cursor.cursor_blink_rate",
            integer(v).map(|x| cur.cursor_blink_rate = x),
        ),
        "cursor_blink_ease_in" => (
            "cursor.cursor_blink_ease_in",
            enumeration(v, EaseFunction::from_lua).map(|x| cur.cursor_blink_ease_in = x),
        ),
        "cursor_blink_ease_out" => (
            "cursor.cursor_blink_ease_out",
            enumeration(v, EaseFunction::from_lua).map(|x| cur.cursor_blink_ease_out = x),
        ),
        "animation_fps" => ("cursor.animation_fps", integer(v).map(|x| cur.animation_fps = x)),

        // gpu
        "front_end" => (
            "gpu.front_end",
            enumeration(v, FrontEnd::from_lua).map(|x| gpu.front_end = x),
        ),
        "webgpu_power_preference" => (
            "gpu.webgpu_power_preference",
            enumeration(v, PowerPreference::from_lua).map(|x| gpu.webgpu_power_preference = x),
        ),
        "max_fps" => ("gpu.max_fps", integer(v).map(|x| gpu.max_fps = x)),

        // general
        "automatically_reload_config" => (
            "general.automatically_reload_config",
            boolean(v).map(|x| g.automatically_reload_config = x),
        ),
        "scrollback_lines" => (
            "general.scrollback_lines",
            integer(v).map(|x| g.scrollback_lines = x),
        ),
        "initial_rows" => ("general.initial_rows", integer(v).map(|x| g.initial_rows = x)),
        "initial_cols" => ("general.initial_cols", integer(v).map(|x| g.initial_cols = x)),
        "exit_behavior" => (
            "general.exit_behavior",
            enumeration(v, ExitBehavior::from_lua).map(|x| g.exit_behavior = x),
        ),
        "audible_bell" => (
            "general.audible_bell",
            enumeration(v, AudibleBell::from_lua).map(|x| g.audible_bell = x),
        ),
        "enable_scroll_bar" => (
            "general.enable_scroll_bar",
            boolean(v).map(|x| g.enable_scroll_bar = x),
        ),
        "switch_to_last_active_tab_when_closing_tab" => (
            "general.switch_to_last_active_tab_when_closing_tab",
            boolean(v).map(|x| g.switch_to_last_active_tab_when_closing_tab = x),
        ),
        "adjust_window_size_when_changing_font_size" => (
            "general.adjust_window_size_when_changing_font_size",
            boolean(v).map(|x| g.adjust_window_size_when_changing_font_size = x),
        ),

        // command palette
        "command_palette_fg_color" => ("command_palette.fg_color", string(v).map(|x| p.fg_color = x)),
        "command_palette_bg_color" => ("command_palette.bg_color", string(v).map(|x| p.bg_color = x)),
        "command_palette_font_size" => (
            "command_palette.font_size",
            float(v).map(|x| p.font_size = x),
        ),

        // visual bell
        "visual_bell" => {
            let result = visual_bell(v, &config.visual_bell).map(|x| config.visual_bell = x);
            ("visual_bell", result)
        }
        _ => return None,
    };
    Some((path.to_string(), result))
}

fn assign_backdrop(b: &mut BackdropConfig, key: &str, v: &Value) -> Assigned {
    let (path, result) = match key {
        "enabled" => ("enabled", boolean(v).map(|x| b.enabled = x)),
        "images_dir" => ("images_dir", string(v).map(|x| b.images_dir = x)),
        "images" => ("images", string_list(v).map(|x| b.images = x)),
        "current_index" => (
            "current_index",
            scalar(v).and_then(usize_of).map(|x| b.current_index = x),
        ),
        "focus_color" => ("focus_color", string(v).map(|x| b.focus_color = x)),
        "overlay_opacity" => ("overlay_opacity", float(v).map(|x| b.overlay_opacity = x)),
        "random_on_start" => ("random_on_start", boolean(v).map(|x| b.random_on_start = x)),
        _ => return None,
    };
    Some((format!("backdrop.{path}"), result))
}

// ============================================================================
// Conversions
// ============================================================================

fn scalar(v: &Value) -> Conv<&Scalar> {
    match v {
        Value::Scalar(s) => Ok(s),
        other => Err(format!("expected a scalar, found {}", other.kind())),
    }
}

fn str_of(s: &Scalar) -> Conv<String> {
    match s {
        Scalar::Str(s) => Ok(s.clone()),
        other => Err(format!("expected a string, found {}", other.kind())),
    }
}

fn bool_of(s: &Scalar) -> Conv<bool> {
    match s {
        Scalar::Bool(b) => Ok(*b),
        other => Err(format!("expected a boolean, found {}", other.kind())),
    }
}

fn f32_of(s: &Scalar) -> Conv<f32> {
    match s {
        Scalar::Number(raw) => raw.parse().map_err(|_| format!("invalid number {raw}")),
        other => Err(format!("expected a number, found {}", other.kind())),
    }
}

fn u32_of(s: &Scalar) -> Conv<u32> {
    match s {
        Scalar::Number(raw) => raw
            .parse()
            .map_err(|_| format!("expected a non-negative integer, found {raw}")),
        other => Err(format!("expected an integer, found {}", other.kind())),
    }
}

fn usize_of(s: &Scalar) -> Conv<usize> {
    u32_of(s).map(|n| n as usize)
}

fn enum_of<T>(s: &Scalar, parse: fn(&str) -> Option<T>) -> Conv<T> {
    let name = str_of(s)?;
    parse(&name).ok_or_else(|| format!("unknown value {name:?}"))
}

fn string(v: &Value) -> Conv<String> {
    scalar(v).and_then(str_of)
}

fn boolean(v: &Value) -> Conv<bool> {
    scalar(v).and_then(bool_of)
}

fn float(v: &Value) -> Conv<f32> {
    scalar(v).and_then(f32_of)
}

fn integer(v: &Value) -> Conv<u32> {
    scalar(v).and_then(u32_of)
}

fn enumeration<T>(v: &Value, parse: fn(&str) -> Option<T>) -> Conv<T> {
    scalar(v).and_then(|s| enum_of(s, parse))
}

/// `nil` clears an optional field.
fn optional<T>(v: &Value, conv: impl Fn(&Scalar) -> Conv<T>) -> Conv<Option<T>> {
    match scalar(v)? {
        Scalar::Nil => Ok(None),
        s => conv(s).map(Some),
    }
}

fn string_list(v: &Value) -> Conv<Vec<String>> {
    match v {
        Value::List(items) => Ok(items.clone()),
        other => Err(format!("expected a list of strings, found {}", other.kind())),
    }
}

fn palette(v: &Value) -> Conv<Vec<String>> {
    let items = string_list(v)?;
    if items.len() != PALETTE_LEN {
        return Err(format!(
            "expected {PALETTE_LEN} colors, found {}",
            items.len()
        ));
    }
    Ok(items)
}

/// A `{ key = scalar }` table being consumed field by field.
struct FieldTable<'v> {
    entries: Vec<(&'v str, &'v Scalar)>,
}

impl<'v> FieldTable<'v> {
    fn new(v: &'v Value) -> Conv<Self> {
        match v {
            Value::Fields(fields) => Ok(Self {
                entries: fields.iter().map(|(k, s)| (k.as_str(), s)).collect(),
            }),
            Value::List(items) if items.is_empty() => Ok(Self { entries: Vec::new() }),
            other => Err(format!("expected a table, found {}", other.kind())),
        }
    }

    /// Remove a field; later duplicates win, as in Lua.
    fn take(&mut self, name: &str) -> Option<&'v Scalar> {
        let mut found = None;
        self.entries.retain(|(k, s)| {
            if *k == name {
                found = Some(*s);
                false
            } else {
                true
            }
        });
        found
    }

    fn require(&mut self, name: &str) -> Conv<&'v Scalar> {
        self.take(name).ok_or_else(|| format!("missing `{name}`"))
    }

    fn finish(self) -> Conv<()> {
        match self.entries.first() {
            Some((k, _)) => Err(format!("unexpected field `{k}`")),
            None => Ok(()),
        }
    }
}

fn tab_colors(v: &Value) -> Conv<TabColors> {
    let mut t = FieldTable::new(v)?;
    let tab = TabColors {
        bg_color: str_of(t.require("bg_color")?)?,
        fg_color: str_of(t.require("fg_color")?)?,
        italic: match t.take("italic") {
            None | Some(Scalar::Nil) => None,
            Some(s) => Some(bool_of(s)?),
        },
    };
    t.finish()?;
    Ok(tab)
}

fn padding(v: &Value) -> Conv<Padding> {
    let mut t = FieldTable::new(v)?;
    let padding = Padding {
        left: f32_of(t.require("left")?)?,
        right: f32_of(t.require("right")?)?,
        top: f32_of(t.require("top")?)?,
        bottom: f32_of(t.require("bottom")?)?,
    };
    t.finish()?;
    Ok(padding)
}

fn hsb(v: &Value) -> Conv<Hsb> {
    let mut t = FieldTable::new(v)?;
    let hsb = Hsb {
        hue: f32_of(t.require("hue")?)?,
        saturation: f32_of(t.require("saturation")?)?,
        brightness: f32_of(t.require("brightness")?)?,
    };
    t.finish()?;
    Ok(hsb)
}

/// Fields left out keep their current value, matching how WezTerm fills the
/// table from its own defaults.
fn visual_bell(v: &Value, current: &VisualBellConfig) -> Conv<VisualBellConfig> {
    let mut t = FieldTable::new(v)?;
    let mut bell = current.clone();
    if let Some(s) = t.take("fade_in_duration_ms") {
        bell.fade_in_duration_ms = u32_of(s)?;
    }
    if let Some(s) = t.take("fade_out_duration_ms") {
        bell.fade_out_duration_ms = u32_of(s)?;
    }
    if let Some(s) = t.take("fade_in_function") {
        bell.fade_in_function = enum_of(s, EaseFunction::from_lua)?;
    }
    if let Some(s) = t.take("fade_out_function") {
        bell.fade_out_function = enum_of(s, EaseFunction::from_lua)?;
    }
    if let Some(s) = t.take("target") {
        bell.target = enum_of(s, VisualBellTarget::from_lua)?;
    }
    t.finish()?;
    Ok(bell)
}
