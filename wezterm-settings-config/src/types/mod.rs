//! Closed enumerations used by the appearance model.
//!
//! Every enum here maps 1:1 onto a string WezTerm accepts in its Lua config.
//! The mapping is declared once per enum through [`lua_enum!`], which also
//! provides the `all()` / `display_name()` helpers used by settings dropdowns.
//!
//! - `font`: Font weight and FreeType targets
//! - `window`: Window decorations, close confirmation
//! - `cursor`: Cursor style and easing functions
//! - `rendering`: GPU front end and power preference
//! - `general`: Exit behaviour, audible bell, visual bell target

/// Declare a closed enum together with its exact Lua spelling and UI label.
///
/// Serde uses the Lua spelling too, so JSON exports read the same as the
/// generated Lua files.
macro_rules! lua_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lua:literal, $display:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $lua)] $variant, )+
        }

        impl $name {
            /// All variants, in declaration order, for UI iteration.
            pub fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }

            /// The exact string WezTerm expects in Lua.
            pub fn as_lua(self) -> &'static str {
                match self {
                    $($name::$variant => $lua),+
                }
            }

            /// Parse a Lua spelling. Exact match first, then case-insensitive.
            pub fn from_lua(s: &str) -> Option<Self> {
                match s {
                    $($lua => return Some($name::$variant),)+
                    _ => {}
                }
                Self::all()
                    .iter()
                    .copied()
                    .find(|v| v.as_lua().eq_ignore_ascii_case(s))
            }

            /// Human readable label for settings UI.
            pub fn display_name(self) -> &'static str {
                match self {
                    $($name::$variant => $display),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_lua())
            }
        }
    };
}

pub mod cursor;
pub mod font;
pub mod general;
pub mod rendering;
pub mod window;

pub use cursor::{CursorStyle, EaseFunction};
pub use font::{FontWeight, FreetypeTarget};
pub use general::{AudibleBell, ExitBehavior, VisualBellTarget};
pub use rendering::{FrontEnd, PowerPreference};
pub use window::{CloseConfirmation, WindowDecorations};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lua_exact_and_case_insensitive() {
        assert_eq!(FontWeight::from_lua("DemiBold"), Some(FontWeight::DemiBold));
        assert_eq!(FontWeight::from_lua("demibold"), Some(FontWeight::DemiBold));
        assert_eq!(FontWeight::from_lua("Semi"), None);
    }

    #[test]
    fn test_lua_spelling_roundtrip_for_every_variant() {
        for d in WindowDecorations::all() {
            assert_eq!(WindowDecorations::from_lua(d.as_lua()), Some(*d));
        }
        for c in CursorStyle::all() {
            assert_eq!(CursorStyle::from_lua(c.as_lua()), Some(*c));
        }
        assert_eq!(CursorStyle::all().len(), 6);
    }

    #[test]
    fn test_serde_uses_lua_spelling() {
        let json = serde_json::to_string(&WindowDecorations::IntegratedButtonsResize).unwrap();
        assert_eq!(json, "\"INTEGRATED_BUTTONS|RESIZE\"");
        let back: FrontEnd = serde_json::from_str("\"OpenGL\"").unwrap();
        assert_eq!(back, FrontEnd::OpenGL);
    }
}
