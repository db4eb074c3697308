//! A curated catalogue of WezTerm's built-in color schemes.
//!
//! WezTerm ships several hundred schemes; this is the popular subset offered
//! in the scheme picker. Names are passed through to `config.color_scheme`
//! as-is and are never checked against WezTerm itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSchemeInfo {
    pub name: String,
    pub category: String,
}

const FAMILIES: &[(&str, &[&str])] = &[
    (
        "Catppuccin",
        &["Catppuccin Latte", "Catppuccin Frappe", "Catppuccin Macchiato", "Catppuccin Mocha"],
    ),
    ("Dracula", &["Dracula", "Dracula+", "Dracula (Official)"]),
    ("Nord", &["Nord", "Nord (Gogh)", "Nord Light"]),
    (
        "Gruvbox",
        &[
            "Gruvbox Dark",
            "Gruvbox dark, hard (base16)",
            "Gruvbox dark, medium (base16)",
            "Gruvbox dark, soft (base16)",
            "Gruvbox Light",
            "Gruvbox light, hard (base16)",
            "Gruvbox Material (Gogh)",
        ],
    ),
    (
        "Solarized",
        &[
            "Solarized (dark) (terminal.sexy)",
            "Solarized (light) (terminal.sexy)",
            "Solarized Dark - Patched",
            "Solarized Dark Higher Contrast",
            "Solarized Darcula",
        ],
    ),
    (
        "Tokyo Night",
        &[
            "Tokyo Night",
            "Tokyo Night Day",
            "Tokyo Night Moon",
            "Tokyo Night Storm",
            "tokyonight",
            "tokyonight_day",
            "tokyonight_moon",
            "tokyonight_storm",
        ],
    ),
    (
        "One",
        &["One Dark (Gogh)", "OneDark", "OneHalfDark", "OneHalfLight", "One Half Black"],
    ),
    (
        "Monokai",
        &["Monokai (base16)", "Monokai Pro (Gogh)", "Monokai Remastered", "Monokai Soda", "Monokai Vivid"],
    ),
    (
        "GitHub",
        &["GitHub Dark", "GitHub Dark Dimmed (Gogh)", "GitHub Dark High Contrast (Gogh)", "GitHub Light"],
    ),
    ("Kanagawa", &["Kanagawa (Gogh)", "Kanagawa Dragon (Gogh)", "Kanagawa Wave (Gogh)"]),
    (
        "Rose Pine",
        &["rose-pine", "rose-pine-dawn", "rose-pine-moon"],
    ),
    (
        "Everforest",
        &["Everforest Dark (Gogh)", "Everforest Dark Hard (Gogh)", "Everforest Light (Gogh)"],
    ),
    (
        "Material",
        &["Material", "Material (base16)", "MaterialDark", "MaterialOcean", "Palenight (Gogh)"],
    ),
    ("Ayu", &["Ayu Dark (Gogh)", "Ayu Light (Gogh)", "Ayu Mirage"]),
    (
        "Nightfox",
        &["carbonfox", "dawnfox", "dayfox", "duskfox", "nightfox", "nordfox", "terafox"],
    ),
    ("Windows", &["Campbell", "Campbell Powershell", "PowerShell"]),
    ("VSCode", &["Dark+"]),
    ("JetBrains", &["JetBrains Darcula"]),
    ("Doom", &["Doom One", "Doom Peacock"]),
    ("GNOME", &["Tango", "Tango (terminal.sexy)"]),
    (
        "Classic",
        &[
            "3024 Night",
            "Afterglow",
            "Andromeda",
            "Cobalt2",
            "Espresso",
            "Hybrid",
            "iceberg-dark",
            "iceberg-light",
            "Jellybeans",
            "Molokai",
            "Night Owl",
            "Poimandres",
            "Seti",
            "Snazzy",
            "Spacegray",
        ],
    ),
    ("Retro", &["Borland", "Homebrew", "Matrix"]),
    ("Cyberpunk", &["cyberpunk", "Laser"]),
];

/// Every catalogued scheme, grouped by family in a stable order.
pub fn builtin_color_schemes() -> Vec<ColorSchemeInfo> {
    FAMILIES
        .iter()
        .flat_map(|(category, names)| {
            names.iter().map(move |name| ColorSchemeInfo {
                name: (*name).to_string(),
                category: (*category).to_string(),
            })
        })
        .collect()
}

/// Schemes whose name or category contains `query`, ignoring case.
pub fn search_color_schemes(query: &str) -> Vec<ColorSchemeInfo> {
    let query = query.to_lowercase();
    builtin_color_schemes()
        .into_iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&query) || s.category.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_has_no_duplicate_names() {
        let schemes = builtin_color_schemes();
        let unique: HashSet<&str> = schemes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(unique.len(), schemes.len());
    }

    #[test]
    fn test_catalogue_starts_with_catppuccin() {
        let schemes = builtin_color_schemes();
        assert_eq!(schemes[0].name, "Catppuccin Latte");
        assert_eq!(schemes[0].category, "Catppuccin");
    }

    #[test]
    fn test_search_matches_name_and_category() {
        let hits = search_color_schemes("mocha");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Catppuccin Mocha");
        assert_eq!(search_color_schemes("NIGHTFOX").len(), 7);
    }
}
