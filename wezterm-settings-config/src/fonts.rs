//! Font discovery seam. The engine never enumerates fonts itself.

/// Lists installed monospace font families for the font picker.
pub trait FontEnumerator: Send + Sync {
    /// Sorted, deduplicated family names.
    fn list_monospace_families(&self) -> Vec<String>;
}

/// A fixed list, for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct StaticFonts(pub Vec<String>);

impl FontEnumerator for StaticFonts {
    fn list_monospace_families(&self) -> Vec<String> {
        normalize_families(self.0.iter().cloned())
    }
}

/// Sort case-insensitively and drop duplicates and blanks.
pub fn normalize_families(families: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut families: Vec<String> = families
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();
    families.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    families.dedup();
    families
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sorts_and_dedups() {
        let fonts = StaticFonts(vec![
            "JetBrains Mono".to_string(),
            "fira code".to_string(),
            "  ".to_string(),
            "JetBrains Mono".to_string(),
            "Cascadia Code".to_string(),
        ]);
        assert_eq!(
            fonts.list_monospace_families(),
            vec!["Cascadia Code", "fira code", "JetBrains Mono"]
        );
    }
}
