//! Installed monospace font families, read through fontdb.

use fontdb::Database;
use wezterm_settings_config::FontEnumerator;
use wezterm_settings_config::fonts::normalize_families;

/// Enumerates system fonts once, at construction.
pub struct SystemFonts {
    font_db: Database,
}

impl SystemFonts {
    pub fn load() -> Self {
        let mut font_db = Database::new();
        font_db.load_system_fonts();
        log::info!("Loaded {} font faces", font_db.len());
        Self { font_db }
    }
}

impl FontEnumerator for SystemFonts {
    fn list_monospace_families(&self) -> Vec<String> {
        normalize_families(
            self.font_db
                .faces()
                .filter(|face| face.monospaced)
                .flat_map(|face| face.families.iter().map(|(name, _)| name.clone())),
        )
    }
}
