// Application settings
// Loaded from ~/.config/borderline/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use borderline_engine::{EditorSession, HeaderNaming};

use crate::Color;

const DEFAULT_CONFIG: &str = r##"{
    // Size of a newly created table
    "table.defaultRows": 6,
    "table.defaultColumns": 6,

    // Draw a separator between grouped sections
    "table.groupingSeparator": false,

    // Generated header names are "<prefix> <n>"
    "headers.rowPrefix": "Row",
    "headers.columnPrefix": "Header",

    // Color of every drawn border edge (#RRGGBB)
    "borders.color": "#000000"
}
"##;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Table
    #[serde(rename = "table.defaultRows")]
    pub default_rows: usize,

    #[serde(rename = "table.defaultColumns")]
    pub default_columns: usize,

    #[serde(rename = "table.groupingSeparator")]
    pub grouping_separator: bool,

    // Headers
    #[serde(rename = "headers.rowPrefix")]
    pub row_prefix: String,

    #[serde(rename = "headers.columnPrefix")]
    pub column_prefix: String,

    // Borders
    #[serde(rename = "borders.color")]
    pub border_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_rows: 6,
            default_columns: 6,
            grouping_separator: false,
            row_prefix: "Row".into(),
            column_prefix: "Header".into(),
            border_color: "#000000".into(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("borderline");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from a specific file. A missing file is created with commented defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            Self::create_default_file(path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                log::warn!("error parsing {}: {e}; using default settings", path.display());
                Self::default()
            }),
            Err(e) => {
                log::warn!("error reading {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Parse settings JSON, ignoring `//` comment lines.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    fn create_default_file(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("error creating config directory: {e}");
                return;
            }
        }

        if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
            log::warn!("error writing default {}: {e}", path.display());
        }
    }

    pub fn header_naming(&self) -> HeaderNaming {
        let prefix = |value: &str, fallback: &str| {
            let value = value.trim();
            if value.is_empty() { fallback.to_string() } else { value.to_string() }
        };
        let defaults = HeaderNaming::default();
        HeaderNaming {
            row_prefix: prefix(&self.row_prefix, &defaults.row_prefix),
            column_prefix: prefix(&self.column_prefix, &defaults.column_prefix),
        }
    }

    /// Border color, black when the setting is not a valid hex color.
    pub fn border_color(&self) -> Color {
        Color::parse_hex(&self.border_color).unwrap_or_else(|| {
            log::warn!("invalid borders.color '{}', using black", self.border_color);
            Color::BLACK
        })
    }

    /// Default table size, with zero counts raised to one.
    pub fn default_dimensions(&self) -> (usize, usize) {
        (self.default_rows.max(1), self.default_columns.max(1))
    }

    /// An editing session using the configured header naming and separator.
    pub fn new_session(&self) -> EditorSession {
        EditorSession::with_naming(self.header_naming())
            .with_grouping_separator(self.grouping_separator)
    }
}
