use crate::app::config::binds::BindsConfig;
use crate::app::config::cache::CacheConfig;
use crate::app::config::colors::ColorsConfig;
use crate::app::config::feed::FeedConfig;
use crate::app::config::logging::LoggingConfig;
use crate::app::config::source::SourceConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
    #[serde(default)]
    pub binds: BindsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Known top-level sections
const KNOWN_SECTIONS: &[&str] = &["source", "feed", "cache", "colors", "binds", "logging"];

/// Known fields per section
const KNOWN_FIELDS: &[(&str, &[&str])] = &[
    (
        "source",
        &["kind", "endpoint", "file", "page_size", "timeout_secs"],
    ),
    ("feed", &["look_ahead_screens", "collapsed_lines"]),
    ("cache", &["max_entries"]),
    (
        "colors",
        &[
            "border",
            "border_title",
            "author",
            "rating_filled",
            "rating_empty",
            "body",
            "show_more",
            "created",
            "summary",
            "selected_highlight",
            "error",
            "status",
            "avatar_placeholder",
        ],
    ),
    (
        "binds",
        &[
            "quit",
            "scroll_up",
            "scroll_down",
            "page_up",
            "page_down",
            "go_to_top",
            "go_to_bottom",
            "refresh",
            "expand",
            "retry",
        ],
    ),
    (
        "logging",
        &[
            "enabled",
            "level",
            "log_to_console",
            "append_to_file",
            "rotate_logs",
            "rotation_size_mb",
            "keep_log_files",
            "custom_log_path",
        ],
    ),
];

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Use two rows instead of full matrix for memory efficiency
    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

/// Find the most similar string from a list of candidates
fn find_similar(unknown: &str, candidates: &[&str]) -> Option<String> {
    let unknown_lower = unknown.to_lowercase();

    candidates
        .iter()
        .map(|&candidate| {
            let distance = levenshtein_distance(&unknown_lower, &candidate.to_lowercase());
            (candidate, distance)
        })
        .filter(|(candidate, distance)| {
            // At least 3 edits allowed, more for long names
            let max_len = unknown.len().max(candidate.len());
            *distance <= (max_len / 2).max(3)
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate.to_string())
}

/// Format an unknown config warning with optional "did you mean" suggestion
fn format_unknown_warning(section: Option<&str>, key: &str, suggestion: Option<&str>) -> String {
    match (section, suggestion) {
        (None, Some(s)) => format!("Unknown config section: [{key}] (did you mean: [{s}]?)"),
        (None, None) => format!("Unknown config section: [{key}]"),
        (Some(section), Some(s)) => {
            format!("Unknown option in [{section}]: {key} (did you mean: {s}?)")
        }
        (Some(section), None) => format!("Unknown option in [{section}]: {key}"),
    }
}

impl Config {
    /// Returns the default config file path based on the platform:
    /// - Linux: ~/.config/reviewfeed/config.toml (XDG_CONFIG_HOME)
    /// - macOS: ~/Library/Application Support/reviewfeed/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\reviewfeed\config.toml
    pub fn default_config_path() -> color_eyre::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine config directory"))?;
        Ok(config_dir.join("reviewfeed").join("config.toml"))
    }

    /// Load the config, creating a default file if none exists. Returns the
    /// config together with warnings to log once the logger is up.
    pub fn load(config_path: Option<PathBuf>) -> color_eyre::Result<(Self, Vec<String>)> {
        let config_path = match config_path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let default_config = Config::default();
            let toml_string = toml::to_string_pretty(&default_config)?;
            std::fs::write(&config_path, &toml_string)?;

            return Ok((default_config, Vec::new()));
        }

        let contents = std::fs::read_to_string(&config_path)?;
        Ok(Self::parse(&contents))
    }

    /// Parse config text. A file that does not parse falls back to the
    /// defaults with a warning instead of failing startup.
    pub fn parse(contents: &str) -> (Self, Vec<String>) {
        let mut warnings = Self::check_unknown_fields(contents);

        let config = toml::from_str(contents).unwrap_or_else(|e| {
            warnings.push(format!("Failed to parse config file, using defaults: {e}"));
            Config::default()
        });
        (config, warnings)
    }

    /// Check for unknown fields in the config file and return warnings
    fn check_unknown_fields(contents: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        // Let the main parser report syntax errors
        let Ok(table) = toml::from_str::<toml::Table>(contents) else {
            return warnings;
        };

        for key in table.keys() {
            if !KNOWN_SECTIONS.contains(&key.as_str()) {
                let suggestion = find_similar(key, KNOWN_SECTIONS);
                warnings.push(format_unknown_warning(None, key, suggestion.as_deref()));
            }
        }

        for (section, known) in KNOWN_FIELDS {
            let Some(toml::Value::Table(fields)) = table.get(*section) else {
                continue;
            };
            for key in fields.keys() {
                if !known.contains(&key.as_str()) {
                    let suggestion = find_similar(key, known);
                    warnings.push(format_unknown_warning(
                        Some(*section),
                        key,
                        suggestion.as_deref(),
                    ));
                }
            }
        }

        warnings
    }

    /// Generate a default config file at the specified path
    pub fn generate_default(path: PathBuf) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        if path.exists() {
            return Err(color_eyre::eyre::eyre!(
                "Config file already exists at: {}",
                path.display()
            ));
        }

        let toml_string = toml::to_string_pretty(&Config::default())?;
        std::fs::write(&path, &toml_string)?;

        println!("Generated default config at: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::source::SourceKind;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("page_size", "page_size"), 0);
    }

    #[test]
    fn test_find_similar() {
        assert_eq!(
            find_similar("pagesize", &["page_size", "endpoint"]),
            Some("page_size".to_string())
        );
        assert_eq!(find_similar("zzzzzzzzzzzz", &["kind"]), None);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let (config, warnings) = Config::parse("");
        assert!(warnings.is_empty());
        assert_eq!(config.source.page_size, 20);
        assert_eq!(config.source.kind, SourceKind::Http);
        assert_eq!(config.feed.look_ahead_screens, 2.5);
        assert_eq!(config.feed.collapsed_lines, 3);
        assert_eq!(config.cache.max_entries, 64);
    }

    #[test]
    fn test_partial_config_overrides() {
        let (config, warnings) = Config::parse(
            r#"
            [source]
            kind = "file"
            file = "reviews.json"
            page_size = 10

            [feed]
            look_ahead_screens = 1.0
            "#,
        );
        assert!(warnings.is_empty());
        assert_eq!(config.source.kind, SourceKind::File);
        assert_eq!(config.source.file.as_deref(), Some("reviews.json"));
        assert_eq!(config.source.page_size, 10);
        assert_eq!(config.source.timeout_secs, 10);
        assert_eq!(config.feed.look_ahead_screens, 1.0);
    }

    #[test]
    fn test_unknown_keys_warn_with_suggestions() {
        let (_, warnings) = Config::parse(
            r#"
            [sourse]
            endpoint = "x"

            [feed]
            colapsed_lines = 4
            "#,
        );
        assert_eq!(warnings.len(), 2);
        assert_eq!(
            warnings[0],
            "Unknown config section: [sourse] (did you mean: [source]?)"
        );
        assert_eq!(
            warnings[1],
            "Unknown option in [feed]: colapsed_lines (did you mean: collapsed_lines?)"
        );
    }

    #[test]
    fn test_invalid_config_falls_back_with_warning() {
        let (config, warnings) = Config::parse("[source]\npage_size = \"lots\"\n");
        assert_eq!(config.source.page_size, 20);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to parse config file"));
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let (config, warnings) = Config::parse(&text);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.binds.go_to_top, vec!["g g", "home"]);
    }
}
