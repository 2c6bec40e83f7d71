use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColorsConfig {
    #[serde(default = "ColorsConfig::default_border")]
    pub border: String,
    #[serde(default = "ColorsConfig::default_border_title")]
    pub border_title: String,
    #[serde(default = "ColorsConfig::default_author")]
    pub author: String,
    #[serde(default = "ColorsConfig::default_rating_filled")]
    pub rating_filled: String,
    #[serde(default = "ColorsConfig::default_rating_empty")]
    pub rating_empty: String,
    #[serde(default = "ColorsConfig::default_body")]
    pub body: String,
    #[serde(default = "ColorsConfig::default_show_more")]
    pub show_more: String,
    #[serde(default = "ColorsConfig::default_created")]
    pub created: String,
    #[serde(default = "ColorsConfig::default_summary")]
    pub summary: String,
    #[serde(default = "ColorsConfig::default_selected_highlight")]
    pub selected_highlight: String,
    #[serde(default = "ColorsConfig::default_error")]
    pub error: String,
    #[serde(default = "ColorsConfig::default_status")]
    pub status: String,
    #[serde(default = "ColorsConfig::default_avatar_placeholder")]
    pub avatar_placeholder: String,
}

impl ColorsConfig {
    /// Parse a hex color string like "#FF5500" into RGB values
    pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    fn color(hex: &str, fallback: Color) -> Color {
        Self::parse_hex(hex)
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(fallback)
    }

    pub fn border_color(&self) -> Color {
        Self::color(&self.border, Color::White)
    }

    pub fn border_title_color(&self) -> Color {
        Self::color(&self.border_title, Color::White)
    }

    pub fn author_color(&self) -> Color {
        Self::color(&self.author, Color::White)
    }

    pub fn rating_filled_color(&self) -> Color {
        Self::color(&self.rating_filled, Color::Yellow)
    }

    pub fn rating_empty_color(&self) -> Color {
        Self::color(&self.rating_empty, Color::DarkGray)
    }

    pub fn body_color(&self) -> Color {
        Self::color(&self.body, Color::White)
    }

    pub fn show_more_color(&self) -> Color {
        Self::color(&self.show_more, Color::Blue)
    }

    pub fn created_color(&self) -> Color {
        Self::color(&self.created, Color::Gray)
    }

    pub fn summary_color(&self) -> Color {
        Self::color(&self.summary, Color::Gray)
    }

    pub fn selected_highlight_color(&self) -> Color {
        Self::color(&self.selected_highlight, Color::DarkGray)
    }

    pub fn error_color(&self) -> Color {
        Self::color(&self.error, Color::Red)
    }

    pub fn status_color(&self) -> Color {
        Self::color(&self.status, Color::Cyan)
    }

    pub fn avatar_placeholder_color(&self) -> Color {
        Self::color(&self.avatar_placeholder, Color::DarkGray)
    }

    fn default_border() -> String {
        "#fae280".to_string()
    }

    fn default_border_title() -> String {
        "#8193af".to_string()
    }

    fn default_author() -> String {
        "#fbeee3".to_string()
    }

    fn default_rating_filled() -> String {
        "#ffb800".to_string()
    }

    fn default_rating_empty() -> String {
        "#4d4d4d".to_string()
    }

    fn default_body() -> String {
        "#d8d8d8".to_string()
    }

    fn default_show_more() -> String {
        "#5b8def".to_string()
    }

    fn default_created() -> String {
        "#8a8a8a".to_string()
    }

    fn default_summary() -> String {
        "#8a8a8a".to_string()
    }

    fn default_selected_highlight() -> String {
        "#2a2a3a".to_string()
    }

    fn default_error() -> String {
        "#ff5f5f".to_string()
    }

    fn default_status() -> String {
        "#8193af".to_string()
    }

    fn default_avatar_placeholder() -> String {
        "#3a3a3a".to_string()
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            border: Self::default_border(),
            border_title: Self::default_border_title(),
            author: Self::default_author(),
            rating_filled: Self::default_rating_filled(),
            rating_empty: Self::default_rating_empty(),
            body: Self::default_body(),
            show_more: Self::default_show_more(),
            created: Self::default_created(),
            summary: Self::default_summary(),
            selected_highlight: Self::default_selected_highlight(),
            error: Self::default_error(),
            status: Self::default_status(),
            avatar_placeholder: Self::default_avatar_placeholder(),
        }
    }
}
