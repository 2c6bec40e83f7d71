use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use unicode_width::UnicodeWidthChar;

pub const STAR_FILLED: char = '★';
pub const STAR_EMPTY: char = '☆';
pub const MAX_RATING: u8 = 5;

/// Truncate a string to fit within the given display width, handling Unicode properly
pub fn truncate_by_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let char_width = ch.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(ch);
        current_width += char_width;
    }

    result
}

/// Filled and empty halves of a five star rating. Out of range ratings are clamped.
pub fn rating_stars(rating: u8) -> (String, String) {
    let filled = rating.min(MAX_RATING);
    (
        std::iter::repeat_n(STAR_FILLED, filled as usize).collect(),
        std::iter::repeat_n(STAR_EMPTY, (MAX_RATING - filled) as usize).collect(),
    )
}

/// Helper function to center a rect within another rect
pub fn center_area(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}

/// Human-readable form of a pending key sequence, e.g. `g → g`
pub fn key_sequence_text(sequence: &[(KeyModifiers, KeyCode)]) -> Option<String> {
    if sequence.is_empty() {
        return None;
    }

    let text = sequence
        .iter()
        .map(|(modifiers, key_code)| {
            let key_str = match key_code {
                KeyCode::Char(c) => c.to_string(),
                KeyCode::Esc => "Esc".to_string(),
                KeyCode::Enter => "Enter".to_string(),
                KeyCode::Home => "Home".to_string(),
                KeyCode::End => "End".to_string(),
                KeyCode::PageUp => "PageUp".to_string(),
                KeyCode::PageDown => "PageDown".to_string(),
                KeyCode::Up => "↑".to_string(),
                KeyCode::Down => "↓".to_string(),
                KeyCode::F(n) => format!("F{n}"),
                _ => format!("{key_code:?}"),
            };

            let mut result = String::new();
            if modifiers.contains(KeyModifiers::CONTROL) {
                result.push_str("Ctrl+");
            }
            if modifiers.contains(KeyModifiers::ALT) {
                result.push_str("Alt+");
            }
            if modifiers.contains(KeyModifiers::SHIFT) {
                result.push_str("Shift+");
            }
            result.push_str(&key_str);
            result
        })
        .collect::<Vec<_>>()
        .join(" → ");
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_by_width_wide_chars() {
        assert_eq!(truncate_by_width("Отзыв", 3), "Отз");
        assert_eq!(truncate_by_width("日本語", 5), "日本");
        assert_eq!(truncate_by_width("ok", 10), "ok");
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(rating_stars(3), ("★★★".to_string(), "☆☆".to_string()));
        assert_eq!(rating_stars(0).0, "");
        assert_eq!(rating_stars(9), ("★★★★★".to_string(), String::new()));
    }

    #[test]
    fn test_key_sequence_text() {
        let seq = [
            (KeyModifiers::NONE, KeyCode::Char('g')),
            (KeyModifiers::CONTROL, KeyCode::Char('r')),
        ];
        assert_eq!(key_sequence_text(&seq).as_deref(), Some("g → Ctrl+r"));
        assert_eq!(key_sequence_text(&[]), None);
    }
}
