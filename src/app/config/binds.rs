use crate::app::actions::FeedAction;
use crate::app::binds_handler::SequentialKeyBinding;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type KeyMap = HashMap<(KeyModifiers, KeyCode), FeedAction>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BindsConfig {
    #[serde(default = "BindsConfig::default_quit")]
    pub quit: Vec<String>,
    #[serde(default = "BindsConfig::default_scroll_up")]
    pub scroll_up: Vec<String>,
    #[serde(default = "BindsConfig::default_scroll_down")]
    pub scroll_down: Vec<String>,
    #[serde(default = "BindsConfig::default_page_up")]
    pub page_up: Vec<String>,
    #[serde(default = "BindsConfig::default_page_down")]
    pub page_down: Vec<String>,
    #[serde(default = "BindsConfig::default_go_to_top")]
    pub go_to_top: Vec<String>,
    #[serde(default = "BindsConfig::default_go_to_bottom")]
    pub go_to_bottom: Vec<String>,
    #[serde(default = "BindsConfig::default_refresh")]
    pub refresh: Vec<String>,
    #[serde(default = "BindsConfig::default_expand")]
    pub expand: Vec<String>,
    #[serde(default = "BindsConfig::default_retry")]
    pub retry: Vec<String>,
}

impl BindsConfig {
    fn default_quit() -> Vec<String> {
        vec!["q".to_string(), "esc".to_string(), "ctrl-c".to_string()]
    }
    fn default_scroll_up() -> Vec<String> {
        vec!["k".to_string(), "up".to_string()]
    }
    fn default_scroll_down() -> Vec<String> {
        vec!["j".to_string(), "down".to_string()]
    }
    fn default_page_up() -> Vec<String> {
        vec!["pageup".to_string(), "ctrl-u".to_string()]
    }
    fn default_page_down() -> Vec<String> {
        vec!["pagedown".to_string(), "ctrl-d".to_string()]
    }
    fn default_go_to_top() -> Vec<String> {
        vec!["g g".to_string(), "home".to_string()]
    }
    fn default_go_to_bottom() -> Vec<String> {
        vec!["shift-g".to_string(), "end".to_string()]
    }
    fn default_refresh() -> Vec<String> {
        vec!["r".to_string(), "f5".to_string()]
    }
    fn default_expand() -> Vec<String> {
        vec!["enter".to_string(), "space".to_string()]
    }
    fn default_retry() -> Vec<String> {
        vec!["shift-r".to_string()]
    }

    /// Parse a single key like "ctrl-d", "shift-g" or "pagedown"
    pub fn parse_keybinding(key_str: &str) -> Option<(KeyModifiers, KeyCode)> {
        let key_str = key_str.to_lowercase();

        // Special case for standalone "-" character
        if key_str == "-" {
            return Some((KeyModifiers::NONE, KeyCode::Char('-')));
        }

        let parts: Vec<&str> = key_str.split('-').collect();
        let (key_part, modifier_parts) = parts.split_last()?;

        let mut modifiers = KeyModifiers::NONE;
        for part in modifier_parts {
            match *part {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match *key_part {
            "esc" => KeyCode::Esc,
            "enter" => KeyCode::Enter,
            "backspace" => KeyCode::Backspace,
            "tab" => KeyCode::Tab,
            "delete" => KeyCode::Delete,
            "insert" => KeyCode::Insert,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            f if f.len() > 1 && f.starts_with('f') => {
                let n: u8 = f[1..].parse().ok()?;
                if !(1..=12).contains(&n) {
                    return None;
                }
                KeyCode::F(n)
            }
            // Handle characters - if shift is present, capitalize
            c => {
                let mut chars = c.chars();
                let ch = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                if modifiers.contains(KeyModifiers::SHIFT) {
                    KeyCode::Char(ch.to_ascii_uppercase())
                } else {
                    KeyCode::Char(ch)
                }
            }
        };

        Some((modifiers, code))
    }

    /// Parse a binding string that may contain space-separated sequential keys
    pub fn parse_binding_string(binding_str: &str) -> Vec<(KeyModifiers, KeyCode)> {
        binding_str
            .split_whitespace()
            .filter_map(Self::parse_keybinding)
            .collect()
    }

    /// Build the single-key map and the list of multi-key sequences
    pub fn build_key_maps(&self) -> (KeyMap, Vec<SequentialKeyBinding>) {
        let mut single_map = HashMap::new();
        let mut sequential_bindings = Vec::new();

        let bindings: [(&[String], FeedAction); 10] = [
            (&self.quit, FeedAction::Quit),
            (&self.scroll_up, FeedAction::ScrollUp),
            (&self.scroll_down, FeedAction::ScrollDown),
            (&self.page_up, FeedAction::PageUp),
            (&self.page_down, FeedAction::PageDown),
            (&self.go_to_top, FeedAction::GoToTop),
            (&self.go_to_bottom, FeedAction::GoToBottom),
            (&self.refresh, FeedAction::Refresh),
            (&self.expand, FeedAction::ExpandSelected),
            (&self.retry, FeedAction::Retry),
        ];

        for (binding_strings, action) in bindings {
            Self::add_binding_for_action(
                binding_strings,
                action,
                &mut single_map,
                &mut sequential_bindings,
            );
        }

        (single_map, sequential_bindings)
    }

    /// Helper method to add bindings that may be sequential
    fn add_binding_for_action(
        binding_strings: &[String],
        action: FeedAction,
        single_map: &mut KeyMap,
        sequential_bindings: &mut Vec<SequentialKeyBinding>,
    ) {
        for binding_str in binding_strings {
            let key_sequence = Self::parse_binding_string(binding_str);

            match key_sequence.len() {
                0 => log::warn!("Ignoring unparseable key binding: {binding_str:?}"),
                1 => {
                    single_map.insert(key_sequence[0], action);
                }
                _ => sequential_bindings.push(SequentialKeyBinding {
                    sequence: key_sequence,
                    action,
                }),
            }
        }
    }
}

impl Default for BindsConfig {
    fn default() -> Self {
        Self {
            quit: Self::default_quit(),
            scroll_up: Self::default_scroll_up(),
            scroll_down: Self::default_scroll_down(),
            page_up: Self::default_page_up(),
            page_down: Self::default_page_down(),
            go_to_top: Self::default_go_to_top(),
            go_to_bottom: Self::default_go_to_bottom(),
            refresh: Self::default_refresh(),
            expand: Self::default_expand(),
            retry: Self::default_retry(),
        }
    }
}
