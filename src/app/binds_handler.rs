use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::app::actions::FeedAction;
use crate::app::config::binds::KeyMap;

/// How long a partially typed key sequence waits for its next key
const SEQUENCE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Sequential key binding configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialKeyBinding {
    pub sequence: Vec<(KeyModifiers, KeyCode)>,
    pub action: FeedAction,
}

/// Key binding state for sequential input
#[derive(Debug, Clone, PartialEq)]
pub enum KeyState {
    Idle,
    Awaiting {
        sequence: Vec<(KeyModifiers, KeyCode)>,
        timeout: Instant,
    },
}

#[derive(Debug)]
pub struct KeyBinds {
    single_map: KeyMap,
    sequential_bindings: Vec<SequentialKeyBinding>,
    current_state: KeyState,
    timeout: Duration,
}

impl KeyBinds {
    pub fn new(single_map: KeyMap, sequential_bindings: Vec<SequentialKeyBinding>) -> Self {
        Self {
            single_map,
            sequential_bindings,
            current_state: KeyState::Idle,
            timeout: SEQUENCE_TIMEOUT,
        }
    }

    /// Map a key press to an action, tracking multi-key sequences
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FeedAction> {
        self.handle_key_at(key, Instant::now())
    }

    fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> Option<FeedAction> {
        let key_tuple = (key.modifiers, key.code);

        if let KeyState::Awaiting { sequence, timeout } = &mut self.current_state {
            if *timeout >= now {
                sequence.push(key_tuple);
                let sequence = sequence.clone();
                return self.continue_sequence(sequence, now);
            }
            // Timed out, treat this key as a fresh press
            self.current_state = KeyState::Idle;
        }

        if let Some(action) = self.single_map.get(&key_tuple) {
            return Some(*action);
        }

        if self.could_start_sequence(key_tuple) {
            self.current_state = KeyState::Awaiting {
                sequence: vec![key_tuple],
                timeout: now + self.timeout,
            };
        }
        None
    }

    fn continue_sequence(
        &mut self,
        sequence: Vec<(KeyModifiers, KeyCode)>,
        now: Instant,
    ) -> Option<FeedAction> {
        if let Some(binding) = self
            .sequential_bindings
            .iter()
            .find(|binding| binding.sequence == sequence)
        {
            self.current_state = KeyState::Idle;
            return Some(binding.action);
        }

        let still_possible = self
            .sequential_bindings
            .iter()
            .any(|binding| binding.sequence.starts_with(&sequence));

        self.current_state = if still_possible {
            KeyState::Awaiting {
                sequence,
                timeout: now + self.timeout,
            }
        } else {
            // No match, reset sequence without fallback
            KeyState::Idle
        };
        None
    }

    /// Check if a key could start a sequential binding
    fn could_start_sequence(&self, key_tuple: (KeyModifiers, KeyCode)) -> bool {
        self.sequential_bindings
            .iter()
            .any(|binding| binding.sequence.first() == Some(&key_tuple))
    }

    /// Get current key sequence for UI display
    pub fn current_sequence(&self) -> &[(KeyModifiers, KeyCode)] {
        match &self.current_state {
            KeyState::Awaiting { sequence, .. } => sequence,
            KeyState::Idle => &[],
        }
    }

    pub fn is_awaiting_input(&self) -> bool {
        matches!(self.current_state, KeyState::Awaiting { .. })
    }

    /// Drop a half-typed sequence once it timed out. Returns whether the
    /// state changed so the caller can redraw.
    pub fn update(&mut self) -> bool {
        self.expire_at(Instant::now())
    }

    fn expire_at(&mut self, now: Instant) -> bool {
        if let KeyState::Awaiting { timeout, .. } = &self.current_state
            && *timeout < now
        {
            self.current_state = KeyState::Idle;
            return true;
        }
        false
    }
}
