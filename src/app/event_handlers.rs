use crossterm::event::{Event, KeyEvent, KeyEventKind};

use super::App;
use crate::app::actions::FeedAction;
use crate::app::navigation::Navigation;

/// Trait for event handling
pub trait EventHandlers {
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()>;
    fn on_key_event(&mut self, key: KeyEvent);
    fn quit(&mut self);
}

impl EventHandlers for App {
    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        match crossterm::event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Resize(width, height) => {
                log::debug!("Terminal resized to {width}x{height}");
                self.dirty.check_terminal_size(width, height);
            }
            _ => {}
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        // Any key closes the warnings popup and is otherwise ignored
        if self.show_config_warnings_popup {
            self.show_config_warnings_popup = false;
            self.dirty.mark_full_redraw();
            return;
        }

        let was_awaiting = self.key_binds.is_awaiting_input();
        let action = self.key_binds.handle_key(key);
        if was_awaiting || self.key_binds.is_awaiting_input() {
            self.dirty.mark_status();
        }

        match action {
            Some(FeedAction::Quit) => self.quit(),
            Some(action) => self.handle_feed_action(action),
            None => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        crate::app::logging::log_user_interaction("quit", None);
        self.running = false;
    }
}
