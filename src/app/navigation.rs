use super::App;
use crate::app::actions::FeedAction;
use crate::app::logging::log_user_interaction;
use crate::feed::LoadingStage;

/// Trait for moving around the feed and acting on it
pub trait Navigation {
    fn handle_feed_action(&mut self, action: FeedAction);
    fn refresh_feed(&mut self);
    fn expand_selected(&mut self);
}

impl Navigation for App {
    fn handle_feed_action(&mut self, action: FeedAction) {
        let len = self.engine.state().items().len();
        match action {
            FeedAction::Quit => self.running = false,
            FeedAction::ScrollDown => {
                // On the last row this still counts as a scroll, so it can retry a failed page
                let failed = self.engine.state().stage() == LoadingStage::Failed;
                if self.screen.select_next(len) || failed {
                    self.dirty.mark_selection();
                }
            }
            FeedAction::ScrollUp => {
                if self.screen.select_previous() {
                    self.dirty.mark_selection();
                }
            }
            FeedAction::PageDown => {
                self.screen.page_down(len);
                self.dirty.mark_selection();
            }
            FeedAction::PageUp => {
                self.screen.page_up();
                self.dirty.mark_selection();
            }
            FeedAction::GoToTop => {
                self.screen.go_to_top();
                self.dirty.mark_selection();
            }
            FeedAction::GoToBottom => {
                self.screen.go_to_bottom(len);
                self.dirty.mark_selection();
            }
            FeedAction::Refresh => self.refresh_feed(),
            FeedAction::ExpandSelected => self.expand_selected(),
            FeedAction::Retry => {
                log_user_interaction("retry", None);
                self.engine.start();
                self.dirty.mark_status();
            }
        }
    }

    /// Pull-to-refresh: drop everything and start again from offset zero
    fn refresh_feed(&mut self) {
        log_user_interaction("refresh", None);
        self.screen.reset();
        self.engine.refresh();
        self.dirty.mark_status();
    }

    fn expand_selected(&mut self) {
        let selected = self.screen.selected();
        let Some(review) = self
            .engine
            .state()
            .items()
            .get(selected)
            .and_then(|item| item.as_review())
        else {
            return;
        };
        if review.expanded {
            return;
        }
        log_user_interaction("expand", Some(&review.id.to_string()));
        review.show_more();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppChannels;
    use crate::app::config::{Config, SourceKind};
    use crate::app::constructor::AppConstructor;

    fn offline_app() -> (App, AppChannels) {
        let mut config = Config::default();
        config.source.kind = SourceKind::File;
        config.source.file = Some("/nonexistent/reviews.json".to_string());
        App::new_with_config(config, Vec::new()).unwrap()
    }

    #[tokio::test]
    async fn test_refresh_sets_indicator_until_finished() {
        let (mut app, mut channels) = offline_app();
        app.engine.start();
        let first = channels.feed.responses.recv().await.unwrap();
        app.engine.handle_response(first);
        assert_eq!(app.engine.state().stage(), LoadingStage::Failed);

        app.handle_feed_action(FeedAction::Refresh);
        assert!(app.engine.is_refreshing());
        assert_eq!(app.engine.state().stage(), LoadingStage::Refreshing);

        app.dirty.clear_all();
        let response = channels.feed.responses.recv().await.unwrap();
        app.engine.handle_response(response);
        assert!(!app.engine.is_refreshing());
        assert!(app.dirty.any_dirty());
    }

    #[tokio::test]
    async fn test_scroll_down_on_last_row_after_failure_counts_as_scroll() {
        let (mut app, mut channels) = offline_app();
        app.engine.start();
        let response = channels.feed.responses.recv().await.unwrap();
        app.engine.handle_response(response);
        assert_eq!(app.engine.state().stage(), LoadingStage::Failed);

        // Nothing below to select, yet the key press must reach the retry gate
        app.dirty.clear_all();
        app.handle_feed_action(FeedAction::ScrollDown);
        assert!(app.dirty.is_selection_dirty());

        // Without a failure the same press is a no-op
        app.handle_feed_action(FeedAction::Retry);
        app.dirty.clear_all();
        assert_ne!(app.engine.state().stage(), LoadingStage::Failed);
        app.handle_feed_action(FeedAction::ScrollDown);
        assert!(!app.dirty.is_selection_dirty());
    }

    #[tokio::test]
    async fn test_quit_stops_running() {
        let (mut app, _channels) = offline_app();
        app.running = true;
        app.handle_feed_action(FeedAction::Quit);
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_expand_without_rows_is_ignored() {
        let (mut app, mut channels) = offline_app();
        app.handle_feed_action(FeedAction::ExpandSelected);
        assert!(channels.feed.commands.try_recv().is_err());
    }
}
