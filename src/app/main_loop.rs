use std::time::Duration;

use ratatui::DefaultTerminal;

use super::{App, AppChannels};
use crate::app::event_handlers::EventHandlers;
use crate::feed::LoadingStage;
use crate::ui::FeedView;

/// How often avatar cache statistics go to the log
const CACHE_STATS_INTERVAL_SECS: u64 = 60;

/// Trait for main application loop
pub trait AppMainLoop {
    async fn run(self, terminal: DefaultTerminal, channels: AppChannels) -> color_eyre::Result<()>
    where
        Self: Sized;
}

impl AppMainLoop for App {
    /// Run the application's main loop.
    async fn run(
        mut self,
        mut terminal: DefaultTerminal,
        mut channels: AppChannels,
    ) -> color_eyre::Result<()> {
        self.running = true;
        self.engine.start();

        let stats_interval =
            tokio::time::interval(Duration::from_secs(CACHE_STATS_INTERVAL_SECS));
        tokio::pin!(stats_interval);

        #[cfg(unix)]
        let mut sigint =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
        #[cfg(unix)]
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

        log::info!("Entering event-driven main loop");

        while self.running {
            if self.key_binds.update() {
                self.dirty.mark_status();
            }

            let size = terminal.size()?;
            self.dirty.check_terminal_size(size.width, size.height);

            if self.dirty.any_dirty() {
                let view = FeedView {
                    state: self.engine.state(),
                    loading: self.engine.is_loading(),
                    refreshing: self.engine.is_refreshing(),
                    config: &self.config,
                    key_binds: &self.key_binds,
                    source_name: &self.source_name,
                    warnings: self
                        .show_config_warnings_popup
                        .then_some(self.config_warnings.as_slice()),
                };
                terminal.draw(|frame| {
                    crate::ui::render(frame, &view, &mut self.screen, &mut self.loader);
                })?;
                let scrolled = self.dirty.is_selection_dirty();
                self.dirty.clear_all();

                // After a failure only a user scroll counts as the next trigger
                let failed = self.engine.state().stage() == LoadingStage::Failed;
                if (!failed || scrolled)
                    && self.engine.load_more_if_needed(self.screen.scroll_signal())
                {
                    self.dirty.mark_status();
                }
            }

            tokio::select! {
                // Keyboard events (with short timeout for responsive UI)
                _ = tokio::time::sleep(Duration::from_millis(10)) => {
                    if crossterm::event::poll(Duration::from_millis(0))? {
                        self.handle_crossterm_events()?;
                    }
                }

                Some(response) = channels.feed.responses.recv() => {
                    self.engine.handle_response(response);
                }

                Some(command) = channels.feed.commands.recv() => {
                    self.engine.handle_command(command);
                }

                Some(message) = channels.avatars.recv() => {
                    let deliveries = self.loader.complete(message);
                    if self.screen.deliver(&deliveries) {
                        self.dirty.mark_avatars();
                    }
                }

                _ = stats_interval.tick() => {
                    self.loader.cache().log_stats();
                    log::debug!("Avatar fetches in flight: {}", self.loader.in_flight());
                }
            }

            // Check for Unix signals outside of select! to avoid conditional compilation issues
            #[cfg(unix)]
            {
                use std::pin::Pin;
                use std::task::Poll;

                let waker = futures::task::noop_waker();
                let mut cx = std::task::Context::from_waker(&waker);

                if let Poll::Ready(Some(())) = Pin::new(&mut sigint).poll_recv(&mut cx) {
                    log::info!("Received SIGINT, shutting down gracefully");
                    self.quit();
                }

                if let Poll::Ready(Some(())) = Pin::new(&mut sigterm).poll_recv(&mut cx) {
                    log::info!("Received SIGTERM, shutting down gracefully");
                    self.quit();
                }
            }
        }

        log::info!("Exiting main loop");
        self.loader.cache().log_stats();

        Ok(())
    }
}
