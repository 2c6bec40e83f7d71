use std::rc::Rc;
use std::sync::Arc;

use color_eyre::eyre::eyre;

use super::{App, AppChannels};
use crate::app::binds_handler::KeyBinds;
use crate::app::config::source::SourceConfig;
use crate::app::config::{Config, SourceKind};
use crate::app::screen::ReviewScreen;
use crate::avatar::{AvatarLoader, HttpAvatarFetcher, new_shared_cache};
use crate::feed::{
    EngineOptions, FileReviewSource, HttpReviewSource, PaginationEngine, ReviewCountDeclension,
    ReviewSource,
};
use crate::ui::DirtyFlags;

/// Trait for App construction
pub trait AppConstructor {
    fn new_with_config(
        config: Config,
        warnings: Vec<String>,
    ) -> color_eyre::Result<(Self, AppChannels)>
    where
        Self: Sized;
}

impl AppConstructor for App {
    /// Construct a new instance of [`App`] together with the channels its
    /// background work reports on.
    fn new_with_config(
        config: Config,
        warnings: Vec<String>,
    ) -> color_eyre::Result<(Self, AppChannels)> {
        let (source, source_name) = build_source(&config.source)?;

        let options = EngineOptions {
            page_size: config.source.page_size,
            look_ahead_screens: config.feed.look_ahead_screens,
            collapsed_lines: config.feed.collapsed_lines,
        };
        let (mut engine, feed) =
            PaginationEngine::new(source, Box::new(ReviewCountDeclension), options);

        let dirty = Rc::new(DirtyFlags::new());

        let feed_dirty = Rc::clone(&dirty);
        engine.on_state_change(move |state| {
            log::trace!(
                "Feed changed: {} rows, stage {:?}",
                state.items().len(),
                state.stage()
            );
            feed_dirty.mark_feed();
        });

        let refresh_dirty = Rc::clone(&dirty);
        engine.on_refresh_finished(move || {
            log::debug!("Refresh finished");
            refresh_dirty.mark_status();
        });

        let fetcher = HttpAvatarFetcher::new(config.source.timeout())?;
        let cache = new_shared_cache(config.cache.max_entries);
        let (loader, avatars) = AvatarLoader::new(cache, Arc::new(fetcher));

        let (single_map, sequential) = config.binds.build_key_maps();
        let key_binds = KeyBinds::new(single_map, sequential);

        let show_config_warnings_popup = !warnings.is_empty();

        let app = Self {
            running: false,
            config,
            engine,
            loader,
            screen: ReviewScreen::new(),
            key_binds,
            dirty,
            config_warnings: warnings,
            show_config_warnings_popup,
            source_name,
        };

        Ok((app, AppChannels { feed, avatars }))
    }
}

/// Pick the review source named by the config. Returns the source and a
/// label for the title bar.
fn build_source(config: &SourceConfig) -> color_eyre::Result<(Arc<dyn ReviewSource>, String)> {
    match config.kind {
        SourceKind::Http => {
            let source = HttpReviewSource::new(&config.endpoint, config.timeout())?;
            log::info!("Paging reviews from {}", config.endpoint);
            Ok((Arc::new(source), config.endpoint.clone()))
        }
        SourceKind::File => {
            let path = config
                .file
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .ok_or_else(|| eyre!("[source] kind = \"file\" requires a `file` path"))?;
            log::info!("Paging reviews from file {path}");
            Ok((Arc::new(FileReviewSource::new(path)), path.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source_requires_path() {
        let config = SourceConfig {
            kind: SourceKind::File,
            file: None,
            ..SourceConfig::default()
        };
        assert!(build_source(&config).is_err());
    }

    #[test]
    fn test_file_source_uses_path_as_name() {
        let config = SourceConfig {
            kind: SourceKind::File,
            file: Some("reviews.json".to_string()),
            ..SourceConfig::default()
        };
        let (_, name) = build_source(&config).unwrap();
        assert_eq!(name, "reviews.json");
    }
}
