use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::binds_handler::KeyBinds;
use crate::app::config::Config;
use crate::app::screen::ReviewScreen;
use crate::avatar::AvatarLoader;
use crate::feed::{FeedState, GENERIC_ERROR_MESSAGE, LoadingStage};
use crate::ui::utils::{center_area, truncate_by_width};
use crate::ui::widgets::status::LOADING_TEXT;
use crate::ui::widgets::{render_review_list, render_status_line};

const TITLE: &str = " Отзывы ";

/// Read-only inputs of a frame
pub struct FeedView<'a> {
    pub state: &'a FeedState,
    /// A page request is in flight
    pub loading: bool,
    pub refreshing: bool,
    pub config: &'a Config,
    pub key_binds: &'a KeyBinds,
    pub source_name: &'a str,
    /// Config warnings to show in a popup, if any
    pub warnings: Option<&'a [String]>,
}

/// Renders the user interface.
pub fn render(
    frame: &mut Frame<'_>,
    view: &FeedView,
    screen: &mut ReviewScreen,
    loader: &mut AvatarLoader,
) {
    let colors = &view.config.colors;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.border_color()))
        .title(Line::from(TITLE).fg(colors.border_title_color()));

    let area = frame.area();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [list_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    // Layout always runs so slots are released when the feed empties
    screen.update(view.state.items(), list_area.width, list_area.height, loader);

    if view.state.is_blocking_error() {
        let message = view.state.error_message().unwrap_or(GENERIC_ERROR_MESSAGE);
        render_full_screen_message(frame, list_area, view, message, true);
    } else if view.state.items().is_empty() {
        let message = if view.state.stage() == LoadingStage::Loaded {
            "Отзывов пока нет"
        } else {
            LOADING_TEXT
        };
        render_full_screen_message(frame, list_area, view, message, false);
    } else {
        render_review_list(frame.buffer_mut(), list_area, screen, view.config);
    }

    render_status_line(frame.buffer_mut(), status_area, view);

    if let Some(warnings) = view.warnings
        && !warnings.is_empty()
    {
        render_config_warnings_popup(frame, warnings, view.config);
    }
}

/// Centered message that replaces the list, with a retry hint for errors
fn render_full_screen_message(
    frame: &mut Frame,
    area: Rect,
    view: &FeedView,
    message: &str,
    is_error: bool,
) {
    let colors = &view.config.colors;
    let mut lines = vec![Line::from(Span::styled(
        message,
        if is_error {
            Style::default()
                .fg(colors.error_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.status_color())
        },
    ))];

    if is_error && let Some(key) = view.config.binds.retry.first() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[{key}] повторить"),
            Style::default().fg(colors.status_color()),
        )));
    }

    let width = lines
        .iter()
        .map(Line::width)
        .max()
        .unwrap_or(0)
        .min(area.width as usize) as u16;
    let height = (lines.len() as u16).min(area.height);
    let target = center_area(area, Constraint::Length(width), Constraint::Length(height));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        target,
    );
}

/// Render config warnings popup centered on screen
fn render_config_warnings_popup(frame: &mut Frame, warnings: &[String], config: &Config) {
    let area = frame.area();
    let title = " Unknown Config Options ";
    let footer = "Press any key to close";

    let max_content_width = warnings
        .iter()
        .map(|w| w.width())
        .max()
        .unwrap_or(20)
        .max(title.width())
        .max(footer.width());

    // Content + padding (2 on each side) + borders (1 on each side)
    let popup_width = (max_content_width + 6).min(area.width.saturating_sub(4) as usize) as u16;
    let text_width = popup_width.saturating_sub(4) as usize;

    // Warnings + spacer lines + footer + borders
    let popup_height = (warnings.len() + 5).min(area.height.saturating_sub(4) as usize) as u16;
    let popup_area = center_area(
        area,
        Constraint::Length(popup_width),
        Constraint::Length(popup_height),
    );

    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for warning in warnings {
        let display = if warning.width() > text_width {
            format!("{}...", truncate_by_width(warning, text_width.saturating_sub(3)))
        } else {
            warning.clone()
        };
        lines.push(Line::from(Span::styled(
            format!(" {display}"),
            Style::default().fg(config.colors.body_color()),
        )));
    }
    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled(
            footer,
            Style::default().fg(config.colors.border_title_color()),
        ))
        .centered(),
    );

    let popup_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(config.colors.selected_highlight_color()))
        .title(Line::from(title).fg(config.colors.border_title_color()))
        .style(Style::default().bg(ratatui::style::Color::Black));

    frame.render_widget(
        Paragraph::new(lines)
            .block(popup_block)
            .alignment(Alignment::Left),
        popup_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::fetcher::{AvatarError, AvatarFetcher};
    use crate::avatar::new_shared_cache;
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use ratatui::{Terminal, backend::TestBackend};
    use std::collections::HashMap;
    use std::sync::Arc;

    struct OfflineFetcher;

    impl AvatarFetcher for OfflineFetcher {
        fn fetch(&self, _resource: &str) -> BoxFuture<'static, Result<Vec<u8>, AvatarError>> {
            async { Err(AvatarError::Transport("offline".into())) }.boxed()
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_initial_loading_message() {
        let config = Config::default();
        let key_binds = KeyBinds::new(HashMap::new(), Vec::new());
        let state = FeedState::default();
        let view = FeedView {
            state: &state,
            loading: true,
            refreshing: false,
            config: &config,
            key_binds: &key_binds,
            source_name: "test",
            warnings: None,
        };
        let (mut loader, _rx) = AvatarLoader::new(new_shared_cache(2), Arc::new(OfflineFetcher));
        let mut screen = ReviewScreen::new();

        let mut terminal = Terminal::new(TestBackend::new(50, 12)).unwrap();
        terminal
            .draw(|frame| render(frame, &view, &mut screen, &mut loader))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Отзывы"));
        assert!(text.contains(LOADING_TEXT));
        assert!(screen.rows().is_empty());
    }

    #[test]
    fn test_warnings_popup_is_drawn() {
        let config = Config::default();
        let key_binds = KeyBinds::new(HashMap::new(), Vec::new());
        let state = FeedState::default();
        let warnings = vec!["Unknown field 'colour'".to_string()];
        let view = FeedView {
            state: &state,
            loading: false,
            refreshing: false,
            config: &config,
            key_binds: &key_binds,
            source_name: "test",
            warnings: Some(&warnings),
        };
        let (mut loader, _rx) = AvatarLoader::new(new_shared_cache(2), Arc::new(OfflineFetcher));
        let mut screen = ReviewScreen::new();

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal
            .draw(|frame| render(frame, &view, &mut screen, &mut loader))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Unknown field 'colour'"));
        assert!(text.contains("Press any key to close"));
    }
}
