use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::feed::LoadingStage;
use crate::ui::renderer::FeedView;
use crate::ui::utils::{key_sequence_text, truncate_by_width};

pub const REFRESHING_TEXT: &str = "↻ Обновление...";
pub const LOADING_TEXT: &str = "Загрузка...";

/// Left half of the status line: what the feed is doing right now
pub fn create_status_line<'a>(view: &FeedView<'a>) -> Line<'a> {
    let colors = &view.config.colors;
    let state = view.state;

    if view.refreshing {
        return Line::from(Span::styled(
            REFRESHING_TEXT,
            Style::default().fg(colors.status_color()),
        ));
    }

    if state.stage() == LoadingStage::Failed && !state.items().is_empty() {
        let message = state
            .error_message()
            .unwrap_or(crate::feed::GENERIC_ERROR_MESSAGE);
        let mut spans = vec![Span::styled(
            message,
            Style::default()
                .fg(colors.error_color())
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(key) = view.config.binds.retry.first() {
            spans.push(Span::styled(
                format!("  [{key}] повторить"),
                Style::default().fg(colors.status_color()),
            ));
        }
        return Line::from(spans);
    }

    if view.loading {
        return Line::from(Span::styled(
            LOADING_TEXT,
            Style::default().fg(colors.status_color()),
        ));
    }

    let mut text = format!("Загружено: {}", state.review_count());
    if state.skipped_records() > 0 {
        text.push_str(&format!(", пропущено: {}", state.skipped_records()));
    }
    Line::from(Span::styled(text, Style::default().fg(colors.status_color())))
}

/// Render the status line: feed activity on the left, the pending key
/// sequence (or the source name) on the right.
pub fn render_status_line(buf: &mut Buffer, area: Rect, view: &FeedView) {
    if area.height == 0 {
        return;
    }

    let colors = &view.config.colors;
    let right = match key_sequence_text(view.key_binds.current_sequence()) {
        Some(sequence) => Line::from(vec![
            Span::styled("Seq: ", Style::default().fg(colors.border_title_color())),
            Span::styled(sequence, Style::default().fg(colors.author_color())),
        ]),
        None => {
            let max = (area.width / 3) as usize;
            Line::from(Span::styled(
                truncate_by_width(view.source_name, max),
                Style::default().fg(colors.created_color()),
            ))
        }
    };

    let right_width = (right.width() as u16).min(area.width);
    let left_width = area.width.saturating_sub(right_width + 1);

    create_status_line(view).render(Rect::new(area.x, area.y, left_width, 1), buf);
    right.render(
        Rect::new(area.right() - right_width, area.y, right_width, 1),
        buf,
    );
}
