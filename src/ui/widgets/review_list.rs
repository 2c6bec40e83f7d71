use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use super::avatar::{AVATAR_WIDTH, render_avatar};
use crate::app::config::Config;
use crate::app::screen::{ReviewScreen, RowSlot};
use crate::feed::{AVATAR_GUTTER, AVATAR_ROWS, RowLine, SHOW_MORE_LABEL};
use crate::ui::utils::rating_stars;

const SELECTION_BAR: &str = "▎";

/// Draw the rows bound by the last layout pass.
pub fn render_review_list(buf: &mut Buffer, area: Rect, screen: &ReviewScreen, config: &Config) {
    for row in screen.rows() {
        let selected = row.item_index == screen.selected();
        render_row(buf, area, row, selected, config);
    }
}

fn render_row(buf: &mut Buffer, area: Rect, row: &RowSlot, selected: bool, config: &Config) {
    let top = area.y + row.y;
    let bottom = area.bottom();
    if top >= bottom {
        return;
    }

    let lines = row.content.lines.iter().skip(row.skip as usize);

    for (y, line) in (top..bottom).zip(lines) {
        match line {
            RowLine::Summary(label) => {
                let width = (label.width() as u16).min(area.width);
                let x = area.x + (area.width - width) / 2;
                let styled = Line::from(Span::styled(
                    label.as_str(),
                    Style::default()
                        .fg(config.colors.summary_color())
                        .add_modifier(Modifier::BOLD),
                ));
                buf.set_line(x, y, &styled, width);
            }
            RowLine::Blank => {}
            line => {
                let styled = styled_review_line(line, config);
                let x = area.x + AVATAR_GUTTER;
                buf.set_line(x, y, &styled, area.width.saturating_sub(AVATAR_GUTTER));
                if selected {
                    buf.set_string(
                        x - 1,
                        y,
                        SELECTION_BAR,
                        Style::default().fg(config.colors.selected_highlight_color()),
                    );
                }
            }
        }
    }

    // Only reviews carry an avatar
    let Some(RowLine::Header { author, .. }) = row.content.lines.first() else {
        return;
    };
    let visible_rows = AVATAR_ROWS.saturating_sub(row.skip).min(bottom - top);
    let avatar_area = Rect::new(area.x + 1, top, AVATAR_WIDTH, visible_rows);
    render_avatar(
        buf,
        avatar_area,
        row.skip,
        row.avatar.swatch(),
        author.chars().next(),
        &config.colors,
    );
}

fn styled_review_line<'a>(line: &'a RowLine, config: &Config) -> Line<'a> {
    let colors = &config.colors;
    match line {
        RowLine::Header { author, rating } => {
            let (filled, empty) = rating_stars(*rating);
            Line::from(vec![
                Span::styled(
                    author.as_str(),
                    Style::default()
                        .fg(colors.author_color())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(filled, Style::default().fg(colors.rating_filled_color())),
                Span::styled(empty, Style::default().fg(colors.rating_empty_color())),
            ])
        }
        RowLine::Body(text) => {
            Line::from(Span::styled(text.as_str(), Style::default().fg(colors.body_color())))
        }
        RowLine::ShowMore => Line::from(Span::styled(
            SHOW_MORE_LABEL,
            Style::default()
                .fg(colors.show_more_color())
                .add_modifier(Modifier::UNDERLINED),
        )),
        RowLine::Created(created) => Line::from(Span::styled(
            created.as_str(),
            Style::default()
                .fg(colors.created_color())
                .add_modifier(Modifier::ITALIC),
        )),
        RowLine::Summary(_) | RowLine::Blank => Line::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::fetcher::{AvatarError, AvatarFetcher};
    use crate::avatar::{AvatarLoader, new_shared_cache};
    use crate::feed::items::{ExpandHandle, ItemId, ReviewItem, SummaryItem};
    use crate::feed::record::ReviewRecord;
    use crate::feed::{ListItem, ReviewCountDeclension};
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    struct OfflineFetcher;

    impl AvatarFetcher for OfflineFetcher {
        fn fetch(&self, _resource: &str) -> BoxFuture<'static, Result<Vec<u8>, AvatarError>> {
            async { Err(AvatarError::Transport("offline".into())) }.boxed()
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[tokio::test]
    async fn test_review_and_summary_rows_are_drawn() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let record = ReviewRecord {
            text: "Всё понравилось".to_string(),
            created: "1 июня".to_string(),
            first_name: "Олег".to_string(),
            last_name: "Иванов".to_string(),
            rating: 4,
            avatar_url: "https://example.com/a.png".to_string(),
        };
        let items = vec![
            ListItem::Review(ReviewItem::from_record(
                ItemId(1),
                record,
                3,
                ExpandHandle::new(ItemId(1), tx),
            )),
            ListItem::Summary(SummaryItem::new(ItemId(2), 1, &ReviewCountDeclension)),
        ];

        let (mut loader, _avatars) =
            AvatarLoader::new(new_shared_cache(4), Arc::new(OfflineFetcher));
        let mut screen = ReviewScreen::new();
        screen.update(&items, 40, 8, &mut loader);

        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        render_review_list(&mut buf, area, &screen, &Config::default());

        assert!(row_text(&buf, 0).contains("Олег Иванов  ★★★★☆"));
        assert!(row_text(&buf, 1).contains("Всё понравилось"));
        assert!(row_text(&buf, 2).contains("1 июня"));
        assert_eq!(row_text(&buf, 4).trim(), "1 отзыв");
        // Placeholder avatar carries the author's initial
        assert_eq!(buf[(2, 0)].symbol(), "О");
    }
}
