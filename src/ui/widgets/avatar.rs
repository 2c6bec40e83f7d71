//! Avatars drawn with half blocks: every cell shows two vertically stacked
//! pixels, the upper one as foreground of `▀` and the lower one as background.

use image::RgbImage;
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use crate::app::config::colors::ColorsConfig;
use crate::avatar::SWATCH_WIDTH;
use crate::feed::AVATAR_ROWS;

pub const AVATAR_WIDTH: u16 = SWATCH_WIDTH as u16;
const UPPER_HALF: &str = "▀";

/// Draw the visible part of an avatar into `area`. `skip` is the number of
/// avatar rows scrolled out above it. Without a swatch a placeholder with
/// `initial` is drawn instead.
pub fn render_avatar(
    buf: &mut Buffer,
    area: Rect,
    skip: u16,
    swatch: Option<&RgbImage>,
    initial: Option<char>,
    colors: &ColorsConfig,
) {
    if area.width == 0 || area.height == 0 || skip >= AVATAR_ROWS {
        return;
    }

    match swatch {
        Some(swatch) => render_half_blocks(buf, area, skip, swatch),
        None => render_placeholder(buf, area, skip, initial, colors.avatar_placeholder_color()),
    }
}

fn render_half_blocks(buf: &mut Buffer, area: Rect, skip: u16, swatch: &RgbImage) {
    for (y, row) in visible_rows(area, skip) {
        for col in 0..area.width {
            let x = u32::from(col);
            let (Some(upper), Some(lower)) = (
                swatch.get_pixel_checked(x, u32::from(row) * 2),
                swatch.get_pixel_checked(x, u32::from(row) * 2 + 1),
            ) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut((area.x + col, y)) {
                cell.set_symbol(UPPER_HALF)
                    .set_fg(Color::Rgb(upper[0], upper[1], upper[2]))
                    .set_bg(Color::Rgb(lower[0], lower[1], lower[2]));
            }
        }
    }
}

/// Screen line and avatar row pairs for the part of the avatar inside `area`
fn visible_rows(area: Rect, skip: u16) -> impl Iterator<Item = (u16, u16)> {
    (skip..AVATAR_ROWS)
        .take(area.height as usize)
        .enumerate()
        .map(move |(i, row)| (area.y + i as u16, row))
}

fn render_placeholder(
    buf: &mut Buffer,
    area: Rect,
    skip: u16,
    initial: Option<char>,
    color: Color,
) {
    let middle_row = (AVATAR_ROWS - 1) / 2;
    let middle_col = (area.width.saturating_sub(1)) / 2;

    for (y, row) in visible_rows(area, skip) {
        for col in 0..area.width {
            if let Some(cell) = buf.cell_mut((area.x + col, y)) {
                cell.set_char(' ').set_bg(color).set_fg(Color::Black);
                if row == middle_row
                    && col == middle_col
                    && let Some(initial) = initial
                {
                    cell.set_char(initial);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(r: u8, g: u8, b: u8) -> RgbImage {
        RgbImage::from_pixel(SWATCH_WIDTH, u32::from(AVATAR_ROWS) * 2, Rgb([r, g, b]))
    }

    #[test]
    fn test_image_fills_area_with_half_blocks() {
        let area = Rect::new(0, 0, AVATAR_WIDTH, 2);
        let mut buf = Buffer::empty(area);
        render_avatar(
            &mut buf,
            area,
            0,
            Some(&solid(200, 10, 10)),
            None,
            &ColorsConfig::default(),
        );

        let cell = &buf[(1, 1)];
        assert_eq!(cell.symbol(), UPPER_HALF);
        assert_eq!(cell.fg, Color::Rgb(200, 10, 10));
        assert_eq!(cell.bg, Color::Rgb(200, 10, 10));
    }

    #[test]
    fn test_swatch_rows_map_to_cell_halves() {
        let mut swatch = solid(0, 0, 0);
        swatch.put_pixel(2, 2, Rgb([1, 2, 3]));
        swatch.put_pixel(2, 3, Rgb([4, 5, 6]));
        let area = Rect::new(0, 0, AVATAR_WIDTH, 2);
        let mut buf = Buffer::empty(area);
        render_avatar(&mut buf, area, 0, Some(&swatch), None, &ColorsConfig::default());

        let cell = &buf[(2, 1)];
        assert_eq!(cell.fg, Color::Rgb(1, 2, 3));
        assert_eq!(cell.bg, Color::Rgb(4, 5, 6));
        assert_eq!(buf[(2, 0)].fg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_placeholder_shows_initial() {
        let area = Rect::new(0, 0, AVATAR_WIDTH, 2);
        let mut buf = Buffer::empty(area);
        let colors = ColorsConfig::default();
        render_avatar(&mut buf, area, 0, None, Some('А'), &colors);

        assert_eq!(buf[(1, 0)].symbol(), "А");
        assert_eq!(buf[(0, 1)].bg, colors.avatar_placeholder_color());
    }

    #[test]
    fn test_scrolled_avatar_draws_lower_row_only() {
        let screen = Rect::new(0, 0, AVATAR_WIDTH, 3);
        let mut buf = Buffer::empty(screen);
        let colors = ColorsConfig::default();
        render_avatar(
            &mut buf,
            Rect::new(0, 0, AVATAR_WIDTH, 1),
            1,
            None,
            Some('А'),
            &colors,
        );

        // The initial sits on the hidden first row
        assert_eq!(buf[(1, 0)].symbol(), " ");
        assert_eq!(buf[(0, 0)].bg, colors.avatar_placeholder_color());
        assert_eq!(buf[(0, 1)], Buffer::empty(screen)[(0, 1)]);
    }
}
