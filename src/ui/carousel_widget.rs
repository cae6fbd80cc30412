//! Carousel widget — the panel strip, the arrows and the indicator dots.
//!
//! Geometry (`CarouselGeometry`) is pure layout math shared between the
//! widget (rendering) and the handler (hit-testing), so a click is resolved
//! against exactly what was drawn.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::core::carousel::Carousel;
use crate::core::deck::Panel;
use crate::ui::theme::Theme;

const ARROW_WIDTH: u16 = 3;
/// Each dot is drawn as `●` plus a trailing space; both cells are clickable.
const DOT_WIDTH: u16 = 2;

// ─── geometry ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselGeometry {
    pub prev_rect: Rect,
    pub next_rect: Rect,
    /// One rect per panel, or empty when the dots don't fit and a
    /// `k / N` counter is shown instead.
    pub dot_rects: Vec<Rect>,
}

impl CarouselGeometry {
    pub fn compute(strip: Rect, dots: Option<Rect>, panel_count: usize) -> Self {
        let arrow_y = strip.y + strip.height / 2;
        let prev_rect = Rect::new(strip.x, arrow_y, ARROW_WIDTH.min(strip.width), 1);
        let next_rect = Rect::new(
            strip.x + strip.width.saturating_sub(ARROW_WIDTH),
            arrow_y,
            ARROW_WIDTH.min(strip.width),
            1,
        );

        let mut dot_rects = Vec::new();
        if let Some(row) = dots {
            let needed = panel_count as u32 * u32::from(DOT_WIDTH);
            if needed <= u32::from(row.width) {
                let start = row.x + (row.width - needed as u16) / 2;
                dot_rects = (0..panel_count as u16)
                    .map(|i| Rect::new(start + i * DOT_WIDTH, row.y, DOT_WIDTH, 1))
                    .collect();
            }
        }

        Self {
            prev_rect,
            next_rect,
            dot_rects,
        }
    }
}

// ─── widget ─────────────────────────────────────────────────────

pub struct CarouselWidget<'a> {
    pub carousel: &'a Carousel<Panel>,
    /// Extra horizontal displacement from the slide animation.
    pub slide_offset: i32,
    pub dots_area: Option<Rect>,
}

impl<'a> Widget for CarouselWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for pos in self.carousel.positions() {
            let x = pos.offset_pct * i64::from(area.width) / 100 + i64::from(self.slide_offset);
            if x >= i64::from(area.width) || x + i64::from(area.width) <= 0 {
                continue;
            }
            let panel = &self.carousel.panels()[pos.index];
            render_panel_clipped(panel, x as i32, area, buf);
        }

        let geom = CarouselGeometry::compute(area, self.dots_area, self.carousel.len());
        if self.carousel.len() > 1 {
            Paragraph::new(Line::from(Span::styled(" ◀", Theme::arrow_style())))
                .render(geom.prev_rect, buf);
            Paragraph::new(Line::from(Span::styled("▶ ", Theme::arrow_style())))
                .render(geom.next_rect, buf);
        }

        if let Some(row) = self.dots_area {
            render_indicators(self.carousel, &geom, row, buf);
        }
    }
}

/// Draw `panel` as if its left edge were at column `x` of `area`, copying
/// only the cells that land inside `area`.
fn render_panel_clipped(panel: &Panel, x: i32, area: Rect, buf: &mut Buffer) {
    let local = Rect::new(0, 0, area.width, area.height);
    let mut scratch = Buffer::empty(local);

    let block = Block::default()
        .title(Span::styled(format!(" {} ", panel.title), Theme::panel_title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::panel_border_style());
    let inner = block.inner(local);
    block.render(local, &mut scratch);

    // Keep the body clear of the arrow columns.
    let body_area = Rect::new(
        inner.x.saturating_add(ARROW_WIDTH - 1),
        inner.y,
        inner.width.saturating_sub(2 * (ARROW_WIDTH - 1)),
        inner.height,
    );
    Paragraph::new(panel.body.as_str())
        .style(Theme::panel_body_style())
        .wrap(Wrap { trim: false })
        .render(body_area, &mut scratch);

    for sy in 0..area.height {
        for sx in 0..area.width {
            let dx = x + i32::from(sx);
            if dx < 0 || dx >= i32::from(area.width) {
                continue;
            }
            buf[(area.x + dx as u16, area.y + sy)] = scratch[(sx, sy)].clone();
        }
    }
}

fn render_indicators(
    carousel: &Carousel<Panel>,
    geom: &CarouselGeometry,
    row: Rect,
    buf: &mut Buffer,
) {
    if geom.dot_rects.is_empty() {
        let counter = format!("{} / {}", carousel.cursor() + 1, carousel.len());
        Paragraph::new(Line::from(Span::styled(counter, Theme::dot_active_style())))
            .centered()
            .render(row, buf);
        return;
    }

    for (ind, rect) in carousel.indicators().iter().zip(&geom.dot_rects) {
        let (symbol, style) = if ind.active {
            ("●", Theme::dot_active_style())
        } else {
            ("○", Theme::dot_inactive_style())
        };
        Paragraph::new(Line::from(Span::styled(symbol, style))).render(*rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Carousel<Panel> {
        let panels = (0..n)
            .map(|i| Panel {
                title: format!("P{i}"),
                body: format!("body {i}"),
            })
            .collect();
        Carousel::new(panels).unwrap()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.x + area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn dots_are_centred_one_per_panel() {
        let geom = CarouselGeometry::compute(
            Rect::new(0, 0, 20, 10),
            Some(Rect::new(0, 10, 20, 1)),
            4,
        );
        assert_eq!(geom.dot_rects.len(), 4);
        assert_eq!(geom.dot_rects[0].x, 6);
        assert_eq!(geom.dot_rects[3].x, 12);
        assert!(geom.dot_rects.iter().all(|r| r.y == 10));
    }

    #[test]
    fn too_many_dots_fall_back_to_counter() {
        let geom = CarouselGeometry::compute(
            Rect::new(0, 0, 10, 5),
            Some(Rect::new(0, 5, 10, 1)),
            6,
        );
        assert!(geom.dot_rects.is_empty());
    }

    #[test]
    fn arrows_sit_on_the_strip_edges() {
        let geom = CarouselGeometry::compute(Rect::new(2, 1, 30, 9), None, 3);
        assert_eq!(geom.prev_rect, Rect::new(2, 5, 3, 1));
        assert_eq!(geom.next_rect, Rect::new(29, 5, 3, 1));
    }

    #[test]
    fn only_current_panel_is_visible_at_rest() {
        let mut c = deck(3);
        c.next();
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 7));
        CarouselWidget {
            carousel: &c,
            slide_offset: 0,
            dots_area: Some(Rect::new(0, 6, 30, 1)),
        }
        .render(area, &mut buf);

        assert!(row_text(&buf, 0).contains(" P1 "));
        assert!(!row_text(&buf, 0).contains("P0"));
        assert!(!row_text(&buf, 0).contains("P2"));
        let dots = row_text(&buf, 6);
        assert_eq!(dots.matches('●').count(), 1);
        assert_eq!(dots.matches('○').count(), 2);
        assert!(dots.find('●') > dots.find('○'));
    }

    #[test]
    fn mid_slide_shows_both_neighbours() {
        let c = deck(2);
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        CarouselWidget {
            carousel: &c,
            slide_offset: -20,
            dots_area: None,
        }
        .render(area, &mut buf);

        let top = row_text(&buf, 0);
        assert!(top.contains("P1"), "{top}");
    }
}
