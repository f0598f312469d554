use ratatui::{prelude::*, widgets::*};
use unicode_segmentation::UnicodeSegmentation;

use super::RsvpView;

const EMPTY_HINT: &str = "Nothing to read. Press o to open an .epub or .txt file.";

impl RsvpView {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect, status: Option<&str>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(f, chunks[0]);
        self.render_word(f, chunks[1]);
        self.render_progress(f, chunks[2]);
        self.render_status(f, chunks[3], status);
    }

    fn render_header(&self, f: &mut Frame<'_>, area: Rect) {
        let title = self.title.clone().unwrap_or_else(|| "rapid".to_string());
        let header = Paragraph::new(Line::styled(
            title,
            Style::default()
                .fg(self.theme.header_fg)
                .bg(self.theme.header_bg),
        ))
        .alignment(Alignment::Center)
        .bg(self.theme.header_bg);
        f.render_widget(header, area);
    }

    fn render_word(&self, f: &mut Frame<'_>, area: Rect) {
        f.render_widget(Clear, area);
        if area.width == 0 || area.height == 0 {
            return;
        }
        let row = area.y + area.height / 2;
        let line_area = Rect {
            x: area.x,
            y: row,
            width: area.width,
            height: 1,
        };

        if self.playback.is_empty() {
            let hint = Paragraph::new(Line::styled(
                EMPTY_HINT,
                Style::default().fg(self.theme.side_fg(0.6)),
            ))
            .alignment(Alignment::Center);
            f.render_widget(hint, line_area);
            return;
        }

        let pivot_x = area.x + area.width / 2;
        if area.height >= 3 {
            let guide = Style::default().fg(self.theme.side_fg(0.5));
            for (y, mark) in [(row - 1, "╷"), (row + 1, "╵")] {
                let rect = Rect {
                    x: pivot_x,
                    y,
                    width: 1,
                    height: 1,
                };
                f.render_widget(Paragraph::new(mark).style(guide), rect);
            }
        }

        let line = self.word_line((pivot_x - area.x) as usize);
        f.render_widget(Paragraph::new(line), line_area);
    }

    /// The display line with the pivot letter at column `left_cols`.
    pub(super) fn word_line(&self, left_cols: usize) -> Line<'static> {
        let group = self.playback.current_group();
        let orp = self.playback.current_orp();
        let graphemes: Vec<&str> = group.graphemes(true).collect();
        let orp = orp.min(graphemes.len().saturating_sub(1));

        let word_style = Style::default().fg(self.theme.word_fg);
        let pivot_style = Style::default()
            .fg(self.theme.pivot_fg)
            .add_modifier(Modifier::BOLD);
        let side_style = Style::default().fg(self.theme.side_fg(self.side_opacity));
        let show_sides = self.side_opacity > 0.0;

        let mut left: Vec<(String, Style)> = Vec::new();
        if show_sides {
            if let Some(prev) = self.playback.previous_word() {
                left.push((prev.to_string(), side_style));
                left.push((" ".to_string(), Style::default()));
            }
        }
        left.push((graphemes[..orp].concat(), word_style));
        let left = clip_front(left, left_cols);
        let used: usize = left.iter().map(|(s, _)| s.graphemes(true).count()).sum();

        let mut spans = vec![Span::raw(" ".repeat(left_cols.saturating_sub(used)))];
        spans.extend(left.into_iter().map(|(s, style)| Span::styled(s, style)));
        if let Some(pivot) = graphemes.get(orp) {
            spans.push(Span::styled(pivot.to_string(), pivot_style));
        }
        spans.push(Span::styled(
            graphemes.get(orp + 1..).unwrap_or_default().concat(),
            word_style,
        ));
        if show_sides {
            if let Some(next) = self.playback.following_word() {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(next.to_string(), side_style));
            }
        }
        Line::from(spans)
    }

    fn render_progress(&self, f: &mut Frame<'_>, area: Rect) {
        let progress = self.playback.progress();

        let bar_width = area.width.saturating_sub(8) as usize;
        let filled = (bar_width as f32 * progress).round() as usize;
        let empty = bar_width.saturating_sub(filled);

        let filled_bar = "▮".repeat(filled);
        let empty_bar = "▯".repeat(empty);
        let percentage = (progress * 100.0) as usize;

        let progress_line = Line::from(vec![
            Span::styled("[", Style::default().fg(Color::DarkGray)),
            Span::styled(filled_bar, Style::default().fg(self.theme.footer_fg)),
            Span::styled(empty_bar, Style::default().fg(Color::DarkGray)),
            Span::styled("]", Style::default().fg(Color::DarkGray)),
            Span::raw(" "),
            Span::styled(
                format!("{}%", percentage),
                Style::default().fg(self.theme.footer_fg),
            ),
        ]);

        let paragraph = Paragraph::new(progress_line)
            .bg(self.theme.footer_pad_bg)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }

    fn render_status(&self, f: &mut Frame<'_>, area: Rect, status: Option<&str>) {
        let word_display = if self.playback.is_empty() {
            "0/0".to_string()
        } else {
            format!("{}/{}", self.index() + 1, self.word_count())
        };

        let status_icon = if self.is_playing() { "▶" } else { "⏸" };
        let status_text = if self.is_playing() { "Playing" } else { "Paused" };

        let mut spans = vec![
            Span::styled(
                format!("{} WPM  ", self.wpm()),
                Style::default().fg(self.theme.footer_fg),
            ),
            Span::styled(
                format!("Word {}  ", word_display),
                Style::default().fg(self.theme.footer_fg),
            ),
            Span::styled(
                format!(
                    "x{}  side {:.0}%  ",
                    self.playback.words_per_display(),
                    self.side_opacity * 100.0
                ),
                Style::default().fg(self.theme.footer_fg),
            ),
            Span::styled(
                format!("{} {}", status_icon, status_text),
                Style::default()
                    .fg(if self.is_playing() {
                        Color::Green
                    } else {
                        Color::Yellow
                    })
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(status) = status {
            spans.push(Span::styled(
                format!("  {status}"),
                Style::default().fg(self.theme.header_fg),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .bg(self.theme.footer_bg)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }
}

/// Drop graphemes from the front of `segments` until at most `max` remain.
fn clip_front(segments: Vec<(String, Style)>, max: usize) -> Vec<(String, Style)> {
    let total: usize = segments.iter().map(|(s, _)| s.graphemes(true).count()).sum();
    let mut to_drop = total.saturating_sub(max);
    let mut out = Vec::with_capacity(segments.len());
    for (text, style) in segments {
        let count = text.graphemes(true).count();
        if to_drop >= count {
            to_drop -= count;
            continue;
        }
        let kept: String = text.graphemes(true).skip(to_drop).collect();
        to_drop = 0;
        out.push((kept, style));
    }
    out
}

#[cfg(test)]
mod clip_tests {
    use super::*;

    #[test]
    fn clip_front_drops_leading_graphemes() {
        let segs = vec![
            ("abc".to_string(), Style::default()),
            (" ".to_string(), Style::default()),
            ("de".to_string(), Style::default()),
        ];
        let clipped = clip_front(segs.clone(), 4);
        let text: String = clipped.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(text, "c de");
        let all: String = clip_front(segs, 10).iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(all, "abc de");
    }
}
