use ratatui::{prelude::*, widgets::*};
use reader_core::{epub::cover::describe_data_url, BookMetadata};
use unicode_segmentation::UnicodeSegmentation;

use crate::layout::centered_rect;

/// Blocking message shown until dismissed, e.g. a failed load.
pub struct AlertView {
    pub title: String,
    pub message: String,
}

impl AlertView {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let popup_area = centered_rect(60, 30, area);
        let block = Block::default()
            .title(format!("{} (Esc to close)", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let body = Paragraph::new(self.message.clone())
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(Clear, popup_area);
        f.render_widget(body, popup_area);
    }
}

/// Details about the loaded text.
pub struct InfoView {
    pub metadata: Option<BookMetadata>,
    pub word_count: usize,
    pub fingerprint: String,
    pub online_lookup: bool,
}

impl InfoView {
    pub fn lines(&self, max_w: usize) -> Vec<String> {
        let meta = self.metadata.clone().unwrap_or_default();
        let field = |label: &str, value: Option<&str>| {
            truncate_with_ellipsis(
                &format!("{label}: {}", value.unwrap_or("unknown")),
                max_w,
            )
        };
        let cover = match meta.cover.as_deref() {
            Some(url) => match describe_data_url(url) {
                Some((mime, size)) => format!("embedded {mime}, {size} bytes"),
                None => url.to_string(),
            },
            None => "none".to_string(),
        };
        vec![
            field("Title", meta.title.as_deref()),
            field("Author", meta.author.as_deref()),
            field("Cover", Some(cover.as_str())),
            format!("Words: {}", self.word_count),
            format!("Fingerprint: {}", self.fingerprint),
            format!(
                "Online lookup: {}",
                if self.online_lookup { "on" } else { "off" }
            ),
        ]
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let popup_area = centered_rect(70, 50, area);
        let max_w = popup_area.width.saturating_sub(2) as usize;
        let block = Block::default()
            .title("Book info (Esc or i to close)")
            .borders(Borders::ALL);
        let body = Paragraph::new(self.lines(max_w).join("\n")).block(block);
        f.render_widget(Clear, popup_area);
        f.render_widget(body, popup_area);
    }
}

const HELP_LINES: &[&str] = &[
    "Space: play / pause",
    "Left / Right: previous / next word (Ctrl or Shift: 10 words)",
    "Up / Down: WPM +25 / -25",
    "+ / -: WPM +10 / -10",
    "[ / ]: dim / brighten side words",
    "w: cycle words per display (1-5)",
    "r / Home: back to the first word",
    "o: open an .epub or .txt file",
    "i: book info",
    "n: toggle online metadata lookup",
    "?: toggle this help",
    "Esc: close the topmost overlay",
    "q / Ctrl-C: quit",
];

pub struct HelpView;

impl HelpView {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let popup_area = centered_rect(70, 70, area);
        let help = Paragraph::new(HELP_LINES.join("\n"))
            .block(
                Block::default()
                    .title("Help (Esc or ? to close)")
                    .borders(Borders::ALL),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(Clear, popup_area);
        f.render_widget(help, popup_area);
    }
}

fn truncate_with_ellipsis(text: &str, max_w: usize) -> String {
    if max_w == 0 {
        return String::new();
    }
    let gs: Vec<&str> = text.graphemes(true).collect();
    if gs.len() <= max_w {
        return text.to_string();
    }
    if max_w == 1 {
        return "…".to_string();
    }
    let keep = max_w.saturating_sub(1);
    format!("{}…", gs[..keep].concat())
}
