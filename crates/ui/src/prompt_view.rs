use std::path::PathBuf;

use ratatui::{prelude::*, widgets::*};
use unicode_segmentation::UnicodeSegmentation;

/// Single-line path input for opening a file.
pub struct PromptView {
    pub input: String,
}

impl PromptView {
    pub fn new() -> Self {
        Self {
            input: String::new(),
        }
    }

    pub fn with_input(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.input.grapheme_indices(true).last() {
            self.input.truncate(idx);
        }
    }

    /// The entered path, with surrounding quotes and a leading `~/` expanded.
    pub fn path(&self) -> Option<PathBuf> {
        let trimmed = self.input.trim().trim_matches(|c| c == '"' || c == '\'');
        if trimmed.is_empty() {
            return None;
        }
        if let Some(rest) = trimmed.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return Some(home.join(rest));
            }
        }
        Some(PathBuf::from(trimmed))
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut width = ((area.width as f32) * 0.6) as u16;
        width = width.max(20).min(area.width.saturating_sub(2).max(1)); // keep borders visible
        let height: u16 = 3;
        let popup_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        let block = Block::default()
            .title("Open .epub or .txt (Enter open, Esc cancel)")
            .borders(Borders::ALL);
        let prompt = Paragraph::new(format!("> {}", self.input)).block(block);
        f.render_widget(Clear, popup_area);
        f.render_widget(prompt, popup_area);
    }
}

impl Default for PromptView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut prompt = PromptView::with_input("cafe\u{301}");
        prompt.backspace();
        assert_eq!(prompt.input, "caf");
    }

    #[test]
    fn control_chars_are_ignored() {
        let mut prompt = PromptView::new();
        prompt.push_char('a');
        prompt.push_char('\u{7}');
        assert_eq!(prompt.input, "a");
    }

    #[test]
    fn path_strips_quotes_and_blank_input() {
        assert_eq!(PromptView::with_input("   ").path(), None);
        assert_eq!(
            PromptView::with_input(" '/tmp/my book.epub' ").path(),
            Some(PathBuf::from("/tmp/my book.epub"))
        );
    }
}
