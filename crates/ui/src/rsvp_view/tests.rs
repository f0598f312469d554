use std::time::Instant;

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use super::RsvpView;

fn render(view: &RsvpView, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|f| {
            let area = f.area();
            view.render(f, area, None);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

fn pivot_cell(view: &RsvpView, buffer: &Buffer) -> Option<(u16, u16, String)> {
    let area = buffer.area;
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = &buffer[(x, y)];
            if cell.fg == view.theme.pivot_fg && cell.symbol().trim() != "" {
                return Some((x, y, cell.symbol().to_string()));
            }
        }
    }
    None
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

#[test]
fn step_back_saturates_at_zero() {
    let now = Instant::now();
    let mut view = RsvpView::new("one two three", 300, 1, 0.3);
    view.playback.step_back(5, now);
    assert_eq!(view.index(), 0);
    view.playback.step_forward(10, now);
    assert_eq!(view.index(), 2);
}

#[test]
fn wpm_adjustment_clamps() {
    let mut view = RsvpView::new("one", 60, 1, 0.3);
    view.playback.adjust_wpm(-100);
    assert_eq!(view.wpm(), 50);
    view.playback.adjust_wpm(3000);
    assert_eq!(view.wpm(), 1500);
}

#[test]
fn toggle_switches_between_playing_and_paused() {
    let now = Instant::now();
    let mut view = RsvpView::new("one two", 300, 1, 0.3);
    assert!(!view.is_playing());
    view.playback.toggle(now);
    assert!(view.is_playing());
    view.playback.toggle(now);
    assert!(!view.is_playing());
}

#[test]
fn opacity_steps_land_on_bounds() {
    let mut view = RsvpView::new("one", 300, 1, 0.3);
    for _ in 0..3 {
        view.adjust_opacity(-1);
    }
    assert_eq!(view.side_opacity, 0.0);
    view.adjust_opacity(-1);
    assert_eq!(view.side_opacity, 0.0);
    for _ in 0..12 {
        view.adjust_opacity(1);
    }
    assert_eq!(view.side_opacity, 1.0);
}

#[test]
fn words_per_display_cycles_back_to_one() {
    let now = Instant::now();
    let mut view = RsvpView::new("a b c d e f", 300, 1, 0.3);
    let seen: Vec<usize> = (0..5)
        .map(|_| {
            view.cycle_words_per_display(now);
            view.playback.words_per_display()
        })
        .collect();
    assert_eq!(seen, vec![2, 3, 4, 5, 1]);
}

#[test]
fn set_text_stops_and_resumes_at_index() {
    let now = Instant::now();
    let mut view = RsvpView::new("one two", 300, 1, 0.3);
    view.playback.play(now);
    view.set_text("a b c d", 2, now);
    assert!(!view.is_playing());
    assert_eq!(view.index(), 2);
    assert_eq!(view.word_count(), 4);
}

#[test]
fn pivot_letter_sits_in_centre_column() {
    let view = RsvpView::new("reading", 300, 1, 0.3);
    let buffer = render(&view, 21, 7);
    let (x, _, symbol) = pivot_cell(&view, &buffer).expect("pivot cell rendered");
    assert_eq!(x, 10);
    assert_eq!(symbol, "a");
}

#[test]
fn pivot_stays_centred_for_short_words() {
    let view = RsvpView::new("hi", 300, 1, 0.3);
    let buffer = render(&view, 30, 7);
    let (x, _, symbol) = pivot_cell(&view, &buffer).expect("pivot cell rendered");
    assert_eq!(x, 15);
    assert_eq!(symbol, "i");
}

#[test]
fn side_words_follow_opacity() {
    let now = Instant::now();
    let mut view = RsvpView::new("one reading two", 300, 1, 1.0);
    view.playback.seek(1, now);
    let buffer = render(&view, 21, 7);
    let (_, y, _) = pivot_cell(&view, &buffer).expect("pivot cell rendered");
    assert_eq!(row_text(&buffer, y).trim(), "one reading two");

    view.side_opacity = 0.0;
    let buffer = render(&view, 21, 7);
    let (_, y, _) = pivot_cell(&view, &buffer).expect("pivot cell rendered");
    assert_eq!(row_text(&buffer, y).trim(), "reading");
}

#[test]
fn empty_text_shows_hint() {
    let view = RsvpView::new("", 300, 1, 0.3);
    let buffer = render(&view, 70, 7);
    let text: String = (0..7).map(|y| row_text(&buffer, y)).collect();
    assert!(text.contains("Press o to open"));
    assert!(pivot_cell(&view, &buffer).is_none());
}
